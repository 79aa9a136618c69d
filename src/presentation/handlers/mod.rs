pub mod home_handler;
pub mod user_handler;
