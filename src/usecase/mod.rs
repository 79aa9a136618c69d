pub mod list_users_usecase;
pub mod register_user_usecase;
