pub mod picture;
pub mod registration;
pub mod user;
pub mod user_document;
