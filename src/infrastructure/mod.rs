pub mod argon2_password_hasher;
pub mod entities;
pub mod local_picture_store;
pub mod mongo_user_document_repository;
pub mod schema;
pub mod user_repository;
