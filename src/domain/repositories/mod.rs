pub mod user_document_repository;
pub mod user_repository;
