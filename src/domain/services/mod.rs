pub mod password_service;
pub mod picture_store;
