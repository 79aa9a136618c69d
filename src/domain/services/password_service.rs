use crate::domain::{error::DomainError, models::user::HashedPassword};

/// Service turning a plaintext password into the form kept in the relational store
pub trait PasswordHasher: Clone {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;
}
