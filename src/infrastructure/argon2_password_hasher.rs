use argon2::{
    Argon2,
    password_hash::{PasswordHasher as Argon2Hasher, SaltString, rand_core::OsRng},
};

use crate::domain::{
    error::DomainError, models::user::HashedPassword,
    services::password_service::PasswordHasher,
};

#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    // No strength policy: any submitted password is accepted and hashed.
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|_| DomainError::PasswordHashing)?
            .to_string();

        Ok(HashedPassword::new(hash))
    }
}
