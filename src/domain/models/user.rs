use serde::{Deserialize, Serialize};

/// PHC-formatted password hash; the plaintext never reaches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn new(phc: String) -> Self {
        Self(phc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i32);
impl UserId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// User row as persisted in the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: String,
    password_hash: HashedPassword,
    email: String,
    phone: String,
}

impl User {
    pub fn new(
        id: UserId,
        first_name: String,
        password_hash: HashedPassword,
        email: String,
        phone: String,
    ) -> Self {
        Self {
            id,
            first_name,
            password_hash,
            email,
            phone,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// User about to be inserted; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub password_hash: HashedPassword,
    pub email: String,
    pub phone: String,
}
