use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalidParams")]
    InvalidParams,

    #[error("Email already exist")]
    EmailAlreadyExists,

    #[error("Phone Number already exist")]
    PhoneAlreadyExists,

    #[error("Password hashing failed")]
    PasswordHashing,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Picture store error: {0}")]
    PictureStore(#[from] StorageError),
}

impl DomainError {
    /// Whether the caller sent something we refuse, as opposed to a fault on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParams | Self::EmailAlreadyExists | Self::PhoneAlreadyExists
        )
    }

    /// Short description of the failing component, safe to hand back to clients.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            Self::InvalidParams | Self::EmailAlreadyExists | Self::PhoneAlreadyExists => {
                "request rejected"
            }
            Self::PasswordHashing => "password hashing failed",
            Self::Repository(RepositoryError::DocumentStore(_)) => "document store unavailable",
            Self::Repository(_) => "relational store unavailable",
            Self::PictureStore(_) => "picture store unavailable",
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
