use crate::domain::{error::DomainError, models::picture::UploadedPicture};

/// Registration form as collected from the request, every field optional.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<UploadedPicture>,
}

/// Registration form with every required field present.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub first_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub profile_picture: UploadedPicture,
}

impl RegistrationForm {
    /// Presence check only; values are otherwise taken as sent.
    pub fn validate(self) -> Result<ValidRegistration, DomainError> {
        let Self {
            first_name: Some(first_name),
            email: Some(email),
            password: Some(password),
            phone: Some(phone),
            profile_picture: Some(profile_picture),
        } = self
        else {
            return Err(DomainError::InvalidParams);
        };

        if profile_picture.filename.is_empty() {
            return Err(DomainError::InvalidParams);
        }

        Ok(ValidRegistration {
            first_name,
            email,
            password,
            phone,
            profile_picture,
        })
    }
}
