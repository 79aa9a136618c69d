use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{
        picture::StoredPictureName,
        registration::RegistrationForm,
        user::{HashedPassword, NewUser, UserId},
        user_document::UserDocument,
    },
    repositories::{
        user_document_repository::UserDocumentRepository, user_repository::UserRepository,
    },
    services::{password_service::PasswordHasher, picture_store::PictureStore},
};

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user_id: UserId,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    /// Filename as uploaded by the client.
    pub original_filename: String,
    pub stored_picture: StoredPictureName,
}

pub struct RegisterUserUsecase<
    U: UserRepository,
    D: UserDocumentRepository,
    S: PictureStore,
    P: PasswordHasher,
> {
    user_repository: U,
    document_repository: D,
    picture_store: S,
    password_hasher: P,
}

impl<U, D, S, P> RegisterUserUsecase<U, D, S, P>
where
    U: UserRepository + Send + Sync,
    D: UserDocumentRepository + Send + Sync,
    S: PictureStore + Send + Sync,
    P: PasswordHasher + Send + Sync + 'static,
{
    pub fn new(
        user_repository: U,
        document_repository: D,
        picture_store: S,
        password_hasher: P,
    ) -> Self {
        Self {
            user_repository,
            document_repository,
            picture_store,
            password_hasher,
        }
    }

    /// Validate the form, then write picture, user row and user document in that order.
    ///
    /// The writes are not atomic together. A failed user insert removes the
    /// picture again; a failed document insert leaves the user row behind.
    pub async fn register(&self, form: RegistrationForm) -> Result<RegisteredUser, DomainError> {
        let form = form.validate()?;

        self.ensure_unique(&form.email, &form.phone).await?;

        let password_hash = self.hash_password(form.password).await?;

        let stored_picture = StoredPictureName::generate(&form.profile_picture.filename);
        self.picture_store
            .save(&stored_picture, form.profile_picture.content)
            .await?;

        let new_user = NewUser {
            first_name: form.first_name,
            password_hash,
            email: form.email,
            phone: form.phone,
        };
        let user_id = match self.user_repository.create(&new_user).await {
            Ok(user_id) => user_id,
            Err(err) => {
                self.discard_picture(&stored_picture).await;
                return Err(self.explain_insert_failure(err, &new_user).await);
            }
        };

        let document = UserDocument::new(user_id, stored_picture.clone());
        if let Err(err) = self.document_repository.insert(&document).await {
            tracing::error!(%user_id, error = %err, "user stored without its document");
            return Err(err.into());
        }

        tracing::info!(%user_id, picture = %stored_picture, "user registered");

        Ok(RegisteredUser {
            user_id,
            first_name: new_user.first_name,
            email: new_user.email,
            phone: new_user.phone,
            original_filename: form.profile_picture.filename,
            stored_picture,
        })
    }

    /// Argon2 is CPU and memory heavy; it runs on the blocking pool so the
    /// async workers keep serving other requests.
    async fn hash_password(&self, password: String) -> Result<HashedPassword, DomainError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "password hashing task failed");
                DomainError::PasswordHashing
            })?
    }

    /// Email is checked before phone, so a request clashing on both reports the email.
    async fn ensure_unique(&self, email: &str, phone: &str) -> Result<(), DomainError> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            tracing::warn!("registration rejected: email already exists");
            return Err(DomainError::EmailAlreadyExists);
        }
        if self.user_repository.find_by_phone(phone).await?.is_some() {
            tracing::warn!("registration rejected: phone already exists");
            return Err(DomainError::PhoneAlreadyExists);
        }
        Ok(())
    }

    /// A concurrent registration may win the race between the checks and the insert.
    async fn explain_insert_failure(&self, err: RepositoryError, new_user: &NewUser) -> DomainError {
        if !matches!(err, RepositoryError::UniqueViolation(_)) {
            return err.into();
        }
        match self.ensure_unique(&new_user.email, &new_user.phone).await {
            Err(conflict) => conflict,
            Ok(()) => err.into(),
        }
    }

    async fn discard_picture(&self, name: &StoredPictureName) {
        if let Err(err) = self.picture_store.remove(name).await {
            tracing::error!(picture = %name, error = %err, "failed to remove orphaned picture");
        }
    }
}
