use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, User, UserId},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError>;
    /// Insert a user and return the id assigned by the store.
    async fn create(&self, new_user: &NewUser) -> Result<UserId, RepositoryError>;
    /// Every user, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
}
