use crate::domain::{
    error::DomainError,
    models::{user::User, user_document::UserDocument},
    repositories::{
        user_document_repository::UserDocumentRepository, user_repository::UserRepository,
    },
};

/// User row joined with its document, if one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithDocument {
    pub user: User,
    pub document: Option<UserDocument>,
}

pub struct ListUsersUsecase<U: UserRepository, D: UserDocumentRepository> {
    user_repository: U,
    document_repository: D,
}

impl<U, D> ListUsersUsecase<U, D>
where
    U: UserRepository + Send + Sync,
    D: UserDocumentRepository + Send + Sync,
{
    pub fn new(user_repository: U, document_repository: D) -> Self {
        Self {
            user_repository,
            document_repository,
        }
    }

    /// Every user in id order with its document looked up in one batch.
    pub async fn list(&self) -> Result<Vec<UserWithDocument>, DomainError> {
        let users = self.user_repository.find_all().await?;

        let ids: Vec<_> = users.iter().map(User::id).collect();
        let mut documents = self.document_repository.find_by_user_ids(&ids).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let document = documents.remove(&user.id());
                UserWithDocument { user, document }
            })
            .collect())
    }
}
