use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{user::UserId, user_document::UserDocument},
};

/// Document store holding the picture reference of each user.
#[async_trait]
pub trait UserDocumentRepository {
    async fn insert(&self, document: &UserDocument) -> Result<(), RepositoryError>;

    /// First document stored for `user_id`, if any.
    async fn find_by_user_id(&self, user_id: UserId)
    -> Result<Option<UserDocument>, RepositoryError>;

    /// First document per id; ids without a document are absent from the map.
    ///
    /// The default issues one point lookup per id. Stores able to answer a
    /// set query should override it.
    async fn find_by_user_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserDocument>, RepositoryError> {
        let mut documents = HashMap::with_capacity(user_ids.len());
        for &user_id in user_ids {
            if let Some(document) = self.find_by_user_id(user_id).await? {
                documents.insert(user_id, document);
            }
        }
        Ok(documents)
    }
}
