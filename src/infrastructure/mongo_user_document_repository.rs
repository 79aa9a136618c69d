use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::RepositoryError,
    models::{picture::StoredPictureName, user::UserId, user_document::UserDocument},
    repositories::user_document_repository::UserDocumentRepository,
};

const COLLECTION: &str = "users";

/// Shape of a document in the `users` collection. `_id` is left to the server.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocumentRecord {
    user_id: i32,
    profile_picture: String,
}

impl From<&UserDocument> for UserDocumentRecord {
    fn from(document: &UserDocument) -> Self {
        Self {
            user_id: document.user_id.as_i32(),
            profile_picture: document.profile_picture.as_str().to_string(),
        }
    }
}

impl From<UserDocumentRecord> for UserDocument {
    fn from(record: UserDocumentRecord) -> Self {
        UserDocument::new(
            UserId::new(record.user_id),
            StoredPictureName::from_stored(record.profile_picture),
        )
    }
}

fn map_mongo_err(err: mongodb::error::Error) -> RepositoryError {
    RepositoryError::DocumentStore(err.to_string())
}

#[derive(Clone)]
pub struct MongoUserDocumentRepository {
    collection: Collection<UserDocumentRecord>,
}

impl MongoUserDocumentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Non-unique index on `user_id`; lookups take the first match.
    pub async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        self.collection
            .create_index(index)
            .await
            .map_err(map_mongo_err)?;
        Ok(())
    }
}

#[async_trait]
impl UserDocumentRepository for MongoUserDocumentRepository {
    async fn insert(&self, document: &UserDocument) -> Result<(), RepositoryError> {
        self.collection
            .insert_one(UserDocumentRecord::from(document))
            .await
            .map_err(map_mongo_err)?;
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserDocument>, RepositoryError> {
        let record = self
            .collection
            .find_one(doc! { "user_id": user_id.as_i32() })
            .await
            .map_err(map_mongo_err)?;
        Ok(record.map(UserDocument::from))
    }

    async fn find_by_user_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserDocument>, RepositoryError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i32> = user_ids.iter().map(UserId::as_i32).collect();
        let records: Vec<UserDocumentRecord> = self
            .collection
            .find(doc! { "user_id": { "$in": ids } })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_mongo_err)?
            .try_collect()
            .await
            .map_err(map_mongo_err)?;

        let mut documents = HashMap::with_capacity(records.len());
        for record in records {
            let document = UserDocument::from(record);
            documents.entry(document.user_id).or_insert(document);
        }
        Ok(documents)
    }
}
