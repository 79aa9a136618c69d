//! In-memory stand-ins for the stores, shared by the usecase and router tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    error::{DomainError, RepositoryError, StorageError},
    models::{
        picture::StoredPictureName,
        user::{HashedPassword, NewUser, User, UserId},
        user_document::UserDocument,
    },
    repositories::{
        user_document_repository::UserDocumentRepository, user_repository::UserRepository,
    },
    services::{password_service::PasswordHasher, picture_store::PictureStore},
};

#[derive(Default)]
struct UserTable {
    rows: Vec<User>,
    next_id: i32,
    unique_violation_on_next_insert: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<Mutex<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn snapshot(&self) -> Vec<User> {
        self.table.lock().unwrap().rows.clone()
    }

    /// Simulate a concurrent registration committing `email`/`phone` between
    /// the uniqueness checks and the next insert.
    pub fn fail_next_insert_with_unique_violation(&self, email: &str, phone: &str) {
        let mut table = self.table.lock().unwrap();
        table.unique_violation_on_next_insert = true;
        table.next_id += 1;
        let id = UserId::new(table.next_id);
        // Hidden until the failing insert runs; see `create`.
        table.rows.push(User::new(
            id,
            "racer".to_string(),
            HashedPassword::new("hashed:racer".to_string()),
            format!("pending:{email}"),
            format!("pending:{phone}"),
        ));
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.phone() == phone).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<UserId, RepositoryError> {
        let mut table = self.table.lock().unwrap();
        if table.unique_violation_on_next_insert {
            table.unique_violation_on_next_insert = false;
            for row in table.rows.iter_mut() {
                if let (Some(email), Some(phone)) = (
                    row.email().strip_prefix("pending:"),
                    row.phone().strip_prefix("pending:"),
                ) {
                    *row = User::new(
                        row.id(),
                        row.first_name().to_string(),
                        row.password_hash().clone(),
                        email.to_string(),
                        phone.to_string(),
                    );
                }
            }
            return Err(RepositoryError::UniqueViolation(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        table.next_id += 1;
        let id = UserId::new(table.next_id);
        table.rows.push(User::new(
            id,
            new_user.first_name.clone(),
            new_user.password_hash.clone(),
            new_user.email.clone(),
            new_user.phone.clone(),
        ));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut rows = self.snapshot();
        rows.sort_by_key(User::id);
        Ok(rows)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserDocumentRepository {
    documents: Arc<Mutex<Vec<UserDocument>>>,
}

impl InMemoryUserDocumentRepository {
    pub fn push(&self, document: UserDocument) {
        self.documents.lock().unwrap().push(document);
    }

    pub fn snapshot(&self) -> Vec<UserDocument> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDocumentRepository for InMemoryUserDocumentRepository {
    async fn insert(&self, document: &UserDocument) -> Result<(), RepositoryError> {
        self.push(document.clone());
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserDocument>, RepositoryError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents.iter().find(|d| d.user_id == user_id).cloned())
    }
}

/// Document store that is always down.
#[derive(Clone)]
pub struct FailingDocumentRepository;

#[async_trait]
impl UserDocumentRepository for FailingDocumentRepository {
    async fn insert(&self, _document: &UserDocument) -> Result<(), RepositoryError> {
        Err(RepositoryError::DocumentStore(
            "connection refused: mongodb://10.0.0.5:27017".to_string(),
        ))
    }

    async fn find_by_user_id(
        &self,
        _user_id: UserId,
    ) -> Result<Option<UserDocument>, RepositoryError> {
        Err(RepositoryError::DocumentStore(
            "connection refused: mongodb://10.0.0.5:27017".to_string(),
        ))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPictureStore {
    files: Arc<Mutex<HashMap<StoredPictureName, Bytes>>>,
}

impl InMemoryPictureStore {
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn content_of(&self, name: &StoredPictureName) -> Option<Bytes> {
        self.files.lock().unwrap().get(name).cloned()
    }
}

#[async_trait]
impl PictureStore for InMemoryPictureStore {
    async fn save(&self, name: &StoredPictureName, content: Bytes) -> Result<(), StorageError> {
        self.files.lock().unwrap().insert(name.clone(), content);
        Ok(())
    }

    async fn remove(&self, name: &StoredPictureName) -> Result<(), StorageError> {
        self.files
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::Io(std::io::ErrorKind::NotFound.into()))
    }
}

/// Skips argon2 so tests stay fast; output is recognisable in assertions.
#[derive(Clone)]
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        Ok(HashedPassword::new(format!("hashed:{plain_password}")))
    }
}

/// Records the thread each hash runs on.
#[derive(Clone, Default)]
pub struct ThreadRecordingHasher {
    threads: Arc<Mutex<Vec<std::thread::ThreadId>>>,
}

impl ThreadRecordingHasher {
    pub fn threads(&self) -> Vec<std::thread::ThreadId> {
        self.threads.lock().unwrap().clone()
    }
}

impl PasswordHasher for ThreadRecordingHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        self.threads
            .lock()
            .unwrap()
            .push(std::thread::current().id());
        Ok(HashedPassword::new(format!("hashed:{plain_password}")))
    }
}

/// Hasher whose task dies mid-hash.
#[derive(Clone)]
pub struct PanickingHasher;

impl PasswordHasher for PanickingHasher {
    fn hash(&self, _plain_password: &str) -> Result<HashedPassword, DomainError> {
        panic!("hasher crashed");
    }
}
