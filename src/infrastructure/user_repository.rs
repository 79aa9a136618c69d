use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{HashedPassword, NewUser, User, UserId},
        repositories::user_repository::UserRepository,
    },
    infrastructure::entities::users,
};

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one_by(
        &self,
        column: users::Column,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = users::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User::new(
            UserId::new(model.user_id),
            model.first_name,
            HashedPassword::new(model.password),
            model.email,
            model.phone,
        )
    }
}

/// Unique-constraint failures are kept apart so callers can report the conflict.
fn map_db_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::UniqueViolation(detail),
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by(users::Column::Email, email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by(users::Column::Phone, phone).await
    }

    async fn create(&self, new_user: &NewUser) -> Result<UserId, RepositoryError> {
        let user_model = users::ActiveModel {
            user_id: NotSet,
            first_name: Set(new_user.first_name.clone()),
            password: Set(new_user.password_hash.as_str().to_string()),
            email: Set(new_user.email.clone()),
            phone: Set(new_user.phone.clone()),
        };
        let insert_result = users::Entity::insert(user_model)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(UserId::new(insert_result.last_insert_id))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::UserId)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(users.into_iter().map(User::from).collect())
    }
}
