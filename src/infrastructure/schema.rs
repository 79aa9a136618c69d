//! Relational schema bootstrap.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::infrastructure::entities::users;

/// Create the `Users` table and its indexes when they do not exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(users::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(users::Entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    tracing::info!("relational schema ready");
    Ok(())
}
