mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;
mod usecase;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, local_picture_store::LocalPictureStore,
        mongo_user_document_repository::MongoUserDocumentRepository, schema::ensure_schema,
        user_repository::PostgresUserRepository,
    },
    presentation::handlers::{home_handler::home, user_handler::create_user_router},
    usecase::{list_users_usecase::ListUsersUsecase, register_user_usecase::RegisterUserUsecase},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,registration_service=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = AppConfig::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .sqlx_logging(true);
    let db = Database::connect(opt).await?;
    ensure_schema(&db).await?;

    let mongo = mongodb::Client::with_uri_str(&config.mongodb_url).await?;
    let document_repository =
        MongoUserDocumentRepository::new(&mongo.database(&config.mongodb_database));
    document_repository.ensure_indexes().await?;

    let picture_store = LocalPictureStore::open(&config.upload_dir).await?;
    tracing::info!(dir = %picture_store.root().display(), "picture store ready");

    let user_repository = PostgresUserRepository::new(db.clone());
    let register_user_usecase = RegisterUserUsecase::new(
        user_repository.clone(),
        document_repository.clone(),
        picture_store,
        Argon2PasswordHasher::new(),
    );
    let list_users_usecase = ListUsersUsecase::new(user_repository, document_repository);

    let app = Router::new()
        .route("/", get(home))
        .merge(create_user_router(register_user_usecase, list_users_usecase))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %config.bind_address, "listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
