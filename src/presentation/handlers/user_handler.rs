use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError,
        models::{picture::UploadedPicture, registration::RegistrationForm},
        repositories::{
            user_document_repository::UserDocumentRepository, user_repository::UserRepository,
        },
        services::{password_service::PasswordHasher, picture_store::PictureStore},
    },
    presentation::response::ApiResponse,
    usecase::{
        list_users_usecase::{ListUsersUsecase, UserWithDocument},
        register_user_usecase::{RegisterUserUsecase, RegisteredUser},
    },
};
use axum::{
    Router,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

// Response

/// data of a successful registration
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// filename as uploaded, not the stored name
    pub profile_picture: String,
}

impl From<RegisteredUser> for RegisteredUserData {
    fn from(registered: RegisteredUser) -> Self {
        Self {
            full_name: registered.first_name,
            email: registered.email,
            phone: registered.phone,
            profile_picture: registered.original_filename,
        }
    }
}

/// one row of the user listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub user_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    pub profiles: Option<ProfileDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub user_id: i32,
    pub profile_picture: String,
}

impl From<UserWithDocument> for UserEntry {
    fn from(row: UserWithDocument) -> Self {
        let UserWithDocument { user, document } = row;
        Self {
            user_id: user.id().as_i32(),
            first_name: user.first_name().to_string(),
            password: user.password_hash().as_str().to_string(),
            email: user.email().to_string(),
            phone: user.phone().to_string(),
            profiles: document.map(|document| ProfileDocument {
                user_id: document.user_id.as_i32(),
                profile_picture: document.profile_picture.as_str().to_string(),
            }),
        }
    }
}

/* Router Function and Handler Function */

/// function return Router object for `/register` and `/register/getall`
pub fn create_user_router<
    U: UserRepository + Send + Sync + 'static + Clone,
    D: UserDocumentRepository + Send + Sync + 'static + Clone,
    S: PictureStore + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterUserUsecase<U, D, S, P>,
    list_service: ListUsersUsecase<U, D>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
        list_service: Arc::new(list_service),
    };

    Router::new()
        .route("/register", post(register::<U, D, S, P>))
        .route("/register/getall", get(list_users::<U, D, S, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<
    U: UserRepository + Clone,
    D: UserDocumentRepository + Clone,
    S: PictureStore + Clone,
    P: PasswordHasher,
> {
    pub register_service: Arc<RegisterUserUsecase<U, D, S, P>>,
    pub list_service: Arc<ListUsersUsecase<U, D>>,
}

// handler function

/// handler function for register
async fn register<
    U: UserRepository + Send + Sync + 'static + Clone,
    D: UserDocumentRepository + Send + Sync + 'static + Clone,
    S: PictureStore + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<U, D, S, P>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let form = match multipart {
        Ok(multipart) => read_registration_form(multipart).await,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "registration body is not multipart");
            Err(DomainError::InvalidParams)
        }
    };

    match form {
        Ok(form) => match state.register_service.register(form).await {
            Ok(registered) => {
                ApiResponse::success(RegisteredUserData::from(registered)).into_response()
            }
            Err(err) => err.into_response(),
        },
        Err(err) => err.into_response(),
    }
}

/// handler function for the user listing
async fn list_users<
    U: UserRepository + Send + Sync + 'static + Clone,
    D: UserDocumentRepository + Send + Sync + 'static + Clone,
    S: PictureStore + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<U, D, S, P>>,
) -> Response {
    match state.list_service.list().await {
        Ok(rows) => {
            let entries: Vec<UserEntry> = rows.into_iter().map(UserEntry::from).collect();
            ApiResponse::success(entries).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Collect the known fields; unknown fields are skipped. A `profilePicture`
/// part without a filename counts as absent.
async fn read_registration_form(mut multipart: Multipart) -> Result<RegistrationForm, DomainError> {
    collect_fields(&mut multipart).await.map_err(|err| {
        tracing::warn!(error = %err, "malformed registration form");
        DomainError::InvalidParams
    })
}

async fn collect_fields(multipart: &mut Multipart) -> Result<RegistrationForm, MultipartError> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "firstName" => form.first_name = Some(field.text().await?),
            "email" => form.email = Some(field.text().await?),
            "password" => form.password = Some(field.text().await?),
            "phone" => form.phone = Some(field.text().await?),
            "profilePicture" => {
                let Some(filename) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                let content = field.bytes().await?;
                form.profile_picture = Some(UploadedPicture { filename, content });
            }
            _ => {}
        }
    }

    Ok(form)
}
