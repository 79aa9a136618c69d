use crate::domain::models::{picture::StoredPictureName, user::UserId};

/// Per-user document in the document store pointing at the stored picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDocument {
    pub user_id: UserId,
    pub profile_picture: StoredPictureName,
}

impl UserDocument {
    pub fn new(user_id: UserId, profile_picture: StoredPictureName) -> Self {
        Self {
            user_id,
            profile_picture,
        }
    }
}
