//! User entity <-> model mapper

use account_core::{UserAccount, UserId};

use crate::models::UserModel;

/// Encode a boolean flag for a SMALLINT column
#[inline]
pub fn flag_to_db(flag: bool) -> i16 {
    i16::from(flag)
}

/// Decode a SMALLINT flag column; anything but 1 reads as unset
#[inline]
pub fn flag_from_db(value: i16) -> bool {
    value == 1
}

/// Convert UserModel to UserAccount entity
impl From<UserModel> for UserAccount {
    fn from(model: UserModel) -> Self {
        UserAccount {
            id: UserId::from_i64(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            verified: flag_from_db(model.verified),
            verification_token: model.verification_token,
            image_url: model.image_url,
            is_administrator: flag_from_db(model.is_administrator),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
