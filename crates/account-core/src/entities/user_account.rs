//! UserAccount entity - one registered identity

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::error::AccountError;
use crate::traits::{CredentialHasher, StoreResult, UserStore};
use crate::value_objects::UserId;

/// A registered user account
///
/// Plain value: callers load or construct one, mutate it, and persist it
/// through an explicit [`UserStore`]. It does not implement `Serialize`;
/// use [`PublicUser`] for anything leaving the process.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserAccount {
    pub id: UserId,
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 100, message = "Email must be 1-100 characters"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(length(max = 100, message = "Password hash must be at most 100 characters"))]
    pub password_hash: String,
    pub verified: bool,
    #[validate(length(min = 1, max = 50, message = "Verification token must be 1-50 characters"))]
    pub verification_token: Option<String>,
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
    pub is_administrator: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Create a new, unsaved account
    ///
    /// The ID stays unassigned and the timestamps are provisional until
    /// [`UserAccount::create`] succeeds.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = now_seconds();
        Self {
            id: UserId::UNASSIGNED,
            name: name.into(),
            email: email.into(),
            password_hash: String::new(),
            verified: false,
            verification_token: None,
            image_url: None,
            is_administrator: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check the stored hash against a candidate password
    ///
    /// Any failure, including an empty or corrupt stored hash, reads as a
    /// mismatch.
    pub fn verify_password<H>(&self, hasher: &H, candidate: &str) -> bool
    where
        H: CredentialHasher + ?Sized,
    {
        hasher.compare(&self.password_hash, candidate)
    }

    /// Replace the password hash; persisted on the next create/save
    pub fn set_password<H>(&mut self, hasher: &H, plaintext: &str) -> Result<(), AccountError>
    where
        H: CredentialHasher + ?Sized,
    {
        self.password_hash = hasher.hash(plaintext)?;
        Ok(())
    }

    /// Insert this account, taking the ID and timestamps storage assigns
    ///
    /// On error `self` is left exactly as it was.
    #[instrument(skip(self, store), fields(email = %self.email))]
    pub async fn create<S>(&mut self, store: &S) -> StoreResult<()>
    where
        S: UserStore + ?Sized,
    {
        if !self.id.is_unassigned() {
            return Err(AccountError::AlreadyPersisted(self.id));
        }
        self.validate_fields()?;

        let inserted = store.insert(self).await?;
        self.id = inserted.id;
        self.created_at = inserted.created_at;
        self.updated_at = inserted.updated_at;

        info!(user_id = %self.id, "User created");
        Ok(())
    }

    /// Persist changes to the live record with this ID
    #[instrument(skip(self, store), fields(user_id = %self.id))]
    pub async fn save<S>(&mut self, store: &S) -> StoreResult<()>
    where
        S: UserStore + ?Sized,
    {
        if self.id.is_unassigned() {
            return Err(AccountError::NotFound(self.id));
        }
        self.validate_fields()?;

        self.updated_at = store.update(self).await?;
        debug!("User saved");
        Ok(())
    }

    /// Soft delete: set the tombstone and leave every other field alone
    ///
    /// A no-op on an instance that is already tombstoned.
    #[instrument(skip(self, store), fields(user_id = %self.id))]
    pub async fn delete<S>(&mut self, store: &S) -> StoreResult<()>
    where
        S: UserStore + ?Sized,
    {
        if self.deleted_at.is_some() {
            return Ok(());
        }
        if self.id.is_unassigned() {
            return Err(AccountError::NotFound(self.id));
        }

        self.deleted_at = Some(store.soft_delete(self.id).await?);
        info!("User soft-deleted");
        Ok(())
    }

    /// Check if the email address has been verified
    #[inline]
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Check if the account holds the administrator flag
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.is_administrator
    }

    /// Check if the account is soft-deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if a verification token is outstanding
    #[inline]
    pub fn has_pending_verification(&self) -> bool {
        self.verification_token.is_some()
    }

    /// Start email verification with a freshly issued token
    pub fn begin_verification(&mut self, token: String) {
        self.verified = false;
        self.verification_token = Some(token);
    }

    /// Consume the pending token if `presented` matches it
    ///
    /// Returns `true` and marks the account verified on a match. Anything
    /// else leaves the account untouched.
    pub fn confirm_verification(&mut self, presented: &str) -> bool {
        let matches = self
            .verification_token
            .as_deref()
            .is_some_and(|pending| constant_time_eq(pending.as_bytes(), presented.as_bytes()));

        if matches {
            self.verified = true;
            self.verification_token = None;
        }
        matches
    }

    /// Update the display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Update the email address
    pub fn change_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Update the image reference
    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
    }

    /// Grant or revoke the administrator flag
    pub fn set_admin(&mut self, is_administrator: bool) {
        self.is_administrator = is_administrator;
    }

    /// Outward view with every secret field left out
    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }

    /// Run field constraints that storage would otherwise reject
    pub fn validate_fields(&self) -> Result<(), AccountError> {
        self.validate()?;
        if self.name.trim().is_empty() {
            return Err(AccountError::validation("Name must not be blank"));
        }
        Ok(())
    }
}

/// Public part of the account returned to clients
///
/// Carries no password hash, verification token or tombstone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub verified: bool,
    pub image: Option<String>,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserAccount> for PublicUser {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            verified: user.verified,
            image: user.image_url.clone(),
            admin: user.is_administrator,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Current time at the second resolution timestamps are stored with
fn now_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
