//! Domain entities - core business objects

mod user_account;

pub use user_account::{PublicUser, UserAccount};
