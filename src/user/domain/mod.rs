//! Domain model for referenced users.

mod error;
mod user;

pub use error::{ParseUserRoleError, UserDomainError};
pub use user::{User, UserId, UserRole, Username};
