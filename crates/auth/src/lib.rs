//! `stockroom-auth` — roles, permissions, and the session boundary.
//!
//! This crate is pure policy and identity bookkeeping: no IO, no storage.
//! The inventory layer calls [`authorize`] with an explicit session value;
//! nothing here reaches out to global state.

pub mod authorize;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::authorize;
pub use permissions::Permission;
pub use policy::has_permission;
pub use roles::Role;
pub use session::{Session, UserManager};
pub use user::{CredentialVerifier, PlaintextVerifier, User};
