//! Parse `/etc/passwd` and, when the effective identity allows it,
//! `/etc/shadow` into merged account records.
//!
//! The free functions below read the system files as the running process.
//! Build a [`Registry`] to point at other files or pin the identity.
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod io;
pub mod passwd;
pub mod registry;
pub mod report;
pub mod shadow;
pub mod snapshot;

pub use error::{Error, Field, Result};
pub use passwd::PasswdEntry;
pub use registry::Registry;
pub use shadow::ShadowEntry;

pub mod prelude {
    pub use crate::config::RegistryConfig;
    pub use crate::identity::{FixedIdentity, Identity, ProcessIdentity};
    pub use crate::passwd::PasswdEntry;
    pub use crate::registry::Registry;
    pub use crate::shadow::{ShadowEntry, UnmatchedShadow};
    pub use crate::snapshot::Snapshot;
}

/// Every account on the system, in `/etc/passwd` order.
pub fn all() -> Result<Vec<PasswdEntry>> {
    Registry::system().all()
}

/// The account of the effective uid; [`Error::NotFound`] if it has none.
pub fn current() -> Result<PasswdEntry> {
    Registry::system().current()
}

/// The account named `username`, or the zero-value entry if there is none.
pub fn lookup(username: &str) -> Result<PasswdEntry> {
    Registry::system().lookup(username)
}

/// The account with `uid`, or the zero-value entry if there is none.
pub fn lookup_id(uid: i64) -> Result<PasswdEntry> {
    Registry::system().lookup_id(uid)
}
