//! The effective identity a registry is evaluated under.
//!
//! Shadow data is only read for a privileged identity, and the current-user
//! lookup matches on the effective uid. Both questions go through
//! [`Identity`] so callers and tests can pin them instead of depending on the
//! process credentials.
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Effective uid that may read the shadow registry.
pub const PRIVILEGED_UID: u32 = 0;

pub trait Identity {
    fn effective_uid(&self) -> Result<u32>;

    fn is_privileged(&self) -> Result<bool> {
        Ok(self.effective_uid()? == PRIVILEGED_UID)
    }
}

impl<I: Identity + ?Sized> Identity for &I {
    fn effective_uid(&self) -> Result<u32> {
        (**self).effective_uid()
    }

    fn is_privileged(&self) -> Result<bool> {
        (**self).is_privileged()
    }
}

/// Identity of the running process, read from `/proc/self/status`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIdentity;

impl ProcessIdentity {
    const STATUS_PATH: &'static str = "/proc/self/status";
}

impl Identity for ProcessIdentity {
    fn effective_uid(&self) -> Result<u32> {
        let path = Path::new(Self::STATUS_PATH);
        let status = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        effective_uid_from_status(&status)
    }
}

/// A pinned identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIdentity {
    pub euid: u32,
}

impl FixedIdentity {
    pub fn new(euid: u32) -> Self {
        Self { euid }
    }

    pub fn root() -> Self {
        Self::new(PRIVILEGED_UID)
    }
}

impl Identity for FixedIdentity {
    fn effective_uid(&self) -> Result<u32> {
        Ok(self.euid)
    }
}

/// Extract the effective uid from a `/proc/<pid>/status` document. The `Uid:`
/// line carries real, effective, saved and filesystem uids in that order.
pub(crate) fn effective_uid_from_status(status: &str) -> Result<u32> {
    let euid = status
        .lines()
        .find_map(|l| l.strip_prefix("Uid:"))
        .and_then(|l| l.split_whitespace().nth(1))
        .ok_or(Error::MissingUid)?;
    euid.parse::<u32>().map_err(|source| Error::InvalidUid {
        value: euid.to_string(),
        source,
    })
}
