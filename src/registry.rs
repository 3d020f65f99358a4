//! Registry: reads `/etc/passwd`, correlates each account with its
//! `/etc/shadow` entry, and answers lookups over the merged records.
//!
//! Every call reads both files again; nothing is cached between calls. Take a
//! [`Snapshot`] to reuse one read.
//!
//! ```no_run
//! use linuxuser::registry::Registry;
//! # fn main() -> Result<(), linuxuser::Error> {
//! let registry = Registry::system();
//! let me = registry.current()?;
//! println!("{} lives in {}", me.username, me.home);
//! # Ok(())
//! # }
//! ```
use log::debug;

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::identity::{Identity, ProcessIdentity};
use crate::io::{read_registry, registry_lines};
use crate::passwd::{PasswdEntry, parse_passwd_line};
use crate::shadow::{ShadowEntry, UnmatchedShadow, find_shadow_entry};
use crate::snapshot::Snapshot;

/// Parse passwd contents and attach shadow entries. `shadow` is consulted at
/// most once, when the first account needs its entry; `None` from it means no
/// shadow data is available and every account gets the zero-value entry.
pub fn merge_registries<F>(
    passwd: &str,
    mut shadow: F,
    unmatched: UnmatchedShadow,
) -> Result<Vec<PasswdEntry>>
where
    F: FnMut() -> Result<Option<String>>,
{
    let mut shadow_contents: Option<Option<String>> = None;
    let mut entries = Vec::new();
    for (idx, line) in registry_lines(passwd).enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut entry = parse_passwd_line(line).map_err(|e| Error::PasswdLine {
            line: idx + 1,
            source: Box::new(e),
        })?;
        let wrap = |e: Error| Error::ShadowLine {
            username: entry.username.clone(),
            source: Box::new(e),
        };
        if shadow_contents.is_none() {
            shadow_contents = Some(shadow().map_err(wrap)?);
        }
        if let Some(Some(contents)) = &shadow_contents {
            entry.shadow = find_shadow_entry(contents, &entry.username, unmatched).map_err(wrap)?;
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Parse in-memory registries. Intended for tests and callers that already
/// hold the file contents.
pub fn load_from_strings(
    passwd: &str,
    shadow: Option<&str>,
    unmatched: UnmatchedShadow,
) -> Result<Snapshot> {
    let entries = merge_registries(passwd, || Ok(shadow.map(str::to_string)), unmatched)?;
    Ok(Snapshot::new(entries))
}

/// Reads the registries named by a [`RegistryConfig`] under an [`Identity`].
#[derive(Debug, Clone)]
pub struct Registry<I = ProcessIdentity> {
    config: RegistryConfig,
    identity: I,
}

impl Registry<ProcessIdentity> {
    /// System files, evaluated as the running process.
    pub fn system() -> Self {
        Self::new(RegistryConfig::default(), ProcessIdentity)
    }
}

impl Default for Registry<ProcessIdentity> {
    fn default() -> Self {
        Self::system()
    }
}

impl<I: Identity> Registry<I> {
    pub fn new(config: RegistryConfig, identity: I) -> Self {
        Self { config, identity }
    }

    /// Shadow contents, or `None` when the identity is not privileged.
    fn read_shadow(&self) -> Result<Option<String>> {
        if !self.identity.is_privileged()? {
            debug!("not privileged, skipping {}", self.config.shadow_path.display());
            return Ok(None);
        }
        let contents = read_registry(&self.config.shadow_path, self.config.mmap_threshold_bytes)?;
        Ok(Some(contents))
    }

    /// Read and merge both registries.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let passwd = read_registry(&self.config.passwd_path, self.config.mmap_threshold_bytes)?;
        let entries = merge_registries(
            &passwd,
            || self.read_shadow(),
            self.config.unmatched_shadow,
        )?;
        debug!(
            "loaded {} entries from {}",
            entries.len(),
            self.config.passwd_path.display()
        );
        Ok(Snapshot::new(entries))
    }

    /// Every account, in registry order.
    pub fn all(&self) -> Result<Vec<PasswdEntry>> {
        Ok(self.snapshot()?.into_entries())
    }

    /// The account whose uid is the effective uid. A miss is
    /// [`Error::NotFound`].
    pub fn current(&self) -> Result<PasswdEntry> {
        let snapshot = self.snapshot()?;
        snapshot.current(i64::from(self.identity.effective_uid()?))
    }

    /// The account named `username`, or the zero-value entry.
    pub fn lookup(&self, username: &str) -> Result<PasswdEntry> {
        Ok(self.snapshot()?.lookup(username))
    }

    /// The account with `uid`, or the zero-value entry.
    pub fn lookup_id(&self, uid: i64) -> Result<PasswdEntry> {
        Ok(self.snapshot()?.lookup_id(uid))
    }

    /// Shadow entry for `username` alone, without reading the passwd file.
    pub fn shadow_entry(&self, username: &str) -> Result<ShadowEntry> {
        match self.read_shadow()? {
            Some(contents) => find_shadow_entry(&contents, username, self.config.unmatched_shadow),
            None => Ok(ShadowEntry::default()),
        }
    }
}
