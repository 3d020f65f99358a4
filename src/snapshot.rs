//! Lookups over one fully merged load of the registries.
//!
//! A [`Snapshot`] is what a single read of both files produced. The
//! [`Registry`](crate::registry::Registry) lookups take a fresh snapshot per
//! call; callers that want to reuse a read can hold on to one and take a new
//! snapshot when they need current data.
use crate::error::{Error, Result};
use crate::passwd::PasswdEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<PasswdEntry>,
}

impl Snapshot {
    pub fn new(entries: Vec<PasswdEntry>) -> Self {
        Self { entries }
    }

    /// Entries in registry order.
    pub fn entries(&self) -> &[PasswdEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PasswdEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, username: &str) -> Option<&PasswdEntry> {
        self.entries.iter().find(|p| p.username == username)
    }

    pub fn find_id(&self, uid: i64) -> Option<&PasswdEntry> {
        self.entries.iter().find(|p| p.uid == uid)
    }

    /// First entry named `username`, or the zero-value entry.
    pub fn lookup(&self, username: &str) -> PasswdEntry {
        self.find(username).cloned().unwrap_or_default()
    }

    /// First entry with `uid`, or the zero-value entry.
    pub fn lookup_id(&self, uid: i64) -> PasswdEntry {
        self.find_id(uid).cloned().unwrap_or_default()
    }

    /// First entry whose uid is `euid`. Unlike the other lookups a miss is an
    /// error.
    pub fn current(&self, euid: i64) -> Result<PasswdEntry> {
        self.find_id(euid)
            .cloned()
            .ok_or(Error::NotFound { uid: euid })
    }
}

impl IntoIterator for Snapshot {
    type Item = PasswdEntry;
    type IntoIter = std::vec::IntoIter<PasswdEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a PasswdEntry;
    type IntoIter = std::slice::Iter<'a, PasswdEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
