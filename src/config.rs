use std::path::PathBuf;

use crate::io::DEFAULT_MMAP_THRESHOLD_BYTES;
use crate::shadow::UnmatchedShadow;

pub const DEFAULT_PASSWD_PATH: &str = "/etc/passwd";
pub const DEFAULT_SHADOW_PATH: &str = "/etc/shadow";

/// Where the registries live and how they are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub passwd_path: PathBuf,
    pub shadow_path: PathBuf,
    pub mmap_threshold_bytes: u64,
    pub unmatched_shadow: UnmatchedShadow,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            passwd_path: PathBuf::from(DEFAULT_PASSWD_PATH),
            shadow_path: PathBuf::from(DEFAULT_SHADOW_PATH),
            mmap_threshold_bytes: DEFAULT_MMAP_THRESHOLD_BYTES,
            unmatched_shadow: UnmatchedShadow::default(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_passwd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd_path = path.into();
        self
    }

    pub fn with_shadow_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.shadow_path = path.into();
        self
    }

    /// A threshold of zero disables mmap.
    pub fn with_mmap_threshold(mut self, bytes: u64) -> Self {
        self.mmap_threshold_bytes = if bytes == 0 { u64::MAX } else { bytes };
        self
    }

    pub fn with_unmatched_shadow(mut self, policy: UnmatchedShadow) -> Self {
        self.unmatched_shadow = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_system_files() {
        let c = RegistryConfig::default();
        assert_eq!(c.passwd_path, PathBuf::from("/etc/passwd"));
        assert_eq!(c.shadow_path, PathBuf::from("/etc/shadow"));
        assert_eq!(c.unmatched_shadow, UnmatchedShadow::Empty);
    }

    #[test]
    fn zero_threshold_disables_mmap() {
        let c = RegistryConfig::new().with_mmap_threshold(0);
        assert_eq!(c.mmap_threshold_bytes, u64::MAX);
    }
}
