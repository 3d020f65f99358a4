use std::fmt;

use crate::error::{Error, Field, Result, parse_numeric};
use crate::shadow::ShadowEntry;

/// Minimum number of fields on a passwd line.
pub const PASSWD_FIELDS: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One account from `/etc/passwd`, merged with its shadow entry.
pub struct PasswdEntry {
    pub username: String,
    pub shadow: ShadowEntry,
    pub uid: i64,
    pub gid: i64,
    pub gecos: String,
    pub home: String,
    pub shell: String,
}

impl PasswdEntry {
    /// True for the zero-value record returned by lookups that found nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Re-serializes the passwd columns with an `x` placeholder password.
impl fmt::Display for PasswdEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:x:{}:{}:{}:{}:{}",
            self.username, self.uid, self.gid, self.gecos, self.home, self.shell
        )
    }
}

/// Parse one passwd line. The shadow field is left at its zero value; the
/// password column of the line itself is ignored.
pub fn parse_passwd_line(line: &str) -> Result<PasswdEntry> {
    // name:password:uid:gid:gecos:home:shell; extra fields are ignored
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < PASSWD_FIELDS {
        return Err(Error::MalformedLine {
            expected: PASSWD_FIELDS,
            found: fields.len(),
        });
    }
    Ok(PasswdEntry {
        username: fields[0].to_string(),
        shadow: ShadowEntry::default(),
        uid: parse_numeric(Field::Uid, fields[2])?,
        gid: parse_numeric(Field::Gid, fields[3])?,
        gecos: fields[4].to_string(),
        home: fields[5].to_string(),
        shell: fields[6].to_string(),
    })
}
