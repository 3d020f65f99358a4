//! Credential and aging data parsed from `/etc/shadow`.
//!
//! Lines have eight or more colon-separated fields:
//! `name:hash:last_changed:minimum:maximum:warn:inactive:expire[:reserved]`.
//! Numeric columns are day counts; an empty column reads as `0`.
//!
//! Use [`find_shadow_entry`] to resolve the entry for one account out of the
//! full registry contents.
use chrono::{Days, NaiveDate};
use log::{debug, warn};

use crate::error::{Error, Field, Result, parse_numeric};

/// Minimum number of fields on a shadow line.
pub const SHADOW_FIELDS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Password hash and aging policy for one account. The `Default` value is the
/// zero-value record handed out when the registry is not readable.
pub struct ShadowEntry {
    pub password: String,
    pub last_changed: i64,
    pub minimum: i64,
    pub maximum: i64,
    pub warn: i64,
    pub inactive: i64,
    pub expire: i64,
}

/// Coarse classification of the hash column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStatus {
    /// Empty hash column, or no shadow data was available.
    Empty,
    /// Hash prefixed with `!`.
    Locked,
    /// `*` style placeholder: no password login possible.
    NoLogin,
    Hashed,
}

impl PasswordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordStatus::Empty => "empty",
            PasswordStatus::Locked => "locked",
            PasswordStatus::NoLogin => "nologin",
            PasswordStatus::Hashed => "hashed",
        }
    }
}

impl ShadowEntry {
    pub fn status(&self) -> PasswordStatus {
        let p = self.password.as_str();
        if p.is_empty() {
            PasswordStatus::Empty
        } else if p.starts_with('!') {
            PasswordStatus::Locked
        } else if p.starts_with('*') {
            PasswordStatus::NoLogin
        } else {
            PasswordStatus::Hashed
        }
    }

    /// Date of the last password change, `None` when unset.
    pub fn last_changed_date(&self) -> Option<NaiveDate> {
        epoch_day(self.last_changed)
    }

    /// Date the account expires, `None` when unset.
    pub fn expire_date(&self) -> Option<NaiveDate> {
        epoch_day(self.expire)
    }
}

fn epoch_day(days: i64) -> Option<NaiveDate> {
    if days <= 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_days(Days::new(days as u64))
}

/// What to return when no line names the requested account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedShadow {
    /// Zero-value entry, no error.
    #[default]
    Empty,
    /// Parse the last line of the registry, whatever account it belongs to.
    /// A trailing newline leaves an empty last line, which fails as malformed.
    /// Only for compatibility with tools that relied on this.
    FallThrough,
}

/// Parse one shadow line. The account name in field 0 is not checked.
pub fn parse_shadow_line(line: &str) -> Result<ShadowEntry> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < SHADOW_FIELDS {
        return Err(Error::MalformedLine {
            expected: SHADOW_FIELDS,
            found: fields.len(),
        });
    }
    Ok(ShadowEntry {
        password: fields[1].to_string(),
        last_changed: parse_numeric(Field::LastChanged, fields[2])?,
        minimum: parse_numeric(Field::Minimum, fields[3])?,
        maximum: parse_numeric(Field::Maximum, fields[4])?,
        warn: parse_numeric(Field::Warn, fields[5])?,
        inactive: parse_numeric(Field::Inactive, fields[6])?,
        expire: parse_numeric(Field::Expire, fields[7])?,
    })
}

/// Find and parse the entry for `username` in the full registry contents.
pub fn find_shadow_entry(
    contents: &str,
    username: &str,
    unmatched: UnmatchedShadow,
) -> Result<ShadowEntry> {
    let matched = contents.lines().find(|line| {
        !line.is_empty() && line.split(':').next() == Some(username)
    });
    if let Some(line) = matched {
        return parse_shadow_line(line);
    }
    match unmatched {
        UnmatchedShadow::Empty => {
            debug!("no shadow entry for {username:?}");
            Ok(ShadowEntry::default())
        }
        UnmatchedShadow::FallThrough => {
            warn!("no shadow entry for {username:?}, falling through to the last line");
            let last = contents.split('\n').next_back().unwrap_or_default();
            parse_shadow_line(last.strip_suffix('\r').unwrap_or(last))
        }
    }
}
