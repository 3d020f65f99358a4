//! Error taxonomy shared by the parsers, the loader and the lookups.
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Numeric fields that can fail conversion, named after their registry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Uid,
    Gid,
    LastChanged,
    Minimum,
    Maximum,
    Warn,
    Inactive,
    Expire,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Uid => "uid",
            Field::Gid => "gid",
            Field::LastChanged => "last_changed",
            Field::Minimum => "minimum",
            Field::Maximum => "maximum",
            Field::Warn => "warn",
            Field::Inactive => "inactive",
            Field::Expire => "expire",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to convert {field} from {value:?}: {source}")]
    Parse {
        field: Field,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("malformed line: expected at least {expected} fields, found {found}")]
    MalformedLine { expected: usize, found: usize },
    #[error("failed to parse passwd line {line}: {source}")]
    PasswdLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("failed to parse shadow entry for {username:?}: {source}")]
    ShadowLine {
        username: String,
        #[source]
        source: Box<Error>,
    },
    #[error("no passwd entry for effective uid {uid}")]
    NotFound { uid: i64 },
    #[error("no effective uid in process status")]
    MissingUid,
    #[error("invalid effective uid {value:?}: {source}")]
    InvalidUid {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Error {
    /// The field that failed numeric conversion, looking through loader
    /// wrappers.
    pub fn parse_field(&self) -> Option<Field> {
        match self {
            Error::Parse { field, .. } => Some(*field),
            Error::PasswdLine { source, .. } | Error::ShadowLine { source, .. } => {
                source.parse_field()
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse an optional integer column: empty means zero.
pub(crate) fn parse_numeric<T>(field: Field, value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = ParseIntError> + Default,
{
    if value.is_empty() {
        return Ok(T::default());
    }
    value.parse().map_err(|source| Error::Parse {
        field,
        value: value.to_string(),
        source,
    })
}
