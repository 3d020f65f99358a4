//! CSV export of merged account records, one row per account with the shadow
//! columns flattened next to the passwd ones.
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use csv::Writer;
use serde::Serialize;

use crate::passwd::PasswdEntry;

#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub username: &'a str,
    pub uid: i64,
    pub gid: i64,
    pub gecos: &'a str,
    pub home: &'a str,
    pub shell: &'a str,
    pub password_status: &'static str,
    pub last_changed: i64,
    pub minimum: i64,
    pub maximum: i64,
    pub warn: i64,
    pub inactive: i64,
    pub expire: i64,
}

impl<'a> From<&'a PasswdEntry> for ExportRow<'a> {
    fn from(p: &'a PasswdEntry) -> Self {
        Self {
            username: &p.username,
            uid: p.uid,
            gid: p.gid,
            gecos: &p.gecos,
            home: &p.home,
            shell: &p.shell,
            password_status: p.shadow.status().as_str(),
            last_changed: p.shadow.last_changed,
            minimum: p.shadow.minimum,
            maximum: p.shadow.maximum,
            warn: p.shadow.warn,
            inactive: p.shadow.inactive,
            expire: p.shadow.expire,
        }
    }
}

/// Write entries as CSV with a header row. Password hashes are never written.
pub fn write_csv<W: Write>(entries: &[PasswdEntry], out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    for p in entries {
        wtr.serialize(ExportRow::from(p))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(entries: &[PasswdEntry], path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(entries, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::load_from_strings;
    use crate::shadow::UnmatchedShadow;
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_rows_without_hashes() {
        let snap = load_from_strings(
            "alice:x:1000:1000:Alice:/home/alice:/bin/bash\n",
            Some("alice:$6$hash:18000:0:99999:7:::\n"),
            UnmatchedShadow::Empty,
        )
        .unwrap();
        let mut buf = Vec::new();
        write_csv(snap.entries(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "username,uid,gid,gecos,home,shell,password_status,last_changed,minimum,maximum,warn,inactive,expire"
        );
        assert_eq!(
            lines.next().unwrap(),
            "alice,1000,1000,Alice,/home/alice,/bin/bash,hashed,18000,0,99999,7,0,0"
        );
        assert!(!text.contains("$6$hash"));
    }

    #[test]
    fn saves_to_file() {
        let snap = load_from_strings(
            "svc:x:998:998:Service, Room 1:/var/lib/svc:/usr/sbin/nologin\n",
            None,
            UnmatchedShadow::Empty,
        )
        .unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.csv");
        save_csv(snap.entries(), &path).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("\"Service, Room 1\""));
        assert!(content.contains(",empty,"));
    }
}
