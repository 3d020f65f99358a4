//! Plain-text rendering of account records for terminal output. Styling is
//! left to the caller.
use crate::passwd::PasswdEntry;

const TABLE_HEADERS: [&str; 6] = ["USER", "UID", "GID", "HOME", "SHELL", "PASSWORD"];

fn table_row(p: &PasswdEntry) -> [String; 6] {
    [
        p.username.clone(),
        p.uid.to_string(),
        p.gid.to_string(),
        p.home.clone(),
        p.shell.clone(),
        p.shadow.status().as_str().to_string(),
    ]
}

/// One line per entry under a header, columns padded to the widest cell.
/// No trailing newline.
pub fn render_table(entries: &[PasswdEntry]) -> String {
    let mut rows: Vec<[String; 6]> = Vec::with_capacity(entries.len() + 1);
    rows.push(TABLE_HEADERS.map(str::to_string));
    rows.extend(entries.iter().map(table_row));

    let mut widths = [0usize; 6];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let last = TABLE_HEADERS.len() - 1;
    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i == last {
                    line.push_str(cell);
                } else {
                    line.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
                }
            }
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn day_count(days: i64, date: Option<chrono::NaiveDate>, unset: &str) -> String {
    match date {
        Some(d) => format!("{} ({})", d.format("%Y-%m-%d"), days),
        None => unset.to_string(),
    }
}

/// Detail view of a single entry, including aging data.
pub fn render_entry(p: &PasswdEntry) -> String {
    let s = &p.shadow;
    let lines = [
        ("Username", p.username.clone()),
        ("UID", p.uid.to_string()),
        ("GID", p.gid.to_string()),
        ("Comment", p.gecos.clone()),
        ("Home", p.home.clone()),
        ("Shell", p.shell.clone()),
        ("Password", s.status().as_str().to_string()),
        ("Last changed", day_count(s.last_changed, s.last_changed_date(), "never")),
        ("Minimum", s.minimum.to_string()),
        ("Maximum", s.maximum.to_string()),
        ("Warn", s.warn.to_string()),
        ("Inactive", s.inactive.to_string()),
        ("Expires", day_count(s.expire, s.expire_date(), "never")),
    ];
    lines
        .iter()
        .map(|(label, value)| format!("{:<14}{}", format!("{label}:"), value))
        .collect::<Vec<_>>()
        .join("\n")
}
