use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Error, Result};

/// Registries at or above this size are memory-mapped instead of read into a
/// buffer. Directory-service exports can get large; local files never do.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

/// Decide whether to use mmap based on file size and threshold.
pub fn should_use_mmap(file_size_bytes: u64, threshold_bytes: u64) -> bool {
    file_size_bytes >= threshold_bytes
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a whole registry file, decoding invalid UTF-8 lossily.
pub fn read_registry<P: AsRef<Path>>(path: P, mmap_threshold_bytes: u64) -> Result<String> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(read_error(path))?;
    if meta.is_file() && should_use_mmap(meta.len(), mmap_threshold_bytes) {
        let file = File::open(path).map_err(read_error(path))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(read_error(path))?;
        Ok(String::from_utf8_lossy(&mmap).into_owned())
    } else {
        let bytes = fs::read(path).map_err(read_error(path))?;
        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }
}

/// Iterate the lines of registry contents, splitting on `\n` and dropping a
/// trailing `\r`. A trailing newline does not produce a final empty line.
pub fn registry_lines(contents: &str) -> RegistryLines<'_> {
    RegistryLines { contents, pos: 0 }
}

pub struct RegistryLines<'a> {
    contents: &'a str,
    pos: usize,
}

impl<'a> Iterator for RegistryLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.contents.as_bytes();
        if self.pos >= data.len() {
            return None;
        }
        let start = self.pos;
        let end = match memchr::memchr(b'\n', &data[start..]) {
            Some(off) => {
                self.pos = start + off + 1;
                start + off
            }
            None => {
                // Last line without trailing newline
                self.pos = data.len();
                data.len()
            }
        };
        let line = &self.contents[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}
