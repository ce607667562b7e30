//! `KEY=VALUE` configuration file.
//!
//! One pair per line. Empty lines, lines starting with `#` and lines without `=` are ignored.
//! A trailing `\r` is trimmed from key and value, a UTF-8 BOM before the first key is
//! stripped, and values are taken verbatim (no quotes, no escapes).

use std::collections::HashMap;
use std::io;
use std::path::Path;

use tracing::debug;

const BOM: char = '\u{feff}';

/// Parsed env file. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Reads `path`; a missing file yields an empty set.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let file = Self::parse(&contents);
                debug!(path = %path.display(), keys = file.len(), "Loaded env file");
                Ok(file)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn parse(contents: &str) -> Self {
        let contents = contents.strip_prefix(BOM).unwrap_or(contents);
        let vars = contents
            .split('\n')
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| {
                let key = key.strip_suffix('\r').unwrap_or(key);
                let value = value.strip_suffix('\r').unwrap_or(value);
                (key.to_string(), value.to_string())
            })
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
