//! Key=value store backed by a `.env` file

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{normalize_key, EnvError};

/// In-memory view of a plain-text `KEY=value` environment file.
///
/// Keys are case-insensitive and held normalized to upper-case. Mutations
/// stay in memory until [`EnvFile::save`] is called; saving truncates and
/// rewrites the whole file, so comments and blank lines from a hand-edited
/// file are not preserved.
#[derive(Debug)]
pub struct EnvFile {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    /// Read `path` into memory, creating an empty file if it does not exist.
    ///
    /// Blank lines and lines starting with `#` are skipped, as are lines
    /// with no `=`. Keys and values are trimmed of surrounding whitespace.
    /// When two lines normalize to the same key, the last line wins.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EnvError> {
        let path = path.into();
        if !path.exists() {
            fs::write(&path, "")?;
        }

        let content = fs::read_to_string(&path)?;
        let mut entries = BTreeMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            entries.insert(normalize_key(key), value.trim().to_string());
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or overwrite a variable; the key is normalized to upper-case.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(normalize_key(key), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    /// Delete a variable. Removing an absent key is a no-op, not an error.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(&normalize_key(key));
    }

    /// Sorted list of variable names, for presenting choices
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Truncate and rewrite the file as one `KEY=value` line per entry.
    ///
    /// Not an atomic write; a crash mid-write can leave a partial file.
    pub fn save(&self) -> Result<(), EnvError> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join(".env")
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = env_path(&dir);

        let file = EnvFile::load(&path).unwrap();
        assert!(path.exists());
        assert!(file.is_empty());
    }

    #[test]
    fn test_load_skips_comments_blanks_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = env_path(&dir);
        fs::write(
            &path,
            "# comment\n\nAPI_URL=http://x\nnot a pair\n  KEY2 = value with spaces  \n",
        )
        .unwrap();

        let file = EnvFile::load(&path).unwrap();
        assert_eq!(file.get("API_URL"), Some("http://x"));
        assert_eq!(file.get("KEY2"), Some("value with spaces"));
        assert_eq!(file.keys().len(), 2);
    }

    #[test]
    fn test_duplicate_key_last_line_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = env_path(&dir);
        fs::write(&path, "TOKEN=first\ntoken=second\n").unwrap();

        let file = EnvFile::load(&path).unwrap();
        assert_eq!(file.get("TOKEN"), Some("second"));
        assert_eq!(file.keys(), vec!["TOKEN".to_string()]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = env_path(&dir);

        let mut file = EnvFile::load(&path).unwrap();
        file.set("api_url", "http://x");
        file.set("RETRIES", "3");
        file.save().unwrap();

        let reloaded = EnvFile::load(&path).unwrap();
        assert_eq!(reloaded.get("API_URL"), Some("http://x"));
        assert_eq!(reloaded.get("RETRIES"), Some("3"));
        assert_eq!(reloaded.keys().len(), 2);
    }

    #[test]
    fn test_set_normalizes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = EnvFile::load(env_path(&dir)).unwrap();

        file.set("api_url", "http://first");
        file.set("API_URL", "http://second");
        assert_eq!(file.get("api_url"), Some("http://second"));
        assert_eq!(file.keys(), vec!["API_URL".to_string()]);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = EnvFile::load(env_path(&dir)).unwrap();
        file.set("KEY", "v");

        file.remove("NEVER_ADDED");
        assert_eq!(file.keys(), vec!["KEY".to_string()]);
    }

    #[test]
    fn test_saved_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = env_path(&dir);

        let mut file = EnvFile::load(&path).unwrap();
        file.set("B", "2");
        file.set("A", "1");
        file.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\nB=2\n");
    }
}
