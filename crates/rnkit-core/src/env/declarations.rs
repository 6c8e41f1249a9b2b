//! Generated TypeScript declaration mirror for environment variables
//!
//! Bare projects import variables through `react-native-dotenv`'s `@env`
//! module, which the TypeScript compiler knows nothing about. This file
//! maintains a generated `env.d.ts` whose declarations mirror the `.env`
//! key set:
//!
//! ```text
//! declare module "@env" {
//!   export const API_URL: string;
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::{normalize_key, EnvError, DECLARATION_FILE_NAME};

const MODULE_OPEN: &str = "declare module \"@env\" {";
const MODULE_CLOSE: &str = "}";

/// Handle on a project's `env.d.ts` declaration file.
///
/// Operations self-heal: if the file is missing or its module block markers
/// are corrupted, it is rewritten as an empty well-formed block before the
/// operation applies, so the block always exists afterwards.
#[derive(Debug)]
pub struct DeclarationFile {
    path: PathBuf,
}

impl DeclarationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Declaration file inside `project_dir`
    pub fn at(project_dir: &Path) -> Self {
        Self::new(project_dir.join(DECLARATION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or repair the file so a well-formed module block exists.
    pub fn ensure(&self) -> Result<(), EnvError> {
        self.read_healthy()?;
        Ok(())
    }

    /// Add a declaration for `key`, or replace the existing one in place.
    ///
    /// New keys are inserted immediately before the block's closing brace,
    /// keeping earlier declarations in their original positions.
    pub fn upsert(&self, key: &str) -> Result<(), EnvError> {
        let mut lines = self.read_healthy()?;
        let key = normalize_key(key);
        let declaration = format!("  export const {}: string;", key);

        if let Some(existing) = lines
            .iter_mut()
            .find(|line| references_key(line.as_str(), &key))
        {
            *existing = declaration;
        } else {
            let close = block_close_index(&lines);
            lines.insert(close, declaration);
        }

        self.write_lines(&lines)
    }

    /// Delete the declaration for `key`. A missing declaration is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), EnvError> {
        let mut lines = self.read_healthy()?;
        let key = normalize_key(key);

        if let Some(index) = lines.iter().position(|line| references_key(line, &key)) {
            lines.remove(index);
            self.write_lines(&lines)?;
        }
        Ok(())
    }

    /// Read the file as lines, rewriting it as an empty block first when the
    /// module markers are missing or unbalanced.
    fn read_healthy(&self) -> Result<Vec<String>, EnvError> {
        if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            let lines: Vec<String> = content.lines().map(str::to_string).collect();
            if let Some(open) = lines.iter().position(|l| l.trim() == MODULE_OPEN) {
                if lines[open + 1..].iter().any(|l| l.trim() == MODULE_CLOSE) {
                    return Ok(lines);
                }
            }
        }

        let fresh = vec![MODULE_OPEN.to_string(), MODULE_CLOSE.to_string()];
        self.write_lines(&fresh)?;
        Ok(fresh)
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), EnvError> {
        let mut out = lines.join("\n");
        out.push('\n');
        fs::write(&self.path, out)?;
        Ok(())
    }
}

/// Exact-key match on a declaration line, so `API` never matches `API_URL`
fn references_key(line: &str, key: &str) -> bool {
    line.trim_start()
        .starts_with(&format!("export const {}:", key))
}

/// Index of the block's closing brace; callers run after `read_healthy`,
/// which guarantees the markers exist.
fn block_close_index(lines: &[String]) -> usize {
    let open = lines
        .iter()
        .position(|l| l.trim() == MODULE_OPEN)
        .unwrap_or(0);
    lines
        .iter()
        .enumerate()
        .skip(open + 1)
        .find(|(_, l)| l.trim() == MODULE_CLOSE)
        .map(|(i, _)| i)
        .unwrap_or(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror(dir: &tempfile::TempDir) -> DeclarationFile {
        DeclarationFile::at(dir.path())
    }

    fn content(dir: &tempfile::TempDir) -> String {
        fs::read_to_string(dir.path().join(DECLARATION_FILE_NAME)).unwrap()
    }

    #[test]
    fn test_ensure_creates_empty_block() {
        let dir = tempfile::tempdir().unwrap();
        mirror(&dir).ensure().unwrap();
        assert_eq!(content(&dir), "declare module \"@env\" {\n}\n");
    }

    #[test]
    fn test_upsert_inserts_before_closing_brace() {
        let dir = tempfile::tempdir().unwrap();
        let file = mirror(&dir);

        file.upsert("api_url").unwrap();
        file.upsert("TOKEN").unwrap();

        assert_eq!(
            content(&dir),
            "declare module \"@env\" {\n  export const API_URL: string;\n  export const TOKEN: string;\n}\n"
        );
    }

    #[test]
    fn test_upsert_same_key_keeps_single_line_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = mirror(&dir);

        file.upsert("API_URL").unwrap();
        file.upsert("TOKEN").unwrap();
        file.upsert("api_url").unwrap();

        let text = content(&dir);
        assert_eq!(text.matches("API_URL").count(), 1);
        // Position preserved: API_URL still declared before TOKEN
        assert!(text.find("API_URL").unwrap() < text.find("TOKEN").unwrap());
    }

    #[test]
    fn test_upsert_heals_missing_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DECLARATION_FILE_NAME);
        fs::write(&path, "export const ORPHANED: string;\n").unwrap();

        mirror(&dir).upsert("API_URL").unwrap();

        assert_eq!(
            content(&dir),
            "declare module \"@env\" {\n  export const API_URL: string;\n}\n"
        );
    }

    #[test]
    fn test_upsert_heals_unclosed_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DECLARATION_FILE_NAME);
        fs::write(&path, "declare module \"@env\" {\n  export const OLD: string;\n").unwrap();

        mirror(&dir).upsert("API_URL").unwrap();

        assert_eq!(
            content(&dir),
            "declare module \"@env\" {\n  export const API_URL: string;\n}\n"
        );
    }

    #[test]
    fn test_remove_deletes_only_matching_line() {
        let dir = tempfile::tempdir().unwrap();
        let file = mirror(&dir);

        file.upsert("API").unwrap();
        file.upsert("API_URL").unwrap();
        file.remove("API").unwrap();

        let text = content(&dir);
        assert!(text.contains("export const API_URL: string;"));
        assert!(!text.contains("export const API: string;"));
        assert!(text.starts_with("declare module \"@env\" {"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let file = mirror(&dir);

        file.upsert("API_URL").unwrap();
        let before = content(&dir);
        file.remove("NEVER_ADDED").unwrap();
        assert_eq!(content(&dir), before);
    }
}
