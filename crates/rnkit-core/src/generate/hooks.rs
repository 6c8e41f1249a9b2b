//! React hook scaffolding with type definitions and barrel exports
//!
//! `create_hook` writes three things: the hook itself (`useFoo.tsx`), its
//! type definition (`useFoo.type.ts` under the shared types directory), and
//! an export line in each directory's `index.ts` barrel. Barrel lines are
//! deduplicated, so regenerating a hook never stacks duplicate exports.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where hooks land when no directory is given
pub const DEFAULT_HOOKS_DIR: &str = "src/lib/hooks";

/// Shared types directory referenced by the hook's import
const TYPES_DIR: &str = "src/lib/types/hooks";

/// Files produced by a hook generation run
#[derive(Debug)]
pub struct CreatedHook {
    pub hook_name: String,
    pub hook_file: PathBuf,
    pub type_file: PathBuf,
}

/// Generate a hook, its type file, and the barrel exports for both.
pub fn create_hook(
    project_dir: &Path,
    name: &str,
    directory: Option<&Path>,
) -> Result<CreatedHook> {
    let hook_name = ensure_use_prefix(name);
    let type_name = format!("I{}", to_upper_camel(&hook_name));

    let hooks_dir = project_dir.join(directory.unwrap_or_else(|| Path::new(DEFAULT_HOOKS_DIR)));
    let types_dir = project_dir.join(TYPES_DIR);
    fs::create_dir_all(&hooks_dir)
        .with_context(|| format!("Failed to create {}", hooks_dir.display()))?;
    fs::create_dir_all(&types_dir)
        .with_context(|| format!("Failed to create {}", types_dir.display()))?;

    let hook_file = hooks_dir.join(format!("{}.tsx", hook_name));
    fs::write(&hook_file, hook_source(&hook_name, &type_name))
        .with_context(|| format!("Failed to write {}", hook_file.display()))?;

    let type_file = types_dir.join(format!("{}.type.ts", hook_name));
    fs::write(&type_file, type_source(&type_name))
        .with_context(|| format!("Failed to write {}", type_file.display()))?;

    append_barrel_export(
        &hooks_dir.join("index.ts"),
        &format!("export * from \"./{}\";", hook_name),
    )?;
    append_barrel_export(
        &types_dir.join("index.ts"),
        &format!("export * from \"./{}.type\";", hook_name),
    )?;

    Ok(CreatedHook {
        hook_name,
        hook_file,
        type_file,
    })
}

/// Add the `use` prefix if not already present
fn ensure_use_prefix(name: &str) -> String {
    if name.starts_with("use") {
        name.to_string()
    } else {
        format!("use{}", to_upper_camel(name))
    }
}

/// `useCustomHook` -> `UseCustomHook`
fn to_upper_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn hook_source(hook_name: &str, type_name: &str) -> String {
    format!(
        "import {{ {type_name} }} from \"@src/lib/types/hooks\";\n\
         \n\
         export const {hook_name}: {type_name} = () => {{\n\
         \t// Your hook logic here\n\
         \treturn {{}};\n\
         }};\n"
    )
}

fn type_source(type_name: &str) -> String {
    format!(
        "interface {type_name}Props {{}}\n\
         interface {type_name}ReturnValue {{}}\n\
         \n\
         export type {type_name} = ({{}}: {type_name}Props) => {type_name}ReturnValue;\n"
    )
}

/// Append an export line to a barrel file, creating it when absent and
/// skipping lines that are already there
fn append_barrel_export(barrel: &Path, line: &str) -> Result<()> {
    let mut content = if barrel.exists() {
        fs::read_to_string(barrel)
            .with_context(|| format!("Failed to read {}", barrel.display()))?
    } else {
        String::new()
    };

    if content.lines().any(|existing| existing.trim() == line) {
        return Ok(());
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(line);
    content.push('\n');

    fs::write(barrel, content).with_context(|| format!("Failed to write {}", barrel.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_use_prefix() {
        assert_eq!(ensure_use_prefix("customHook"), "useCustomHook");
        assert_eq!(ensure_use_prefix("useCustomHook"), "useCustomHook");
    }

    #[test]
    fn test_create_hook_writes_expected_files() {
        let dir = tempfile::tempdir().unwrap();

        let created = create_hook(dir.path(), "customHook", None).unwrap();
        assert_eq!(created.hook_name, "useCustomHook");

        let hook = fs::read_to_string(&created.hook_file).unwrap();
        assert!(hook.contains("import { IUseCustomHook } from \"@src/lib/types/hooks\";"));
        assert!(hook.contains("export const useCustomHook: IUseCustomHook = () => {"));

        let types = fs::read_to_string(&created.type_file).unwrap();
        assert!(types.contains("interface IUseCustomHookProps {}"));
        assert!(types.contains(
            "export type IUseCustomHook = ({}: IUseCustomHookProps) => IUseCustomHookReturnValue;"
        ));
    }

    #[test]
    fn test_barrels_gain_export_lines() {
        let dir = tempfile::tempdir().unwrap();

        create_hook(dir.path(), "useThing", None).unwrap();

        let hooks_barrel =
            fs::read_to_string(dir.path().join(DEFAULT_HOOKS_DIR).join("index.ts")).unwrap();
        assert_eq!(hooks_barrel, "export * from \"./useThing\";\n");

        let types_barrel =
            fs::read_to_string(dir.path().join(TYPES_DIR).join("index.ts")).unwrap();
        assert_eq!(types_barrel, "export * from \"./useThing.type\";\n");
    }

    #[test]
    fn test_regenerating_does_not_duplicate_barrel_lines() {
        let dir = tempfile::tempdir().unwrap();

        create_hook(dir.path(), "useThing", None).unwrap();
        create_hook(dir.path(), "useThing", None).unwrap();
        create_hook(dir.path(), "useOther", None).unwrap();

        let hooks_barrel =
            fs::read_to_string(dir.path().join(DEFAULT_HOOKS_DIR).join("index.ts")).unwrap();
        assert_eq!(
            hooks_barrel,
            "export * from \"./useThing\";\nexport * from \"./useOther\";\n"
        );
    }

    #[test]
    fn test_custom_directory() {
        let dir = tempfile::tempdir().unwrap();

        let created =
            create_hook(dir.path(), "useThing", Some(Path::new("app/hooks"))).unwrap();
        assert!(created.hook_file.starts_with(dir.path().join("app/hooks")));
        assert!(dir.path().join("app/hooks/index.ts").exists());
        // Type files stay in the shared types directory
        assert!(created.type_file.starts_with(dir.path().join(TYPES_DIR)));
    }
}
