//! Babel configuration wiring for `react-native-dotenv`
//!
//! Bare projects need the `module:react-native-dotenv` babel plugin so that
//! `@env` imports resolve at build time. Projects carry either a JSON
//! `.babelrc` or a JavaScript `babel.config.js`; the JSON form is edited as
//! a parsed document, the JavaScript form with an anchored insert guarded by
//! a plugin-name presence check so repeated runs never duplicate the entry.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

const PLUGIN_NAME: &str = "react-native-dotenv";

const PLUGIN_SNIPPET_JS: &str = "\n    ['module:react-native-dotenv', {\n      moduleName: '@env',\n      blocklist: null,\n      allowlist: null,\n      safe: false,\n      allowUndefined: false,\n      verbose: false,\n    }],";

/// Register the dotenv plugin in the project's babel configuration.
///
/// Returns `false` when the plugin was already registered.
pub fn register_dotenv_plugin(project_dir: &Path) -> Result<bool> {
    let js_config = project_dir.join("babel.config.js");
    if js_config.exists() {
        return register_in_js_config(&js_config);
    }

    let babelrc = project_dir.join(".babelrc");
    if babelrc.exists() {
        return register_in_babelrc(&babelrc);
    }

    bail!(
        "No babel config found in {} (expected babel.config.js or .babelrc)",
        project_dir.display()
    );
}

/// The plugin tuple in its documented registration shape
fn plugin_entry() -> Value {
    json!([
        format!("module:{}", PLUGIN_NAME),
        {
            "moduleName": "@env",
            "blocklist": null,
            "allowlist": null,
            "safe": false,
            "allowUndefined": false,
            "verbose": false,
        }
    ])
}

/// Whether an existing plugins entry already refers to the dotenv plugin,
/// in any of the shapes found in the wild
fn mentions_plugin(entry: &Value) -> bool {
    match entry {
        Value::String(name) => name.contains(PLUGIN_NAME),
        Value::Array(tuple) => tuple
            .first()
            .and_then(Value::as_str)
            .is_some_and(|name| name.contains(PLUGIN_NAME)),
        Value::Object(map) => map
            .get("module")
            .and_then(Value::as_str)
            .is_some_and(|name| name.contains(PLUGIN_NAME)),
        _ => false,
    }
}

fn register_in_babelrc(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut config: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

    let root = config
        .as_object_mut()
        .with_context(|| format!("{} is not a JSON object", path.display()))?;
    let plugins = root
        .entry("plugins")
        .or_insert_with(|| Value::Array(Vec::new()));
    let plugins = plugins
        .as_array_mut()
        .with_context(|| format!("'plugins' in {} is not an array", path.display()))?;

    if plugins.iter().any(mentions_plugin) {
        return Ok(false);
    }

    plugins.push(plugin_entry());

    let mut updated = serde_json::to_string_pretty(&config)?;
    updated.push('\n');
    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn register_in_js_config(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if content.contains(PLUGIN_NAME) {
        return Ok(false);
    }

    let updated = if content.contains("plugins") {
        // Append to the existing plugins array
        let anchor = Regex::new(r"(plugins:\s*\[)")?;
        if !anchor.is_match(&content) {
            bail!(
                "Could not locate the plugins array in {}",
                path.display()
            );
        }
        anchor
            .replace(&content, format!("${{1}}{}", PLUGIN_SNIPPET_JS))
            .into_owned()
    } else {
        // Create a plugins array inside the exported config object
        let anchor = Regex::new(r"(module\.exports\s*=\s*\{)")?;
        if !anchor.is_match(&content) {
            bail!(
                "Could not locate the exported config object in {}",
                path.display()
            );
        }
        anchor
            .replace(
                &content,
                format!("${{1}}\n  plugins: [{}\n  ],", PLUGIN_SNIPPET_JS),
            )
            .into_owned()
    };

    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
