//! Textual registration of a generated module into the aggregator file
//! (`src/modules/mod.rs` by convention): one `pub mod` line after the first
//! existing one, one router entry after the registration array's opening
//! bracket. First pattern match wins; a file or pattern that is not there
//! downgrades to a warning so the rest of the run still lands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;

/// Insert `insertion` as a new line directly after the first match of
/// `pattern`. `None` when the pattern does not occur.
fn append_after(content: &str, pattern: &Regex, insertion: &str) -> Option<String> {
    let m = pattern.find(content)?;
    let mut out = String::with_capacity(content.len() + insertion.len() + 1);
    out.push_str(&content[..m.end()]);
    out.push('\n');
    out.push_str(insertion);
    out.push_str(&content[m.end()..]);
    Some(out)
}

pub fn register_module(path: &Path, module: &str) -> Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "aggregator file not readable");
            eprintln!(
                "{} {}: not readable, skipping module registration",
                "WARNING".yellow(),
                path.display()
            );
            return Ok(());
        }
    };

    let mod_line = format!("pub mod {module};");
    if content.contains(&mod_line) {
        eprintln!("{}: module already registered", path.display());
        return Ok(());
    }

    let mod_pattern = Regex::new(r"(?m)^pub mod \w+;$").unwrap();
    let registry_pattern = Regex::new(r"vec!\[").unwrap();

    let mut updated = match append_after(&content, &mod_pattern, &mod_line) {
        Some(updated) => updated,
        None => {
            eprintln!(
                "{} {}: no `pub mod` line found, add `{mod_line}` by hand",
                "WARNING".yellow(),
                path.display()
            );
            content.clone()
        }
    };

    let entry = format!("        {module}::router(state.{module}.clone()),");
    updated = match append_after(&updated, &registry_pattern, &entry) {
        Some(updated) => updated,
        None => {
            eprintln!(
                "{} {}: no `vec![` registry found, wire the router by hand",
                "WARNING".yellow(),
                path.display()
            );
            updated
        }
    };

    if updated != content {
        fs::write(path, &updated).with_context(|| format!("failed to update {}", path.display()))?;
        eprintln!("{}: Registered module", path.display());
    }
    Ok(())
}
