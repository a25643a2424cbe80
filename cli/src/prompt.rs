//! Interactive answer collection. Flags answer questions ahead of time;
//! whatever is still open gets asked here, one readline per question.

use anyhow::Result;
use rustyline::DefaultEditor;

pub struct Prompter {
    editor: DefaultEditor,
}

impl Prompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Free-form input with a default shown in brackets. Empty answer takes
    /// the default.
    pub fn input(&mut self, message: &str, default: &str) -> Result<String> {
        let line = self.editor.readline(&format!("{message} [{default}]: "))?;
        let line = line.trim();
        Ok(if line.is_empty() { default.to_string() } else { line.to_string() })
    }

    /// Free-form input that must not be empty.
    pub fn input_required(&mut self, message: &str) -> Result<String> {
        loop {
            let line = self.editor.readline(&format!("{message}: "))?;
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line.to_string());
            }
            eprintln!("A value is required.");
        }
    }

    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let line = self.editor.readline(&format!("{message} [{hint}]: "))?;
            match line.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => eprintln!("Please answer y or n."),
            }
        }
    }
}
