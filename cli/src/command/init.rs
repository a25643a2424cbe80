use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

const INIT_CONFIG: &str = r#"# crudgen project defaults. Flags and prompt answers override these.
schema_path = "prisma/schema.prisma"
modules_dir = "src/modules"
app_module_path = "src/modules/mod.rs"
"#;

#[derive(Parser, Debug)]
pub struct Init {}

impl Init {
    pub fn run(self) -> Result<()> {
        let path = Path::new("crudgen.toml");
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        fs::write(path, INIT_CONFIG)?;
        eprintln!("{} Wrote {}", "SUCCESS".green(), path.display());
        Ok(())
    }
}
