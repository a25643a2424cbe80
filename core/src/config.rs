use std::env::var;

pub const DEFAULT_SCHEMA_PATH: &str = "prisma/schema.prisma";
pub const DEFAULT_MODULES_DIR: &str = "src/modules";
pub const DEFAULT_APP_MODULE_PATH: &str = "src/modules/mod.rs";

/// Project-level defaults, loadable from `crudgen.toml`. Environment
/// variables override the file, flags and prompt answers override both.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    pub schema_path: Option<String>,
    pub modules_dir: Option<String>,
    pub app_module_path: Option<String>,
}

impl Config {
    pub fn schema_path(&self) -> String {
        var("CRUDGEN_SCHEMA_PATH")
            .ok()
            .or_else(|| self.schema_path.clone())
            .unwrap_or_else(|| DEFAULT_SCHEMA_PATH.to_string())
    }

    pub fn modules_dir(&self) -> String {
        var("CRUDGEN_MODULES_DIR")
            .ok()
            .or_else(|| self.modules_dir.clone())
            .unwrap_or_else(|| DEFAULT_MODULES_DIR.to_string())
    }

    pub fn app_module_path(&self) -> String {
        var("CRUDGEN_APP_MODULE")
            .ok()
            .or_else(|| self.app_module_path.clone())
            .unwrap_or_else(|| DEFAULT_APP_MODULE_PATH.to_string())
    }
}
