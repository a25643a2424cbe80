use anyhow::Result as AnyResult;
use std::{fs::File, io::Read, path::Path};

pub use crudgen_core::config::Config;

static CONFIG_REL_PATHS: [&str; 2] = [".crudgen/config.toml", "crudgen.toml"];

pub fn load_config() -> AnyResult<Config> {
    if let Ok(path) = std::env::var("CRUDGEN_CONFIG") {
        return read(path);
    }
    let mut search_paths: Vec<String> = vec![".".to_string(), "..".to_string()];
    if let Some(dir) = dirs::config_dir() {
        search_paths.push(dir.display().to_string());
    }
    if let Some(dir) = dirs::home_dir() {
        search_paths.push(dir.display().to_string());
    }
    for p in &search_paths {
        for rel_path in &CONFIG_REL_PATHS {
            let path = format!("{p}/{rel_path}");
            let path = Path::new(&path);
            if path.exists() {
                return read(path);
            }
        }
    }
    Ok(Config::default())
}

pub fn read(path: impl AsRef<Path>) -> AnyResult<Config> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)?;
    let config: Config = toml::from_str(&buf)?;
    Ok(config)
}
