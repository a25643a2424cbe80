use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sha2::{Digest, Sha384};

use crudgen_core::case;
use crudgen_core::config::Config;
use crudgen_core::context::{Answers, FeatureNames, GenerationContext};
use crudgen_core::plan::plan;
use crudgen_core::render::{template_context, Renderer};

use crate::inject;
use crate::prompt::Prompter;

#[derive(Parser, Debug)]
pub struct Generate {
    /// Feature/module name, e.g. event, payment-method.
    name: Option<String>,

    /// Schema model name. Defaults to the PascalCase feature name.
    #[clap(long)]
    model: Option<String>,

    /// Path to the schema file.
    #[clap(long)]
    schema: Option<PathBuf>,

    /// Soft delete via an integer status column (1 active / 0 inactive).
    #[clap(long)]
    soft_delete: Option<bool>,

    /// Generate a password service (hash/verify) for this field.
    #[clap(long)]
    password_field: Option<String>,

    /// Base route (plural). Defaults to the pluralized kebab-case feature name.
    #[clap(long)]
    route: Option<String>,

    /// Register the module in the aggregator file.
    #[clap(long)]
    auto_import: Option<bool>,

    /// Aggregator file the module is registered in.
    #[clap(long)]
    app_module: Option<PathBuf>,

    /// Directory the feature module is generated under.
    #[clap(long)]
    dir: Option<PathBuf>,

    /// Accept the derived defaults instead of prompting.
    #[clap(long, short = 'y')]
    defaults: bool,

    /// Overwrite existing files whose content differs.
    #[clap(long, short)]
    force: bool,
}

impl Generate {
    pub fn run(self) -> Result<()> {
        let config = crate::config::load_config()?;
        let modules_dir = self
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(config.modules_dir()));
        let force = self.force;
        let answers = self.resolve_answers(&config)?;
        execute(&answers, &modules_dir, force)
    }

    /// Flags answer questions ahead of time; anything still open is asked
    /// interactively, or takes its default under `--defaults`.
    fn resolve_answers(self, config: &Config) -> Result<Answers> {
        let mut prompter = if self.defaults { None } else { Some(Prompter::new()?) };

        let feature_name = match (self.name, &mut prompter) {
            (Some(name), _) => name,
            (None, Some(p)) => p.input_required("Feature/module name (e.g. event, payment-method)")?,
            (None, None) => anyhow::bail!("a feature name is required with --defaults"),
        };

        let model_name = answer_input(
            self.model,
            &mut prompter,
            "Schema model name",
            &case::pascal(&feature_name),
        )?;
        let schema_path = answer_input(
            self.schema.map(|p| p.display().to_string()),
            &mut prompter,
            "Schema path",
            &config.schema_path(),
        )?;
        let soft_delete = answer_confirm(
            self.soft_delete,
            &mut prompter,
            "Soft delete via a status column (1 active / 0 inactive)?",
            true,
        )?;

        let (has_password, password_field) = match self.password_field {
            Some(field) => (true, Some(field)),
            None => {
                let wanted = answer_confirm(
                    None,
                    &mut prompter,
                    "Does this module have a password field (hash/verify)?",
                    false,
                )?;
                if wanted {
                    let field = answer_input(None, &mut prompter, "Password field name", "password")?;
                    (true, Some(field))
                } else {
                    (false, None)
                }
            }
        };

        let route_name = answer_input(
            self.route,
            &mut prompter,
            "Base route (plural)",
            &case::pluralize(&case::kebab(&feature_name)),
        )?;
        let auto_import = answer_confirm(
            self.auto_import,
            &mut prompter,
            "Register the module in the aggregator file?",
            true,
        )?;
        let app_module_path = answer_input(
            self.app_module.map(|p| p.display().to_string()),
            &mut prompter,
            "Aggregator file path",
            &config.app_module_path(),
        )?;

        Ok(Answers {
            feature_name,
            model_name,
            schema_path: PathBuf::from(schema_path),
            soft_delete,
            has_password,
            password_field,
            route_name,
            auto_import,
            app_module_path: PathBuf::from(app_module_path),
        })
    }
}

fn answer_input(
    flag: Option<String>,
    prompter: &mut Option<Prompter>,
    message: &str,
    default: &str,
) -> Result<String> {
    match (flag, prompter) {
        (Some(value), _) => Ok(value),
        (None, Some(p)) => p.input(message, default),
        (None, None) => Ok(default.to_string()),
    }
}

fn answer_confirm(
    flag: Option<bool>,
    prompter: &mut Option<Prompter>,
    message: &str,
    default: bool,
) -> Result<bool> {
    match (flag, prompter) {
        (Some(value), _) => Ok(value),
        (None, Some(p)) => p.confirm(message, default),
        (None, None) => Ok(default),
    }
}

/// One full generation run. The context is computed and every file rendered
/// before anything is written, so a schema or template problem never leaves
/// a half-written module behind.
pub fn execute(answers: &Answers, modules_dir: &Path, force: bool) -> Result<()> {
    let names = FeatureNames::new(answers);

    let model = crudgen_schema::load_model(&answers.schema_path, &answers.model_name);
    let schema_ctx = match &model {
        Some(model) => {
            for warning in &model.warnings {
                eprintln!("{} {warning}", "WARNING".yellow());
            }
            Some(GenerationContext::from_model(model, answers.soft_delete))
        }
        None => {
            eprintln!(
                "{}: model `{}` not found, falling back to untyped templates",
                answers.schema_path.display(),
                answers.model_name
            );
            None
        }
    };

    let renderer = Renderer::new()?;
    let context = template_context(answers, &names, schema_ctx.as_ref())?;
    let feature_dir = modules_dir.join(&names.snake);

    let files = plan(answers.has_password, schema_ctx.is_some());
    let mut rendered = Vec::with_capacity(files.len());
    for file in &files {
        let content = renderer.render(file.template, &context)?;
        rendered.push((feature_dir.join(file.rel_path), content));
    }

    fs::create_dir_all(&feature_dir).with_context(|| format!("unable to create {}", feature_dir.display()))?;
    for (path, content) in &rendered {
        write_generated(path, content, force)?;
    }

    if answers.auto_import {
        inject::register_module(&answers.app_module_path, &names.snake)?;
    }

    eprintln!(
        "{} Generated {} module at {}",
        "SUCCESS".green(),
        names.snake,
        feature_dir.display()
    );
    Ok(())
}

fn write_generated(path: &Path, content: &str, force: bool) -> Result<()> {
    if let Ok(existing) = fs::read(path) {
        if Sha384::digest(&existing) == Sha384::digest(content.as_bytes()) {
            eprintln!("{}: Unchanged, skipped", path.display());
            return Ok(());
        }
        if !force {
            anyhow::bail!(
                "{} already exists with different content, pass --force to overwrite",
                path.display()
            );
        }
    }
    let mut file = File::create(path).context("Failed to create file")?;
    file.write_all(content.as_bytes()).context("Could not write to file")?;
    eprintln!("{}: Created file", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const SCHEMA: &str = r#"
enum Role {
  ADMIN
  USER
}

model Event {
  id        String   @id @default(uuid())
  title     String
  date      DateTime
  createdAt DateTime @default(now())
  updatedAt DateTime @updatedAt
  status    Int      @default(1)
}
"#;

    const APP_MODULE: &str = "\
pub mod users;

pub fn routers(state: &AppState) -> Vec<axum::Router> {
    vec![
        users::router(state.users.clone()),
    ]
}
";

    fn answers(schema_path: &Path, app_module_path: &Path) -> Answers {
        Answers {
            feature_name: "event".to_string(),
            model_name: "Event".to_string(),
            schema_path: schema_path.to_path_buf(),
            soft_delete: true,
            has_password: false,
            password_field: None,
            route_name: "events".to_string(),
            auto_import: true,
            app_module_path: app_module_path.to_path_buf(),
        }
    }

    fn read_tree(dir: &Path) -> BTreeMap<String, String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                let name = entry.file_name().to_string_lossy().into_owned();
                let content = fs::read_to_string(entry.path()).unwrap();
                (name, content)
            })
            .collect()
    }

    #[test]
    fn test_schema_driven_generation_and_idempotence() {
        let tmp = tempfile::tempdir().unwrap();
        let schema_path = tmp.path().join("schema.prisma");
        fs::write(&schema_path, SCHEMA).unwrap();
        let modules = tmp.path().join("modules");
        fs::create_dir_all(&modules).unwrap();
        let app_module = modules.join("mod.rs");
        fs::write(&app_module, APP_MODULE).unwrap();

        let answers = answers(&schema_path, &app_module);
        execute(&answers, &modules, false).unwrap();

        let feature = modules.join("event");
        for name in [
            "mod.rs",
            "http.rs",
            "repository.rs",
            "use_cases.rs",
            "entity.rs",
            "dto.rs",
            "mapper.rs",
            "sqlx_repository.rs",
        ] {
            assert!(feature.join(name).exists(), "{name} missing");
        }

        let dto = fs::read_to_string(feature.join("dto.rs")).unwrap();
        assert!(dto.contains("pub title: String,"));
        assert!(dto.contains("pub date: String,"));
        assert!(!dto.contains("pub status"), "status is set internally under soft delete");

        let aggregator = fs::read_to_string(&app_module).unwrap();
        assert!(aggregator.contains("pub mod event;"));
        assert!(aggregator.contains("event::router(state.event.clone()),"));

        // unchanged schema + identical answers: byte-identical output
        let before = read_tree(&feature);
        let aggregator_before = fs::read_to_string(&app_module).unwrap();
        execute(&answers, &modules, false).unwrap();
        assert_eq!(before, read_tree(&feature));
        assert_eq!(aggregator_before, fs::read_to_string(&app_module).unwrap());
    }

    #[test]
    fn test_fallback_on_unreadable_schema() {
        let tmp = tempfile::tempdir().unwrap();
        let modules = tmp.path().join("modules");
        let mut answers = answers(&tmp.path().join("missing.prisma"), &modules.join("mod.rs"));
        answers.auto_import = false;

        execute(&answers, &modules, false).unwrap();

        let feature = modules.join("event");
        assert!(feature.join("entity.rs").exists());
        assert!(!feature.join("mapper.rs").exists(), "fallback emits no mapper");

        let entity = fs::read_to_string(feature.join("entity.rs")).unwrap();
        assert!(entity.contains("pub data: serde_json::Value,"));

        // the fallback file list is the same every run
        let listing: Vec<String> = read_tree(&feature).into_keys().collect();
        let tmp2 = tempfile::tempdir().unwrap();
        let modules2 = tmp2.path().join("modules");
        let mut answers2 = answers.clone();
        answers2.schema_path = tmp2.path().join("missing.prisma");
        answers2.app_module_path = modules2.join("mod.rs");
        execute(&answers2, &modules2, false).unwrap();
        let listing2: Vec<String> = read_tree(&modules2.join("event")).into_keys().collect();
        assert_eq!(listing, listing2);
    }

    #[test]
    fn test_refuses_to_overwrite_changed_files() {
        let tmp = tempfile::tempdir().unwrap();
        let schema_path = tmp.path().join("schema.prisma");
        fs::write(&schema_path, SCHEMA).unwrap();
        let modules = tmp.path().join("modules");
        let mut answers = answers(&schema_path, &modules.join("mod.rs"));
        answers.auto_import = false;

        execute(&answers, &modules, false).unwrap();
        let entity = modules.join("event").join("entity.rs");
        fs::write(&entity, "// hand edited\n").unwrap();

        let err = execute(&answers, &modules, false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        execute(&answers, &modules, true).unwrap();
        let restored = fs::read_to_string(&entity).unwrap();
        assert!(restored.contains("pub struct EventEntity {"));
    }

    #[test]
    fn test_password_module_generated() {
        let tmp = tempfile::tempdir().unwrap();
        let modules = tmp.path().join("modules");
        let mut answers = answers(&tmp.path().join("missing.prisma"), &modules.join("mod.rs"));
        answers.auto_import = false;
        answers.has_password = true;
        answers.password_field = Some("password".to_string());

        execute(&answers, &modules, false).unwrap();
        let password = fs::read_to_string(modules.join("event").join("password.rs")).unwrap();
        assert!(password.contains("pub struct PasswordService;"));
    }
}
