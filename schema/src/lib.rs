use std::fs;
use std::path::Path;

use indexmap::IndexSet;

pub use field::{parse_model_fields, FieldDef, ParseWarning};
pub use scanner::{extract_enum_names, extract_model_block};
pub use ttype::{FieldType, ScalarType};

mod field;
mod scanner;
mod ttype;

/// One model's parsed declaration, plus the schema-wide enum set it was
/// resolved against. Lives for a single generation run.
#[derive(Clone, Debug)]
pub struct ModelDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub enums: IndexSet<String>,
    pub warnings: Vec<ParseWarning>,
}

impl ModelDef {
    pub fn has_status_field(&self) -> bool {
        self.fields.iter().any(|f| f.is_status)
    }
}

/// Read a schema file and extract one model. `None` means "no schema": the
/// file could not be read, or no model with that name exists. Callers switch
/// to the untyped fallback generation path instead of failing.
pub fn load_model(path: &Path, model: &str) -> Option<ModelDef> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "schema file not readable");
            return None;
        }
    };
    parse_model(&text, model)
}

/// `load_model`, minus the filesystem.
pub fn parse_model(text: &str, model: &str) -> Option<ModelDef> {
    let enums = extract_enum_names(text);
    let body = extract_model_block(text, model)?;
    let (fields, warnings) = parse_model_fields(&body, &enums);
    tracing::debug!(model, fields = fields.len(), warnings = warnings.len(), "parsed model");
    Some(ModelDef {
        name: model.to_string(),
        fields,
        enums,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
enum Role {
  ADMIN
  USER
}

model User {
  id        String   @id @default(uuid())
  email     String   @unique
  role      Role     @default(USER)
  createdAt DateTime @default(now())
}
"#;

    #[test]
    fn test_parse_model() {
        let model = parse_model(SCHEMA, "User").unwrap();
        assert_eq!(model.fields.len(), 4);
        assert_eq!(model.fields[2].ty, FieldType::Enum("Role".to_string()));
        assert!(model.fields[3].is_created_at);
        assert!(model.warnings.is_empty());
        assert!(!model.has_status_field());
    }

    #[test]
    fn test_missing_model_is_none() {
        assert!(parse_model(SCHEMA, "Event").is_none());
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(load_model(Path::new("/nonexistent/schema.prisma"), "User").is_none());
    }
}
