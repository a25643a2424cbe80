//! Template rendering. Templates are compiled into the binary; nothing is
//! read from disk at generation time.

use tera::Tera;

use crate::context::{Answers, FeatureNames, GenerationContext};
use crate::{Error, Result};

const TEMPLATES: &[(&str, &str)] = &[
    ("mod.rs.tera", include_str!("../templates/mod.rs.tera")),
    ("http.rs.tera", include_str!("../templates/http.rs.tera")),
    ("repository.rs.tera", include_str!("../templates/repository.rs.tera")),
    ("use_cases.rs.tera", include_str!("../templates/use_cases.rs.tera")),
    ("password.rs.tera", include_str!("../templates/password.rs.tera")),
    ("entity.rs.tera", include_str!("../templates/entity.rs.tera")),
    ("dto.rs.tera", include_str!("../templates/dto.rs.tera")),
    ("mapper.rs.tera", include_str!("../templates/mapper.rs.tera")),
    ("sqlx_repository.rs.tera", include_str!("../templates/sqlx_repository.rs.tera")),
    ("entity_fallback.rs.tera", include_str!("../templates/entity_fallback.rs.tera")),
    ("dto_fallback.rs.tera", include_str!("../templates/dto_fallback.rs.tera")),
    (
        "sqlx_repository_fallback.rs.tera",
        include_str!("../templates/sqlx_repository_fallback.rs.tera"),
    ),
];

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        let out = self.tera.render(template, context)?;
        Ok(out)
    }
}

/// One context for every template in a run. `schema` is absent on the
/// fallback path, and the templates that mention it are never rendered then.
pub fn template_context(
    answers: &Answers,
    names: &FeatureNames,
    schema: Option<&GenerationContext>,
) -> Result<tera::Context> {
    let mut context = tera::Context::new();
    context.insert("answers", answers);
    context.insert("names", names);
    context.insert("has_schema", &schema.is_some());
    if let Some(schema) = schema {
        context.insert("schema", schema);
    }
    if answers.has_password && answers.password_field.is_none() {
        return Err(Error::Generate("password module requested without a password field name".to_string()));
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GenerationContext;
    use crate::plan;
    use crudgen_schema::parse_model;

    const SCHEMA: &str = r#"
model Event {
  id        String   @id @default(uuid())
  title     String
  date      DateTime
  createdAt DateTime @default(now())
  updatedAt DateTime @updatedAt
  status    Int      @default(1)
}
"#;

    fn answers() -> Answers {
        Answers {
            feature_name: "event".to_string(),
            model_name: "Event".to_string(),
            schema_path: "prisma/schema.prisma".into(),
            soft_delete: true,
            has_password: false,
            password_field: None,
            route_name: "events".to_string(),
            auto_import: true,
            app_module_path: "src/modules/mod.rs".into(),
        }
    }

    fn render_all(schema_driven: bool) -> Vec<(String, String)> {
        let answers = answers();
        let names = FeatureNames::new(&answers);
        let schema = schema_driven.then(|| {
            let model = parse_model(SCHEMA, "Event").unwrap();
            GenerationContext::from_model(&model, answers.soft_delete)
        });
        let context = template_context(&answers, &names, schema.as_ref()).unwrap();
        let renderer = Renderer::new().unwrap();
        plan::plan(answers.has_password, schema_driven)
            .into_iter()
            .map(|f| (f.rel_path.to_string(), renderer.render(f.template, &context).unwrap()))
            .collect()
    }

    fn rendered<'a>(files: &'a [(String, String)], name: &str) -> &'a str {
        &files.iter().find(|(path, _)| path == name).unwrap().1
    }

    #[test]
    fn test_render_schema_driven_set() {
        let files = render_all(true);
        assert_eq!(files.len(), 8);

        let entity = rendered(&files, "entity.rs");
        assert!(entity.contains("pub struct EventEntity {"));
        assert!(entity.contains("pub title: String,"));
        assert!(entity.contains("pub date: DateTime<Utc>,"));
        assert!(entity.contains("#[serde(rename = \"createdAt\")]"));
        assert!(entity.contains("pub created_at: DateTime<Utc>,"));

        let dto = rendered(&files, "dto.rs");
        assert!(dto.contains("pub struct CreateEventDto {"));
        assert!(dto.contains("#[validate(length(min = 1))]"));
        assert!(dto.contains("#[validate(custom(function = \"validate_date_string\"))]"));
        // the DTO takes the date as a string; the mapper parses it
        assert!(dto.contains("pub date: String,"));
        assert!(!dto.contains("pub id"), "id must not appear in the create DTO");
        assert!(!dto.contains("pub status"), "status must not appear in the create DTO");

        let mapper = rendered(&files, "mapper.rs");
        assert!(mapper.contains("date: parse_date(&dto.date)?,"));

        let repo = rendered(&files, "sqlx_repository.rs");
        assert!(repo.contains(r#"INSERT INTO events ("title", "date", "status")"#));
        assert!(repo.contains("VALUES ($1, $2, 1)"));
        assert!(repo.contains(r#"SET "status" = 0 WHERE "id" = $1"#));
    }

    #[test]
    fn test_render_fallback_set() {
        let files = render_all(false);
        assert_eq!(files.len(), 7);

        let entity = rendered(&files, "entity.rs");
        assert!(entity.contains("pub data: serde_json::Value,"));

        let repo = rendered(&files, "sqlx_repository.rs");
        assert!(repo.contains(r#"INSERT INTO events ("data") VALUES ($1)"#));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_all(true), render_all(true));
        assert_eq!(render_all(false), render_all(false));
    }

    #[test]
    fn test_password_template() {
        let mut answers = answers();
        answers.has_password = true;
        answers.password_field = Some("password".to_string());
        let names = FeatureNames::new(&answers);
        let context = template_context(&answers, &names, None).unwrap();
        let renderer = Renderer::new().unwrap();
        let out = renderer.render("password.rs.tera", &context).unwrap();
        assert!(out.contains("pub struct PasswordService;"));
        assert!(out.contains("`password` field"));
    }
}
