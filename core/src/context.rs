use std::path::PathBuf;

use indexmap::IndexSet;
use serde::Serialize;

use crudgen_schema::{FieldType, ModelDef, ScalarType};

use crate::case;

/// The full answer set for one generation run, however it was collected
/// (flags, prompts, or defaults).
#[derive(Clone, Debug, Serialize)]
pub struct Answers {
    pub feature_name: String,
    pub model_name: String,
    pub schema_path: PathBuf,
    pub soft_delete: bool,
    pub has_password: bool,
    pub password_field: Option<String>,
    pub route_name: String,
    pub auto_import: bool,
    pub app_module_path: PathBuf,
}

/// Every casing of the feature name the templates need, derived once.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureNames {
    pub raw: String,
    pub pascal: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
    /// Schema model name, as answered.
    pub model: String,
    /// Base route (plural).
    pub route: String,
    /// Table name used in emitted SQL.
    pub table: String,
}

impl FeatureNames {
    pub fn new(answers: &Answers) -> Self {
        let snake = case::snake(&answers.feature_name);
        Self {
            raw: answers.feature_name.clone(),
            pascal: case::pascal(&answers.feature_name),
            camel: case::camel(&answers.feature_name),
            kebab: case::kebab(&answers.feature_name),
            model: answers.model_name.clone(),
            route: answers.route_name.clone(),
            table: case::pluralize(&snake),
            snake,
        }
    }
}

/// Validation applied to a create-DTO field, keyed by the field's base type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "enum_name")]
pub enum ValidatorKind {
    Str,
    Int,
    Number,
    Bool,
    DateString,
    Enum(String),
}

impl ValidatorKind {
    pub fn for_field(ty: &FieldType) -> Self {
        match ty {
            FieldType::Enum(name) => Self::Enum(name.clone()),
            FieldType::Scalar(ScalarType::Int) => Self::Int,
            FieldType::Scalar(ScalarType::Float) => Self::Number,
            FieldType::Scalar(ScalarType::Boolean) => Self::Bool,
            FieldType::Scalar(ScalarType::DateTime) => Self::DateString,
            // Decimal and BigInt travel as strings on the wire, and anything
            // unrecognized falls back to the string validator
            _ => Self::Str,
        }
    }
}

/// Rust type spelled into generated code for a schema type. DTO-side types
/// favor wire-friendly strings for dates and big numerics; the emitted
/// mapper converts them before persistence.
pub fn rust_type(ty: &FieldType, for_dto: bool) -> String {
    match ty {
        FieldType::Scalar(scalar) => match scalar {
            ScalarType::String | ScalarType::Decimal => "String".to_string(),
            ScalarType::Int => "i32".to_string(),
            ScalarType::Float => "f64".to_string(),
            ScalarType::Boolean => "bool".to_string(),
            ScalarType::DateTime if for_dto => "String".to_string(),
            ScalarType::DateTime => "DateTime<Utc>".to_string(),
            ScalarType::BigInt if for_dto => "String".to_string(),
            ScalarType::BigInt => "i64".to_string(),
            ScalarType::Json => "serde_json::Value".to_string(),
            ScalarType::Bytes => "Vec<u8>".to_string(),
            ScalarType::Other(name) => name.clone(),
        },
        FieldType::Enum(name) => name.clone(),
        FieldType::Relation { target, .. } => target.clone(),
    }
}

/// An entity-struct field: every non-relation, non-list scalar or enum,
/// id/timestamps/status included.
#[derive(Clone, Debug, Serialize)]
pub struct EntityField {
    /// Column name as declared in the schema.
    pub name: String,
    /// Rust identifier for the generated struct field.
    pub ident: String,
    pub rust_type: String,
    pub optional: bool,
}

/// A create-DTO field: entity fields minus the id, the auto timestamps, and
/// (under soft delete) the status column.
#[derive(Clone, Debug, Serialize)]
pub struct CreateField {
    pub name: String,
    pub ident: String,
    pub rust_type: String,
    pub optional: bool,
    pub is_enum: bool,
    pub enum_name: Option<String>,
    pub is_date: bool,
    pub validator: ValidatorKind,
}

/// Everything the typed templates consume, derived once per run from the
/// parsed model plus the soft-delete answer.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationContext {
    pub has_status_field: bool,
    pub entity_fields: Vec<EntityField>,
    pub create_fields: Vec<CreateField>,
    /// Create-field names whose base type is DateTime. The emitted mapper
    /// parses these from strings before persistence; the update side uses
    /// the same list.
    pub date_fields: Vec<String>,
    pub needs_enum_import: bool,
    pub enum_imports: IndexSet<String>,
    pub uses_datetime: bool,
}

impl GenerationContext {
    pub fn from_model(model: &ModelDef, soft_delete: bool) -> Self {
        let has_status_field = model.has_status_field();

        let included: Vec<_> = model
            .fields
            .iter()
            .filter(|f| !f.ty.is_relation() && !f.is_list)
            .collect();

        let entity_fields: Vec<EntityField> = included
            .iter()
            .map(|f| EntityField {
                name: f.name.clone(),
                ident: case::snake(&f.name),
                rust_type: rust_type(&f.ty, false),
                optional: f.optional,
            })
            .collect();

        let create: Vec<_> = included
            .iter()
            .filter(|f| !f.is_id && !f.is_created_at && !f.is_updated_at)
            // under soft delete the status column is set internally, not by
            // the caller
            .filter(|f| !(soft_delete && f.is_status))
            .collect();

        let create_fields: Vec<CreateField> = create
            .iter()
            .map(|f| CreateField {
                name: f.name.clone(),
                ident: case::snake(&f.name),
                rust_type: rust_type(&f.ty, true),
                optional: f.optional,
                is_enum: f.ty.is_enum(),
                enum_name: f.ty.enum_name().map(str::to_string),
                is_date: f.ty.is_datetime(),
                validator: ValidatorKind::for_field(&f.ty),
            })
            .collect();

        let date_fields: Vec<String> = create
            .iter()
            .filter(|f| f.ty.is_datetime())
            .map(|f| f.name.clone())
            .collect();

        let enum_imports: IndexSet<String> = create
            .iter()
            .filter_map(|f| f.ty.enum_name().map(str::to_string))
            .collect();

        let uses_datetime = entity_fields.iter().any(|f| f.rust_type == "DateTime<Utc>");

        tracing::debug!(
            model = %model.name,
            entity = entity_fields.len(),
            create = create_fields.len(),
            "derived generation context"
        );

        Self {
            has_status_field,
            entity_fields,
            needs_enum_import: !enum_imports.is_empty(),
            create_fields,
            date_fields,
            enum_imports,
            uses_datetime,
        }
    }
}
