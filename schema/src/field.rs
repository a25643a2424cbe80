use indexmap::IndexSet;
use itertools::Itertools;

use crate::scanner::strip_line_comment;
use crate::ttype::{FieldType, ScalarType};

/// One field declaration parsed out of a model body, flags resolved.
#[derive(Clone, Debug)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
    /// Trailing `?` on the type token.
    pub optional: bool,
    /// Trailing `[]` on the type token. Kept separate from the type because
    /// scalar and enum lists exist and are excluded from generation.
    pub is_list: bool,
    /// Raw attribute text after the type token, e.g. `@id @default(uuid())`.
    pub attrs: String,
    pub is_id: bool,
    pub is_created_at: bool,
    pub is_updated_at: bool,
    pub is_status: bool,
}

impl FieldDef {
    #[doc(hidden)]
    pub fn mock(name: &str, ty: FieldType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            optional: false,
            is_list: false,
            attrs: String::new(),
            is_id: false,
            is_created_at: false,
            is_updated_at: false,
            is_status: false,
        }
    }
}

/// Anything the parser skipped instead of failing on. Skips were silent once;
/// now they are reported so a typo'd field does not just vanish from the
/// generated module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseWarning {
    /// Line did not split into at least a name and a type token.
    Malformed { line_no: usize, line: String },
    /// A later line redeclared an existing field name. The first declaration
    /// wins.
    DuplicateField { line_no: usize, name: String },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { line_no, line } => {
                write!(f, "line {line_no}: skipped malformed field line `{line}`")
            }
            Self::DuplicateField { line_no, name } => {
                write!(f, "line {line_no}: duplicate field `{name}` ignored")
            }
        }
    }
}

/// Parse a model body into ordered field declarations.
///
/// Per line: strip comments, skip blanks and `@@`/`@` block attribute lines,
/// split on whitespace into name / type token / attribute tail. The `[]` list
/// marker is decoded before the `?` optional marker, then the bare name is
/// resolved against the scalar set and `enums`.
pub fn parse_model_fields(body: &str, enums: &IndexSet<String>) -> (Vec<FieldDef>, Vec<ParseWarning>) {
    let mut fields: Vec<FieldDef> = Vec::new();
    let mut warnings = Vec::new();

    for (idx, raw) in body.lines().enumerate() {
        let line = strip_line_comment(raw);
        if line.is_empty() || line.starts_with('@') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(name), Some(type_token)) = (tokens.next(), tokens.next()) else {
            warnings.push(ParseWarning::Malformed {
                line_no: idx + 1,
                line: line.to_string(),
            });
            continue;
        };
        let attrs = tokens.join(" ");

        let (type_token, is_list) = match type_token.strip_suffix("[]") {
            Some(base) => (base, true),
            None => (type_token, false),
        };
        let (base, optional) = match type_token.strip_suffix('?') {
            Some(base) => (base, true),
            None => (type_token, false),
        };

        let ty = FieldType::resolve(base, is_list, has_attr(&attrs, "@relation"), enums);
        let is_created_at = ty.is_datetime() && attrs.contains("@default(now())");
        let is_status = name == "status" && ty == FieldType::Scalar(ScalarType::Int);

        if fields.iter().any(|f| f.name == name) {
            warnings.push(ParseWarning::DuplicateField {
                line_no: idx + 1,
                name: name.to_string(),
            });
            continue;
        }

        tracing::debug!(field = name, %ty, "parsed field");
        fields.push(FieldDef {
            name: name.to_string(),
            is_id: has_attr(&attrs, "@id"),
            is_updated_at: has_attr(&attrs, "@updatedAt"),
            is_created_at,
            is_status,
            ty,
            optional,
            is_list,
            attrs,
        });
    }

    (fields, warnings)
}

/// Attribute lookup with a word boundary, so `@id` does not match `@identity`.
fn has_attr(attrs: &str, name: &str) -> bool {
    attrs
        .split_whitespace()
        .any(|token| token == name || token.strip_prefix(name).is_some_and(|rest| rest.starts_with('(')))
}
