use indexmap::IndexSet;

/// Scalar types of the schema language.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Decimal,
    BigInt,
    Json,
    Bytes,
    /// Unrecognized lowercase type name, carried through verbatim.
    Other(String),
}

impl ScalarType {
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "String" => Self::String,
            "Int" => Self::Int,
            "Float" => Self::Float,
            "Boolean" => Self::Boolean,
            "DateTime" => Self::DateTime,
            "Decimal" => Self::Decimal,
            "BigInt" => Self::BigInt,
            "Json" => Self::Json,
            "Bytes" => Self::Bytes,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Decimal => "Decimal",
            Self::BigInt => "BigInt",
            Self::Json => "Json",
            Self::Bytes => "Bytes",
            Self::Other(name) => name,
        }
    }
}

/// What a field's declared type means for generation. Resolved exactly once
/// per field; every later decision matches on this instead of re-testing the
/// type name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Scalar(ScalarType),
    /// The type name appears in the schema's `enum` declarations.
    Enum(String),
    /// Points at another model. Carries `[]` from the declaration.
    Relation { target: String, is_list: bool },
}

impl FieldType {
    /// Resolution order: an explicit relation attribute always wins, then the
    /// scalar set, then the declared enums. What remains is a relation if it
    /// looks like a model reference (list-typed or capitalized), otherwise a
    /// scalar fallback with the name kept verbatim.
    pub fn resolve(base: &str, is_list: bool, has_relation_attr: bool, enums: &IndexSet<String>) -> Self {
        if has_relation_attr {
            return Self::Relation {
                target: base.to_string(),
                is_list,
            };
        }
        if let Some(scalar) = ScalarType::from_name(base) {
            return Self::Scalar(scalar);
        }
        if enums.contains(base) {
            return Self::Enum(base.to_string());
        }
        if is_list || base.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Self::Relation {
                target: base.to_string(),
                is_list,
            };
        }
        Self::Scalar(ScalarType::Other(base.to_string()))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation { .. })
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::Scalar(ScalarType::DateTime))
    }

    pub fn enum_name(&self) -> Option<&str> {
        match self {
            Self::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// The bare type name as written in the schema.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Scalar(scalar) => scalar.name(),
            Self::Enum(name) => name,
            Self::Relation { target, .. } => target,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relation { target, is_list: true } => write!(f, "{target}[]"),
            _ => write!(f, "{}", self.base_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enums(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scalar_resolution() {
        let ty = FieldType::resolve("String", false, false, &enums(&[]));
        assert_eq!(ty, FieldType::Scalar(ScalarType::String));
        assert!(ty.is_scalar());
        assert!(!ty.is_relation());
    }

    #[test]
    fn test_enum_resolution() {
        let ty = FieldType::resolve("Role", false, false, &enums(&["Role"]));
        assert_eq!(ty, FieldType::Enum("Role".to_string()));
        assert_eq!(ty.enum_name(), Some("Role"));
    }

    #[test]
    fn test_relation_attr_wins_over_scalar_lookup() {
        let ty = FieldType::resolve("Ticket", false, true, &enums(&["Ticket"]));
        assert!(ty.is_relation());
    }

    #[test]
    fn test_capitalized_unknown_is_relation() {
        let ty = FieldType::resolve("Ticket", false, false, &enums(&[]));
        assert_eq!(
            ty,
            FieldType::Relation {
                target: "Ticket".to_string(),
                is_list: false
            }
        );
    }

    #[test]
    fn test_unknown_list_is_relation() {
        let ty = FieldType::resolve("widget", true, false, &enums(&[]));
        assert!(ty.is_relation());
    }

    #[test]
    fn test_lowercase_unknown_falls_back_to_scalar() {
        // no list marker, no capitalization, no relation attribute: the name
        // passes through verbatim as a scalar
        let ty = FieldType::resolve("citext", false, false, &enums(&[]));
        assert_eq!(ty, FieldType::Scalar(ScalarType::Other("citext".to_string())));
        assert!(!ty.is_relation());
        assert_eq!(ty.base_name(), "citext");
    }

    #[test]
    fn test_scalar_list_stays_scalar() {
        // `tags String[]` is a scalar list, not a relation
        let ty = FieldType::resolve("String", true, false, &enums(&[]));
        assert_eq!(ty, FieldType::Scalar(ScalarType::String));
    }
}
