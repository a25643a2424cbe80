use convert_case::{Case, Casing};

pub fn pascal(s: &str) -> String {
    s.to_case(Case::Pascal)
}

pub fn camel(s: &str) -> String {
    s.to_case(Case::Camel)
}

pub fn snake(s: &str) -> String {
    s.to_case(Case::Snake)
}

pub fn kebab(s: &str) -> String {
    s.to_case(Case::Kebab)
}

/// English-ish pluralization for default route and table names: a trailing
/// `s` is kept as-is, `y` becomes `ies`, anything else gains an `s`.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix('y') {
        return format!("{stem}ies");
    }
    format!("{name}s")
}
