//! Which files one generation run emits. The set is fixed up front: the
//! common files always, then either the typed schema-driven set or the
//! untyped fallback set, selected once per run.

/// One file to emit: a path relative to the feature directory plus the
/// template that fills it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedFile {
    pub rel_path: &'static str,
    pub template: &'static str,
}

const fn file(rel_path: &'static str, template: &'static str) -> PlannedFile {
    PlannedFile { rel_path, template }
}

/// Files emitted for every module, schema or not.
pub fn common_files(has_password: bool) -> Vec<PlannedFile> {
    let mut files = vec![
        file("mod.rs", "mod.rs.tera"),
        file("http.rs", "http.rs.tera"),
        file("repository.rs", "repository.rs.tera"),
        file("use_cases.rs", "use_cases.rs.tera"),
    ];
    if has_password {
        files.push(file("password.rs", "password.rs.tera"));
    }
    files
}

/// Typed files emitted when the model was found in the schema.
pub fn schema_driven_files() -> Vec<PlannedFile> {
    vec![
        file("entity.rs", "entity.rs.tera"),
        file("dto.rs", "dto.rs.tera"),
        file("mapper.rs", "mapper.rs.tera"),
        file("sqlx_repository.rs", "sqlx_repository.rs.tera"),
    ]
}

/// Untyped files for the no-schema fallback. No mapper; nothing to convert.
pub fn fallback_files() -> Vec<PlannedFile> {
    vec![
        file("entity.rs", "entity_fallback.rs.tera"),
        file("dto.rs", "dto_fallback.rs.tera"),
        file("sqlx_repository.rs", "sqlx_repository_fallback.rs.tera"),
    ]
}

pub fn plan(has_password: bool, schema_driven: bool) -> Vec<PlannedFile> {
    let mut files = common_files(has_password);
    files.extend(if schema_driven { schema_driven_files() } else { fallback_files() });
    files
}
