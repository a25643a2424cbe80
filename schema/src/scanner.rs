//! Brace-depth block extraction over raw schema text.
//!
//! Blocks look like `enum Role { ... }` or `model Event { ... }`. The walk
//! tracks brace depth, so nested braces inside a block body (attribute
//! arguments, mostly) do not terminate it early. First match wins; a block
//! that never closes ends the scan.

use indexmap::IndexSet;
use itertools::Itertools;

/// Names of every `enum` declared in the schema, in declaration order.
pub fn extract_enum_names(schema: &str) -> IndexSet<String> {
    let stripped = strip_comments(schema);
    scan_blocks(&stripped, "enum").into_iter().map(|(name, _)| name).collect()
}

/// Body of the first `model <name> { ... }` block, braces excluded. `None` is
/// the non-fatal "not found" signal that sends callers down the fallback path.
pub fn extract_model_block(schema: &str, model: &str) -> Option<String> {
    let stripped = strip_comments(schema);
    let body = scan_blocks(&stripped, "model")
        .into_iter()
        .find(|(name, _)| name == model)
        .map(|(_, body)| body);
    if body.is_none() {
        tracing::debug!(model, "model block not found in schema");
    }
    body
}

pub(crate) fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

fn strip_comments(schema: &str) -> String {
    schema.lines().map(strip_line_comment).join("\n")
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn skip_whitespace(text: &str, mut i: usize) -> usize {
    while let Some(c) = text[i..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        i += c.len_utf8();
    }
    i
}

/// Every `<keyword> <Name> { ... }` block in `text` as `(name, body)` pairs.
fn scan_blocks(text: &str, keyword: &str) -> Vec<(String, String)> {
    let mut blocks = Vec::new();
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(keyword) {
        let start = cursor + found;
        let end = start + keyword.len();
        cursor = end;

        // keyword must stand alone as a word
        let bounded_before = text[..start].chars().next_back().map_or(true, |c| !is_ident_char(c));
        let bounded_after = text[end..].chars().next().is_some_and(char::is_whitespace);
        if !bounded_before || !bounded_after {
            continue;
        }

        let name_start = skip_whitespace(text, end);
        let name_end = name_start
            + text[name_start..]
                .chars()
                .take_while(|&c| is_ident_char(c))
                .map(char::len_utf8)
                .sum::<usize>();
        if name_start == name_end {
            continue;
        }

        let brace = skip_whitespace(text, name_end);
        if !text[brace..].starts_with('{') {
            cursor = name_end;
            continue;
        }

        let body_start = brace + 1;
        let mut depth = 1usize;
        let mut body_end = None;
        for (offset, c) in text[body_start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        body_end = Some(body_start + offset);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(body_end) = body_end else {
            // unterminated block, nothing more to find
            break;
        };
        blocks.push((text[name_start..name_end].to_string(), text[body_start..body_end].to_string()));
        cursor = body_end + 1;
    }
    blocks
}
