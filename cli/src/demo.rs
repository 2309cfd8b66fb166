//! Demonstration configuration used by the `names` and `bind` commands.

use std::time::Duration;

use flagbind_core::{Bindable, FieldDescriptor, FieldTag, PathStep, StructPath};
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Bindable)]
pub struct Timeouts {
    #[flag(long = "ConnTimeout", short = "c")]
    pub conn_timeout: Option<Duration>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Bindable)]
pub struct Database {
    #[flag(long = "host", short = "h")]
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub nested: Timeouts,
    #[flag(long = "nestednamed", short = "n")]
    pub nested_named: Timeouts,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Bindable)]
pub struct DemoConfig {
    #[flag(long = "name", short = "n")]
    pub name: Option<String>,
    #[flag(long = "thread-count", short = "c")]
    pub thread_count: Option<i32>,
    #[flag(long = "databases", short = "d")]
    pub databases: Vec<Database>,
    pub enabled: bool,
    #[flag(short = "e")]
    pub bool_e: bool,
    #[flag(short = "f")]
    pub bool_f: bool,
    #[flag(short = "g")]
    pub bool_g: bool,
    #[flag(short = "h")]
    pub bool_h: bool,
}

/// Resolves a dotted path such as `Databases[3].NestedNamed.ConnTimeout`
/// against `schema`.
///
/// Segments match a field identifier or its long name, ignoring case,
/// `_` and `-`.
pub fn lookup_path(schema: Vec<FieldDescriptor>, raw: &str) -> Result<StructPath, String> {
    let mut path = StructPath::new();
    let mut fields = Some(schema);

    for segment in raw.split('.') {
        let (name, index) = parse_segment(segment)?;
        let Some(current) = fields.take() else {
            return Err(format!(
                "'{}' has no field named '{name}'",
                path_display(&path)
            ));
        };

        let descriptor = current
            .iter()
            .find(|d| matches_tag(&d.tag, name))
            .ok_or_else(|| format!("unknown field '{name}' in '{raw}'"))?;
        path.push(match index {
            Some(index) => PathStep::at(descriptor.tag, index),
            None => PathStep::new(descriptor.tag),
        });
        fields = descriptor.nested.map(|nested| nested());
    }

    Ok(path)
}

fn parse_segment(segment: &str) -> Result<(&str, Option<usize>), String> {
    let Some((name, rest)) = segment.split_once('[') else {
        return validate_name(segment).map(|name| (name, None));
    };
    let digits = rest
        .strip_suffix(']')
        .ok_or_else(|| format!("unterminated index in '{segment}'"))?;
    let index = digits
        .parse::<usize>()
        .map_err(|err| format!("invalid index in '{segment}': {err}"))?;
    validate_name(name).map(|name| (name, Some(index)))
}

fn validate_name(name: &str) -> Result<&str, String> {
    if name.is_empty() {
        return Err("empty path segment".to_string());
    }
    Ok(name)
}

fn matches_tag(tag: &FieldTag, segment: &str) -> bool {
    let wanted = normalize(segment);
    normalize(tag.name) == wanted || tag.long.is_some_and(|long| normalize(long) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn path_display(path: &StructPath) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}
