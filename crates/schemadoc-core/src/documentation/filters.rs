//! Custom Tera filters for page templates
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use tera::{Result, Tera, Value};

/// Longest description that fits in a table cell
pub const MAX_CHARS_IN_TABLE: usize = 80;

/// Register every filter; `enshorten` becomes `text_to_web` when descriptions are not truncated
pub(crate) fn register(tera: &mut Tera, truncate_descriptions: bool) {
    if truncate_descriptions {
        tera.register_filter("enshorten", enshorten);
    } else {
        tera.register_filter("enshorten", text_to_web);
    }
    tera.register_filter("text_to_web", text_to_web);
    tera.register_filter("latex", latex);
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("pascal_case", pascal_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("kebab_case", kebab_case);
}

/// String content of a filter input; `null` reads as empty text
fn text<'a>(value: &'a Value, filter: &str) -> Result<&'a str> {
    match value {
        Value::Null => Ok(""),
        Value::String(s) => Ok(s),
        _ => Err(tera::Error::msg(format!("{} filter expects a string", filter))),
    }
}

/// First line, then first sentence, capped to fit a table cell
pub fn shorten(input: &str) -> String {
    let line = input.split('\n').next().unwrap_or_default();
    let sentence = line.split('.').next().unwrap_or_default();
    if sentence.chars().count() > MAX_CHARS_IN_TABLE - 3 {
        let cut: String = sentence.chars().take(MAX_CHARS_IN_TABLE - 3).collect();
        format!("{}...", cut)
    } else {
        sentence.to_string()
    }
}

/// Lines of multi-line text joined with `<br>`
pub fn web_text(input: &str) -> String {
    input.trim().split('\n').collect::<Vec<_>>().join("<br>")
}

pub(crate) fn enshorten(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(shorten(text(value, "enshorten")?)))
}

pub(crate) fn text_to_web(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(web_text(text(value, "text_to_web")?)))
}

pub(crate) fn latex(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(text(value, "latex")?.replace('_', "\\_")))
}

pub(crate) fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(text(value, "snake_case")?.to_snake_case()))
}

pub(crate) fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(text(value, "pascal_case")?.to_pascal_case()))
}

pub(crate) fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(text(value, "camel_case")?.to_lower_camel_case()))
}

pub(crate) fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(text(value, "kebab_case")?.to_kebab_case()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(filter: fn(&Value, &HashMap<String, Value>) -> Result<Value>, input: &str) -> String {
        let val = Value::String(input.to_string());
        let args = HashMap::new();
        filter(&val, &args).unwrap().as_str().unwrap().to_string()
    }

    #[test]
    fn test_enshorten() {
        assert_eq!(apply(enshorten, "A person. Living or dead."), "A person");
        assert_eq!(apply(enshorten, "First line\nsecond line"), "First line");
        let long = "x".repeat(100);
        let short = apply(enshorten, &long);
        assert_eq!(short.len(), 80);
        assert!(short.ends_with("..."));
        assert_eq!(apply(enshorten, &"y".repeat(77)), "y".repeat(77));
    }

    #[test]
    fn test_text_to_web() {
        assert_eq!(apply(text_to_web, "  one\ntwo\nthree \n"), "one<br>two<br>three");
    }

    #[test]
    fn test_latex() {
        assert_eq!(apply(latex, "has_name"), "has\\_name");
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(apply(snake_case, "NamedThing"), "named_thing");
        assert_eq!(apply(pascal_case, "named_thing"), "NamedThing");
        assert_eq!(apply(camel_case, "NamedThing"), "namedThing");
        assert_eq!(apply(kebab_case, "NamedThing"), "named-thing");
    }

    #[test]
    fn test_null_and_non_string_input() {
        let args = HashMap::new();
        assert_eq!(enshorten(&Value::Null, &args).unwrap(), Value::String(String::new()));
        assert!(latex(&Value::Number(42.into()), &args).is_err());
    }
}
