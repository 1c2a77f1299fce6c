//! Schema Contract: a typed description of the JSON shape the backend must return.
//!
//! One tree serves two consumers: it is rendered into the backend's response-schema
//! format (`to_backend_schema`) so the model is constrained at generation time, and it
//! is walked by `validate` because backend compliance is not guaranteed.

use serde_json::{json, Map, Value};
use thiserror::Error;

pub mod contracts;
pub mod decoder;

pub use decoder::{decode, DecodingError};

/// The kind of value a field holds. One variant per shape the contracts use.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    StringList,
    Object(Vec<Field>),
    ObjectList(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Guidance forwarded to the backend alongside the type.
    pub description: Option<&'static str>,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            description: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::StringList)
    }

    pub fn object(name: &'static str, fields: Vec<Field>) -> Self {
        Self::new(name, FieldKind::Object(fields))
    }

    pub fn object_list(name: &'static str, fields: Vec<Field>) -> Self {
        Self::new(name, FieldKind::ObjectList(fields))
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// A named root object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Entity name used in diagnostics, e.g. "CareerPlan".
    pub name: &'static str,
    pub fields: Vec<Field>,
}

/// The first place a JSON value departs from a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {problem}")]
pub struct ShapeViolation {
    pub path: String,
    pub problem: String,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    /// Renders the contract in the backend's OpenAPI-subset schema dialect.
    pub fn to_backend_schema(&self) -> Value {
        object_schema(&self.fields)
    }

    /// Checks presence and primitive type of every field. Extra keys are ignored;
    /// `null` counts as absent.
    pub fn validate(&self, value: &Value) -> Result<(), ShapeViolation> {
        validate_object(&self.fields, value, "$")
    }
}

fn object_schema(fields: &[Field]) -> Value {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.name.to_string(), field_schema(field));
    }
    let required: Vec<&str> = fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name)
        .collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn field_schema(field: &Field) -> Value {
    let mut schema = match &field.kind {
        FieldKind::String => json!({ "type": "STRING" }),
        FieldKind::StringList => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
        FieldKind::Object(fields) => object_schema(fields),
        FieldKind::ObjectList(fields) => json!({ "type": "ARRAY", "items": object_schema(fields) }),
    };
    if let (Some(description), Some(obj)) = (field.description, schema.as_object_mut()) {
        obj.insert("description".to_string(), Value::from(description));
    }
    schema
}

fn violation(path: &str, problem: impl Into<String>) -> ShapeViolation {
    ShapeViolation {
        path: path.to_string(),
        problem: problem.into(),
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "$" {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn validate_object(fields: &[Field], value: &Value, path: &str) -> Result<(), ShapeViolation> {
    let object = value
        .as_object()
        .ok_or_else(|| violation(path, "expected object"))?;

    for field in fields {
        let field_path = child_path(path, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(violation(&field_path, "missing required field"));
            }
            None | Some(Value::Null) => {}
            Some(v) => validate_kind(&field.kind, v, &field_path)?,
        }
    }
    Ok(())
}

fn validate_kind(kind: &FieldKind, value: &Value, path: &str) -> Result<(), ShapeViolation> {
    match kind {
        FieldKind::String => {
            if !value.is_string() {
                return Err(violation(path, "expected string"));
            }
        }
        FieldKind::StringList => {
            let items = value
                .as_array()
                .ok_or_else(|| violation(path, "expected array of strings"))?;
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(violation(&format!("{path}[{i}]"), "expected string"));
                }
            }
        }
        FieldKind::Object(fields) => validate_object(fields, value, path)?,
        FieldKind::ObjectList(fields) => {
            let items = value
                .as_array()
                .ok_or_else(|| violation(path, "expected array of objects"))?;
            for (i, item) in items.iter().enumerate() {
                validate_object(fields, item, &format!("{path}[{i}]"))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(
            "Sample",
            vec![
                Field::string("title").describe("A catchy title."),
                Field::string_list("tags").optional(),
                Field::object_list(
                    "items",
                    vec![Field::string("name"), Field::string("url").optional()],
                ),
            ],
        )
    }

    #[test]
    fn test_renders_backend_schema() {
        let rendered = sample().to_backend_schema();
        assert_eq!(rendered["type"], "OBJECT");
        assert_eq!(rendered["required"], json!(["title", "items"]));
        assert_eq!(rendered["properties"]["title"]["description"], "A catchy title.");
        assert_eq!(rendered["properties"]["tags"]["items"]["type"], "STRING");
        assert_eq!(
            rendered["properties"]["items"]["items"]["required"],
            json!(["name"])
        );
    }

    #[test]
    fn test_accepts_conforming_value_with_extra_keys() {
        let value = json!({
            "title": "t",
            "items": [{"name": "a"}, {"name": "b", "url": "u"}],
            "unexpected": 42
        });
        assert_eq!(sample().validate(&value), Ok(()));
    }

    #[test]
    fn test_optional_null_is_absent() {
        let value = json!({"title": "t", "tags": null, "items": []});
        assert!(sample().validate(&value).is_ok());
    }

    #[test]
    fn test_required_null_is_missing() {
        let err = sample()
            .validate(&json!({"title": null, "items": []}))
            .unwrap_err();
        assert_eq!(err.path, "title");
        assert_eq!(err.problem, "missing required field");
    }

    #[test]
    fn test_reports_nested_path() {
        let value = json!({"title": "t", "items": [{"name": "a"}, {"url": "u"}]});
        let err = sample().validate(&value).unwrap_err();
        assert_eq!(err.to_string(), "items[1].name: missing required field");
    }

    #[test]
    fn test_string_not_wrapped_into_list() {
        let value = json!({"title": "t", "tags": "rust", "items": []});
        let err = sample().validate(&value).unwrap_err();
        assert_eq!(err.path, "tags");
        assert_eq!(err.problem, "expected array of strings");
    }

    #[test]
    fn test_number_is_not_a_string() {
        let value = json!({"title": 7, "items": []});
        assert_eq!(sample().validate(&value).unwrap_err().problem, "expected string");

        let value = json!({"title": "t", "tags": ["a", 2], "items": []});
        assert_eq!(sample().validate(&value).unwrap_err().path, "tags[1]");
    }

    #[test]
    fn test_root_must_be_object() {
        let err = sample().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "$");
    }
}
