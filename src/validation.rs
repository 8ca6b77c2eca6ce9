//! Note input schema shared by the API handlers and the HTTP client.
//!
//! The schema is a table of field rules. Both sides run payloads through the
//! same table, so a body the client accepts is exactly a body the server
//! accepts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{Category, NewNote, NotePatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String that is not empty after trimming.
    Text { blank_message: &'static str },
    /// One of [`Category::ALL`], or null.
    Category,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required on create. Partial updates treat every field as optional.
    pub required: bool,
}

pub const NOTE_SCHEMA: &[FieldRule] = &[
    FieldRule {
        name: "title",
        kind: FieldKind::Text {
            blank_message: "Please add a title for your note",
        },
        required: true,
    },
    FieldRule {
        name: "content",
        kind: FieldKind::Text {
            blank_message: "Your note cannot be empty",
        },
        required: true,
    },
    FieldRule {
        name: "category",
        kind: FieldKind::Category,
        required: false,
    },
    FieldRule {
        name: "isFavorite",
        kind: FieldKind::Boolean,
        required: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidJson,
    InvalidType,
    TooSmall,
    InvalidEnumValue,
}

/// One rejected field, in the shape sent back in a 400 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    fn at(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            path: vec![field.to_string()],
            message: message.into(),
        }
    }

    fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            path: Vec::new(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid data: {}", summary(.0))]
pub struct ValidationError(pub Vec<Issue>);

impl ValidationError {
    pub fn issues(&self) -> &[Issue] {
        &self.0
    }
}

fn summary(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| match i.path.first() {
            Some(field) => format!("{}: {}", field, i.message),
            None => i.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Partial,
}

/// Validate a creation body.
pub fn parse_new_note(body: &Value) -> Result<NewNote, ValidationError> {
    let fields = check(body, Mode::Create)?;
    Ok(NewNote {
        title: text(&fields, "title").unwrap_or_default(),
        content: text(&fields, "content").unwrap_or_default(),
        category: category(&fields).flatten(),
        is_favorite: fields.get("isFavorite").and_then(Value::as_bool),
    })
}

/// Validate a partial-update body. Any subset of fields is accepted.
pub fn parse_note_patch(body: &Value) -> Result<NotePatch, ValidationError> {
    let fields = check(body, Mode::Partial)?;
    Ok(NotePatch {
        title: text(&fields, "title"),
        content: text(&fields, "content"),
        category: category(&fields),
        is_favorite: fields.get("isFavorite").and_then(Value::as_bool),
    })
}

/// Validate raw request bytes. Malformed JSON is reported as an issue.
pub fn parse_json(bytes: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ValidationError(vec![Issue::root(IssueCode::InvalidJson, e.to_string())]))
}

/// Client-side check of a creation payload, through the same rules.
pub fn validate_new_note(note: &NewNote) -> Result<(), ValidationError> {
    let value = serde_json::to_value(note).map_err(|e| {
        ValidationError(vec![Issue::root(IssueCode::InvalidJson, e.to_string())])
    })?;
    parse_new_note(&value).map(|_| ())
}

/// Client-side check of a partial update, through the same rules.
pub fn validate_note_patch(patch: &NotePatch) -> Result<(), ValidationError> {
    let value = serde_json::to_value(patch).map_err(|e| {
        ValidationError(vec![Issue::root(IssueCode::InvalidJson, e.to_string())])
    })?;
    parse_note_patch(&value).map(|_| ())
}

fn check(body: &Value, mode: Mode) -> Result<Map<String, Value>, ValidationError> {
    let Some(object) = body.as_object() else {
        return Err(ValidationError(vec![Issue::root(
            IssueCode::InvalidType,
            format!("Expected object, received {}", type_name(body)),
        )]));
    };

    let mut issues = Vec::new();
    let mut fields = Map::new();

    for rule in NOTE_SCHEMA {
        match object.get(rule.name) {
            None => {
                if rule.required && mode == Mode::Create {
                    issues.push(Issue::at(rule.name, IssueCode::InvalidType, "Required"));
                }
            }
            Some(value) => match check_field(rule, value) {
                Ok(()) => {
                    fields.insert(rule.name.to_string(), value.clone());
                }
                Err(issue) => issues.push(issue),
            },
        }
    }

    if issues.is_empty() {
        Ok(fields)
    } else {
        Err(ValidationError(issues))
    }
}

fn check_field(rule: &FieldRule, value: &Value) -> Result<(), Issue> {
    match rule.kind {
        FieldKind::Text { blank_message } => match value {
            Value::String(s) if s.trim().is_empty() => {
                Err(Issue::at(rule.name, IssueCode::TooSmall, blank_message))
            }
            Value::String(_) => Ok(()),
            other => Err(type_issue(rule.name, "string", other)),
        },
        FieldKind::Category => match value {
            Value::Null => Ok(()),
            Value::String(s) if Category::parse(s).is_some() => Ok(()),
            Value::String(s) => Err(Issue::at(
                rule.name,
                IssueCode::InvalidEnumValue,
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    Category::ALL
                        .iter()
                        .map(|c| format!("'{}'", c))
                        .collect::<Vec<_>>()
                        .join(" | "),
                    s
                ),
            )),
            other => Err(type_issue(rule.name, "string", other)),
        },
        FieldKind::Boolean => match value {
            Value::Bool(_) => Ok(()),
            other => Err(type_issue(rule.name, "boolean", other)),
        },
    }
}

fn type_issue(field: &str, expected: &str, received: &Value) -> Issue {
    Issue::at(
        field,
        IssueCode::InvalidType,
        format!("Expected {}, received {}", expected, type_name(received)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

/// `None` when absent, `Some(None)` when explicitly null.
fn category(fields: &Map<String, Value>) -> Option<Option<Category>> {
    fields
        .get("category")
        .map(|v| v.as_str().and_then(Category::parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_accepts_full_body() {
        let note = parse_new_note(&json!({
            "title": "Hi",
            "content": "World",
            "category": "Sely",
            "isFavorite": true
        }))
        .unwrap();

        assert_eq!(note.title, "Hi");
        assert_eq!(note.content, "World");
        assert_eq!(note.category, Some(Category::Sely));
        assert_eq!(note.is_favorite, Some(true));
    }

    #[test]
    fn test_create_null_and_missing_category_are_equivalent() {
        let a = parse_new_note(&json!({ "title": "a", "content": "b" })).unwrap();
        let b = parse_new_note(&json!({ "title": "a", "content": "b", "category": null })).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.category, None);
        assert_eq!(a.is_favorite, None);
    }

    #[test]
    fn test_create_requires_title_and_content() {
        let err = parse_new_note(&json!({})).unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path[0].as_str()).collect();
        assert_eq!(paths, vec!["title", "content"]);
        assert!(err.issues().iter().all(|i| i.code == IssueCode::InvalidType));
        assert!(err.issues().iter().all(|i| i.message == "Required"));
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let err = parse_new_note(&json!({ "title": "", "content": "   " })).unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert!(err.issues().iter().all(|i| i.code == IssueCode::TooSmall));
        assert_eq!(err.issues()[0].message, "Please add a title for your note");
        assert_eq!(err.issues()[1].message, "Your note cannot be empty");
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = parse_new_note(&json!({ "title": "a", "content": "b", "category": "Bob" }))
            .unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::InvalidEnumValue);
        assert_eq!(err.issues()[0].path, vec!["category".to_string()]);
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let err = parse_new_note(&json!({ "title": 1, "content": "b", "isFavorite": "yes" }))
            .unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert_eq!(err.issues()[0].message, "Expected string, received number");
        assert_eq!(err.issues()[1].message, "Expected boolean, received string");
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let err = parse_note_patch(&json!([1, 2])).unwrap_err();
        assert!(err.issues()[0].path.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let patch = parse_note_patch(&json!({ "id": "x", "createdAt": "y" })).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_accepts_any_subset() {
        let patch = parse_note_patch(&json!({ "isFavorite": true })).unwrap();
        assert_eq!(patch, NotePatch::favorite(true));

        let patch = parse_note_patch(&json!({ "category": null })).unwrap();
        assert_eq!(patch.category, Some(None));
    }

    #[test]
    fn test_patch_still_rejects_blank_fields() {
        let err = parse_note_patch(&json!({ "title": " " })).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_json(b"{not json").unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::InvalidJson);
    }

    #[test]
    fn test_client_checks_use_same_rules() {
        assert!(validate_new_note(&NewNote::new("Hi", "World")).is_ok());
        assert!(validate_new_note(&NewNote::new("", "World")).is_err());
        assert!(validate_note_patch(&NotePatch {
            content: Some("\n".into()),
            ..Default::default()
        })
        .is_err());
    }
}
