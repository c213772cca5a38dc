use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Profile record as returned by the backend.
///
/// The backend owns this shape. Only the name and email fields are read, and
/// only when they hold strings; a field of any other type reads as absent.
/// Everything else is carried along untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    /// Build a record from any JSON body the backend returned.
    ///
    /// Objects are read field by field. Any other value yields an empty
    /// record that keeps the body under `extra["body"]`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => {
                serde_json::from_value(Value::Object(fields.clone())).unwrap_or_else(|_| Self {
                    extra: fields,
                    ..Self::default()
                })
            }
            Value::Null => Self::default(),
            other => {
                let mut extra = Map::new();
                extra.insert("body".to_string(), other);
                Self {
                    extra,
                    ..Self::default()
                }
            }
        }
    }

    /// Backend-assigned identifier, if any, rendered as a string.
    pub fn id(&self) -> Option<String> {
        match self.extra.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

/// Outcome of an existence lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Existence {
    Found(ProfileRecord),
    NotFound,
}

impl Existence {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
