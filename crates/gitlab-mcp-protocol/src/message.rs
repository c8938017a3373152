//! Inbound message decoding.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{McpError, McpResult};

/// One inbound protocol unit.
///
/// Requests and notifications share this shape; the distinction is made per
/// method by the dispatcher, not by the presence of `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    /// Correlation token, echoed verbatim in the response (`null` when absent)
    #[serde(default)]
    pub id: Value,
    /// Method name (empty when the client omitted it or sent `null`)
    #[serde(default, deserialize_with = "lenient_method")]
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: Option<Value>,
}

impl Message {
    /// Create a message, mostly useful in tests.
    #[must_use]
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// Look up a member of `params`, if `params` is an object that has it.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|params| params.get(key))
    }
}

/// Decode one framed line into a [`Message`].
///
/// Only malformed JSON and non-object values are parse errors; a parse error
/// never carries an `id`. Once the line is an object its `id` is kept, even
/// when `method` is missing or not a string.
///
/// # Errors
///
/// Returns an [`McpError`] of kind `ParseError` when the line is not a
/// well-formed message.
pub fn parse_message(line: &str) -> McpResult<Message> {
    let value: Value = serde_json::from_str(line).map_err(parse_error)?;
    // Derived struct decoding also accepts JSON arrays; only objects are messages.
    if !value.is_object() {
        return Err(McpError::parse_error(
            "Parse error: message must be a JSON object",
        ));
    }
    serde_json::from_value(value).map_err(parse_error)
}

/// Accept any JSON value as the method name.
///
/// Non-string methods render as their JSON text so the dispatcher can answer
/// them as unknown methods with the request `id` intact.
fn lenient_method<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(method) => method,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn parse_error(err: serde_json::Error) -> McpError {
    McpError::parse_error(format!("Parse error: {err}"))
}
