//! Tool descriptors advertised through `tools/list`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Static metadata describing one invokable tool.
///
/// ```rust
/// use gitlab_mcp_protocol::ToolDescriptor;
///
/// let tool = ToolDescriptor::new("echo", "Echo a message")
///     .with_param("message", "string", "Text to echo", true)
///     .with_param("repeat", "integer", "How many times", false);
///
/// assert_eq!(tool.input_schema.required, vec!["message".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name used in `tools/call`
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema of the argument object
    #[serde(rename = "inputSchema")]
    pub input_schema: ToolInputSchema,
}

/// Object schema for tool arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Always `"object"`
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Parameter name to `{ type, description }`, in declaration order
    pub properties: Map<String, Value>,
    /// Names of required parameters
    pub required: Vec<String>,
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }
}

impl ToolDescriptor {
    /// Create a descriptor with an empty argument schema.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: ToolInputSchema::default(),
        }
    }

    /// Declare one parameter.
    #[must_use]
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        param_type: &str,
        description: &str,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.input_schema.properties.insert(
            name.clone(),
            json!({ "type": param_type, "description": description }),
        );
        if required {
            self.input_schema.required.push(name);
        }
        self
    }

    /// Whether `name` is a declared parameter.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.input_schema.properties.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_descriptor_wire_shape() {
        let tool = ToolDescriptor::new("greet", "Say hello")
            .with_param("name", "string", "Who to greet", true)
            .with_param("loud", "boolean", "Shout", false);

        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "greet",
                "description": "Say hello",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Who to greet" },
                        "loud": { "type": "boolean", "description": "Shout" }
                    },
                    "required": ["name"]
                }
            })
        );
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let tool = ToolDescriptor::new("t", "d")
            .with_param("zeta", "string", "", false)
            .with_param("alpha", "string", "", false);

        let keys: Vec<_> = tool.input_schema.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta".to_string(), "alpha".to_string()]);
        assert!(tool.has_param("alpha"));
        assert!(!tool.has_param("beta"));
    }
}
