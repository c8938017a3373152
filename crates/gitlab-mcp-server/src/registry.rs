//! The fixed method table.
//!
//! Method names arrive as arbitrary strings; [`Method::from_name`] maps the
//! supported ones onto a closed enum so dispatch is an exhaustive `match`.
//! Anything else falls through to `-32601`.

use std::fmt;

/// A supported protocol method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Capability negotiation
    Initialize,
    /// Client acknowledgement after `initialize`; never answered
    Initialized,
    /// List the registered tools
    ToolsList,
    /// Invoke a tool by name with nested `arguments`
    ToolsCall,
    /// Flat alias for the merge request tool
    CreateMergeRequest,
}

impl Method {
    /// Every supported method.
    pub const ALL: [Self; 5] = [
        Self::Initialize,
        Self::Initialized,
        Self::ToolsList,
        Self::ToolsCall,
        Self::CreateMergeRequest,
    ];

    /// Wire name of the method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Initialized => "notifications/initialized",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::CreateMergeRequest => "create_merge_request",
        }
    }

    /// Look up a method by wire name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }

    /// Whether the method never produces a response.
    #[must_use]
    pub const fn is_notification(self) -> bool {
        matches!(self, Self::Initialized)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
