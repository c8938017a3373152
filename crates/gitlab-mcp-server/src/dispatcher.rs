//! Method routing.
//!
//! [`Dispatcher`] resolves a message's method through [`Method::from_name`]
//! and hands it to the matching handler. Handler output is returned as-is;
//! `None` means nothing is written back.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use gitlab_mcp_protocol::{JsonRpcResponse, McpError, Message, ServerInfo, ToolDescriptor, response};
use gitlab_mcp_stdio::Dispatch;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::gitlab::MergeRequestApi;
use crate::registry::Method;
use crate::tools::{self, CREATE_MERGE_REQUEST, merge_request};
use crate::{SERVER_NAME, SERVER_VERSION};

/// Immutable state shared by every in-flight dispatch.
struct Inner<A> {
    api: A,
    server_info: ServerInfo,
    tools: Vec<ToolDescriptor>,
}

/// Routes parsed messages to their handlers.
///
/// Cloning is cheap; clones share the same collaborator and tool table.
pub struct Dispatcher<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("server_info", &self.inner.server_info)
            .field("tools", &self.inner.tools.len())
            .finish_non_exhaustive()
    }
}

impl<A: MergeRequestApi> Dispatcher<A> {
    /// Create a dispatcher backed by `api`.
    pub fn new(api: A) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                server_info: ServerInfo::new(SERVER_NAME, SERVER_VERSION),
                tools: tools::descriptors(),
            }),
        }
    }

    /// The registered tool descriptors.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.inner.tools
    }

    /// Handle one message.
    pub async fn handle(&self, message: Message) -> Option<JsonRpcResponse> {
        let Some(method) = Method::from_name(&message.method) else {
            warn!(method = %message.method, id = %message.id, "Unknown method");
            return Some(JsonRpcResponse::error(
                message.id,
                McpError::method_not_found(message.method),
            ));
        };

        let response = match method {
            Method::Initialize => response::initialize(message.id, &self.inner.server_info),
            Method::Initialized => JsonRpcResponse::success(message.id, json!({})),
            Method::ToolsList => response::tools_list(message.id, &self.inner.tools),
            Method::ToolsCall => self.call_tool(message).await,
            Method::CreateMergeRequest => {
                merge_request::create(&self.inner.api, message.id, message.params.as_ref()).await
            }
        };

        // Notifications are never answered, whatever the handler produced
        if method.is_notification() {
            debug!(%method, "Notification handled");
            return None;
        }
        Some(response)
    }

    async fn call_tool(&self, message: Message) -> JsonRpcResponse {
        let name = message.param("name").and_then(Value::as_str).unwrap_or_default();
        if name != CREATE_MERGE_REQUEST {
            warn!(tool = name, "Unknown tool");
            return JsonRpcResponse::error(message.id.clone(), McpError::tool_not_found(name));
        }

        let arguments = message.param("arguments");
        merge_request::create(&self.inner.api, message.id.clone(), arguments).await
    }
}

impl<A: MergeRequestApi + 'static> Dispatch for Dispatcher<A> {
    fn dispatch(&self, message: Message) -> impl Future<Output = Option<JsonRpcResponse>> + Send {
        self.handle(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::{GitLabError, NewMergeRequest};
    use async_trait::async_trait;
    use gitlab_mcp_protocol::MergeRequest;
    use pretty_assertions::assert_eq;

    struct UnreachableApi;

    #[async_trait]
    impl MergeRequestApi for UnreachableApi {
        async fn create_merge_request(
            &self,
            _request: &NewMergeRequest,
        ) -> Result<MergeRequest, GitLabError> {
            Err(GitLabError::InvalidResponse("not used".to_string()))
        }
    }

    fn dispatcher() -> Dispatcher<UnreachableApi> {
        Dispatcher::new(UnreachableApi)
    }

    #[tokio::test]
    async fn test_initialize() {
        let envelope = dispatcher()
            .handle(Message::new(7, "initialize", None))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "result": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": { "tools": {} },
                    "serverInfo": { "name": "mcp-server-gitlab", "version": "0.0.1" }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_initialized_is_silent() {
        let message = Message::new(Value::Null, "notifications/initialized", Some(json!({})));
        assert!(dispatcher().handle(message).await.is_none());

        // Even with an id, the notification gets no reply
        let message = Message::new(9, "notifications/initialized", None);
        assert!(dispatcher().handle(message).await.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let dispatcher = dispatcher();
        let envelope = dispatcher
            .handle(Message::new(1, "tools/list", None))
            .await
            .unwrap();
        let tools = &envelope.result().unwrap()["tools"];
        assert_eq!(tools.as_array().unwrap().len(), 1);
        assert_eq!(tools[0]["name"], json!("create_merge_request"));
        assert_eq!(dispatcher.tools().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_method_keeps_id() {
        let envelope = dispatcher()
            .handle(Message::new("abc", "resources/list", None))
            .await
            .unwrap();
        assert_eq!(envelope.id, json!("abc"));
        let error = envelope.error_object().unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Unknown method: resources/list");
    }

    #[tokio::test]
    async fn test_missing_method_is_unknown() {
        let envelope = dispatcher()
            .handle(Message::new(2, "", None))
            .await
            .unwrap();
        assert_eq!(envelope.error_object().unwrap().code, -32601);
        assert_eq!(envelope.id, json!(2));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let message = Message::new(
            3,
            "tools/call",
            Some(json!({ "name": "close_issue", "arguments": {} })),
        );
        let envelope = dispatcher().handle(message).await.unwrap();
        let error = envelope.error_object().unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Unknown tool: close_issue");
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let envelope = dispatcher()
            .handle(Message::new(4, "tools/call", None))
            .await
            .unwrap();
        assert_eq!(envelope.error_object().unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_both_entry_points_validate_alike() {
        let dispatcher = dispatcher();
        let args = json!({ "project_id": "1", "source_branch": "a", "target_branch": "b" });

        let nested = dispatcher
            .handle(Message::new(
                5,
                "tools/call",
                Some(json!({ "name": "create_merge_request", "arguments": args.clone() })),
            ))
            .await
            .unwrap();
        let flat = dispatcher
            .handle(Message::new(5, "create_merge_request", Some(args)))
            .await
            .unwrap();

        assert_eq!(nested, flat);
        assert_eq!(
            flat.error_object().unwrap().message,
            "Missing required fields: title"
        );
    }
}
