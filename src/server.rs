use rmcp::{
    ErrorData as McpError,
    handler::server::router::tool::ToolRouter,
    handler::server::tool::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};

use crate::tasks::TaskContext;
use crate::tools::{
    CreateCommentParams, CreateIssueParams, SendPayloadParams, UpdateFieldsParams, format_error,
    format_response,
};

/// Exposes each Jira task as an MCP tool. Every call gets its own
/// [`TaskContext`] built from the call's `variables`.
#[derive(Clone)]
pub struct JiraTaskServer {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl JiraTaskServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Create a Jira issue from a project key, summary, description, labels and issue type. Issue type defaults to Task.")]
    async fn create_issue(
        &self,
        Parameters(params): Parameters<CreateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        let context = TaskContext::new(params.variables);

        match params.task.run(&context).await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(
                format_response("Issue created", &response),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format_error(
                "create issue",
                &e,
            ))])),
        }
    }

    #[tool(description = "Add a comment to a Jira issue identified by its key or id.")]
    async fn create_comment(
        &self,
        Parameters(params): Parameters<CreateCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        let context = TaskContext::new(params.variables);

        match params.task.run(&context).await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(
                format_response("Comment added", &response),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format_error(
                "add comment",
                &e,
            ))])),
        }
    }

    #[tool(description = "Update one or more fields of a Jira issue. Fields is a map of field names to new values.")]
    async fn update_fields(
        &self,
        Parameters(params): Parameters<UpdateFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        let context = TaskContext::new(params.variables);

        match params.task.run(&context).await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(
                format_response("Fields updated", &response),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format_error(
                "update fields",
                &e,
            ))])),
        }
    }

    #[tool(description = "Post a raw JSON payload to a Jira URL as-is.")]
    async fn send_payload(
        &self,
        Parameters(params): Parameters<SendPayloadParams>,
    ) -> Result<CallToolResult, McpError> {
        let context = TaskContext::new(params.variables);

        match params.task.run(&context).await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(
                format_response("Payload sent", &response),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format_error(
                "send payload",
                &e,
            ))])),
        }
    }
}

impl Default for JiraTaskServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl rmcp::ServerHandler for JiraTaskServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Jira task server - Create issues, comment on issues, update issue fields and send raw payloads"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
