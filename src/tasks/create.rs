use serde::Deserialize;

use super::{Connection, TaskContext, execute, required};
use crate::error::Result;
use crate::jira::{ISSUE_API_ROUTE, JiraResponse};
use crate::payload::FieldSet;
use crate::template::{CREATE_ISSUE_BY_TYPE_ID_TEMPLATE, CREATE_ISSUE_TEMPLATE, TemplateRenderer};

pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Create a Jira issue.
///
/// Absent `labels` are sent as an empty list. Without `issueTypeId` the issue
/// type is looked up by name, defaulting to `Task`; with it, `issuetype` is ignored.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssue {
    #[serde(flatten)]
    pub connection: Connection,
    /// Atlassian project's key
    pub project_key: String,
    /// Summary of the ticket
    pub summary: Option<String>,
    /// Description of the ticket to be created
    pub description: Option<String>,
    /// Labels associated with the ticket
    pub labels: Option<Vec<String>>,
    /// Issue type name, e.g. Story, Task, Bug (default: Task)
    #[serde(rename = "issuetype")]
    pub issue_type: Option<String>,
    /// Issue type id, takes precedence over `issuetype`
    pub issue_type_id: Option<String>,
}

impl CreateIssue {
    pub async fn run(&self, context: &TaskContext) -> Result<JiraResponse> {
        execute(context, &self.connection, ISSUE_API_ROUTE, |builder| {
            let fields = self.fields(builder.renderer())?;
            let template = if fields.contains("issueTypeId") {
                CREATE_ISSUE_BY_TYPE_ID_TEMPLATE
            } else {
                CREATE_ISSUE_TEMPLATE
            };
            builder.build(fields, Some(template))
        })
        .await
    }

    /// Render every issue property into the field set sent to the template.
    pub fn fields(&self, renderer: &dyn TemplateRenderer) -> Result<FieldSet> {
        let labels = self
            .labels
            .iter()
            .flatten()
            .map(|label| renderer.render_expression(label))
            .collect::<Result<Vec<_>>>()?;

        let mut fields = FieldSet::new();
        fields
            .insert(
                "projectKey",
                required(renderer, "projectKey", &self.project_key)?,
            )
            .insert("summary", renderer.render_optional(self.summary.as_deref())?)
            .insert(
                "description",
                renderer.render_optional(self.description.as_deref())?,
            )
            .insert("labels", labels);

        let issue_type_id = renderer
            .render_optional(self.issue_type_id.as_deref())?
            .filter(|id| !id.trim().is_empty());

        match issue_type_id {
            Some(id) => {
                fields.insert("issueTypeId", id);
            }
            None => {
                let issue_type = self
                    .issue_type
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or(DEFAULT_ISSUE_TYPE);
                fields.insert("issuetype", renderer.render_expression(issue_type)?);
            }
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tasks::basic_connection;
    use crate::template::HandlebarsRenderer;
    use serde_json::{Map, Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn variables(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn failed_workflow_issue(base_url: &str) -> CreateIssue {
        CreateIssue {
            connection: basic_connection(base_url),
            project_key: "myproject".to_string(),
            summary: Some("Workflow failed".to_string()),
            description: Some("{{execution.id}} has failed".to_string()),
            labels: Some(vec!["bug".to_string(), "workflow".to_string()]),
            ..Default::default()
        }
    }

    async fn sent_body(mock_server: &MockServer) -> Value {
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn run_creates_issue_with_default_issue_type() {
        // Given: a mock Jira server and an issue without issue type
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"key":"MYPROJECT-1"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let task = failed_workflow_issue(&mock_server.uri());
        let context = TaskContext::new(variables(json!({ "execution": { "id": "exec-42" } })));

        // When: running the task
        let response = task.run(&context).await.unwrap();

        // Then: the rendered issue is posted with the default type
        assert_eq!(response.status, 201);
        let body = sent_body(&mock_server).await;
        assert_eq!(
            body,
            json!({
                "fields": {
                    "project": { "key": "myproject" },
                    "summary": "Workflow failed",
                    "description": "exec-42 has failed",
                    "issuetype": { "name": "Task" },
                    "labels": ["bug", "workflow"]
                }
            })
        );
    }

    #[tokio::test]
    async fn run_uses_issue_type_id_without_default_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut task = failed_workflow_issue(&mock_server.uri());
        task.issue_type_id = Some("10001".to_string());
        let context = TaskContext::new(variables(json!({ "execution": { "id": "exec-42" } })));

        task.run(&context).await.unwrap();

        let body = sent_body(&mock_server).await;
        assert_eq!(body["fields"]["issuetype"], json!({ "id": "10001" }));
    }

    #[tokio::test]
    async fn run_sends_explicit_payload_verbatim() {
        // Given: a payload override and properties that could not be rendered
        let mock_server = MockServer::start().await;
        let raw = r#"{"fields": {"project": {"key": "RAW"}}}"#;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut task = failed_workflow_issue(&mock_server.uri());
        task.connection.payload = Some(raw.to_string());
        task.summary = Some("{{undefined.variable}}".to_string());

        // When: running without any variables
        task.run(&TaskContext::default()).await.unwrap();

        // Then: the override is posted byte for byte
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, raw.as_bytes());
    }

    #[tokio::test]
    async fn run_without_credentials_makes_no_request() {
        // Given: a task with no credentials at all
        let mock_server = MockServer::start().await;
        let mut task = failed_workflow_issue(&mock_server.uri());
        task.connection.username = None;
        task.connection.password = None;
        let context = TaskContext::new(variables(json!({ "execution": { "id": "exec-42" } })));

        // When: running the task
        let result = task.run(&context).await;

        // Then: it fails before touching the network
        assert!(matches!(result, Err(Error::AuthenticationConfig)));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_with_unresolved_variable_makes_no_request() {
        let mock_server = MockServer::start().await;
        let task = failed_workflow_issue(&mock_server.uri());

        let result = task.run(&TaskContext::default()).await;

        assert!(matches!(result, Err(Error::TemplateRender(_))));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn fields_default_labels_to_empty_list() {
        let task = CreateIssue {
            project_key: "myproject".to_string(),
            ..Default::default()
        };

        let fields = task.fields(&HandlebarsRenderer::default()).unwrap();

        assert_eq!(fields.get("labels"), Some(&json!([])));
        assert_eq!(fields.get("summary"), Some(&Value::Null));
        assert_eq!(fields.get("issuetype"), Some(&json!(DEFAULT_ISSUE_TYPE)));
        assert!(!fields.contains("issueTypeId"));
    }

    #[test]
    fn fields_keep_explicit_issue_type() {
        let task = CreateIssue {
            project_key: "myproject".to_string(),
            issue_type: Some("Bug".to_string()),
            ..Default::default()
        };

        let fields = task.fields(&HandlebarsRenderer::default()).unwrap();

        assert_eq!(fields.get("issuetype"), Some(&json!("Bug")));
    }

    #[test]
    fn fields_with_issue_type_id_skip_issue_type() {
        let task = CreateIssue {
            project_key: "myproject".to_string(),
            issue_type: Some("Bug".to_string()),
            issue_type_id: Some("10001".to_string()),
            ..Default::default()
        };

        let fields = task.fields(&HandlebarsRenderer::default()).unwrap();

        assert_eq!(fields.get("issueTypeId"), Some(&json!("10001")));
        assert!(!fields.contains("issuetype"));
    }

    #[test]
    fn fields_require_project_key() {
        let task = CreateIssue::default();

        let result = task.fields(&HandlebarsRenderer::default());

        assert!(matches!(result, Err(Error::MissingProperty("projectKey"))));
    }

    #[test]
    fn deserializes_task_configuration() {
        let task: CreateIssue = serde_json::from_value(json!({
            "baseUrl": "https://your-domain.atlassian.net",
            "accessToken": "tok",
            "projectKey": "myproject",
            "summary": "Workflow failed",
            "labels": ["bug", "workflow"],
            "issuetype": "Bug",
            "issueTypeId": "10001"
        }))
        .unwrap();

        assert_eq!(task.connection.base_url, "https://your-domain.atlassian.net");
        assert_eq!(task.project_key, "myproject");
        assert_eq!(task.issue_type.as_deref(), Some("Bug"));
        assert_eq!(task.issue_type_id.as_deref(), Some("10001"));
    }
}
