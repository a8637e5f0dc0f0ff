//! Task variants and the request pipeline they share.

mod comment;
mod create;
mod send;
mod update;

pub use comment::CreateComment;
pub use create::{CreateIssue, DEFAULT_ISSUE_TYPE};
pub use send::SendPayload;
pub use update::UpdateFields;

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::jira::{Credentials, HttpOptions, JiraClient, JiraResponse};
use crate::payload::PayloadBuilder;
use crate::template::{EmbeddedTemplates, HandlebarsRenderer, TemplateRenderer, TemplateSource};

/// Connection settings shared by every task.
#[derive(Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Atlassian URL without trailing slash (e.g. 'https://your-domain.atlassian.net')
    pub base_url: String,
    /// Atlassian username, required with `password` for basic authentication
    pub username: Option<String>,
    /// Atlassian password or API token
    pub password: Option<String>,
    /// OAuth access token, used when username and password are not set
    pub access_token: Option<String>,
    /// Raw JSON body sent as-is, skipping field rendering and templates
    pub payload: Option<String>,
    /// HTTP client settings
    #[serde(default)]
    pub options: HttpOptions,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");

        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("access_token", &redact(&self.access_token))
            .field("payload", &self.payload)
            .field("options", &self.options)
            .finish()
    }
}

/// Renderer and template store used by one task invocation.
pub struct TaskContext {
    renderer: Box<dyn TemplateRenderer>,
    templates: Box<dyn TemplateSource>,
}

impl TaskContext {
    /// Handlebars rendering over `variables` with the embedded templates.
    pub fn new(variables: Map<String, Value>) -> Self {
        Self::with(HandlebarsRenderer::new(variables), EmbeddedTemplates)
    }

    pub fn with(
        renderer: impl TemplateRenderer + 'static,
        templates: impl TemplateSource + 'static,
    ) -> Self {
        Self {
            renderer: Box::new(renderer),
            templates: Box::new(templates),
        }
    }

    pub fn renderer(&self) -> &dyn TemplateRenderer {
        self.renderer.as_ref()
    }

    pub fn payload_builder(&self) -> PayloadBuilder<'_> {
        PayloadBuilder::new(self.renderer.as_ref(), self.templates.as_ref())
    }
}

impl Default for TaskContext {
    fn default() -> Self {
        Self::new(Map::new())
    }
}

/// Render → build payload → resolve credentials → one POST to `baseUrl + route`.
///
/// `build` only runs when the connection carries no explicit payload.
pub(crate) async fn execute<F>(
    context: &TaskContext,
    connection: &Connection,
    route: &str,
    build: F,
) -> Result<JiraResponse>
where
    F: FnOnce(&PayloadBuilder<'_>) -> Result<String>,
{
    let renderer = context.renderer();
    let base_url = required(renderer, "baseUrl", &connection.base_url)?;

    let payload_override = renderer.render_optional(connection.payload.as_deref())?;
    let payload = context.payload_builder().resolve(payload_override, build)?;

    let username = renderer.render_optional(connection.username.as_deref())?;
    let password = renderer.render_optional(connection.password.as_deref())?;
    let access_token = renderer.render_optional(connection.access_token.as_deref())?;
    let credentials = Credentials::resolve(
        username.as_deref(),
        password.as_deref(),
        access_token.as_deref(),
    )?;

    let client = JiraClient::new(&base_url, &credentials, &connection.options)?;
    client.post(route, payload).await
}

/// Render a mandatory property, rejecting blank results.
pub(crate) fn required(
    renderer: &dyn TemplateRenderer,
    name: &'static str,
    value: &str,
) -> Result<String> {
    let rendered = renderer.render_expression(value)?;
    if rendered.trim().is_empty() {
        return Err(Error::MissingProperty(name));
    }
    Ok(rendered)
}

#[cfg(test)]
pub(crate) fn basic_connection(base_url: &str) -> Connection {
    Connection {
        base_url: base_url.to_string(),
        username: Some("user@domain.com".to_string()),
        password: Some("api-token".to_string()),
        ..Default::default()
    }
}
