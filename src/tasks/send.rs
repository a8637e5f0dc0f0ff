use serde::Deserialize;

use super::{Connection, TaskContext, execute};
use crate::error::{Error, Result};
use crate::jira::JiraResponse;

/// Post a caller-supplied payload to `baseUrl` as-is.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendPayload {
    #[serde(flatten)]
    pub connection: Connection,
}

impl SendPayload {
    pub async fn run(&self, context: &TaskContext) -> Result<JiraResponse> {
        execute(context, &self.connection, "", |_| {
            Err(Error::MissingProperty("payload"))
        })
        .await
    }
}
