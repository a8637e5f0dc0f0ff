use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Connection, TaskContext, execute, required};
use crate::error::Result;
use crate::jira::{JiraResponse, issue_route};
use crate::template::UPDATE_FIELDS_TEMPLATE;

/// Update one or more fields of a Jira issue.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFields {
    #[serde(flatten)]
    pub connection: Connection,
    /// Jira issue key or id
    pub issue_id_or_key: String,
    /// Field names mapped to their new values (e.g. {"customfield_10005": "Updated value"})
    pub fields: Map<String, Value>,
}

impl UpdateFields {
    pub async fn run(&self, context: &TaskContext) -> Result<JiraResponse> {
        let issue = required(context.renderer(), "issueIdOrKey", &self.issue_id_or_key)?;

        execute(context, &self.connection, &issue_route(&issue), |builder| {
            let fields = builder
                .renderer()
                .render_value(&Value::Object(self.fields.clone()))?;

            let mut variables = Map::new();
            variables.insert("fields".to_string(), fields);
            builder.build_from(UPDATE_FIELDS_TEMPLATE, &variables)
        })
        .await
    }
}
