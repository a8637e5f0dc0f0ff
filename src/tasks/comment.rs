use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Connection, TaskContext, execute, required};
use crate::error::Result;
use crate::jira::{JiraResponse, comment_route};
use crate::template::COMMENT_TEMPLATE;

/// Add a comment to a Jira issue.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    #[serde(flatten)]
    pub connection: Connection,
    /// Issue key or id to comment (e.g. 'TID-53')
    pub issue_id_or_key: String,
    /// Comment text, markdown accepted
    pub body: String,
}

impl CreateComment {
    pub async fn run(&self, context: &TaskContext) -> Result<JiraResponse> {
        let issue = required(context.renderer(), "issueIdOrKey", &self.issue_id_or_key)?;

        execute(context, &self.connection, &comment_route(&issue), |builder| {
            let body = required(builder.renderer(), "body", &self.body)?;

            let mut variables = Map::new();
            variables.insert("body".to_string(), Value::String(body));
            builder.build_from(COMMENT_TEMPLATE, &variables)
        })
        .await
    }
}
