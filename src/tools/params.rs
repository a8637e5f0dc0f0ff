use serde::Deserialize;
use serde_json::{Map, Value};

use crate::tasks::{CreateComment, CreateIssue, SendPayload, UpdateFields};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateIssueParams {
    #[serde(flatten)]
    pub task: CreateIssue,
    /// Variables available to '{{...}}' expressions in the task properties
    #[serde(default)]
    pub variables: Map<String, Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateCommentParams {
    #[serde(flatten)]
    pub task: CreateComment,
    /// Variables available to '{{...}}' expressions in the task properties
    #[serde(default)]
    pub variables: Map<String, Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFieldsParams {
    #[serde(flatten)]
    pub task: UpdateFields,
    /// Variables available to '{{...}}' expressions in the task properties
    #[serde(default)]
    pub variables: Map<String, Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SendPayloadParams {
    #[serde(flatten)]
    pub task: SendPayload,
    /// Variables available to '{{...}}' expressions in the task properties
    #[serde(default)]
    pub variables: Map<String, Value>,
}
