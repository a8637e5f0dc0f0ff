use crate::error::Error;
use crate::jira::JiraResponse;

pub fn format_response(action: &str, response: &JiraResponse) -> String {
    let body = if response.body.trim().is_empty() {
        "(empty)"
    } else {
        response.body.as_str()
    };

    format!(
        r#"{} successfully

**Status:** {}
**Response:** {}
"#,
        action, response.status, body
    )
}

pub fn format_error(action: &str, error: &Error) -> String {
    format!("Failed to {}: {}", action, error)
}
