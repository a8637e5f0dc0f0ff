use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const ISSUE_API_ROUTE: &str = "/rest/api/2/issue/";
pub const COMMENT_API_ROUTE: &str = "/comment";

/// Route of a single issue, e.g. `/rest/api/2/issue/PROJ-1`.
pub fn issue_route(issue_id_or_key: &str) -> String {
    format!("{}{}", ISSUE_API_ROUTE, issue_id_or_key)
}

/// Route of an issue's comments, e.g. `/rest/api/2/issue/PROJ-1/comment`.
pub fn comment_route(issue_id_or_key: &str) -> String {
    format!("{}{}{}", ISSUE_API_ROUTE, issue_id_or_key, COMMENT_API_ROUTE)
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer { token: String },
}

impl Credentials {
    /// Pick the authentication scheme from the configured values.
    ///
    /// Basic wins whenever username and password are both non-blank, even if an
    /// access token is also set. Blank values count as absent.
    pub fn resolve(
        username: Option<&str>,
        password: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<Self> {
        if let (Some(username), Some(password)) = (non_blank(username), non_blank(password)) {
            return Ok(Self::Basic {
                username: username.to_string(),
                password: password.to_string(),
            });
        }

        match non_blank(access_token) {
            Some(token) => Ok(Self::Bearer {
                token: token.to_string(),
            }),
            None => Err(Error::AuthenticationConfig),
        }
    }

    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password);
                format!("Basic {}", STANDARD.encode(credentials))
            }
            Self::Bearer { token } => format!("Bearer {}", token),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// HTTP client settings. Unset values keep reqwest's defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpOptions {
    /// Total request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Connection timeout in seconds
    pub connect_timeout_secs: Option<u64>,
    /// User-Agent header sent with the request
    pub user_agent: Option<String>,
    /// Proxy URL applied to every scheme (e.g. 'http://proxy.local:3128')
    pub proxy: Option<String>,
}

/// Raw Jira reply. The body is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JiraResponse {
    pub status: u16,
    pub body: String,
}
