//! Error types for Jira tasks

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required authentication fields: set username and password, or an access token")]
    AuthenticationConfig,

    #[error("Template render error: {0}")]
    TemplateRender(String),

    #[error("Template `{template}` did not render to valid JSON: {source}")]
    TemplateParse {
        template: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown template: {0}")]
    TemplateNotFound(String),

    #[error("Property `{0}` must not be blank")]
    MissingProperty(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
