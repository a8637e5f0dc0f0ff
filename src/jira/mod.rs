mod models;

pub use models::*;

use std::time::Duration;

use reqwest::{Client, Proxy};
use tracing::debug;

use crate::error::{Error, Result};

/// Sends task payloads to one Jira instance.
///
/// A client is built for a single task invocation and dropped with it.
pub struct JiraClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// `base_url` is used as given; routes are appended without normalization.
    pub fn new(base_url: &str, credentials: &Credentials, options: &HttpOptions) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = options.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(proxy) = &options.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.to_string(),
            auth_header: credentials.authorization_header(),
        })
    }

    pub async fn post(&self, route: &str, payload: String) -> Result<JiraResponse> {
        let url = format!("{}{}", self.base_url, route);

        debug!("Executing request to {} with payload: {}", url, payload);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let body = response.text().await?;
        debug!("Response: {}", body);

        Ok(JiraResponse {
            status: status.as_u16(),
            body,
        })
    }
}
