use anyhow::Result;
use jira_issue_tasks::server::JiraTaskServer;
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = JiraTaskServer::new();

    tracing::info!("Starting Jira task server...");

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
