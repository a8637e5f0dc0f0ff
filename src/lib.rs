//! Jira issue tasks.
//!
//! Each task renders its properties, builds a JSON payload (optionally through
//! a named template) and posts it once to the Jira REST API with Basic or
//! Bearer authentication.

pub mod error;
pub mod jira;
pub mod payload;
pub mod server;
pub mod tasks;
pub mod template;
pub mod tools;

pub use error::{Error, Result};
pub use tasks::{CreateComment, CreateIssue, SendPayload, TaskContext, UpdateFields};
