use crate::error::{Error, Result};

pub const CREATE_ISSUE_TEMPLATE: &str = "create-issue";
pub const CREATE_ISSUE_BY_TYPE_ID_TEMPLATE: &str = "create-issue-by-type-id";
pub const COMMENT_TEMPLATE: &str = "comment";
pub const UPDATE_FIELDS_TEMPLATE: &str = "update-fields";

/// Looks up payload templates by name.
pub trait TemplateSource: Send + Sync {
    fn load(&self, name: &str) -> Result<String>;
}

/// Payload templates compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, name: &str) -> Result<String> {
        let text = match name {
            CREATE_ISSUE_TEMPLATE => include_str!("../../templates/create-issue.hbs"),
            CREATE_ISSUE_BY_TYPE_ID_TEMPLATE => {
                include_str!("../../templates/create-issue-by-type-id.hbs")
            }
            COMMENT_TEMPLATE => include_str!("../../templates/comment.hbs"),
            UPDATE_FIELDS_TEMPLATE => include_str!("../../templates/update-fields.hbs"),
            _ => return Err(Error::TemplateNotFound(name.to_string())),
        };

        Ok(text.to_string())
    }
}
