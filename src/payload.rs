//! Payload construction: field sets, template merge and explicit overrides.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::template::{TemplateRenderer, TemplateSource};

/// Jira field names mapped to rendered values. Serialization order is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldSet(Map<String, Value>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FieldSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub struct PayloadBuilder<'a> {
    renderer: &'a dyn TemplateRenderer,
    templates: &'a dyn TemplateSource,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, templates: &'a dyn TemplateSource) -> Self {
        Self {
            renderer,
            templates,
        }
    }

    pub fn renderer(&self) -> &'a dyn TemplateRenderer {
        self.renderer
    }

    /// Use `payload_override` verbatim when it is non-blank, otherwise run `build`.
    ///
    /// With an override present nothing else is rendered and no template is loaded.
    pub fn resolve<F>(&self, payload_override: Option<String>, build: F) -> Result<String>
    where
        F: FnOnce(&Self) -> Result<String>,
    {
        match payload_override {
            Some(payload) if !payload.trim().is_empty() => {
                debug!("Using explicit payload, skipping field rendering");
                Ok(payload)
            }
            _ => build(self),
        }
    }

    /// Wrap `fields` under a top-level `fields` key. When `template` is given the
    /// rendered template replaces that document entirely.
    pub fn build(&self, fields: FieldSet, template: Option<&str>) -> Result<String> {
        let document = match template {
            Some(name) => self.merge(name, fields.as_map())?,
            None => {
                let mut document = Map::new();
                document.insert("fields".to_string(), Value::Object(fields.into_map()));
                Value::Object(document)
            }
        };

        Ok(serde_json::to_string(&document)?)
    }

    /// Render `template` against `variables` and return the parsed document.
    pub fn build_from(&self, template: &str, variables: &Map<String, Value>) -> Result<String> {
        let document = self.merge(template, variables)?;
        Ok(serde_json::to_string(&document)?)
    }

    fn merge(&self, template: &str, variables: &Map<String, Value>) -> Result<Value> {
        let text = self.templates.load(template)?;
        let rendered = self.renderer.render(&text, variables)?;

        serde_json::from_str(&rendered).map_err(|source| Error::TemplateParse {
            template: template.to_string(),
            source,
        })
    }
}
