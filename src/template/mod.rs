//! Template rendering for task properties and payload templates.

mod store;

pub use store::*;

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Renders dynamic task properties and payload templates.
///
/// Implementations must fail with [`Error::TemplateRender`] when a template
/// references a variable that is not defined.
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with the invocation variables plus `variables`.
    /// Entries in `variables` shadow invocation variables of the same name.
    fn render(&self, template: &str, variables: &Map<String, Value>) -> Result<String>;

    /// Render a single property value against the invocation variables.
    fn render_expression(&self, expression: &str) -> Result<String>;

    fn render_optional(&self, expression: Option<&str>) -> Result<Option<String>> {
        expression.map(|e| self.render_expression(e)).transpose()
    }

    /// Render every string found in `value`, keeping its shape.
    fn render_value(&self, value: &Value) -> Result<Value> {
        Ok(match value {
            Value::String(s) => Value::String(self.render_expression(s)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.render_value(item))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok::<_, Error>((k.clone(), self.render_value(v)?)))
                    .collect::<Result<_>>()?,
            ),
            other => other.clone(),
        })
    }
}

/// `{{{json value}}}` writes `value` as a JSON literal.
fn json_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("json", 0))?;
    if r.strict_mode() && param.is_value_missing() {
        return Err(RenderErrorReason::MissingVariable(param.relative_path().cloned()).into());
    }

    out.write(&param.value().to_string())?;
    Ok(())
}

/// Handlebars renderer running in strict mode.
///
/// Output is never HTML-escaped. Templates producing JSON should use the
/// `json` helper (`{{{json summary}}}`) to emit correctly quoted values.
pub struct HandlebarsRenderer {
    handlebars: Handlebars<'static>,
    variables: Map<String, Value>,
}

impl HandlebarsRenderer {
    pub fn new(variables: Map<String, Value>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("json", Box::new(json_helper));

        Self {
            handlebars,
            variables,
        }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new(Map::new())
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, variables: &Map<String, Value>) -> Result<String> {
        let mut data = self.variables.clone();
        data.extend(variables.iter().map(|(k, v)| (k.clone(), v.clone())));

        self.handlebars
            .render_template(template, &data)
            .map_err(|e| Error::TemplateRender(e.to_string()))
    }

    fn render_expression(&self, expression: &str) -> Result<String> {
        self.handlebars
            .render_template(expression, &self.variables)
            .map_err(|e| Error::TemplateRender(e.to_string()))
    }
}
