//! Handlebars rendering of parameterized template files
//!
//! Files ending in `.hbs` are rendered against the project configuration
//! (camelCase keys, kebab-case option values) plus a few derived flags:
//!
//! - `{{name}}`, `{{preset}}`, `{{styling}}`, `{{packageManager}}`, ...
//! - `{{#if hasMobile}}`, `{{#if hasWeb}}`, `{{#if isMonorepo}}`, `{{#if hasBackend}}`
//! - `{{#if (eq styling "tailwind")}}` for option comparisons
//!
//! A template that renders to nothing but whitespace is not written, which
//! lets optional files disappear for configurations that don't need them.

use crate::config::{ConfigModel, ProjectConfig};
use handlebars::{Handlebars, RenderError};
use serde_json::Value;

/// Suffix marking a parameterized file; stripped from the output name
pub const TEMPLATE_SUFFIX: &str = ".hbs";

pub fn is_template(file_name: &str) -> bool {
    file_name.len() > TEMPLATE_SUFFIX.len() && file_name.ends_with(TEMPLATE_SUFFIX)
}

/// Destination name of a store entry
pub fn output_name(file_name: &str) -> &str {
    match file_name.strip_suffix(TEMPLATE_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Whether rendered output should be dropped instead of written
pub fn is_blank(rendered: &str) -> bool {
    rendered.trim().is_empty()
}

/// Renders template sources against a fixed context
pub struct Renderer {
    registry: Handlebars<'static>,
    context: Value,
}

impl Renderer {
    pub fn new(config: &ProjectConfig, model: &ConfigModel) -> Self {
        Self::from_context(render_context(config, model))
    }

    pub fn from_context(context: Value) -> Self {
        let mut registry = Handlebars::new();
        // Output is source code, not HTML
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);
        Self { registry, context }
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn render(&self, source: &str) -> Result<String, RenderError> {
        self.registry.render_template(source, &self.context)
    }
}

/// Serialized configuration plus derived platform flags
pub fn render_context(config: &ProjectConfig, model: &ConfigModel) -> Value {
    let mut context = serde_json::to_value(config).unwrap_or_default();
    if let Value::Object(map) = &mut context {
        map.insert("hasMobile".into(), model.has_mobile(config.preset).into());
        map.insert("hasWeb".into(), model.has_web(config.preset).into());
        map.insert("isMonorepo".into(), model.is_monorepo(config.preset).into());
        map.insert(
            "hasBackend".into(),
            (config.backend != crate::config::Backend::None).into(),
        );
    }
    context
}
