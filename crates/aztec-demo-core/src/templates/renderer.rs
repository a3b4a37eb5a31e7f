//! Handlebars renderer in strict mode: a template that references a variable
//! missing from the data context fails instead of rendering it empty.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{AztecDemoError, Result};

pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        // package.json and markdown are not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| AztecDemoError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
