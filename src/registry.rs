//! Template registry.
//!
//! A [`Template`] is a theme that has been validated and resolved once; rendering only ever
//! re-targets its context to another canvas. The registry keeps templates in registration
//! order so listings are stable.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::converters::html::render_slide;
use crate::errors::{EngineError, Result};
use crate::models::{AspectRatio, HtmlSlide, Slide, TemplateCategory, Theme};
use crate::themes::{resolve, to_css_variables, TemplateContext};

/// A renderable theme: the source tokens plus their resolved context and CSS block.
#[derive(Debug, Clone)]
pub struct Template {
    theme: Theme,
    context: TemplateContext,
    css: String,
}

impl Template {
    /// Validates and resolves `theme`.
    pub fn from_theme(theme: Theme) -> Result<Self> {
        theme.validate()?;
        let context = resolve(&theme);
        let css = to_css_variables(&theme);
        Ok(Template {
            theme,
            context,
            css,
        })
    }

    pub fn id(&self) -> &str {
        &self.theme.id
    }

    /// Rendering-style alias; equals [`Template::id`] unless the theme names one.
    pub fn template_id(&self) -> &str {
        self.theme.template_id()
    }

    pub fn name(&self) -> &str {
        &self.theme.name
    }

    pub fn category(&self) -> TemplateCategory {
        self.theme.category
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Context on the template's default (16:9) canvas.
    pub fn context(&self) -> &TemplateContext {
        &self.context
    }

    /// The `:root` block of theme tokens.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn supports_aspect_ratio(&self, ratio: AspectRatio) -> bool {
        self.theme.supported_aspect_ratios.is_empty()
            || self.theme.supported_aspect_ratios.contains(&ratio)
    }

    /// The context to render with. Unsupported ratios keep the default canvas.
    pub fn context_for(&self, ratio: Option<AspectRatio>) -> TemplateContext {
        match ratio {
            Some(ratio) if ratio == self.context.aspect_ratio => self.context.clone(),
            Some(ratio) if self.supports_aspect_ratio(ratio) => {
                self.context.with_aspect_ratio(ratio)
            }
            Some(ratio) => {
                warn!(
                    "Template '{}' does not support aspect ratio {}; using {}",
                    self.id(),
                    ratio,
                    self.context.aspect_ratio
                );
                self.context.clone()
            }
            None => self.context.clone(),
        }
    }

    /// Renders one slide with this template.
    pub fn render(&self, slide: &Slide, ratio: Option<AspectRatio>) -> Result<HtmlSlide> {
        let context = self.context_for(ratio);
        Ok(render_slide(slide, &context, &self.css)?)
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id().to_string(),
            template_id: self.template_id().to_string(),
            name: self.name().to_string(),
            description: self.theme.description.clone(),
            category: self.category(),
            supported_aspect_ratios: self.theme.supported_aspect_ratios.clone(),
        }
    }
}

/// Listing entry for template pickers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub template_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: TemplateCategory,
    pub supported_aspect_ratios: Vec<AspectRatio>,
}

/// In-memory map from template id to [`Template`].
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<String, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a registry with one template per theme, in order.
    pub fn from_themes(themes: impl IntoIterator<Item = Theme>) -> Result<Self> {
        let mut registry = TemplateRegistry::new();
        for theme in themes {
            registry.register_theme(theme)?;
        }
        Ok(registry)
    }

    /// Stores `template` under its id. An existing entry with the same id is replaced.
    pub fn register(&mut self, template: Template) -> Result<()> {
        let id = template.id().to_string();
        if id.is_empty() {
            return Err(EngineError::InvalidTemplateId);
        }
        if self.templates.contains_key(&id) {
            warn!("Template '{}' is already registered; overwriting", id);
        } else {
            debug!("Registered template '{}'", id);
        }
        self.templates.insert(id, template);
        Ok(())
    }

    /// Validates, resolves and registers `theme`.
    pub fn register_theme(&mut self, theme: Theme) -> Result<()> {
        if theme.id.is_empty() {
            return Err(EngineError::InvalidTemplateId);
        }
        self.register(Template::from_theme(theme)?)
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn get_all(&self) -> Vec<&Template> {
        self.templates.values().collect()
    }

    pub fn get_free(&self) -> Vec<&Template> {
        self.by_category(TemplateCategory::Free)
    }

    pub fn get_premium(&self) -> Vec<&Template> {
        self.by_category(TemplateCategory::Premium)
    }

    fn by_category(&self, category: TemplateCategory) -> Vec<&Template> {
        self.templates
            .values()
            .filter(|t| t.category() == category)
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
