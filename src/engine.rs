//! The rendering facade consumed by the content pipeline and the editor.

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{EngineError, Result};
use crate::models::{
    document::resolve_document_ratio, AspectRatio, HtmlSlide, Slide, SlideDocument, SlideSize,
    Theme,
};
use crate::registry::{Template, TemplateRegistry};
use crate::themes::builtin_themes;

/// Builder for creating a [`SlideEngine`].
#[derive(Default)]
pub struct SlideEngineBuilder {
    themes: Vec<Theme>,
    default_aspect_ratio: AspectRatio,
}

impl SlideEngineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds the stock themes.
    pub fn with_builtin_themes(mut self) -> Self {
        self.themes.extend(builtin_themes());
        self
    }

    /// Adds `themes`, registered in order after any already added.
    pub fn themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes.extend(themes);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.themes.push(theme);
        self
    }

    /// Canvas used when neither the call nor the document names one.
    pub fn default_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.default_aspect_ratio = ratio;
        self
    }

    /// Builds the engine. Fails on the first invalid theme.
    pub fn build(self) -> Result<SlideEngine> {
        let registry = TemplateRegistry::from_themes(self.themes)?;
        Ok(SlideEngine {
            registry,
            default_aspect_ratio: self.default_aspect_ratio,
        })
    }
}

/// Renders slides and documents against registered templates.
#[derive(Debug, Clone)]
pub struct SlideEngine {
    registry: TemplateRegistry,
    default_aspect_ratio: AspectRatio,
}

/// A document whose slides have not been decoded yet.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDocument {
    slides: Vec<Value>,
    aspect_ratio: Option<String>,
    page_format: Option<String>,
}

impl SlideEngine {
    pub fn builder() -> SlideEngineBuilder {
        SlideEngineBuilder::new()
    }

    /// An engine with the seven stock themes and a 16:9 default canvas.
    pub fn with_builtin_themes() -> Result<Self> {
        SlideEngineBuilder::new().with_builtin_themes().build()
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.registry
    }

    pub fn default_aspect_ratio(&self) -> AspectRatio {
        self.default_aspect_ratio
    }

    fn template(&self, template_id: &str) -> Result<&Template> {
        self.registry
            .get(template_id)
            .ok_or_else(|| EngineError::TemplateNotFound(template_id.to_string()))
    }

    /// Renders one slide. `aspect_ratio` falls back to the engine default.
    pub fn generate_slide(
        &self,
        slide: &Slide,
        template_id: &str,
        aspect_ratio: Option<AspectRatio>,
    ) -> Result<HtmlSlide> {
        let template = self.template(template_id)?;
        let ratio = aspect_ratio.unwrap_or(self.default_aspect_ratio);
        debug!("Rendering {} slide with '{}' at {}", slide.tag(), template_id, ratio);
        template.render(slide, Some(ratio))
    }

    /// Renders every slide of `document` in order.
    ///
    /// A failing slide aborts the batch; the error carries its 1-based index.
    pub fn generate_all(&self, document: &SlideDocument, template_id: &str) -> Result<Vec<HtmlSlide>> {
        let template = self.template(template_id)?;
        let ratio = document.resolved_aspect_ratio(self.default_aspect_ratio);
        self.render_batch(template, document.slides.len(), ratio, |i| {
            template.render(&document.slides[i], Some(ratio))
        })
    }

    /// Like [`SlideEngine::generate_all`], but decodes the document here so that an unknown
    /// slide `type` or malformed props are reported against the offending slide.
    pub fn generate_all_from_json(&self, json: &str, template_id: &str) -> Result<Vec<HtmlSlide>> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let template = self.template(template_id)?;
        let ratio = self.raw_ratio(&raw);
        self.render_batch(template, raw.slides.len(), ratio, |i| {
            let slide = decode_slide(&raw.slides[i])?;
            template.render(&slide, Some(ratio))
        })
    }

    /// The canvas [`SlideEngine::generate_all_from_json`] renders `json` on with
    /// `template_id`, after the template's aspect ratio fallback.
    pub fn canvas_for_json(&self, json: &str, template_id: &str) -> Result<SlideSize> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let template = self.template(template_id)?;
        Ok(template.context_for(Some(self.raw_ratio(&raw))).slide_size)
    }

    fn raw_ratio(&self, raw: &RawDocument) -> AspectRatio {
        resolve_document_ratio(
            raw.aspect_ratio.as_deref(),
            raw.page_format.as_deref(),
            self.default_aspect_ratio,
        )
    }

    fn render_batch<F>(
        &self,
        template: &Template,
        count: usize,
        ratio: AspectRatio,
        mut render: F,
    ) -> Result<Vec<HtmlSlide>>
    where
        F: FnMut(usize) -> Result<HtmlSlide>,
    {
        #[cfg(not(target_arch = "wasm32"))]
        let started = std::time::Instant::now();

        let mut rendered = Vec::with_capacity(count);
        for index in 0..count {
            rendered.push(render(index).map_err(|e| e.at_slide(index + 1))?);
        }

        #[cfg(not(target_arch = "wasm32"))]
        info!(
            "Rendered {} slides with '{}' at {} in {:?}",
            count,
            template.id(),
            ratio,
            started.elapsed()
        );
        #[cfg(target_arch = "wasm32")]
        info!("Rendered {} slides with '{}' at {}", count, template.id(), ratio);

        Ok(rendered)
    }
}

/// Decodes one raw slide, distinguishing an unknown `type` from malformed props.
pub(crate) fn decode_slide(value: &Value) -> Result<Slide> {
    let tag = value.get("type").and_then(Value::as_str).unwrap_or("");
    if !Slide::TAGS.contains(&tag) {
        let tag = match value.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "<missing>".to_string(),
        };
        return Err(EngineError::UnsupportedSlideType(tag));
    }
    Ok(Slide::deserialize(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> SlideEngine {
        SlideEngine::with_builtin_themes().unwrap()
    }

    fn slide(value: Value) -> Slide {
        serde_json::from_value(value).unwrap()
    }

    fn canvas(out: &HtmlSlide) -> SlideSize {
        let attr = |name: &str| -> u32 {
            let key = format!("{name}=\"");
            let start = out.html.find(&key).unwrap() + key.len();
            let end = out.html[start..].find('"').unwrap() + start;
            out.html[start..end].parse().unwrap()
        };
        SlideSize::new(attr("data-slide-width"), attr("data-slide-height"))
    }

    #[test]
    fn unknown_template_is_reported_by_id() {
        let err = engine()
            .generate_slide(&Slide::empty("title").unwrap(), "nonexistent", None)
            .unwrap_err();
        assert!(matches!(&err, EngineError::TemplateNotFound(id) if id == "nonexistent"));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn canvas_follows_requested_ratio() {
        let engine = engine();
        let title = slide(json!({"type": "title", "props": {"title": "Hi"}}));
        let default = engine.generate_slide(&title, "modern", None).unwrap();
        assert_eq!(canvas(&default), SlideSize::new(1280, 720));
        for ratio in AspectRatio::ALL {
            let out = engine.generate_slide(&title, "modern", Some(ratio)).unwrap();
            assert_eq!(canvas(&out), ratio.slide_size());
            assert_eq!(out == default, ratio == AspectRatio::Widescreen);
            assert!(out.css.contains(&format!("--slide-width:{}px", ratio.slide_size().width)));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let engine = engine();
        let chart = slide(json!({
            "type": "chart",
            "props": {"chartType": "pie", "data": [{"name": "s", "labels": ["a", "b", "c"], "values": [1, 2, 3]}]}
        }));
        let a = engine.generate_slide(&chart, "elegant", Some(AspectRatio::Standard)).unwrap();
        let b = engine.generate_slide(&chart, "elegant", Some(AspectRatio::Standard)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn one_page_document_renders_on_a4() {
        let engine = engine();
        let document: SlideDocument = serde_json::from_value(json!({
            "pageFormat": "one-page",
            "slides": [{"type": "reportA4", "props": {"title": "Q3"}}]
        }))
        .unwrap();
        let out = engine.generate_all(&document, "report").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(canvas(&out[0]), SlideSize::new(794, 1123));
    }

    #[test]
    fn batch_keeps_order_and_default_ratio() {
        let engine = SlideEngine::builder()
            .with_builtin_themes()
            .default_aspect_ratio(AspectRatio::Standard)
            .build()
            .unwrap();
        let document = SlideDocument::new(vec![
            slide(json!({"type": "title", "props": {"title": "One"}})),
            slide(json!({"type": "bullet", "props": {"bullets": ["Two"]}})),
        ]);
        let out = engine.generate_all(&document, "minimal").unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].html.contains(">One<"));
        assert!(out[1].html.contains(">Two<"));
        assert!(out.iter().all(|s| canvas(s) == SlideSize::new(960, 720)));
    }

    #[test]
    fn unknown_slide_type_fails_with_index() {
        let json = r#"{"slides": [
            {"type": "title", "props": {"title": "ok"}},
            {"type": "carousel", "props": {}}
        ]}"#;
        let err = engine().generate_all_from_json(json, "modern").unwrap_err();
        match &err {
            EngineError::SlideFailed { index, source } => {
                assert_eq!(*index, 2);
                assert!(matches!(&**source, EngineError::UnsupportedSlideType(t) if t == "carousel"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().starts_with("Slide 2 failed"));
    }

    #[test]
    fn malformed_props_fail_with_index() {
        let json = r#"{"slides": [{"type": "bullet", "props": "not an object"}]}"#;
        let err = engine().generate_all_from_json(json, "modern").unwrap_err();
        assert!(matches!(err, EngineError::SlideFailed { index: 1, .. }));
        assert!(matches!(err.root_cause(), EngineError::Json(_)));
    }

    #[test]
    fn json_documents_render_like_typed_ones() {
        let engine = engine();
        let json = r#"{"aspectRatio": "4:3", "slides": [{"type": "quote", "props": {"quote": "Q"}}]}"#;
        let from_json = engine.generate_all_from_json(json, "corporate").unwrap();
        let document: SlideDocument = serde_json::from_str(json).unwrap();
        let typed = engine.generate_all(&document, "corporate").unwrap();
        assert_eq!(from_json, typed);
        assert_eq!(canvas(&typed[0]), SlideSize::new(960, 720));
    }

    #[test]
    fn json_canvas_matches_rendered_slides() {
        let engine = engine();
        let json = r#"{"aspectRatio": "4:3", "slides": [{"type": "title", "props": {"title": "T"}}]}"#;
        for template_id in ["modern", "report"] {
            let out = engine.generate_all_from_json(json, template_id).unwrap();
            let size = engine.canvas_for_json(json, template_id).unwrap();
            assert_eq!(canvas(&out[0]), size, "{template_id}");
        }
        assert_eq!(engine.canvas_for_json(json, "modern").unwrap(), SlideSize::new(960, 720));
        assert_ne!(engine.canvas_for_json(json, "report").unwrap(), SlideSize::new(960, 720));
        assert!(matches!(
            engine.canvas_for_json(json, "ghost"),
            Err(EngineError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn unknown_template_aborts_batch() {
        let err = engine()
            .generate_all(&SlideDocument::default(), "ghost")
            .unwrap_err();
        assert!(matches!(err, EngineError::TemplateNotFound(_)));
    }
}
