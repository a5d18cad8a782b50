//! Browser entry points for the presentation editor.
//!
//! Every export takes and returns JSON strings so the editor does not need generated
//! bindings for the slide model. The `*_json` functions hold the logic and run natively.
//! The stock engine is built on first use and reused by every later call on the thread.

use std::cell::OnceCell;

use log::{debug, warn};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::engine::{decode_slide, SlideEngine};
use crate::errors::Result;
use crate::models::AspectRatio;
use crate::registry::TemplateSummary;

thread_local! {
    static ENGINE: OnceCell<SlideEngine> = OnceCell::new();
}

/// Runs `f` against the cached stock engine, building it if needed.
fn with_engine<T>(f: impl FnOnce(&SlideEngine) -> Result<T>) -> Result<T> {
    ENGINE.with(|cell| {
        let engine = match cell.get() {
            Some(engine) => engine,
            None => {
                debug!("Building stock slide engine");
                let built = SlideEngine::with_builtin_themes()?;
                cell.get_or_init(|| built)
            }
        };
        f(engine)
    })
}

/// Routes `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        warn!("Logger already initialised");
    }
}

fn to_js(err: crate::errors::EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Renders a whole document. Returns a JSON array of `{html, css}`.
#[wasm_bindgen(js_name = renderDeck)]
pub fn render_deck(document_json: &str, template_id: &str) -> std::result::Result<String, JsValue> {
    render_deck_json(document_json, template_id).map_err(to_js)
}

/// Renders one slide. Returns a JSON `{html, css}` object.
#[wasm_bindgen(js_name = renderSlide)]
pub fn render_slide(
    slide_json: &str,
    template_id: &str,
    aspect_ratio: Option<String>,
) -> std::result::Result<String, JsValue> {
    render_slide_json(slide_json, template_id, aspect_ratio.as_deref()).map_err(to_js)
}

/// Lists the stock templates as a JSON array of summaries.
#[wasm_bindgen(js_name = listTemplates)]
pub fn list_templates() -> std::result::Result<String, JsValue> {
    list_templates_json().map_err(to_js)
}

pub fn render_deck_json(document_json: &str, template_id: &str) -> Result<String> {
    let slides = with_engine(|engine| engine.generate_all_from_json(document_json, template_id))?;
    Ok(serde_json::to_string(&slides)?)
}

pub fn render_slide_json(
    slide_json: &str,
    template_id: &str,
    aspect_ratio: Option<&str>,
) -> Result<String> {
    let value: Value = serde_json::from_str(slide_json)?;
    let slide = decode_slide(&value)?;
    let ratio = aspect_ratio.and_then(|raw| match raw.parse::<AspectRatio>() {
        Ok(ratio) => Some(ratio),
        Err(e) => {
            warn!("{e}; using the default canvas");
            None
        }
    });
    let rendered = with_engine(|engine| engine.generate_slide(&slide, template_id, ratio))?;
    Ok(serde_json::to_string(&rendered)?)
}

pub fn list_templates_json() -> Result<String> {
    let summaries: Vec<TemplateSummary> = with_engine(|engine| {
        Ok(engine
            .registry()
            .get_all()
            .into_iter()
            .map(|t| t.summary())
            .collect())
    })?;
    Ok(serde_json::to_string(&summaries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use crate::models::HtmlSlide;

    #[test]
    fn deck_round_trips_through_json() {
        let json = r#"{"slides": [{"type": "title", "props": {"title": "Hello"}}, {"type": "agenda"}]}"#;
        let out = render_deck_json(json, "modern").unwrap();
        let slides: Vec<HtmlSlide> = serde_json::from_str(&out).unwrap();
        assert_eq!(slides.len(), 2);
        assert!(slides[0].html.contains("Hello"));
        assert!(slides[1].css.contains("--slide-width:"));
    }

    #[test]
    fn slide_with_ratio() {
        let out = render_slide_json(r#"{"type": "quote"}"#, "minimal", Some("4:3")).unwrap();
        let slide: HtmlSlide = serde_json::from_str(&out).unwrap();
        assert!(slide.html.contains("data-aspect-ratio=\"4:3\""));

        let out = render_slide_json(r#"{"type": "quote"}"#, "minimal", Some("cinema")).unwrap();
        let slide: HtmlSlide = serde_json::from_str(&out).unwrap();
        assert!(slide.html.contains("data-aspect-ratio=\"16:9\""));
    }

    #[test]
    fn errors_name_the_cause() {
        let err = render_deck_json(r#"{"slides": []}"#, "ghost").unwrap_err();
        assert!(err.to_string().contains("ghost"));
        let err = render_slide_json(r#"{"type": "carousel", "props": {}}"#, "modern", None).unwrap_err();
        assert!(matches!(&err, EngineError::UnsupportedSlideType(t) if t == "carousel"));
        assert!(err.to_string().contains("carousel"));
        let err = render_slide_json(r#"{"type": "bullet", "props": "oops"}"#, "modern", None).unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
        let err = render_slide_json("not json", "modern", None).unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn engine_is_built_once_per_thread() {
        let first = with_engine(|engine| Ok(engine as *const SlideEngine)).unwrap();
        render_slide_json(r#"{"type": "title"}"#, "modern", None).unwrap();
        let second = with_engine(|engine| Ok(engine as *const SlideEngine)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn template_listing() {
        let out = list_templates_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 7);
        assert!(list.iter().any(|t| t["id"] == "midnight" && t["templateId"] == "modern"));
    }
}
