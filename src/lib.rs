//! Theme-aware slide rendering.
//!
//! A [`SlideEngine`] holds a registry of templates (resolved themes) and compiles slides into
//! self-contained HTML fragments whose colors and fonts are CSS custom properties.
//!
//! ```
//! use slidecraft::{SlideEngine, Slide};
//!
//! let engine = SlideEngine::with_builtin_themes()?;
//! let slide: Slide = serde_json::from_str(r#"{"type": "title", "props": {"title": "Q3 review"}}"#)?;
//! let out = engine.generate_slide(&slide, "modern", None)?;
//! assert!(out.html.contains("Q3 review"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod converters;
pub mod engine;
pub mod errors;
pub mod models;
pub mod registry;
pub mod themes;

pub use engine::{SlideEngine, SlideEngineBuilder};
pub use errors::{EngineError, Result};
pub use models::{AspectRatio, HtmlSlide, PageFormat, Slide, SlideDocument, SlideSize, Theme};
pub use registry::{Template, TemplateRegistry, TemplateSummary};

// browser surface
pub mod wasm;
