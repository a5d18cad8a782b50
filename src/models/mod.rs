//! Data model: themes, slides, chart series and documents.

pub mod chart;
pub mod document;
pub mod lenient;
pub mod slide;
pub mod theme;

pub use chart::{ChartSeries, ChartType, ChartValue};
pub use document::{AspectRatio, HtmlSlide, PageFormat, SlideDocument, SlideSize};
pub use lenient::Text;
pub use slide::Slide;
pub use theme::{TemplateCategory, Theme};
