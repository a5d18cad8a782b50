//! Theme resolution: design tokens → pixel context and CSS custom properties.

pub mod builtin;
pub mod css;
pub mod resolver;

pub use builtin::builtin_themes;
pub use css::{canvas_variables, to_css_variables};
pub use resolver::{resolve, with_aspect_ratio, TemplateContext};
