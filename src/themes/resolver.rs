//! Resolves a [`Theme`] into the flat, pixel-valued [`TemplateContext`] consumed by renderers.
//!
//! Relative units are converted with a fixed base of 16px. Semantic font slots are mapped
//! from the size scale with a fixed table:
//!
//! | slot     | token  |
//! |----------|--------|
//! | title    | `4xl`  |
//! | subtitle | `2xl`  |
//! | heading  | `3xl`  |
//! | body     | `xl`   |
//! | stats    | `5xl`  |
//! | caption  | `base` |
//! | small    | `sm`   |
//!
//! Tokens missing from a theme (or holding an unparsable value) fall back to the default
//! scale, so resolution never fails.

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

use crate::models::{document::AspectRatio, theme::Theme, SlideSize};

/// Pixels per `rem`/`em`.
pub const BASE_FONT_PX: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextColors {
    pub primary: String,
    pub primary_light: String,
    pub primary_dark: String,
    pub primary_contrast: String,
    pub secondary: String,
    pub secondary_light: String,
    pub background: String,
    pub background_subtle: String,
    pub surface: String,
    pub surface_elevated: String,
    pub text: String,
    pub text_secondary: String,
    pub text_muted: String,
    pub text_inverse: String,
    pub border: String,
    pub border_strong: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
    pub overlay: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextFonts {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

/// Font sizes in px for each semantic slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizes {
    pub title: f64,
    pub subtitle: f64,
    pub heading: f64,
    pub body: f64,
    pub stats: f64,
    pub caption: f64,
    pub small: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontWeights {
    pub normal: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineHeights {
    pub tight: f64,
    pub normal: f64,
    pub relaxed: f64,
}

/// Spacing in px. `slide_padding` is the inset applied by every slide root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub xs: f64,
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
    pub xxl: f64,
    pub slide_padding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Radii {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
    pub full: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadows {
    pub sm: String,
    pub md: String,
    pub lg: String,
}

/// Resolved layout constants for one theme at one canvas size.
///
/// Two contexts that differ only in `slide_size`/`aspect_ratio` describe the same theme on
/// different canvases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub colors: ContextColors,
    pub fonts: ContextFonts,
    pub font_sizes: FontSizes,
    pub font_weights: FontWeights,
    pub line_heights: LineHeights,
    pub spacing: Spacing,
    pub radius: Radii,
    pub shadows: Shadows,
    pub slide_size: SlideSize,
    pub aspect_ratio: AspectRatio,
}

impl TemplateContext {
    /// Same context on the canvas of `ratio`. Only the canvas fields change.
    pub fn with_aspect_ratio(&self, ratio: AspectRatio) -> TemplateContext {
        TemplateContext {
            slide_size: ratio.slide_size(),
            aspect_ratio: ratio,
            ..self.clone()
        }
    }
}

/// Free-function form of [`TemplateContext::with_aspect_ratio`].
pub fn with_aspect_ratio(context: &TemplateContext, ratio: AspectRatio) -> TemplateContext {
    context.with_aspect_ratio(ratio)
}

/// Converts a CSS length to pixels. Supports `rem`, `em`, `px` and bare numbers.
pub fn to_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let (number, factor) = if let Some(n) = value.strip_suffix("rem") {
        (n, BASE_FONT_PX)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, BASE_FONT_PX)
    } else if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else {
        (value, 1.0)
    };
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n * factor)
}

/// Looks `key` up in `scale`, falling back to `defaults`.
struct ScaleLookup<'a, V> {
    theme_id: &'a str,
    scale_name: &'static str,
    scale: &'a IndexMap<String, V>,
    defaults: &'a IndexMap<String, V>,
}

impl<V> ScaleLookup<'_, V> {
    fn resolve<T>(&self, key: &str, convert: impl Fn(&V) -> Option<T>, last_resort: T) -> T {
        if let Some(raw) = self.scale.get(key) {
            match convert(raw) {
                Some(value) => return value,
                None => warn!(
                    "Theme '{}': unusable value for {}.{}; using default",
                    self.theme_id, self.scale_name, key
                ),
            }
        }
        self.defaults
            .get(key)
            .and_then(&convert)
            .unwrap_or(last_resort)
    }
}

/// Resolves a theme into a [`TemplateContext`] on the default 16:9 canvas.
pub fn resolve(theme: &Theme) -> TemplateContext {
    let defaults = Theme::default();
    let id = theme.id.as_str();

    let sizes = ScaleLookup {
        theme_id: id,
        scale_name: "typography.fontSize",
        scale: &theme.typography.font_size,
        defaults: &defaults.typography.font_size,
    };
    let size = |key: &str| sizes.resolve(key, |v: &String| to_px(v), BASE_FONT_PX);

    let weights = ScaleLookup {
        theme_id: id,
        scale_name: "typography.fontWeight",
        scale: &theme.typography.font_weight,
        defaults: &defaults.typography.font_weight,
    };
    let weight = |key: &str, fallback: u16| weights.resolve(key, |v: &u16| Some(*v), fallback);

    let lines = ScaleLookup {
        theme_id: id,
        scale_name: "typography.lineHeight",
        scale: &theme.typography.line_height,
        defaults: &defaults.typography.line_height,
    };
    let line = |key: &str| {
        lines.resolve(key, |v: &f64| Some(*v).filter(|v| *v > 0.0), 1.5)
    };

    let spacing = ScaleLookup {
        theme_id: id,
        scale_name: "spacing",
        scale: &theme.spacing,
        defaults: &defaults.spacing,
    };
    let space = |key: &str| spacing.resolve(key, |v: &String| to_px(v), 0.0);

    let radii = ScaleLookup {
        theme_id: id,
        scale_name: "radius",
        scale: &theme.radius,
        defaults: &defaults.radius,
    };
    let radius = |key: &str| radii.resolve(key, |v: &String| to_px(v), 0.0);

    let shadows = ScaleLookup {
        theme_id: id,
        scale_name: "shadows",
        scale: &theme.shadows,
        defaults: &defaults.shadows,
    };
    let shadow = |key: &str| {
        shadows.resolve(key, |v: &String| Some(v.clone()), "none".to_string())
    };

    let c = &theme.colors;
    TemplateContext {
        colors: ContextColors {
            primary: c.primary.main.clone(),
            primary_light: c.primary.light.clone(),
            primary_dark: c.primary.dark.clone(),
            primary_contrast: c.primary.contrast.clone(),
            secondary: c.secondary.main.clone(),
            secondary_light: c.secondary.light.clone(),
            background: c.background.default.clone(),
            background_subtle: c.background.subtle.clone(),
            surface: c.surface.card.clone(),
            surface_elevated: c.surface.elevated.clone(),
            text: c.text.primary.clone(),
            text_secondary: c.text.secondary.clone(),
            text_muted: c.text.muted.clone(),
            text_inverse: c.text.inverse.clone(),
            border: c.border.default.clone(),
            border_strong: c.border.strong.clone(),
            success: c.semantic.success.clone(),
            warning: c.semantic.warning.clone(),
            error: c.semantic.error.clone(),
            info: c.semantic.info.clone(),
            overlay: c.overlay.dark.clone(),
        },
        fonts: ContextFonts {
            heading: theme.typography.font_family.heading.clone(),
            body: theme.typography.font_family.body.clone(),
            mono: theme.typography.font_family.mono.clone(),
        },
        font_sizes: FontSizes {
            title: size("4xl"),
            subtitle: size("2xl"),
            heading: size("3xl"),
            body: size("xl"),
            stats: size("5xl"),
            caption: size("base"),
            small: size("sm"),
        },
        font_weights: FontWeights {
            normal: weight("normal", 400),
            medium: weight("medium", 500),
            semibold: weight("semibold", 600),
            bold: weight("bold", 700),
        },
        line_heights: LineHeights {
            tight: line("tight"),
            normal: line("normal"),
            relaxed: line("relaxed"),
        },
        spacing: Spacing {
            xs: space("1"),
            sm: space("2"),
            md: space("4"),
            lg: space("6"),
            xl: space("8"),
            xxl: space("12"),
            slide_padding: space("16"),
        },
        radius: Radii {
            sm: radius("sm"),
            md: radius("md"),
            lg: radius("lg"),
            xl: radius("xl"),
            full: radius("full"),
        },
        shadows: Shadows {
            sm: shadow("sm"),
            md: shadow("md"),
            lg: shadow("lg"),
        },
        slide_size: AspectRatio::default().slide_size(),
        aspect_ratio: AspectRatio::default(),
    }
}
