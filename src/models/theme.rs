//! Designer-facing theme tokens.
//!
//! A [`Theme`] is an immutable bundle of design tokens. Scales (font sizes, spacing, radii,
//! shadows, ...) are ordered maps from token name to a CSS value so they can be extended
//! without code changes and emitted as custom properties in declaration order. Every field
//! has a default, so partial theme JSON is accepted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{EngineError, Result};
use crate::models::document::AspectRatio;

/// Whether a template is available to every user or only to paying ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    #[default]
    Free,
    Premium,
}

/// A primary/secondary color with its tonal variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorScale {
    pub main: String,
    pub light: String,
    pub dark: String,
    /// Text color readable on top of `main`.
    pub contrast: String,
}

impl ColorScale {
    pub fn new(main: &str, light: &str, dark: &str, contrast: &str) -> Self {
        ColorScale {
            main: main.into(),
            light: light.into(),
            dark: dark.into(),
            contrast: contrast.into(),
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::new("#2563eb", "#60a5fa", "#1e40af", "#ffffff")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundColors {
    pub default: String,
    pub paper: String,
    pub subtle: String,
}

impl Default for BackgroundColors {
    fn default() -> Self {
        BackgroundColors {
            default: "#ffffff".into(),
            paper: "#ffffff".into(),
            subtle: "#f8fafc".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceColors {
    pub card: String,
    pub elevated: String,
    pub muted: String,
}

impl Default for SurfaceColors {
    fn default() -> Self {
        SurfaceColors {
            card: "#ffffff".into(),
            elevated: "#f8fafc".into(),
            muted: "#f1f5f9".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub muted: String,
    pub inverse: String,
}

impl Default for TextColors {
    fn default() -> Self {
        TextColors {
            primary: "#0f172a".into(),
            secondary: "#475569".into(),
            muted: "#94a3b8".into(),
            inverse: "#ffffff".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SemanticColors {
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
}

impl Default for SemanticColors {
    fn default() -> Self {
        SemanticColors {
            success: "#16a34a".into(),
            warning: "#d97706".into(),
            error: "#dc2626".into(),
            info: "#0284c7".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorderColors {
    pub light: String,
    pub default: String,
    pub strong: String,
}

impl Default for BorderColors {
    fn default() -> Self {
        BorderColors {
            light: "#f1f5f9".into(),
            default: "#e2e8f0".into(),
            strong: "#cbd5e1".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayColors {
    pub light: String,
    pub dark: String,
}

impl Default for OverlayColors {
    fn default() -> Self {
        OverlayColors {
            light: "rgba(255,255,255,0.85)".into(),
            dark: "rgba(15,23,42,0.6)".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub background: BackgroundColors,
    pub surface: SurfaceColors,
    pub text: TextColors,
    pub semantic: SemanticColors,
    pub border: BorderColors,
    pub overlay: OverlayColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontFamilies {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

impl Default for FontFamilies {
    fn default() -> Self {
        FontFamilies {
            heading: "'Inter', 'Pretendard', sans-serif".into(),
            body: "'Inter', 'Pretendard', sans-serif".into(),
            mono: "'JetBrains Mono', monospace".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub font_family: FontFamilies,
    /// Relative sizes keyed `xs` .. `6xl`.
    pub font_size: IndexMap<String, String>,
    pub font_weight: IndexMap<String, u16>,
    pub line_height: IndexMap<String, f64>,
    pub letter_spacing: IndexMap<String, String>,
}

impl Default for Typography {
    fn default() -> Self {
        Typography {
            font_family: FontFamilies::default(),
            font_size: string_scale(&[
                ("xs", "0.75rem"),
                ("sm", "0.875rem"),
                ("base", "1rem"),
                ("lg", "1.125rem"),
                ("xl", "1.25rem"),
                ("2xl", "1.5rem"),
                ("3xl", "1.875rem"),
                ("4xl", "2.25rem"),
                ("5xl", "3rem"),
                ("6xl", "3.75rem"),
            ]),
            font_weight: [
                ("light", 300),
                ("normal", 400),
                ("medium", 500),
                ("semibold", 600),
                ("bold", 700),
                ("extrabold", 800),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
            line_height: [
                ("none", 1.0),
                ("tight", 1.25),
                ("snug", 1.375),
                ("normal", 1.5),
                ("relaxed", 1.625),
                ("loose", 2.0),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
            letter_spacing: string_scale(&[
                ("tighter", "-0.05em"),
                ("tight", "-0.025em"),
                ("normal", "0em"),
                ("wide", "0.025em"),
                ("wider", "0.05em"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonDefaults {
    pub radius: String,
    pub padding_x: String,
    pub padding_y: String,
    pub font_size: String,
    pub font_weight: String,
}

impl Default for ButtonDefaults {
    fn default() -> Self {
        ButtonDefaults {
            radius: "md".into(),
            padding_x: "4".into(),
            padding_y: "2".into(),
            font_size: "base".into(),
            font_weight: "semibold".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardDefaults {
    pub radius: String,
    pub padding: String,
    pub shadow: String,
}

impl Default for CardDefaults {
    fn default() -> Self {
        CardDefaults {
            radius: "lg".into(),
            padding: "6".into(),
            shadow: "md".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputDefaults {
    pub radius: String,
    pub padding: String,
    pub font_size: String,
}

impl Default for InputDefaults {
    fn default() -> Self {
        InputDefaults {
            radius: "md".into(),
            padding: "3".into(),
            font_size: "base".into(),
        }
    }
}

/// Per-component defaults. Every field names a token in one of the theme's scales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentDefaults {
    pub button: ButtonDefaults,
    pub card: CardDefaults,
    pub input: InputDefaults,
}

/// The scale a component default points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScale {
    FontSize,
    FontWeight,
    Spacing,
    Radius,
    Shadow,
}

impl fmt::Display for TokenScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenScale::FontSize => "typography.fontSize",
            TokenScale::FontWeight => "typography.fontWeight",
            TokenScale::Spacing => "spacing",
            TokenScale::Radius => "radius",
            TokenScale::Shadow => "shadows",
        })
    }
}

/// A single named reference from a component default into a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenReference<'a> {
    pub path: &'static str,
    pub scale: TokenScale,
    pub key: &'a str,
}

impl ComponentDefaults {
    /// Every scale reference made by the component defaults.
    pub fn references(&self) -> Vec<TokenReference<'_>> {
        use TokenScale::*;
        fn r<'a>(path: &'static str, scale: TokenScale, key: &'a str) -> TokenReference<'a> {
            TokenReference { path, scale, key }
        }
        vec![
            r("button.radius", Radius, &self.button.radius),
            r("button.paddingX", Spacing, &self.button.padding_x),
            r("button.paddingY", Spacing, &self.button.padding_y),
            r("button.fontSize", FontSize, &self.button.font_size),
            r("button.fontWeight", FontWeight, &self.button.font_weight),
            r("card.radius", Radius, &self.card.radius),
            r("card.padding", Spacing, &self.card.padding),
            r("card.shadow", Shadow, &self.card.shadow),
            r("input.radius", Radius, &self.input.radius),
            r("input.padding", Spacing, &self.input.padding),
            r("input.fontSize", FontSize, &self.input.font_size),
        ]
    }
}

/// A complete design-token bundle for one visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Registry key.
    pub id: String,
    /// Rendering-style alias; defaults to `id` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: TemplateCategory,
    pub colors: ColorPalette,
    pub typography: Typography,
    pub spacing: IndexMap<String, String>,
    pub radius: IndexMap<String, String>,
    pub shadows: IndexMap<String, String>,
    pub components: ComponentDefaults,
    /// Canvases this theme is designed for.
    pub supported_aspect_ratios: Vec<AspectRatio>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            id: String::new(),
            template_id: None,
            name: String::new(),
            description: None,
            category: TemplateCategory::Free,
            colors: ColorPalette::default(),
            typography: Typography::default(),
            spacing: string_scale(&[
                ("0", "0"),
                ("1", "0.25rem"),
                ("2", "0.5rem"),
                ("3", "0.75rem"),
                ("4", "1rem"),
                ("5", "1.25rem"),
                ("6", "1.5rem"),
                ("8", "2rem"),
                ("10", "2.5rem"),
                ("12", "3rem"),
                ("16", "4rem"),
                ("20", "5rem"),
            ]),
            radius: string_scale(&[
                ("none", "0"),
                ("sm", "0.125rem"),
                ("base", "0.25rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("xl", "0.75rem"),
                ("2xl", "1rem"),
                ("full", "9999px"),
            ]),
            shadows: string_scale(&[
                ("none", "none"),
                ("sm", "0 1px 2px 0 rgba(0,0,0,0.05)"),
                ("base", "0 1px 3px 0 rgba(0,0,0,0.1), 0 1px 2px 0 rgba(0,0,0,0.06)"),
                ("md", "0 4px 6px -1px rgba(0,0,0,0.1), 0 2px 4px -1px rgba(0,0,0,0.06)"),
                ("lg", "0 10px 15px -3px rgba(0,0,0,0.1), 0 4px 6px -2px rgba(0,0,0,0.05)"),
                ("xl", "0 20px 25px -5px rgba(0,0,0,0.1), 0 10px 10px -5px rgba(0,0,0,0.04)"),
            ]),
            components: ComponentDefaults::default(),
            supported_aspect_ratios: AspectRatio::ALL.to_vec(),
        }
    }
}

impl Theme {
    /// A theme with the default token scales under the given identity.
    pub fn new(id: &str, name: &str) -> Self {
        Theme {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// The rendering-style alias, falling back to the registry id.
    pub fn template_id(&self) -> &str {
        self.template_id
            .as_deref()
            .filter(|alias| !alias.is_empty())
            .unwrap_or(&self.id)
    }

    /// Whether `key` exists in the given scale.
    pub fn has_token(&self, scale: TokenScale, key: &str) -> bool {
        match scale {
            TokenScale::FontSize => self.typography.font_size.contains_key(key),
            TokenScale::FontWeight => self.typography.font_weight.contains_key(key),
            TokenScale::Spacing => self.spacing.contains_key(key),
            TokenScale::Radius => self.radius.contains_key(key),
            TokenScale::Shadow => self.shadows.contains_key(key),
        }
    }

    /// Checks that every component default resolves to an existing scale token.
    pub fn validate(&self) -> Result<()> {
        match self
            .components
            .references()
            .into_iter()
            .find(|reference| !self.has_token(reference.scale, reference.key))
        {
            Some(missing) => Err(EngineError::InvalidTheme {
                theme: self.id.clone(),
                reference: format!("{} -> {}.{}", missing.path, missing.scale, missing.key),
            }),
            None => Ok(()),
        }
    }
}

fn string_scale(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_theme_is_valid() {
        let theme = Theme::new("plain", "Plain");
        assert!(theme.validate().is_ok());
        assert_eq!(theme.template_id(), "plain");
        assert_eq!(theme.supported_aspect_ratios.len(), 3);
    }

    #[test]
    fn dangling_component_reference_is_reported() {
        let mut theme = Theme::new("broken", "Broken");
        theme.components.card.shadow = "huge".into();
        let err = theme.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken"), "{message}");
        assert!(message.contains("card.shadow -> shadows.huge"), "{message}");
    }

    #[test]
    fn partial_theme_json_keeps_defaults() {
        let theme: Theme = serde_json::from_value(json!({
            "id": "ocean",
            "templateId": "modern",
            "category": "premium",
            "colors": { "primary": { "main": "#0077b6" } },
            "typography": { "fontSize": { "4xl": "2.5rem" } }
        }))
        .unwrap();
        assert_eq!(theme.template_id(), "modern");
        assert_eq!(theme.category, TemplateCategory::Premium);
        assert_eq!(theme.colors.primary.main, "#0077b6");
        assert_eq!(theme.colors.primary.contrast, "#ffffff");
        assert_eq!(theme.typography.font_size.len(), 1);
        assert_eq!(theme.spacing.get("4").map(String::as_str), Some("1rem"));
    }

    #[test]
    fn replacing_a_scale_can_break_references() {
        let theme: Theme = serde_json::from_value(json!({
            "id": "tiny",
            "radius": { "sm": "2px" }
        }))
        .unwrap();
        assert!(matches!(
            theme.validate(),
            Err(EngineError::InvalidTheme { .. })
        ));
    }
}
