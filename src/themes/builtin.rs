//! The stock themes shipped with the engine.
//!
//! These are plain data: callers pass them (or their own list) to the registry explicitly.

use crate::models::document::AspectRatio;
use crate::models::theme::{ColorScale, TemplateCategory, Theme};

/// Returns the seven built-in themes in display order.
pub fn builtin_themes() -> Vec<Theme> {
    vec![modern(), minimal(), corporate(), midnight(), elegant(), vibrant(), report()]
}

fn modern() -> Theme {
    let mut theme = Theme::new("modern", "Modern");
    theme.description = Some("Clean blue accents on a white canvas".into());
    theme
}

fn minimal() -> Theme {
    let mut theme = Theme::new("minimal", "Minimal");
    theme.description = Some("Monochrome typography-first layout".into());
    theme.colors.primary = ColorScale::new("#111827", "#4b5563", "#030712", "#ffffff");
    theme.colors.secondary = ColorScale::new("#6b7280", "#9ca3af", "#374151", "#ffffff");
    theme.colors.background.subtle = "#fafafa".into();
    theme.typography.font_family.heading = "'Helvetica Neue', Arial, sans-serif".into();
    theme.shadows.insert("md".into(), "none".into());
    theme.radius.insert("lg".into(), "0".into());
    theme
}

fn corporate() -> Theme {
    let mut theme = Theme::new("corporate", "Corporate");
    theme.description = Some("Navy and teal for business decks".into());
    theme.colors.primary = ColorScale::new("#1e3a5f", "#3b6490", "#0f2239", "#ffffff");
    theme.colors.secondary = ColorScale::new("#0d9488", "#5eead4", "#115e59", "#ffffff");
    theme.colors.background.subtle = "#f4f7fb".into();
    theme.typography.font_family.heading = "'Source Sans Pro', 'Noto Sans KR', sans-serif".into();
    theme.typography.font_family.body = "'Source Sans Pro', 'Noto Sans KR', sans-serif".into();
    theme
}

fn midnight() -> Theme {
    let mut theme = Theme::new("midnight", "Midnight");
    theme.template_id = Some("modern".into());
    theme.description = Some("Dark canvas with bright accents".into());
    let colors = &mut theme.colors;
    colors.primary = ColorScale::new("#38bdf8", "#7dd3fc", "#0284c7", "#0b1120");
    colors.secondary = ColorScale::new("#a78bfa", "#c4b5fd", "#7c3aed", "#0b1120");
    colors.background.default = "#0b1120".into();
    colors.background.paper = "#111827".into();
    colors.background.subtle = "#1e293b".into();
    colors.surface.card = "#1e293b".into();
    colors.surface.elevated = "#273449".into();
    colors.surface.muted = "#334155".into();
    colors.text.primary = "#f1f5f9".into();
    colors.text.secondary = "#cbd5e1".into();
    colors.text.muted = "#64748b".into();
    colors.text.inverse = "#0b1120".into();
    colors.border.light = "#1e293b".into();
    colors.border.default = "#334155".into();
    colors.border.strong = "#475569".into();
    theme
}

fn elegant() -> Theme {
    let mut theme = Theme::new("elegant", "Elegant");
    theme.category = TemplateCategory::Premium;
    theme.description = Some("Serif headings with warm gold accents".into());
    theme.colors.primary = ColorScale::new("#8b6f47", "#c2a878", "#5c4a2f", "#ffffff");
    theme.colors.secondary = ColorScale::new("#2f3e46", "#52796f", "#1b262c", "#ffffff");
    theme.colors.background.default = "#fdfbf7".into();
    theme.colors.background.subtle = "#f5efe6".into();
    theme.typography.font_family.heading = "'Playfair Display', 'Noto Serif KR', serif".into();
    theme.typography.font_size.insert("4xl".into(), "2.5rem".into());
    theme.typography.letter_spacing.insert("wide".into(), "0.05em".into());
    theme
}

fn vibrant() -> Theme {
    let mut theme = Theme::new("vibrant", "Vibrant");
    theme.category = TemplateCategory::Premium;
    theme.description = Some("Bold gradients and large type".into());
    theme.colors.primary = ColorScale::new("#db2777", "#f472b6", "#9d174d", "#ffffff");
    theme.colors.secondary = ColorScale::new("#f59e0b", "#fcd34d", "#b45309", "#111827");
    theme.typography.font_size.insert("4xl".into(), "2.75rem".into());
    theme.typography.font_size.insert("5xl".into(), "3.5rem".into());
    theme.radius.insert("lg".into(), "1rem".into());
    theme.shadows.insert(
        "md".into(),
        "0 10px 30px -10px rgba(219,39,119,0.35)".into(),
    );
    theme
}

fn report() -> Theme {
    let mut theme = Theme::new("report", "Report");
    theme.category = TemplateCategory::Premium;
    theme.description = Some("Print-oriented document layout".into());
    theme.colors.primary = ColorScale::new("#1f2937", "#4b5563", "#111827", "#ffffff");
    theme.colors.secondary = ColorScale::new("#2563eb", "#93c5fd", "#1d4ed8", "#ffffff");
    theme.typography.font_family.heading = "'Noto Serif KR', Georgia, serif".into();
    theme.typography.font_size.insert("xl".into(), "1rem".into());
    theme.spacing.insert("16".into(), "3rem".into());
    theme.supported_aspect_ratios = vec![AspectRatio::A4Portrait, AspectRatio::Widescreen];
    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seven_valid_themes_with_unique_ids() {
        let themes = builtin_themes();
        assert_eq!(themes.len(), 7);
        let ids: HashSet<_> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 7);
        for theme in &themes {
            assert!(theme.validate().is_ok(), "theme {} is invalid", theme.id);
            assert!(!theme.name.is_empty());
        }
    }

    #[test]
    fn has_free_and_premium_themes() {
        let themes = builtin_themes();
        let premium = themes
            .iter()
            .filter(|t| t.category == TemplateCategory::Premium)
            .count();
        assert_eq!(premium, 3);
        assert_eq!(themes.len() - premium, 4);
    }

    #[test]
    fn alias_differs_from_id() {
        let midnight = builtin_themes().into_iter().find(|t| t.id == "midnight").unwrap();
        assert_eq!(midnight.template_id(), "modern");
    }
}
