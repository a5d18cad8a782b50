//! CSS custom-property generation.
//!
//! Every output fragment carries a `:root{...}` block declaring each theme token as a custom
//! property, so the HTML only ever refers to `var(--token)` values defined next to it.
//! Older generated HTML used a flatter naming scheme (`--primary-color`, `--bg-color`, ...);
//! those names are emitted as aliases.

use crate::models::theme::Theme;
use crate::themes::resolver::TemplateContext;

/// Legacy alias → current token.
const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("primary-color", "color-primary"),
    ("secondary-color", "color-secondary"),
    ("accent-color", "color-secondary"),
    ("background-color", "color-background"),
    ("bg-color", "color-background"),
    ("surface-color", "color-surface"),
    ("text-color", "color-text"),
    ("text-secondary-color", "color-text-secondary"),
    ("border-color", "color-border"),
    ("heading-font", "font-heading"),
    ("body-font", "font-body"),
    ("font-family", "font-body"),
];

/// Emits the `:root` block for every token of `theme`, component defaults and legacy aliases.
pub fn to_css_variables(theme: &Theme) -> String {
    let mut out = String::from(":root{");
    let c = &theme.colors;

    for (name, value) in [
        ("color-primary", &c.primary.main),
        ("color-primary-light", &c.primary.light),
        ("color-primary-dark", &c.primary.dark),
        ("color-primary-contrast", &c.primary.contrast),
        ("color-secondary", &c.secondary.main),
        ("color-secondary-light", &c.secondary.light),
        ("color-secondary-dark", &c.secondary.dark),
        ("color-secondary-contrast", &c.secondary.contrast),
        ("color-background", &c.background.default),
        ("color-background-paper", &c.background.paper),
        ("color-background-subtle", &c.background.subtle),
        ("color-surface", &c.surface.card),
        ("color-surface-elevated", &c.surface.elevated),
        ("color-surface-muted", &c.surface.muted),
        ("color-text", &c.text.primary),
        ("color-text-secondary", &c.text.secondary),
        ("color-text-muted", &c.text.muted),
        ("color-text-inverse", &c.text.inverse),
        ("color-success", &c.semantic.success),
        ("color-warning", &c.semantic.warning),
        ("color-error", &c.semantic.error),
        ("color-info", &c.semantic.info),
        ("color-border-light", &c.border.light),
        ("color-border", &c.border.default),
        ("color-border-strong", &c.border.strong),
        ("color-overlay-light", &c.overlay.light),
        ("color-overlay-dark", &c.overlay.dark),
    ] {
        push_var(&mut out, name, value);
    }

    let fonts = &theme.typography.font_family;
    push_var(&mut out, "font-heading", &fonts.heading);
    push_var(&mut out, "font-body", &fonts.body);
    push_var(&mut out, "font-mono", &fonts.mono);

    let typography = &theme.typography;
    for (key, value) in &typography.font_size {
        push_var(&mut out, &format!("font-size-{}", token_name(key)), value);
    }
    for (key, value) in &typography.font_weight {
        push_var(&mut out, &format!("font-weight-{}", token_name(key)), &value.to_string());
    }
    for (key, value) in &typography.line_height {
        push_var(&mut out, &format!("line-height-{}", token_name(key)), &value.to_string());
    }
    for (key, value) in &typography.letter_spacing {
        push_var(&mut out, &format!("letter-spacing-{}", token_name(key)), value);
    }
    for (key, value) in &theme.spacing {
        push_var(&mut out, &format!("spacing-{}", token_name(key)), value);
    }
    for (key, value) in &theme.radius {
        push_var(&mut out, &format!("radius-{}", token_name(key)), value);
    }
    for (key, value) in &theme.shadows {
        push_var(&mut out, &format!("shadow-{}", token_name(key)), value);
    }

    push_component_vars(&mut out, theme);

    for (alias, target) in LEGACY_ALIASES {
        push_var(&mut out, alias, &format!("var(--{target})"));
    }

    out.push('}');
    out
}

/// Component defaults resolve through the scales; references that do not resolve fall back
/// to the default theme's value for the same key, then to `fallback`.
fn push_component_vars(out: &mut String, theme: &Theme) {
    let defaults = Theme::default();
    let pick = |scale: &dyn Fn(&Theme) -> Option<String>, fallback: &str| {
        scale(theme)
            .or_else(|| scale(&defaults))
            .unwrap_or_else(|| fallback.to_string())
    };
    let button = &theme.components.button;
    let card = &theme.components.card;
    let input = &theme.components.input;

    let entries = [
        ("button-radius", pick(&|t: &Theme| t.radius.get(&button.radius).cloned(), "0.375rem")),
        ("button-padding-x", pick(&|t: &Theme| t.spacing.get(&button.padding_x).cloned(), "1rem")),
        ("button-padding-y", pick(&|t: &Theme| t.spacing.get(&button.padding_y).cloned(), "0.5rem")),
        ("button-font-size", pick(&|t: &Theme| t.typography.font_size.get(&button.font_size).cloned(), "1rem")),
        (
            "button-font-weight",
            pick(&|t: &Theme| t.typography.font_weight.get(&button.font_weight).map(u16::to_string), "600"),
        ),
        ("card-radius", pick(&|t: &Theme| t.radius.get(&card.radius).cloned(), "0.5rem")),
        ("card-padding", pick(&|t: &Theme| t.spacing.get(&card.padding).cloned(), "1.5rem")),
        ("card-shadow", pick(&|t: &Theme| t.shadows.get(&card.shadow).cloned(), "none")),
        ("input-radius", pick(&|t: &Theme| t.radius.get(&input.radius).cloned(), "0.375rem")),
        ("input-padding", pick(&|t: &Theme| t.spacing.get(&input.padding).cloned(), "0.75rem")),
        ("input-font-size", pick(&|t: &Theme| t.typography.font_size.get(&input.font_size).cloned(), "1rem")),
    ];
    for (name, value) in &entries {
        push_var(out, name, value);
    }
}

/// Canvas variables for one render: slide size and padding from the resolved context.
pub fn canvas_variables(context: &TemplateContext) -> String {
    let mut out = String::from(":root{");
    push_var(&mut out, "slide-width", &format!("{}px", context.slide_size.width));
    push_var(&mut out, "slide-height", &format!("{}px", context.slide_size.height));
    push_var(
        &mut out,
        "slide-padding",
        &format!("{}px", context.spacing.slide_padding),
    );
    push_var(&mut out, "slide-aspect-ratio", context.aspect_ratio.as_str());
    out.push('}');
    out
}

fn push_var(out: &mut String, name: &str, value: &str) {
    out.push_str("--");
    out.push_str(name);
    out.push(':');
    out.push_str(&css_value(value));
    out.push(';');
}

/// Restricts a token key to characters valid in a custom-property name.
fn token_name(key: &str) -> String {
    key.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

/// Drops characters that could terminate the declaration or the style block.
fn css_value(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|ch| !matches!(ch, ';' | '{' | '}' | '<' | '>'))
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "initial".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::resolver::resolve;

    #[test]
    fn covers_every_scale_token() {
        let theme = Theme::new("t", "T");
        let css = to_css_variables(&theme);
        assert!(css.starts_with(":root{") && css.ends_with('}'));
        for key in theme.typography.font_size.keys() {
            assert!(css.contains(&format!("--font-size-{key}:")), "font size {key}");
        }
        for key in theme.spacing.keys() {
            assert!(css.contains(&format!("--spacing-{key}:")), "spacing {key}");
        }
        for key in theme.radius.keys() {
            assert!(css.contains(&format!("--radius-{key}:")), "radius {key}");
        }
        for key in theme.shadows.keys() {
            assert!(css.contains(&format!("--shadow-{key}:")), "shadow {key}");
        }
        assert!(css.contains("--color-primary:#2563eb;"));
        assert!(css.contains("--font-weight-bold:700;"));
        assert!(css.contains("--line-height-tight:1.25;"));
        assert!(css.contains("--card-shadow:0 4px 6px"));
    }

    #[test]
    fn emits_legacy_aliases() {
        let css = to_css_variables(&Theme::new("t", "T"));
        assert!(css.contains("--primary-color:var(--color-primary);"));
        assert!(css.contains("--bg-color:var(--color-background);"));
        assert!(css.contains("--font-family:var(--font-body);"));
    }

    #[test]
    fn hostile_values_cannot_escape_the_block() {
        let mut theme = Theme::new("t", "T");
        theme.colors.primary.main = "red;}</style><script>".into();
        theme.spacing.insert("x.5".into(), "2px".into());
        let css = to_css_variables(&theme);
        assert!(!css.contains("</style>"));
        assert!(css.contains("--color-primary:red/stylescript;"));
        assert!(css.contains("--spacing-x_5:2px;"));
        assert_eq!(css.matches('}').count(), 1);
    }

    #[test]
    fn dangling_component_reference_uses_default_token() {
        let mut theme = Theme::new("t", "T");
        theme.components.card.radius = "missing".into();
        let css = to_css_variables(&theme);
        assert!(css.contains("--card-radius:0.5rem;"));
    }

    #[test]
    fn canvas_block_follows_context() {
        let ctx = resolve(&Theme::new("t", "T"))
            .with_aspect_ratio(crate::models::AspectRatio::Standard);
        let css = canvas_variables(&ctx);
        assert_eq!(
            css,
            ":root{--slide-width:960px;--slide-height:720px;--slide-padding:64px;--slide-aspect-ratio:4:3;}"
        );
    }
}
