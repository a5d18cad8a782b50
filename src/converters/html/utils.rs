//! Utility functions for HTML rendering: escaping, number formatting, a small tag builder
//! and image URL filtering.

use log::warn;
use std::fmt::Write;

use super::{
    constants::{MAX_FONT_OVERRIDE, MIN_FONT_OVERRIDE},
    error::Result,
};

// --- Escaping ---

/// Escapes `&`, `<`, `>`, `"` and `'` for use in HTML text content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// --- Numbers ---

/// Formats a number with at most two decimals and no trailing zeros (`12.50` → `12.5`).
/// Non-finite input formats as `0`.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// `fmt_num` with a `px` suffix.
pub fn px(value: f64) -> String {
    format!("{}px", fmt_num(value))
}

/// A per-slide font size override if it is usable, otherwise `fallback`.
pub fn font_override(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(size) if size.is_finite() && size > 0.0 => {
            size.clamp(MIN_FONT_OVERRIDE, MAX_FONT_OVERRIDE)
        }
        _ => fallback,
    }
}

// --- Tag building ---

/// Accumulates `property:value;` pairs for an inline `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style(String);

impl Style {
    pub fn new() -> Self {
        Style::default()
    }

    pub fn set(mut self, property: &str, value: impl AsRef<str>) -> Self {
        self.0.push_str(property);
        self.0.push(':');
        self.0.push_str(value.as_ref());
        self.0.push(';');
        self
    }

    pub fn px(self, property: &str, value: f64) -> Self {
        self.set(property, px(value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single HTML or SVG tag. Attribute values are escaped when written.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    style: Style,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            style: Style::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn write_open(&self, out: &mut String) -> Result<()> {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, escape_html(value))?;
        }
        if !self.style.is_empty() {
            write!(out, " style=\"{}\"", escape_html(self.style.as_str()))?;
        }
        Ok(())
    }

    /// Writes the opening tag; the caller writes the content and then calls [`Element::close`].
    pub fn open(&self, out: &mut String) -> Result<()> {
        self.write_open(out)?;
        out.push('>');
        Ok(())
    }

    pub fn close(&self, out: &mut String) -> Result<()> {
        write!(out, "</{}>", self.tag)?;
        Ok(())
    }

    /// Writes the whole element with escaped text content.
    pub fn text(&self, out: &mut String, text: &str) -> Result<()> {
        self.open(out)?;
        out.push_str(&escape_html(text));
        self.close(out)
    }

    /// Writes the whole element around already-rendered markup.
    pub fn wrap(&self, out: &mut String, html: &str) -> Result<()> {
        self.open(out)?;
        out.push_str(html);
        self.close(out)
    }

    /// Writes a self-closing element (`<img .../>`, `<circle .../>`).
    pub fn void(&self, out: &mut String) -> Result<()> {
        self.write_open(out)?;
        out.push_str("/>");
        Ok(())
    }
}

// --- URLs ---

/// Accepts `http:`, `https:` and `data:image/` sources plus scheme-less relative paths.
/// Anything else is dropped with a warning.
pub fn safe_image_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    if url.chars().any(char::is_control) {
        warn!("Dropping image URL containing control characters");
        return None;
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("data:image/")
    {
        return Some(url.to_string());
    }
    if lower.starts_with("//") {
        warn!("Dropping protocol-relative image URL: {}", url);
        return None;
    }
    let path_end = url.find(['/', '?', '#']).unwrap_or(url.len());
    if url[..path_end].contains(':') {
        warn!("Dropping image URL with unsupported scheme: {}", url);
        return None;
    }
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("한글 ✓"), "한글 ✓");
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(f64::NAN), "0");
        assert_eq!(px(64.0), "64px");
    }

    #[test]
    fn font_overrides_are_bounded() {
        assert_eq!(font_override(None, 20.0), 20.0);
        assert_eq!(font_override(Some(28.0), 20.0), 28.0);
        assert_eq!(font_override(Some(-4.0), 20.0), 20.0);
        assert_eq!(font_override(Some(2.0), 20.0), MIN_FONT_OVERRIDE);
        assert_eq!(font_override(Some(5000.0), 20.0), MAX_FONT_OVERRIDE);
    }

    #[test]
    fn element_escapes_attributes_and_text() {
        let mut out = String::new();
        Element::new("p")
            .attr("title", "\"quoted\"")
            .style(Style::new().set("color", "red").px("font-size", 18.0))
            .text(&mut out, "a < b")
            .unwrap();
        assert_eq!(
            out,
            "<p title=\"&quot;quoted&quot;\" style=\"color:red;font-size:18px;\">a &lt; b</p>"
        );

        let mut out = String::new();
        Element::new("img").attr("src", "a.png").void(&mut out).unwrap();
        assert_eq!(out, "<img src=\"a.png\"/>");
    }

    #[test]
    fn filters_image_urls() {
        assert_eq!(safe_image_url(" https://cdn.example.com/a.png "), Some("https://cdn.example.com/a.png".into()));
        assert!(safe_image_url("HTTP://example.com/a.png").is_some());
        assert!(safe_image_url("data:image/png;base64,AAAA").is_some());
        assert_eq!(safe_image_url("images/team/kim.jpg"), Some("images/team/kim.jpg".into()));
        assert!(safe_image_url("/static/a.png?v=1:2").is_some());
        assert!(safe_image_url("javascript:alert(1)").is_none());
        assert!(safe_image_url("JaVaScRiPt:alert(1)").is_none());
        assert!(safe_image_url("data:text/html,<script>").is_none());
        assert!(safe_image_url("//evil.example.com/a.png").is_none());
        assert!(safe_image_url("   ").is_none());
    }

    proptest! {
        #[test]
        fn escaped_text_has_no_markup_characters(text in ".*") {
            let escaped = escape_html(&text);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }
    }
}
