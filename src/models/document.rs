use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::models::slide::Slide;

/// Canvas aspect ratios a deck can be rendered at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 widescreen, the default canvas.
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    /// 4:3 classic projector format.
    #[serde(rename = "4:3")]
    Standard,
    /// A4 paper in portrait orientation (96 DPI).
    #[serde(rename = "A4-portrait")]
    A4Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Widescreen,
        AspectRatio::Standard,
        AspectRatio::A4Portrait,
    ];

    /// The canvas size in CSS pixels for this ratio.
    pub fn slide_size(self) -> SlideSize {
        match self {
            AspectRatio::Widescreen => SlideSize::new(1280, 720),
            AspectRatio::Standard => SlideSize::new(960, 720),
            AspectRatio::A4Portrait => SlideSize::new(794, 1123),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::A4Portrait => "A4-portrait",
        }
    }

    pub fn is_portrait(self) -> bool {
        let size = self.slide_size();
        size.height > size.width
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match normalized.as_str() {
            "16:9" | "16/9" | "16x9" | "widescreen" => Ok(AspectRatio::Widescreen),
            "4:3" | "4/3" | "4x3" | "standard" => Ok(AspectRatio::Standard),
            "a4-portrait" | "a4portrait" | "a4" => Ok(AspectRatio::A4Portrait),
            _ => Err(format!("unknown aspect ratio '{}'", s.trim())),
        }
    }
}

/// Width and height of the slide canvas in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideSize {
    pub width: u32,
    pub height: u32,
}

impl SlideSize {
    pub const fn new(width: u32, height: u32) -> Self {
        SlideSize { width, height }
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        AspectRatio::default().slide_size()
    }
}

/// How a document is meant to be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    /// A sequence of presentation slides.
    #[default]
    #[serde(rename = "slides")]
    Slides,
    /// A printable single-page report; rendered on the A4 canvas unless the document names
    /// an explicit aspect ratio.
    #[serde(rename = "one-page")]
    OnePage,
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slides" | "slide" | "presentation" => Ok(PageFormat::Slides),
            "one-page" | "onepage" | "one_page" | "report" => Ok(PageFormat::OnePage),
            other => Err(format!("unknown page format '{other}'")),
        }
    }
}

/// A complete slide document as produced by the content generator.
///
/// `aspect_ratio` and `page_format` are kept as free strings because they are not validated
/// upstream; [`SlideDocument::resolved_aspect_ratio`] interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideDocument {
    pub slides: Vec<Slide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_format: Option<String>,
}

impl SlideDocument {
    pub fn new(slides: Vec<Slide>) -> Self {
        SlideDocument {
            slides,
            ..Default::default()
        }
    }

    /// Parses `page_format`, treating missing or unknown values as [`PageFormat::Slides`].
    pub fn page_format(&self) -> PageFormat {
        page_format_from(self.page_format.as_deref())
    }

    /// Picks the canvas for this document: an explicit, recognised `aspect_ratio` wins; a
    /// one-page document defaults to A4; otherwise `fallback` is used.
    pub fn resolved_aspect_ratio(&self, fallback: AspectRatio) -> AspectRatio {
        resolve_document_ratio(
            self.aspect_ratio.as_deref(),
            self.page_format.as_deref(),
            fallback,
        )
    }
}

pub(crate) fn page_format_from(raw: Option<&str>) -> PageFormat {
    match raw.map(str::parse::<PageFormat>) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            log::warn!("{e}; using slide format");
            PageFormat::Slides
        }
        None => PageFormat::Slides,
    }
}

pub(crate) fn resolve_document_ratio(
    aspect_ratio: Option<&str>,
    page_format: Option<&str>,
    fallback: AspectRatio,
) -> AspectRatio {
    if let Some(raw) = aspect_ratio.filter(|r| !r.trim().is_empty()) {
        match raw.parse::<AspectRatio>() {
            Ok(ratio) => return ratio,
            Err(e) => log::warn!("{e}; falling back to the default canvas"),
        }
    }
    match page_format_from(page_format) {
        PageFormat::OnePage => AspectRatio::A4Portrait,
        PageFormat::Slides => fallback,
    }
}

/// One rendered slide: a self-contained HTML fragment plus the CSS custom properties it
/// references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HtmlSlide {
    pub html: String,
    pub css: String,
}

impl HtmlSlide {
    pub fn new(html: String, css: String) -> Self {
        HtmlSlide { html, css }
    }

    /// Wraps the fragment in a complete HTML document with a fixed-size viewport, suitable
    /// for an iframe or a headless screenshot.
    pub fn to_standalone_page(&self, size: SlideSize) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{css}\nhtml,body{{margin:0;padding:0;}}\n.slide-viewport{{width:{w}px;height:{h}px;overflow:hidden;}}\n</style>\n</head>\n<body>\n<div class=\"slide-viewport\">{html}</div>\n</body>\n</html>\n",
            css = self.css,
            w = size.width,
            h = size.height,
            html = self.html,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ratio_table() {
        assert_eq!(AspectRatio::Widescreen.slide_size(), SlideSize::new(1280, 720));
        assert_eq!(AspectRatio::Standard.slide_size(), SlideSize::new(960, 720));
        assert_eq!(AspectRatio::A4Portrait.slide_size(), SlideSize::new(794, 1123));
        assert!(AspectRatio::A4Portrait.is_portrait());
        assert_eq!(SlideSize::default(), SlideSize::new(1280, 720));
    }

    #[test]
    fn ratio_parsing_and_serde_names() {
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Widescreen));
        assert_eq!(" 4 : 3 ".parse::<AspectRatio>(), Ok(AspectRatio::Standard));
        assert_eq!("A4-portrait".parse::<AspectRatio>(), Ok(AspectRatio::A4Portrait));
        assert!("21:9".parse::<AspectRatio>().is_err());

        let ratio: AspectRatio = serde_json::from_value(json!("A4-portrait")).unwrap();
        assert_eq!(ratio, AspectRatio::A4Portrait);
        assert_eq!(serde_json::to_value(AspectRatio::Standard).unwrap(), json!("4:3"));
        for ratio in AspectRatio::ALL {
            assert_eq!(ratio.as_str().parse::<AspectRatio>(), Ok(ratio));
        }
    }

    #[test]
    fn document_ratio_resolution() {
        let mut doc = SlideDocument::default();
        assert_eq!(doc.resolved_aspect_ratio(AspectRatio::Widescreen), AspectRatio::Widescreen);

        doc.page_format = Some("one-page".into());
        assert_eq!(doc.page_format(), PageFormat::OnePage);
        assert_eq!(doc.resolved_aspect_ratio(AspectRatio::Widescreen), AspectRatio::A4Portrait);

        doc.aspect_ratio = Some("4:3".into());
        assert_eq!(doc.resolved_aspect_ratio(AspectRatio::Widescreen), AspectRatio::Standard);

        doc.aspect_ratio = Some("cinema".into());
        doc.page_format = Some("poster".into());
        assert_eq!(doc.page_format(), PageFormat::Slides);
        assert_eq!(doc.resolved_aspect_ratio(AspectRatio::Standard), AspectRatio::Standard);
    }

    #[test]
    fn standalone_page_embeds_css_and_size() {
        let slide = HtmlSlide::new("<div>hi</div>".into(), ":root{--x:1;}".into());
        let page = slide.to_standalone_page(SlideSize::new(960, 720));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(":root{--x:1;}"));
        assert!(page.contains("width:960px;height:720px;"));
        assert!(page.contains("<div>hi</div>"));
    }
}
