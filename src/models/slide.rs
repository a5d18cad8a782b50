//! The slide union.
//!
//! A slide is a tagged union keyed by its JSON `type` field. Every variant carries a `props`
//! payload (content) and a `style` payload (per-instance overrides); both default when
//! missing or `null`, and every list inside them may be empty.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::chart::{ChartSeries, ChartType};
use crate::models::lenient::{self, Text};

macro_rules! slide_union {
    ($( $(#[$doc:meta])* $variant:ident = $tag:literal ($props:ident, $style:ident) ),+ $(,)?) => {
        /// One slide of a document.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum Slide {
            $(
                $(#[$doc])*
                #[serde(rename = $tag)]
                $variant {
                    #[serde(default, deserialize_with = "lenient::or_default")]
                    props: $props,
                    #[serde(default, deserialize_with = "lenient::or_default")]
                    style: $style,
                },
            )+
        }

        impl Slide {
            /// Every discriminant tag of the union, in declaration order.
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            /// The discriminant tag of this slide.
            pub fn tag(&self) -> &'static str {
                match self {
                    $(Slide::$variant { .. } => $tag,)+
                }
            }

            /// A slide of the given kind with empty props and default style.
            pub fn empty(tag: &str) -> Option<Slide> {
                match tag {
                    $($tag => Some(Slide::$variant {
                        props: $props::default(),
                        style: $style::default(),
                    }),)+
                    _ => None,
                }
            }
        }
    };
}

slide_union! {
    /// Opening slide with the deck title.
    Title = "title" (TitleProps, TitleStyle),
    /// Divider introducing a new section.
    Section = "section" (SectionProps, SectionStyle),
    /// Free-form paragraphs.
    Content = "content" (ContentProps, ContentStyle),
    /// Bulleted list.
    Bullet = "bullet" (BulletProps, BulletStyle),
    TwoColumn = "twoColumn" (TwoColumnProps, TwoColumnStyle),
    ThankYou = "thankYou" (ThankYouProps, ThankYouStyle),
    Chart = "chart" (ChartProps, ChartStyle),
    Table = "table" (TableProps, TableStyle),
    Stats = "stats" (StatsProps, StatsStyle),
    Quote = "quote" (QuoteProps, QuoteStyle),
    Comparison = "comparison" (ComparisonProps, ComparisonStyle),
    Timeline = "timeline" (TimelineProps, TimelineStyle),
    FeatureGrid = "featureGrid" (FeatureGridProps, FeatureGridStyle),
    TeamProfile = "teamProfile" (TeamProfileProps, TeamProfileStyle),
    Process = "process" (ProcessProps, ProcessStyle),
    Roadmap = "roadmap" (RoadmapProps, RoadmapStyle),
    Pricing = "pricing" (PricingProps, PricingStyle),
    ImageText = "imageText" (ImageTextProps, ImageTextStyle),
    /// A single full-bleed image.
    Image = "image" (ImageProps, ImageStyle),
    Agenda = "agenda" (AgendaProps, AgendaStyle),
    Testimonial = "testimonial" (TestimonialProps, TestimonialStyle),
    Gallery = "gallery" (GalleryProps, GalleryStyle),
    /// Dense two-column report page.
    ReportTwoColumn = "reportTwoColumn" (ReportTwoColumnProps, ReportTwoColumnStyle),
    /// Printable A4 report page.
    ReportA4 = "reportA4" (ReportA4Props, ReportA4Style),
}

/// Declares a props/style payload struct with lenient, defaulted fields.
macro_rules! payload {
    ($(#[$doc:meta])* $name:ident { $($body:tt)* }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name { $($body)* }
    };
}

// --- Title / section / text ---

payload!(TitleProps {
    pub title: Text,
    pub subtitle: Text,
    pub author: Text,
    pub date: Text,
});

payload!(TitleStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub title_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub subtitle_font_size: Option<f64>,
    /// `left`, `center` or `right`.
    pub align: Text,
});

payload!(SectionProps {
    pub title: Text,
    pub subtitle: Text,
    pub section_number: Text,
});

payload!(SectionStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
    pub align: Text,
});

payload!(ContentProps {
    pub title: Text,
    /// Paragraphs separated by blank lines or newlines.
    pub content: Text,
});

payload!(ContentStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

payload!(BulletProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub bullets: Vec<String>,
});

payload!(BulletStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
    /// Marker glyph; a round dot when blank.
    pub icon: Text,
});

payload!(TwoColumnProps {
    pub title: Text,
    pub left_title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub left_content: Vec<String>,
    pub right_title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub right_content: Vec<String>,
});

payload!(TwoColumnStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub left_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub right_font_size: Option<f64>,
});

payload!(ThankYouProps {
    pub title: Text,
    pub message: Text,
    pub contact: Text,
    pub email: Text,
    pub website: Text,
});

payload!(ThankYouStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

payload!(QuoteProps {
    pub quote: Text,
    pub author: Text,
    pub role: Text,
});

payload!(QuoteStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

// --- Data ---

payload!(ChartProps {
    pub title: Text,
    pub chart_type: ChartType,
    #[serde(deserialize_with = "lenient::seq")]
    pub data: Vec<ChartSeries>,
    pub description: Text,
});

payload!(ChartStyle {
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub show_legend: Option<bool>,
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub show_values: Option<bool>,
});

payload!(TableProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub headers: Vec<String>,
    #[serde(deserialize_with = "lenient::string_rows")]
    pub rows: Vec<Vec<String>>,
});

payload!(TableStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub striped: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub highlight_first_column: bool,
});

payload!(StatItem {
    pub value: Text,
    pub label: Text,
    pub description: Text,
    /// `up`, `down` or blank.
    pub trend: Text,
});

payload!(StatsProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub stats: Vec<StatItem>,
});

payload!(StatsStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub value_font_size: Option<f64>,
});

payload!(ComparisonProps {
    pub title: Text,
    pub left_title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub left_items: Vec<String>,
    pub right_title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub right_items: Vec<String>,
});

payload!(ComparisonStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

// --- Flows ---

payload!(TimelineEvent {
    pub date: Text,
    pub title: Text,
    pub description: Text,
});

payload!(TimelineProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub events: Vec<TimelineEvent>,
});

payload!(TimelineStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

payload!(ProcessStep {
    pub title: Text,
    pub description: Text,
});

payload!(ProcessProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub steps: Vec<ProcessStep>,
});

payload!(ProcessStyle {
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub show_numbers: Option<bool>,
});

payload!(RoadmapPhase {
    pub period: Text,
    pub title: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
    /// `done`, `in-progress` or `planned`.
    pub status: Text,
});

payload!(RoadmapProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub phases: Vec<RoadmapPhase>,
});

payload!(RoadmapStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

payload!(AgendaProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub items: Vec<AgendaItem>,
});

payload!(AgendaStyle {
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub show_numbers: Option<bool>,
});

/// An agenda entry. Accepts either a bare string (the title) or an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub title: Text,
    pub duration: Text,
    pub description: Text,
}

payload!(AgendaItemFields {
    pub title: Text,
    pub duration: Text,
    pub description: Text,
});

impl<'de> Deserialize<'de> for AgendaItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(title) = lenient::scalar_to_string(&value) {
            return Ok(AgendaItem {
                title: Text(title),
                ..Default::default()
            });
        }
        let fields: AgendaItemFields =
            serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(AgendaItem {
            title: fields.title,
            duration: fields.duration,
            description: fields.description,
        })
    }
}

// --- Showcase ---

payload!(Feature {
    pub icon: Text,
    pub title: Text,
    pub description: Text,
});

payload!(FeatureGridProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub features: Vec<Feature>,
});

payload!(FeatureGridStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub icon_size: Option<f64>,
});

payload!(TeamMember {
    pub name: Text,
    pub role: Text,
    pub bio: Text,
    pub image: Text,
});

payload!(TeamProfileProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub members: Vec<TeamMember>,
});

payload!(TeamProfileStyle {
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub show_bio: Option<bool>,
});

payload!(PricingTier {
    pub name: Text,
    pub price: Text,
    pub period: Text,
    pub description: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub highlighted: bool,
    pub cta: Text,
});

payload!(PricingProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub tiers: Vec<PricingTier>,
});

payload!(PricingStyle {
    /// Currency prefix applied to purely numeric prices.
    pub currency: Text,
});

payload!(TestimonialEntry {
    pub quote: Text,
    pub author: Text,
    pub role: Text,
    pub company: Text,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub rating: Option<f64>,
});

payload!(TestimonialProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub testimonials: Vec<TestimonialEntry>,
});

payload!(TestimonialStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

// --- Media ---

payload!(ImageTextProps {
    pub title: Text,
    pub text: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub bullets: Vec<String>,
    pub image: Text,
    pub image_alt: Text,
    /// `left` or `right` (default).
    pub image_position: Text,
});

payload!(ImageTextStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

payload!(ImageProps {
    pub title: Text,
    pub image: Text,
    pub caption: Text,
    pub alt: Text,
});

payload!(ImageStyle {
    /// `cover` (default) or `contain`.
    pub fit: Text,
});

/// A gallery entry. Accepts either a bare URL string or an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub url: Text,
    pub caption: Text,
    pub alt: Text,
}

payload!(GalleryImageFields {
    pub url: Text,
    pub src: Text,
    pub caption: Text,
    pub alt: Text,
});

impl<'de> Deserialize<'de> for GalleryImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(url) = lenient::scalar_to_string(&value) {
            return Ok(GalleryImage {
                url: Text(url),
                ..Default::default()
            });
        }
        let fields: GalleryImageFields =
            serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(GalleryImage {
            url: if fields.url.is_blank() { fields.src } else { fields.url },
            caption: fields.caption,
            alt: fields.alt,
        })
    }
}

payload!(GalleryProps {
    pub title: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub images: Vec<GalleryImage>,
});

payload!(GalleryStyle {
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub show_captions: Option<bool>,
});

// --- Reports ---

/// A titled block of report text. Accepts a bare string as the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub heading: Text,
    pub body: Text,
    pub bullets: Vec<String>,
}

payload!(ReportSectionFields {
    pub heading: Text,
    pub title: Text,
    pub body: Text,
    pub content: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub bullets: Vec<String>,
});

impl<'de> Deserialize<'de> for ReportSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(body) = lenient::scalar_to_string(&value) {
            return Ok(ReportSection {
                body: Text(body),
                ..Default::default()
            });
        }
        let fields: ReportSectionFields =
            serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(ReportSection {
            heading: if fields.heading.is_blank() { fields.title } else { fields.heading },
            body: if fields.body.is_blank() { fields.content } else { fields.body },
            bullets: fields.bullets,
        })
    }
}

payload!(ReportTwoColumnProps {
    pub title: Text,
    pub subtitle: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub left: Vec<ReportSection>,
    #[serde(deserialize_with = "lenient::seq")]
    pub right: Vec<ReportSection>,
});

payload!(ReportTwoColumnStyle {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub left_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub right_font_size: Option<f64>,
});

payload!(ReportA4Props {
    pub title: Text,
    pub subtitle: Text,
    pub author: Text,
    pub date: Text,
    pub summary: Text,
    #[serde(deserialize_with = "lenient::seq")]
    pub sections: Vec<ReportSection>,
    pub footer: Text,
});

payload!(ReportA4Style {
    #[serde(deserialize_with = "lenient::opt_number")]
    pub font_size: Option<f64>,
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_are_unique_and_complete() {
        assert_eq!(Slide::TAGS.len(), 24);
        let mut tags = Slide::TAGS.to_vec();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 24);
        for tag in Slide::TAGS {
            let slide = Slide::empty(tag).unwrap();
            assert_eq!(slide.tag(), *tag);
        }
        assert!(Slide::empty("carousel").is_none());
    }

    #[test]
    fn decodes_tagged_slide() {
        let slide: Slide = serde_json::from_value(json!({
            "type": "bullet",
            "props": { "title": "Why", "bullets": ["fast", "safe"] },
            "style": { "fontSize": "22", "icon": "✓" }
        }))
        .unwrap();
        match slide {
            Slide::Bullet { props, style } => {
                assert_eq!(props.title.as_str(), "Why");
                assert_eq!(props.bullets, vec!["fast", "safe"]);
                assert_eq!(style.font_size, Some(22.0));
                assert_eq!(style.icon.as_str(), "✓");
            }
            other => panic!("unexpected slide {other:?}"),
        }
    }

    #[test]
    fn missing_and_null_payloads_default() {
        let slide: Slide = serde_json::from_value(json!({ "type": "gallery" })).unwrap();
        assert_eq!(slide, Slide::empty("gallery").unwrap());
        let slide: Slide =
            serde_json::from_value(json!({ "type": "stats", "props": null, "style": null }))
                .unwrap();
        assert_eq!(slide, Slide::empty("stats").unwrap());
    }

    #[test]
    fn flexible_list_entries() {
        let slide: Slide = serde_json::from_value(json!({
            "type": "agenda",
            "props": { "items": ["Intro", { "title": "Demo", "duration": 15 }, 7] }
        }))
        .unwrap();
        let Slide::Agenda { props, .. } = slide else {
            panic!("expected agenda");
        };
        assert_eq!(props.items.len(), 3);
        assert_eq!(props.items[0].title.as_str(), "Intro");
        assert_eq!(props.items[1].duration.as_str(), "15");
        assert_eq!(props.items[2].title.as_str(), "7");

        let slide: Slide = serde_json::from_value(json!({
            "type": "gallery",
            "props": { "images": ["a.png", { "src": "b.png", "caption": "B" }] }
        }))
        .unwrap();
        let Slide::Gallery { props, .. } = slide else {
            panic!("expected gallery");
        };
        assert_eq!(props.images[0].url.as_str(), "a.png");
        assert_eq!(props.images[1].url.as_str(), "b.png");
        assert_eq!(props.images[1].caption.as_str(), "B");
    }

    #[test]
    fn report_sections_accept_aliases() {
        let slide: Slide = serde_json::from_value(json!({
            "type": "reportA4",
            "props": { "sections": [{ "title": "Scope", "content": "All of it" }, "Loose text"] }
        }))
        .unwrap();
        let Slide::ReportA4 { props, .. } = slide else {
            panic!("expected report");
        };
        assert_eq!(props.sections[0].heading.as_str(), "Scope");
        assert_eq!(props.sections[0].body.as_str(), "All of it");
        assert_eq!(props.sections[1].body.as_str(), "Loose text");
    }

    #[test]
    fn unknown_tag_is_a_decode_error() {
        let result = serde_json::from_value::<Slide>(json!({ "type": "carousel" }));
        assert!(result.is_err());
    }
}
