//! Renders slides to self-contained HTML fragments.
//!
//! [`render_slide`] dispatches on the slide variant and wraps the variant's body in a root
//! frame that fills the canvas exactly (`width/height: 100%`, `overflow: hidden`). Colors and
//! fonts are referenced as `var(--token)`; the returned CSS declares every such token next to
//! the canvas variables for the requested aspect ratio.
//!
//! # Behaviour on incomplete input
//! *   Empty lists render an empty-state placeholder instead of failing.
//! *   List-driven slides (gallery, team, agenda, feature grid, pricing, testimonial, stats,
//!     timeline, process, roadmap, pie charts) are capped and show a visible "Showing N of M"
//!     notice when input is truncated.
//! *   Image sources other than http(s), `data:image/` or relative paths are dropped and a
//!     placeholder is shown.
//! *   All user text is escaped for `&<>"'`.

mod chart;
mod constants;
mod data;
mod error;
mod flow;
mod grid;
mod media;
mod report;
mod showcase;
mod structure;
mod text;
mod utils;

pub use chart::{
    arc_path, bar_width_percent, is_percentage_scale, label_position, line_points, pie_slices,
    series_color, value_range, PieSlice, PlotArea, ValueRange,
};
pub use constants::{
    CHART_COLORS, MAX_AGENDA_ITEMS, MAX_FEATURES, MAX_GALLERY_IMAGES, MAX_PIE_SERIES,
    MAX_PRICING_TIERS, MAX_TEAM_MEMBERS, MAX_TESTIMONIALS,
};
pub use error::{RenderError, Result};
pub use grid::{decide, GridDecision, GridKind};
pub use structure::{compose_print_document, render_slide};
pub use utils::{escape_html, safe_image_url};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectRatio, HtmlSlide, Slide, SlideSize, Theme};
    use crate::themes::{resolve, to_css_variables, TemplateContext};
    use serde_json::{json, Value};

    fn context() -> (TemplateContext, String) {
        let theme = Theme::new("test", "Test");
        (resolve(&theme), to_css_variables(&theme))
    }

    fn render(value: Value) -> HtmlSlide {
        let slide: Slide = serde_json::from_value(value).unwrap();
        let (ctx, css) = context();
        render_slide(&slide, &ctx, &css).unwrap()
    }

    fn populated_slides() -> Vec<Value> {
        vec![
            json!({"type": "title", "props": {"title": "Deck", "subtitle": "Sub", "author": "Kim", "date": "2024"}}),
            json!({"type": "section", "props": {"title": "Part", "sectionNumber": 2}}),
            json!({"type": "content", "props": {"title": "Body", "content": "One\nTwo"}}),
            json!({"type": "bullet", "props": {"title": "List", "bullets": ["a", "b"]}}),
            json!({"type": "twoColumn", "props": {"leftTitle": "L", "leftContent": ["x"], "rightTitle": "R", "rightContent": ["y"]}}),
            json!({"type": "thankYou", "props": {"message": "Bye", "email": "a@b.c"}}),
            json!({"type": "chart", "props": {"chartType": "line", "data": [{"name": "s", "labels": ["a", "b"], "values": [1, 2]}]}}),
            json!({"type": "chart", "props": {"chartType": "area", "data": [{"name": "s", "labels": ["a", "b"], "values": [1, 2]}]}}),
            json!({"type": "chart", "props": {"chartType": "pie", "data": [{"name": "s", "labels": ["a", "b"], "values": [1, 2]}]}}),
            json!({"type": "table", "props": {"headers": ["h"], "rows": [["1"], ["2"]]}, "style": {"highlightFirstColumn": true}}),
            json!({"type": "stats", "props": {"stats": [{"value": "10%", "label": "Growth", "trend": "+2"}]}}),
            json!({"type": "quote", "props": {"quote": "Q", "author": "A", "role": "R"}}),
            json!({"type": "comparison", "props": {"leftItems": ["a"], "rightItems": ["b"]}}),
            json!({"type": "timeline", "props": {"events": [{"date": "2020", "title": "T"}]}}),
            json!({"type": "featureGrid", "props": {"features": [{"icon": "⚡", "title": "Fast"}]}}),
            json!({"type": "teamProfile", "props": {"members": [{"name": "Ada L", "role": "CTO"}, {"name": "B", "image": "b.png"}]}}),
            json!({"type": "process", "props": {"steps": [{"title": "1"}, {"title": "2"}]}}),
            json!({"type": "roadmap", "props": {"phases": [{"period": "Q1", "title": "P", "items": ["i"], "status": "done"}]}}),
            json!({"type": "pricing", "props": {"tiers": [{"name": "Pro", "price": "29", "features": ["f"], "highlighted": true, "cta": "Buy"}]}, "style": {"currency": "$"}}),
            json!({"type": "imageText", "props": {"text": "t", "bullets": ["b"], "image": "https://x/y.png", "imagePosition": "left"}}),
            json!({"type": "image", "props": {"image": "https://x/y.png", "caption": "c"}}),
            json!({"type": "agenda", "props": {"items": ["a", {"title": "b", "duration": "5m"}]}}),
            json!({"type": "testimonial", "props": {"testimonials": [{"quote": "q", "author": "a", "rating": 4}]}}),
            json!({"type": "gallery", "props": {"images": ["a.png", {"url": "b.png", "caption": "B"}]}}),
            json!({"type": "reportTwoColumn", "props": {"left": [{"heading": "H", "body": "b"}], "right": ["r"]}}),
            json!({"type": "reportA4", "props": {"title": "R", "summary": "S", "sections": [{"heading": "H", "bullets": ["x"]}], "footer": "F"}}),
        ]
    }

    fn referenced_vars(html: &str) -> Vec<String> {
        html.match_indices("var(--")
            .map(|(start, _)| {
                let rest = &html[start + 6..];
                let end = rest.find(')').unwrap_or(rest.len());
                rest[..end].to_string()
            })
            .collect()
    }

    #[test]
    fn every_variant_renders_an_empty_state() {
        let (ctx, css) = context();
        for tag in Slide::TAGS {
            let slide = Slide::empty(tag).unwrap();
            let out = render_slide(&slide, &ctx, &css).unwrap();
            assert!(!out.html.is_empty(), "{tag} produced no html");
            assert!(out.html.contains(&format!("data-slide-type=\"{tag}\"")));
        }
    }

    #[test]
    fn root_frame_fills_canvas_without_overflow() {
        for value in populated_slides() {
            let out = render(value);
            let root_end = out.html.find('>').unwrap();
            let root = &out.html[..root_end];
            assert!(root.contains("width:100%;height:100%;box-sizing:border-box;overflow:hidden;padding:64px;"));
        }
    }

    #[test]
    fn every_referenced_variable_is_declared() {
        let (ctx, css) = context();
        let mut slides: Vec<Slide> = populated_slides()
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect();
        slides.extend(Slide::TAGS.iter().filter_map(|tag| Slide::empty(tag)));
        for slide in &slides {
            let out = render_slide(slide, &ctx, &css).unwrap();
            for name in referenced_vars(&out.html) {
                assert!(
                    out.css.contains(&format!("--{name}:")),
                    "{} references undeclared --{name}",
                    slide.tag()
                );
            }
            assert!(!out.html.contains("<script"));
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let hostile = "<script>alert(\"x\")</script> & 'y'";
        let out = render(json!({
            "type": "bullet",
            "props": { "title": hostile, "bullets": [hostile] },
            "style": { "icon": "<b>" }
        }));
        assert!(!out.html.contains("<script>"));
        assert!(!out.html.contains("<b>"));
        assert!(out.html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"));

        let out = render(json!({
            "type": "table",
            "props": { "headers": ["a\"b"], "rows": [["<i>"]] }
        }));
        assert!(out.html.contains("a&quot;b"));
        assert!(out.html.contains("&lt;i&gt;"));
        assert!(!out.html.contains("<i>"));
    }

    #[test]
    fn unsafe_image_sources_become_placeholders() {
        let out = render(json!({
            "type": "image",
            "props": { "image": "javascript:alert(1)", "alt": "Logo" }
        }));
        assert!(!out.html.contains("javascript:"));
        assert!(out.html.contains("image-placeholder"));
        assert!(!out.html.contains("<img"));
    }

    #[test]
    fn bar_chart_two_series() {
        let out = render(json!({
            "type": "chart",
            "props": {
                "chartType": "bar",
                "data": [
                    { "name": "목표", "labels": ["Q1", "Q2"], "values": [80, 90] },
                    { "name": "실적", "labels": ["Q1", "Q2"], "values": [75, 95] }
                ]
            }
        }));
        assert_eq!(out.html.matches("class=\"legend-item\"").count(), 2);
        assert!(out.html.contains(">목표<") && out.html.contains(">실적<"));
        let q2 = out
            .html
            .split("class=\"bar-group\"")
            .find(|group| group.contains(">Q2<"))
            .unwrap();
        assert_eq!(q2.matches("class=\"bar\"").count(), 2);
        assert!(q2.contains("width:90%;"));
        assert!(q2.contains("width:95%;"));
    }

    #[test]
    fn bar_widths_never_exceed_track() {
        let out = render(json!({
            "type": "chart",
            "props": { "data": [
                { "name": "a", "labels": ["x"], "values": [100] },
                { "name": "b", "labels": ["x"], "values": [250] }
            ]}
        }));
        assert!(out.html.contains("data-series=\"0\" style=\"width:40%;"));
        assert!(out.html.contains("data-series=\"1\" style=\"width:100%;"));
    }

    #[test]
    fn pie_overflow_shows_three_with_notice() {
        let series: Vec<Value> = (1..=4)
            .map(|i| json!({ "name": format!("S{i}"), "labels": ["a", "b"], "values": [1, i] }))
            .collect();
        let out = render(json!({
            "type": "chart",
            "props": { "chartType": "pie", "data": series }
        }));
        assert_eq!(out.html.matches("class=\"pie\"").count(), 3);
        assert!(out.html.contains("Showing 3 of 4 series"));
        assert!(!out.html.contains(">S4<"));
    }

    #[test]
    fn single_value_pie_is_a_full_circle() {
        let out = render(json!({
            "type": "chart",
            "props": { "chartType": "pie", "data": [{ "name": "All", "labels": ["only"], "values": [5] }] }
        }));
        assert!(out.html.contains("<circle class=\"pie-slice\""));
        assert!(out.html.contains(">100.0%<"));
    }

    #[test]
    fn chart_without_numbers_shows_no_data() {
        for data in [json!([]), json!([{ "name": "s", "labels": ["a"], "values": ["n/a"] }])] {
            let out = render(json!({ "type": "chart", "props": { "chartType": "line", "data": data } }));
            assert!(out.html.contains("No data"));
            assert!(!out.html.contains("<svg"));
        }
    }

    #[test]
    fn empty_table_has_no_cells() {
        let out = render(json!({ "type": "table", "props": { "headers": [], "rows": [] } }));
        assert!(out.html.contains("<table"));
        assert_eq!(out.html.matches("<th").count(), 0);
        assert!(!out.html.contains("<td "));
        assert_eq!(out.html.matches("<tr").count(), 0);
    }

    #[test]
    fn ragged_table_rows_are_padded() {
        let out = render(json!({
            "type": "table",
            "props": { "headers": ["a", "b", "c"], "rows": [["1"], ["1", "2", "3", "4"]] }
        }));
        assert_eq!(out.html.matches("<th ").count(), 4);
        assert_eq!(out.html.matches("<td ").count(), 8);
    }

    #[test]
    fn gallery_grid_and_overflow() {
        let images: Vec<String> = (0..15).map(|i| format!("img{i}.png")).collect();
        let out = render(json!({ "type": "gallery", "props": { "images": images } }));
        assert_eq!(out.html.matches("class=\"gallery-item\"").count(), 12);
        assert!(out.html.contains("data-rows=\"3\" data-columns=\"4\""));
        assert!(out.html.contains("Showing 12 of 15 images"));

        let out = render(json!({ "type": "gallery", "props": { "images": [] } }));
        assert_eq!(out.html.matches("class=\"gallery-item\"").count(), 4);
        assert_eq!(out.html.matches("image-placeholder").count(), 4);
    }

    #[test]
    fn team_and_agenda_caps() {
        let members: Vec<Value> = (0..8).map(|i| json!({ "name": format!("M{i}") })).collect();
        let out = render(json!({ "type": "teamProfile", "props": { "members": members } }));
        assert_eq!(out.html.matches("class=\"team-card\"").count(), 6);
        assert!(out.html.contains("Showing 6 of 8 team members"));

        let items: Vec<String> = (0..10).map(|i| format!("Item {i}")).collect();
        let out = render(json!({ "type": "agenda", "props": { "items": items } }));
        assert_eq!(out.html.matches("class=\"agenda-item\"").count(), 8);
        assert!(out.html.contains("data-rows=\"4\" data-columns=\"2\""));
        assert!(out.html.contains("Showing 8 of 10 agenda items"));

        let out = render(json!({ "type": "agenda", "props": { "items": ["a", "b", "c"] } }));
        assert!(out.html.contains("data-rows=\"3\" data-columns=\"1\""));
        assert!(!out.html.contains("overflow-notice"));
    }

    #[test]
    fn sequential_and_stat_slides_are_capped() {
        let cases = [
            ("stats", "stats", "value", "stat-card", 24, 8, "statistics"),
            ("timeline", "events", "title", "timeline-event", 9, 6, "events"),
            ("process", "steps", "title", "process-step", 7, 6, "steps"),
            ("roadmap", "phases", "title", "roadmap-phase", 8, 5, "phases"),
        ];
        for (kind, list, field, class, total, cap, noun) in cases {
            let entries: Vec<Value> = (0..total).map(|i| json!({ field: format!("N{i}") })).collect();
            let out = render(json!({ "type": kind, "props": { list: entries } }));
            assert_eq!(
                out.html.matches(&format!("class=\"{class}\"")).count(),
                cap,
                "{kind}"
            );
            assert!(out.html.contains(&format!("Showing {cap} of {total} {noun}")), "{kind}");
            assert!(!out.html.contains(&format!(">N{cap}<")), "{kind}");

            let entries: Vec<Value> = (0..cap).map(|i| json!({ field: format!("N{i}") })).collect();
            let out = render(json!({ "type": kind, "props": { list: entries } }));
            assert_eq!(out.html.matches(&format!("class=\"{class}\"")).count(), cap);
            assert!(!out.html.contains("overflow-notice"), "{kind}");
        }
    }

    #[test]
    fn canvas_matches_ratio_table() {
        let theme = Theme::new("test", "Test");
        let css = to_css_variables(&theme);
        let base = resolve(&theme);
        let slide = Slide::empty("title").unwrap();
        for ratio in AspectRatio::ALL {
            let ctx = base.with_aspect_ratio(ratio);
            let out = render_slide(&slide, &ctx, &css).unwrap();
            let size = ratio.slide_size();
            assert!(out.html.contains(&format!("data-slide-width=\"{}\"", size.width)));
            assert!(out.html.contains(&format!("data-slide-height=\"{}\"", size.height)));
            assert!(out.css.contains(&format!("--slide-width:{}px;", size.width)));
            assert!(out.css.contains(&format!("--slide-height:{}px;", size.height)));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let (ctx, css) = context();
        for value in populated_slides() {
            let slide: Slide = serde_json::from_value(value).unwrap();
            assert_eq!(
                render_slide(&slide, &ctx, &css).unwrap(),
                render_slide(&slide, &ctx, &css).unwrap()
            );
        }
    }

    #[test]
    fn print_document_has_a_page_per_slide() {
        let slides: Vec<HtmlSlide> = populated_slides().into_iter().take(3).map(render).collect();
        let doc = compose_print_document(&slides, SlideSize::new(794, 1123)).unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("@page{size:794px 1123px;margin:0;}"));
        assert_eq!(doc.matches("class=\"print-page\"").count(), 3);
        assert_eq!(doc.matches(":root{--color-primary:").count(), 1);
    }
}
