//! Slide-level structure: dispatch from slide variant to renderer, the root frame every slide
//! is wrapped in, shared building blocks and print composition.

use log::{debug, warn};
use std::fmt::Write;

use super::{
    chart::render_chart,
    constants::*,
    data, flow, media, report, showcase, text,
    error::Result,
    grid::GridDecision,
    utils::{px, safe_image_url, Element, Style},
};
use crate::models::{
    document::{HtmlSlide, SlideSize},
    lenient::Text,
    slide::Slide,
};
use crate::themes::{css::canvas_variables, TemplateContext};

/// Background treatment of the slide root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backdrop {
    Plain,
    Accent,
    Subtle,
    Paper,
}

fn backdrop(slide: &Slide) -> Backdrop {
    match slide {
        Slide::Title { .. } | Slide::Section { .. } | Slide::ThankYou { .. } => Backdrop::Accent,
        Slide::Quote { .. } | Slide::Testimonial { .. } => Backdrop::Subtle,
        Slide::ReportTwoColumn { .. } | Slide::ReportA4 { .. } => Backdrop::Paper,
        _ => Backdrop::Plain,
    }
}

/// Renders one slide against a resolved context.
///
/// `theme_css` is the theme's custom-property block; the canvas block for `ctx` is appended
/// to it so the fragment carries every variable it references.
pub fn render_slide(slide: &Slide, ctx: &TemplateContext, theme_css: &str) -> Result<HtmlSlide> {
    debug!(
        "Rendering '{}' slide on {} canvas",
        slide.tag(),
        ctx.aspect_ratio
    );
    let mut html = String::new();
    let root = root_frame(slide, ctx);
    root.open(&mut html)?;
    render_body(&mut html, slide, ctx)?;
    root.close(&mut html)?;

    let css = format!("{}\n{}", theme_css, canvas_variables(ctx));
    Ok(HtmlSlide::new(html, css))
}

fn render_body(out: &mut String, slide: &Slide, ctx: &TemplateContext) -> Result<()> {
    match slide {
        Slide::Title { props, style } => text::render_title(out, props, style, ctx),
        Slide::Section { props, style } => text::render_section(out, props, style, ctx),
        Slide::Content { props, style } => text::render_content(out, props, style, ctx),
        Slide::Bullet { props, style } => text::render_bullet(out, props, style, ctx),
        Slide::TwoColumn { props, style } => text::render_two_column(out, props, style, ctx),
        Slide::ThankYou { props, style } => text::render_thank_you(out, props, style, ctx),
        Slide::Quote { props, style } => text::render_quote(out, props, style, ctx),
        Slide::Chart { props, style } => render_chart(out, props, style, ctx),
        Slide::Table { props, style } => data::render_table(out, props, style, ctx),
        Slide::Stats { props, style } => data::render_stats(out, props, style, ctx),
        Slide::Comparison { props, style } => data::render_comparison(out, props, style, ctx),
        Slide::Timeline { props, style } => flow::render_timeline(out, props, style, ctx),
        Slide::Process { props, style } => flow::render_process(out, props, style, ctx),
        Slide::Roadmap { props, style } => flow::render_roadmap(out, props, style, ctx),
        Slide::Agenda { props, style } => flow::render_agenda(out, props, style, ctx),
        Slide::FeatureGrid { props, style } => showcase::render_feature_grid(out, props, style, ctx),
        Slide::TeamProfile { props, style } => showcase::render_team_profile(out, props, style, ctx),
        Slide::Pricing { props, style } => showcase::render_pricing(out, props, style, ctx),
        Slide::Testimonial { props, style } => showcase::render_testimonial(out, props, style, ctx),
        Slide::ImageText { props, style } => media::render_image_text(out, props, style, ctx),
        Slide::Image { props, style } => media::render_image(out, props, style, ctx),
        Slide::Gallery { props, style } => media::render_gallery(out, props, style, ctx),
        Slide::ReportTwoColumn { props, style } => {
            report::render_report_two_column(out, props, style, ctx)
        }
        Slide::ReportA4 { props, style } => report::render_report_a4(out, props, style, ctx),
    }
}

/// The overflow-safe root block: fills the canvas, never scrolls, padded from the context.
fn root_frame(slide: &Slide, ctx: &TemplateContext) -> Element {
    let tag = slide.tag();
    let style = Style::new()
        .set("width", "100%")
        .set("height", "100%")
        .set("box-sizing", "border-box")
        .set("overflow", "hidden")
        .px("padding", ctx.spacing.slide_padding)
        .set("position", "relative")
        .set("display", "flex")
        .set("flex-direction", "column")
        .set("font-family", vars::FONT_BODY)
        .set("line-height", ctx.line_heights.normal.to_string());
    let style = match backdrop(slide) {
        Backdrop::Plain => style
            .set("background", vars::BACKGROUND)
            .set("color", vars::TEXT),
        Backdrop::Accent => style
            .set(
                "background",
                format!(
                    "linear-gradient(135deg, {} 0%, {} 100%)",
                    vars::PRIMARY,
                    vars::PRIMARY_DARK
                ),
            )
            .set("color", vars::PRIMARY_CONTRAST),
        Backdrop::Subtle => style
            .set("background", vars::BACKGROUND_SUBTLE)
            .set("color", vars::TEXT),
        Backdrop::Paper => style
            .set("background", vars::BACKGROUND_PAPER)
            .set("color", vars::TEXT),
    };
    Element::new("div")
        .class(&format!("slide slide-{}", tag))
        .attr("data-slide-type", tag)
        .attr("data-slide-width", ctx.slide_size.width.to_string())
        .attr("data-slide-height", ctx.slide_size.height.to_string())
        .attr("data-aspect-ratio", ctx.aspect_ratio.as_str())
        .style(style)
}

// --- Shared building blocks ---

/// Slide heading; nothing is written for a blank title.
pub(super) fn heading(out: &mut String, title: &Text, ctx: &TemplateContext) -> Result<()> {
    let Some(title) = title.non_blank() else {
        return Ok(());
    };
    Element::new("h2")
        .class("slide-heading")
        .style(
            Style::new()
                .set("margin", format!("0 0 {} 0", px(ctx.spacing.lg)))
                .set("font-family", vars::FONT_HEADING)
                .px("font-size", ctx.font_sizes.heading)
                .set("font-weight", ctx.font_weights.bold.to_string())
                .set("line-height", ctx.line_heights.tight.to_string())
                .set("color", "inherit")
                .set("flex-shrink", "0"),
        )
        .text(out, title)
}

/// Column or card title; nothing is written for blank text.
pub(super) fn subheading(out: &mut String, text: &str, font_size: f64, ctx: &TemplateContext) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    Element::new("h3")
        .style(
            Style::new()
                .set("margin", format!("0 0 {} 0", px(ctx.spacing.sm)))
                .set("font-family", vars::FONT_HEADING)
                .px("font-size", font_size)
                .set("font-weight", ctx.font_weights.semibold.to_string())
                .set("line-height", ctx.line_heights.tight.to_string())
                .set("color", "inherit"),
        )
        .text(out, text.trim())
}

/// Small muted line under a chart, image or table.
pub(super) fn caption(out: &mut String, text: &str, ctx: &TemplateContext) -> Result<()> {
    Element::new("p")
        .class("caption")
        .style(
            Style::new()
                .set("margin", format!("{} 0 0 0", px(ctx.spacing.sm)))
                .px("font-size", ctx.font_sizes.caption)
                .set("color", vars::TEXT_MUTED)
                .set("flex-shrink", "0"),
        )
        .text(out, text)
}

/// Splits free text on line breaks into paragraphs.
pub(super) fn paragraphs(
    out: &mut String,
    text: &str,
    font_size: f64,
    ctx: &TemplateContext,
) -> Result<()> {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        Element::new("p")
            .style(
                Style::new()
                    .set("margin", format!("0 0 {} 0", px(ctx.spacing.md)))
                    .px("font-size", font_size)
                    .set("line-height", ctx.line_heights.relaxed.to_string()),
            )
            .text(out, line)?;
    }
    Ok(())
}

pub(super) fn bullet_list(
    out: &mut String,
    items: &[String],
    icon: &str,
    font_size: f64,
    ctx: &TemplateContext,
) -> Result<()> {
    let list = Element::new("ul").class("bullet-list").style(
        Style::new()
            .set("list-style", "none")
            .set("margin", "0")
            .set("padding", "0")
            .set("display", "flex")
            .set("flex-direction", "column")
            .px("gap", ctx.spacing.md),
    );
    list.open(out)?;
    for item in items.iter().filter(|i| !i.trim().is_empty()) {
        let row = Element::new("li").style(
            Style::new()
                .set("display", "flex")
                .set("align-items", "baseline")
                .px("gap", ctx.spacing.md)
                .px("font-size", font_size),
        );
        row.open(out)?;
        Element::new("span")
            .class("bullet-icon")
            .style(
                Style::new()
                    .set("color", vars::PRIMARY)
                    .set("flex-shrink", "0")
                    .set("font-weight", ctx.font_weights.bold.to_string()),
            )
            .text(out, icon)?;
        Element::new("span").text(out, item)?;
        row.close(out)?;
    }
    list.close(out)
}

/// Placeholder shown instead of an empty list, table or chart.
pub(super) fn empty_state(out: &mut String, message: &str, ctx: &TemplateContext) -> Result<()> {
    Element::new("div")
        .class("empty-state")
        .style(
            Style::new()
                .set("flex", "1")
                .set("display", "flex")
                .set("align-items", "center")
                .set("justify-content", "center")
                .set("min-height", "80px")
                .px("font-size", ctx.font_sizes.caption)
                .set("color", vars::TEXT_MUTED)
                .set("border", format!("2px dashed {}", vars::BORDER))
                .px("border-radius", ctx.radius.md),
        )
        .text(out, message)
}

/// Visible banner reporting truncated input.
pub(super) fn overflow_notice(
    out: &mut String,
    shown: usize,
    total: usize,
    noun: &str,
    ctx: &TemplateContext,
) -> Result<()> {
    Element::new("div")
        .class("overflow-notice")
        .attr("role", "note")
        .style(
            Style::new()
                .set("flex-shrink", "0")
                .set("margin", format!("0 0 {} 0", px(ctx.spacing.sm)))
                .set("padding", format!("{} {}", px(ctx.spacing.xs), px(ctx.spacing.md)))
                .px("border-radius", ctx.radius.sm)
                .set("background", vars::WARNING)
                .set("color", vars::TEXT_INVERSE)
                .px("font-size", ctx.font_sizes.small),
        )
        .text(out, &format!("Showing {} of {} {}", shown, total, noun))
}

/// Number of items to render out of `total`; writes the notice when some are cut.
pub(super) fn truncate(
    out: &mut String,
    total: usize,
    cap: usize,
    noun: &str,
    ctx: &TemplateContext,
) -> Result<usize> {
    let shown = total.min(cap);
    if shown < total {
        warn!("Slide has {} {}; rendering the first {}", total, noun, shown);
        overflow_notice(out, shown, total, noun, ctx)?;
    }
    Ok(shown)
}

/// Base style of a card surface.
pub(super) fn card_style() -> Style {
    Style::new()
        .set("background", vars::SURFACE)
        .set("color", vars::TEXT)
        .set("border", format!("1px solid {}", vars::BORDER_LIGHT))
        .set("border-radius", vars::CARD_RADIUS)
        .set("box-shadow", vars::CARD_SHADOW)
        .set("padding", vars::CARD_PADDING)
        .set("box-sizing", "border-box")
        .set("overflow", "hidden")
        .set("min-width", "0")
        .set("min-height", "0")
}

/// A card laying out its children top to bottom.
pub(super) fn column_card(gap: f64) -> Style {
    card_style()
        .set("display", "flex")
        .set("flex-direction", "column")
        .px("gap", gap)
}

/// Unstyled paragraph at `size` in `color`.
pub(super) fn small_text(out: &mut String, text: &str, size: f64, color: &str) -> Result<()> {
    Element::new("p")
        .style(
            Style::new()
                .set("margin", "0")
                .px("font-size", size)
                .set("color", color),
        )
        .text(out, text)
}

/// A CSS grid sized by `decision`, filling the remaining height.
pub(super) fn grid_container(class: &str, decision: GridDecision, ctx: &TemplateContext) -> Element {
    Element::new("div")
        .class(class)
        .attr("data-rows", decision.rows.to_string())
        .attr("data-columns", decision.columns.to_string())
        .style(
            Style::new()
                .set("flex", "1")
                .set("display", "grid")
                .set(
                    "grid-template-columns",
                    format!("repeat({}, minmax(0, 1fr))", decision.columns),
                )
                .set(
                    "grid-template-rows",
                    format!("repeat({}, minmax(0, 1fr))", decision.rows),
                )
                .px("gap", ctx.spacing.lg)
                .set("min-height", "0"),
        )
}

/// An `<img>` for a safe URL, or a labelled placeholder block.
pub(super) fn image_or_placeholder(
    out: &mut String,
    url: &str,
    alt: &str,
    fit: &str,
    ctx: &TemplateContext,
) -> Result<()> {
    match safe_image_url(url) {
        Some(src) => Element::new("img")
            .attr("src", src)
            .attr("alt", alt)
            .style(
                Style::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("object-fit", fit)
                    .px("border-radius", ctx.radius.md)
                    .set("display", "block"),
            )
            .void(out),
        None => Element::new("div")
            .class("image-placeholder")
            .style(
                Style::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("min-height", "60px")
                    .set("display", "flex")
                    .set("align-items", "center")
                    .set("justify-content", "center")
                    .set("background", vars::SURFACE_MUTED)
                    .set("color", vars::TEXT_MUTED)
                    .px("border-radius", ctx.radius.md)
                    .px("font-size", ctx.font_sizes.small),
            )
            .text(out, if alt.trim().is_empty() { "Image" } else { alt }),
    }
}

// --- Print composition ---

/// One HTML document with a page per slide, for the print pipeline.
///
/// Identical stylesheet blocks are emitted once.
pub fn compose_print_document(slides: &[HtmlSlide], size: SlideSize) -> Result<String> {
    let mut out = String::new();
    write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n@page{{size:{w}px {h}px;margin:0;}}\nhtml,body{{margin:0;padding:0;}}\n.print-page{{width:{w}px;height:{h}px;overflow:hidden;break-after:page;page-break-after:always;}}\n.print-page:last-child{{break-after:auto;page-break-after:auto;}}\n",
        w = size.width,
        h = size.height
    )?;
    let mut seen: Vec<&str> = Vec::new();
    for slide in slides {
        if !seen.contains(&slide.css.as_str()) {
            seen.push(&slide.css);
            writeln!(out, "{}", slide.css)?;
        }
    }
    out.push_str("</style>\n</head>\n<body>\n");
    for (index, slide) in slides.iter().enumerate() {
        writeln!(
            out,
            "<section class=\"print-page\" data-page=\"{}\">{}</section>",
            index + 1,
            slide.html
        )?;
    }
    out.push_str("</body>\n</html>\n");
    Ok(out)
}
