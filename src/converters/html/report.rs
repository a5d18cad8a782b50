//! Document-style slides: dense two-column report and printable A4 report.

use super::{
    constants::*,
    error::Result,
    structure::{bullet_list, empty_state, paragraphs, subheading},
    utils::{font_override, px, Element, Style},
};
use crate::models::{
    lenient::Text,
    slide::{ReportA4Props, ReportA4Style, ReportSection, ReportTwoColumnProps, ReportTwoColumnStyle},
};
use crate::themes::TemplateContext;

fn report_header(
    out: &mut String,
    title: &Text,
    subtitle: &Text,
    byline: Option<String>,
    ctx: &TemplateContext,
) -> Result<()> {
    if title.is_blank() && subtitle.is_blank() && byline.is_none() {
        return Ok(());
    }
    let header = Element::new("header").class("report-header").style(
        Style::new()
            .set("flex-shrink", "0")
            .px("margin-bottom", ctx.spacing.lg)
            .px("padding-bottom", ctx.spacing.md)
            .set("border-bottom", format!("3px solid {}", vars::PRIMARY)),
    );
    header.open(out)?;
    if let Some(title) = title.non_blank() {
        Element::new("h1")
            .style(
                Style::new()
                    .set("margin", "0")
                    .set("font-family", vars::FONT_HEADING)
                    .px("font-size", ctx.font_sizes.heading)
                    .set("font-weight", ctx.font_weights.bold.to_string())
                    .set("line-height", ctx.line_heights.tight.to_string()),
            )
            .text(out, title)?;
    }
    if let Some(subtitle) = subtitle.non_blank() {
        Element::new("p")
            .style(
                Style::new()
                    .set("margin", format!("{} 0 0 0", px(ctx.spacing.xs)))
                    .px("font-size", ctx.font_sizes.caption * 1.1)
                    .set("color", vars::TEXT_SECONDARY),
            )
            .text(out, subtitle)?;
    }
    if let Some(byline) = byline {
        Element::new("p")
            .class("byline")
            .style(
                Style::new()
                    .set("margin", format!("{} 0 0 0", px(ctx.spacing.xs)))
                    .px("font-size", ctx.font_sizes.small)
                    .set("color", vars::TEXT_MUTED),
            )
            .text(out, &byline)?;
    }
    header.close(out)
}

fn section(out: &mut String, section: &ReportSection, size: f64, ctx: &TemplateContext) -> Result<()> {
    let block = Element::new("section").class("report-section").style(
        Style::new()
            .px("margin-bottom", ctx.spacing.md)
            .set("break-inside", "avoid"),
    );
    block.open(out)?;
    if let Some(heading) = section.heading.non_blank() {
        Element::new("h3")
            .style(
                Style::new()
                    .set("margin", format!("0 0 {} 0", px(ctx.spacing.xs)))
                    .set("font-family", vars::FONT_HEADING)
                    .px("font-size", size * 1.2)
                    .set("font-weight", ctx.font_weights.semibold.to_string())
                    .set("color", vars::PRIMARY),
            )
            .text(out, heading)?;
    }
    paragraphs(out, &section.body, size, ctx)?;
    if section.bullets.iter().any(|b| !b.trim().is_empty()) {
        bullet_list(out, &section.bullets, DEFAULT_BULLET_ICON, size, ctx)?;
    }
    block.close(out)
}

fn section_column(
    out: &mut String,
    sections: &[ReportSection],
    size: f64,
    ctx: &TemplateContext,
) -> Result<()> {
    let column = Element::new("div").class("report-column").style(
        Style::new()
            .set("flex", "1")
            .set("min-width", "0")
            .set("overflow", "hidden"),
    );
    column.open(out)?;
    if sections.is_empty() {
        empty_state(out, "No sections", ctx)?;
    }
    for entry in sections {
        section(out, entry, size, ctx)?;
    }
    column.close(out)
}

pub(super) fn render_report_two_column(
    out: &mut String,
    props: &ReportTwoColumnProps,
    style: &ReportTwoColumnStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    report_header(out, &props.title, &props.subtitle, None, ctx)?;
    let row = Element::new("div").class("report-columns").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .px("gap", ctx.spacing.xl)
            .set("min-height", "0"),
    );
    row.open(out)?;
    section_column(
        out,
        &props.left,
        font_override(style.left_font_size, ctx.font_sizes.small),
        ctx,
    )?;
    Element::new("div")
        .class("report-divider")
        .style(
            Style::new()
                .set("width", "1px")
                .set("flex-shrink", "0")
                .set("background", vars::BORDER_LIGHT),
        )
        .wrap(out, "")?;
    section_column(
        out,
        &props.right,
        font_override(style.right_font_size, ctx.font_sizes.small),
        ctx,
    )?;
    row.close(out)
}

pub(super) fn render_report_a4(
    out: &mut String,
    props: &ReportA4Props,
    style: &ReportA4Style,
    ctx: &TemplateContext,
) -> Result<()> {
    let byline: Vec<&str> = [props.author.non_blank(), props.date.non_blank()]
        .into_iter()
        .flatten()
        .collect();
    let byline = (!byline.is_empty()).then(|| byline.join(" · "));
    report_header(out, &props.title, &props.subtitle, byline, ctx)?;

    let size = font_override(style.font_size, ctx.font_sizes.small);
    if let Some(summary) = props.summary.non_blank() {
        let panel = Element::new("div").class("report-summary").style(
            Style::new()
                .set("flex-shrink", "0")
                .px("margin-bottom", ctx.spacing.lg)
                .px("padding", ctx.spacing.md)
                .set("background", vars::BACKGROUND_SUBTLE)
                .set("border-left", format!("4px solid {}", vars::PRIMARY))
                .px("border-radius", ctx.radius.sm),
        );
        panel.open(out)?;
        subheading(out, "Summary", size * 1.15, ctx)?;
        paragraphs(out, summary, size, ctx)?;
        panel.close(out)?;
    }

    let body = Element::new("div").class("report-body").style(
        Style::new()
            .set("flex", "1")
            .set("min-height", "0")
            .set("overflow", "hidden"),
    );
    body.open(out)?;
    if props.sections.is_empty() && props.summary.is_blank() {
        empty_state(out, "No report content", ctx)?;
    }
    for entry in &props.sections {
        section(out, entry, size, ctx)?;
    }
    body.close(out)?;

    if let Some(footer) = props.footer.non_blank() {
        Element::new("footer")
            .style(
                Style::new()
                    .set("flex-shrink", "0")
                    .px("padding-top", ctx.spacing.sm)
                    .set("border-top", format!("1px solid {}", vars::BORDER_LIGHT))
                    .px("font-size", ctx.font_sizes.small * 0.85)
                    .set("color", vars::TEXT_MUTED),
            )
            .text(out, footer)?;
    }
    Ok(())
}
