//! Text-centred slides: title, section, content, bullet, two-column, thank-you and quote.

use super::{
    constants::*,
    error::Result,
    structure::{bullet_list, empty_state, heading, paragraphs, subheading},
    utils::{font_override, px, Element, Style},
};
use crate::models::slide::{
    BulletProps, BulletStyle, ContentProps, ContentStyle, QuoteProps, QuoteStyle, SectionProps,
    SectionStyle, ThankYouProps, ThankYouStyle, TitleProps, TitleStyle, TwoColumnProps,
    TwoColumnStyle,
};
use crate::themes::TemplateContext;

/// Maps a free-form alignment override onto a CSS value.
pub(super) fn text_align(raw: &str, fallback: &'static str) -> &'static str {
    match raw.trim().to_ascii_lowercase().as_str() {
        "left" | "start" => "left",
        "center" | "centre" | "middle" => "center",
        "right" | "end" => "right",
        _ => fallback,
    }
}

fn flex_alignment(align: &str) -> &'static str {
    match align {
        "left" => "flex-start",
        "right" => "flex-end",
        _ => "center",
    }
}

fn centered_column(align: &str, ctx: &TemplateContext) -> Element {
    Element::new("div").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("justify-content", "center")
            .set("align-items", flex_alignment(align))
            .set("text-align", align)
            .px("gap", ctx.spacing.md)
            .set("min-height", "0"),
    )
}

fn display_text(tag: &'static str, size: f64, weight: u16, ctx: &TemplateContext) -> Element {
    Element::new(tag).style(
        Style::new()
            .set("margin", "0")
            .set("font-family", vars::FONT_HEADING)
            .px("font-size", size)
            .set("font-weight", weight.to_string())
            .set("line-height", ctx.line_heights.tight.to_string())
            .set("color", "inherit"),
    )
}

fn muted_line(text: &str, size: f64, out: &mut String) -> Result<()> {
    Element::new("p")
        .style(
            Style::new()
                .set("margin", "0")
                .px("font-size", size)
                .set("opacity", "0.85"),
        )
        .text(out, text)
}

pub(super) fn render_title(
    out: &mut String,
    props: &TitleProps,
    style: &TitleStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    let align = text_align(&style.align, "center");
    let column = centered_column(align, ctx);
    column.open(out)?;
    let title = props.title.non_blank().unwrap_or("Untitled presentation");
    display_text(
        "h1",
        font_override(style.title_font_size, ctx.font_sizes.title * 1.5),
        ctx.font_weights.bold,
        ctx,
    )
    .text(out, title)?;
    if let Some(subtitle) = props.subtitle.non_blank() {
        muted_line(
            subtitle,
            font_override(style.subtitle_font_size, ctx.font_sizes.subtitle),
            out,
        )?;
    }
    let byline: Vec<&str> = [props.author.non_blank(), props.date.non_blank()]
        .into_iter()
        .flatten()
        .collect();
    if !byline.is_empty() {
        Element::new("p")
            .class("byline")
            .style(
                Style::new()
                    .set("margin", format!("{} 0 0 0", px(ctx.spacing.xl)))
                    .px("font-size", ctx.font_sizes.caption)
                    .set("opacity", "0.75"),
            )
            .text(out, &byline.join(" · "))?;
    }
    column.close(out)
}

pub(super) fn render_section(
    out: &mut String,
    props: &SectionProps,
    style: &SectionStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    let align = text_align(&style.align, "left");
    let column = centered_column(align, ctx);
    column.open(out)?;
    if let Some(number) = props.section_number.non_blank() {
        Element::new("div")
            .class("section-number")
            .style(
                Style::new()
                    .px("font-size", ctx.font_sizes.stats)
                    .set("font-weight", ctx.font_weights.bold.to_string())
                    .set("opacity", "0.5")
                    .set("line-height", "1"),
            )
            .text(out, number)?;
    }
    display_text(
        "h1",
        font_override(style.font_size, ctx.font_sizes.title * 1.25),
        ctx.font_weights.bold,
        ctx,
    )
    .text(out, props.title.non_blank().unwrap_or("Section"))?;
    if let Some(subtitle) = props.subtitle.non_blank() {
        muted_line(subtitle, ctx.font_sizes.subtitle, out)?;
    }
    column.close(out)
}

pub(super) fn render_content(
    out: &mut String,
    props: &ContentProps,
    style: &ContentStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    if props.content.is_blank() {
        return empty_state(out, "No content", ctx);
    }
    let body = Element::new("div").class("content-body").style(
        Style::new()
            .set("flex", "1")
            .set("min-height", "0")
            .set("overflow", "hidden"),
    );
    body.open(out)?;
    paragraphs(
        out,
        &props.content,
        font_override(style.font_size, ctx.font_sizes.body),
        ctx,
    )?;
    body.close(out)
}

pub(super) fn render_bullet(
    out: &mut String,
    props: &BulletProps,
    style: &BulletStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    if props.bullets.iter().all(|b| b.trim().is_empty()) {
        return empty_state(out, "No bullet points", ctx);
    }
    let icon = style.icon.non_blank().unwrap_or(DEFAULT_BULLET_ICON);
    bullet_list(
        out,
        &props.bullets,
        icon,
        font_override(style.font_size, ctx.font_sizes.body),
        ctx,
    )
}

fn column(out: &mut String, title: &str, items: &[String], size: f64, ctx: &TemplateContext) -> Result<()> {
    let panel = Element::new("div").class("column").style(
        Style::new()
            .set("flex", "1")
            .set("min-width", "0")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("overflow", "hidden"),
    );
    panel.open(out)?;
    subheading(out, title, ctx.font_sizes.subtitle, ctx)?;
    if items.iter().all(|i| i.trim().is_empty()) {
        empty_state(out, "No items", ctx)?;
    } else {
        bullet_list(out, items, DEFAULT_BULLET_ICON, size, ctx)?;
    }
    panel.close(out)
}

pub(super) fn render_two_column(
    out: &mut String,
    props: &TwoColumnProps,
    style: &TwoColumnStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let row = Element::new("div").class("two-column").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .px("gap", ctx.spacing.xl)
            .set("min-height", "0"),
    );
    row.open(out)?;
    column(
        out,
        &props.left_title,
        &props.left_content,
        font_override(style.left_font_size, ctx.font_sizes.body),
        ctx,
    )?;
    column(
        out,
        &props.right_title,
        &props.right_content,
        font_override(style.right_font_size, ctx.font_sizes.body),
        ctx,
    )?;
    row.close(out)
}

pub(super) fn render_thank_you(
    out: &mut String,
    props: &ThankYouProps,
    style: &ThankYouStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    let column = centered_column("center", ctx);
    column.open(out)?;
    display_text(
        "h1",
        font_override(style.font_size, ctx.font_sizes.title * 1.5),
        ctx.font_weights.bold,
        ctx,
    )
    .text(out, props.title.non_blank().unwrap_or("Thank You"))?;
    if let Some(message) = props.message.non_blank() {
        muted_line(message, ctx.font_sizes.subtitle, out)?;
    }
    let contacts: Vec<&str> = [
        props.contact.non_blank(),
        props.email.non_blank(),
        props.website.non_blank(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contacts.is_empty() {
        let list = Element::new("div").class("contact").style(
            Style::new()
                .set("margin-top", px(ctx.spacing.xl))
                .set("display", "flex")
                .set("flex-direction", "column")
                .px("gap", ctx.spacing.xs)
                .px("font-size", ctx.font_sizes.caption)
                .set("opacity", "0.85"),
        );
        list.open(out)?;
        for line in contacts {
            Element::new("span").text(out, line)?;
        }
        list.close(out)?;
    }
    column.close(out)
}

pub(super) fn render_quote(
    out: &mut String,
    props: &QuoteProps,
    style: &QuoteStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    let Some(quote) = props.quote.non_blank() else {
        return empty_state(out, "No quote", ctx);
    };
    let column = centered_column("center", ctx);
    column.open(out)?;
    Element::new("div")
        .class("quote-mark")
        .attr("aria-hidden", "true")
        .style(
            Style::new()
                .px("font-size", ctx.font_sizes.stats * 2.0)
                .set("line-height", "1")
                .set("color", vars::PRIMARY)
                .set("font-family", vars::FONT_HEADING),
        )
        .text(out, "\u{201C}")?;
    Element::new("blockquote")
        .style(
            Style::new()
                .set("margin", "0")
                .set("max-width", "85%")
                .set("font-family", vars::FONT_HEADING)
                .px("font-size", font_override(style.font_size, ctx.font_sizes.subtitle * 1.25))
                .set("font-style", "italic")
                .set("line-height", ctx.line_heights.relaxed.to_string()),
        )
        .text(out, quote)?;
    if let Some(author) = props.author.non_blank() {
        let attribution = match props.role.non_blank() {
            Some(role) => format!("— {}, {}", author, role),
            None => format!("— {}", author),
        };
        Element::new("cite")
            .style(
                Style::new()
                    .set("font-style", "normal")
                    .px("font-size", ctx.font_sizes.caption)
                    .set("color", vars::TEXT_SECONDARY),
            )
            .text(out, &attribution)?;
    }
    column.close(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_overrides() {
        assert_eq!(text_align("Left", "center"), "left");
        assert_eq!(text_align(" end ", "center"), "right");
        assert_eq!(text_align("justify;color:red", "center"), "center");
        assert_eq!(text_align("", "left"), "left");
    }
}
