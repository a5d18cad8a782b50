//! Image slides: image with text, single image and gallery.

use super::{
    constants::*,
    error::Result,
    grid::{decide, GridKind},
    structure::{
        bullet_list, caption, grid_container, heading, image_or_placeholder, paragraphs,
        truncate,
    },
    utils::{font_override, px, Element, Style},
};
use crate::models::slide::{
    GalleryProps, GalleryStyle, ImageProps, ImageStyle, ImageTextProps, ImageTextStyle,
};
use crate::themes::TemplateContext;

/// Maps a free-form fit override onto an `object-fit` value.
fn object_fit(raw: &str, fallback: &'static str) -> &'static str {
    match raw.trim().to_ascii_lowercase().as_str() {
        "cover" | "fill-frame" => "cover",
        "contain" | "fit" => "contain",
        "fill" | "stretch" => "fill",
        "none" => "none",
        "scale-down" => "scale-down",
        _ => fallback,
    }
}

fn frame(ctx: &TemplateContext) -> Element {
    Element::new("div").class("image-frame").style(
        Style::new()
            .set("flex", "1")
            .set("min-width", "0")
            .set("min-height", "0")
            .set("overflow", "hidden")
            .px("border-radius", ctx.radius.md),
    )
}

pub(super) fn render_image_text(
    out: &mut String,
    props: &ImageTextProps,
    style: &ImageTextStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let image_first = matches!(
        props.image_position.trim().to_ascii_lowercase().as_str(),
        "left" | "start"
    );
    let row = Element::new("div").class("image-text").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .set(
                "flex-direction",
                if image_first { "row-reverse" } else { "row" },
            )
            .px("gap", ctx.spacing.xl)
            .set("min-height", "0"),
    );
    row.open(out)?;

    let text_column = Element::new("div").class("image-text-body").style(
        Style::new()
            .set("flex", "1")
            .set("min-width", "0")
            .set("overflow", "hidden")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("justify-content", "center"),
    );
    text_column.open(out)?;
    let size = font_override(style.font_size, ctx.font_sizes.body);
    paragraphs(out, &props.text, size, ctx)?;
    if props.bullets.iter().any(|b| !b.trim().is_empty()) {
        bullet_list(out, &props.bullets, DEFAULT_BULLET_ICON, size * 0.9, ctx)?;
    }
    text_column.close(out)?;

    let image = frame(ctx);
    image.open(out)?;
    let alt = props
        .image_alt
        .non_blank()
        .or_else(|| props.title.non_blank())
        .unwrap_or("");
    image_or_placeholder(out, &props.image, alt, "cover", ctx)?;
    image.close(out)?;

    row.close(out)
}

pub(super) fn render_image(
    out: &mut String,
    props: &ImageProps,
    style: &ImageStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let image = frame(ctx);
    image.open(out)?;
    let alt = props
        .alt
        .non_blank()
        .or_else(|| props.caption.non_blank())
        .unwrap_or("");
    image_or_placeholder(out, &props.image, alt, object_fit(&style.fit, "contain"), ctx)?;
    image.close(out)?;
    if let Some(text) = props.caption.non_blank() {
        caption(out, text, ctx)?;
    }
    Ok(())
}

pub(super) fn render_gallery(
    out: &mut String,
    props: &GalleryProps,
    style: &GalleryStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let total = props.images.len();
    let shown = truncate(out, total, GridKind::Gallery.max_items(), "images", ctx)?;
    let decision = decide(shown, GridKind::Gallery);
    let show_captions = style.show_captions.unwrap_or(true);

    let grid = grid_container("gallery", decision, ctx);
    grid.open(out)?;
    let cell = || {
        Element::new("figure").class("gallery-item").style(
            Style::new()
                .set("margin", "0")
                .set("display", "flex")
                .set("flex-direction", "column")
                .set("min-width", "0")
                .set("min-height", "0")
                .set("overflow", "hidden"),
        )
    };
    if shown == 0 {
        for _ in 0..decision.capacity() {
            let figure = cell();
            figure.open(out)?;
            image_or_placeholder(out, "", "", "cover", ctx)?;
            figure.close(out)?;
        }
    } else {
        for image in props.images.iter().take(shown) {
            let figure = cell();
            figure.open(out)?;
            let alt = image
                .alt
                .non_blank()
                .or_else(|| image.caption.non_blank())
                .unwrap_or("");
            let media = Element::new("div").style(
                Style::new()
                    .set("flex", "1")
                    .set("min-height", "0"),
            );
            media.open(out)?;
            image_or_placeholder(out, &image.url, alt, "cover", ctx)?;
            media.close(out)?;
            if show_captions {
                if let Some(text) = image.caption.non_blank() {
                    Element::new("figcaption")
                        .style(
                            Style::new()
                                .set("margin-top", px(ctx.spacing.xs))
                                .px("font-size", ctx.font_sizes.small)
                                .set("color", vars::TEXT_MUTED)
                                .set("white-space", "nowrap")
                                .set("overflow", "hidden")
                                .set("text-overflow", "ellipsis"),
                        )
                        .text(out, text)?;
                }
            }
            figure.close(out)?;
        }
    }
    grid.close(out)
}
