//! Data slides: table, stats and comparison.

use super::{
    constants::*,
    error::Result,
    structure::{
        bullet_list, card_style, column_card, empty_state, heading, small_text, subheading,
        truncate,
    },
    utils::{font_override, px, Element, Style},
};
use crate::models::slide::{
    ComparisonProps, ComparisonStyle, StatsProps, StatsStyle, TableProps, TableStyle,
};
use crate::themes::TemplateContext;

/// Rows beyond this count switch the table to the caption font size.
const DENSE_TABLE_ROWS: usize = 8;
const MAX_STAT_COLUMNS: usize = 4;

pub(super) fn render_table(
    out: &mut String,
    props: &TableProps,
    style: &TableStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;

    let columns = props
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(props.headers.len()))
        .max()
        .unwrap_or(0);
    let fallback_size = if props.rows.len() > DENSE_TABLE_ROWS {
        ctx.font_sizes.caption
    } else {
        ctx.font_sizes.body * 0.9
    };
    let font_size = font_override(style.font_size, fallback_size);
    let striped = style.striped.unwrap_or(true);
    let cell_padding = format!("{} {}", px(ctx.spacing.sm), px(ctx.spacing.md));

    let wrapper = Element::new("div").class("table-wrapper").style(
        Style::new()
            .set("flex", "1")
            .set("min-height", "0")
            .set("overflow", "hidden"),
    );
    wrapper.open(out)?;
    let table = Element::new("table").style(
        Style::new()
            .set("width", "100%")
            .set("border-collapse", "collapse")
            .px("font-size", font_size)
            .set("table-layout", "fixed"),
    );
    table.open(out)?;

    if !props.headers.is_empty() {
        out.push_str("<thead><tr>");
        for index in 0..columns {
            let label = props.headers.get(index).map(String::as_str).unwrap_or("");
            Element::new("th")
                .style(
                    Style::new()
                        .set("padding", &cell_padding)
                        .set("text-align", "left")
                        .set("background", vars::PRIMARY)
                        .set("color", vars::PRIMARY_CONTRAST)
                        .set("font-weight", ctx.font_weights.semibold.to_string())
                        .set("overflow", "hidden")
                        .set("text-overflow", "ellipsis"),
                )
                .text(out, label)?;
        }
        out.push_str("</tr></thead>");
    }

    out.push_str("<tbody>");
    for (row_index, row) in props.rows.iter().enumerate() {
        let background = if striped && row_index % 2 == 1 {
            vars::BACKGROUND_SUBTLE
        } else {
            "transparent"
        };
        let tr = Element::new("tr").style(Style::new().set("background", background));
        tr.open(out)?;
        for index in 0..columns {
            let value = row.get(index).map(String::as_str).unwrap_or("");
            let emphasize = style.highlight_first_column && index == 0;
            let weight = if emphasize {
                ctx.font_weights.semibold
            } else {
                ctx.font_weights.normal
            };
            Element::new("td")
                .style(
                    Style::new()
                        .set("padding", &cell_padding)
                        .set("border-bottom", format!("1px solid {}", vars::BORDER_LIGHT))
                        .set("font-weight", weight.to_string())
                        .set("color", if emphasize { vars::PRIMARY } else { vars::TEXT })
                        .set("overflow", "hidden")
                        .set("text-overflow", "ellipsis"),
                )
                .text(out, value)?;
        }
        tr.close(out)?;
    }
    out.push_str("</tbody>");
    table.close(out)?;
    if props.rows.is_empty() {
        empty_state(out, "No rows", ctx)?;
    }
    wrapper.close(out)
}

fn trend_color(trend: &str) -> &'static str {
    let trend = trend.trim().to_ascii_lowercase();
    if trend.starts_with('+') || trend.starts_with('↑') || trend.starts_with("up") {
        vars::SUCCESS
    } else if trend.starts_with('-') || trend.starts_with('↓') || trend.starts_with("down") {
        vars::ERROR
    } else {
        vars::TEXT_SECONDARY
    }
}

pub(super) fn render_stats(
    out: &mut String,
    props: &StatsProps,
    style: &StatsStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    if props.stats.is_empty() {
        return empty_state(out, "No statistics", ctx);
    }
    let shown = truncate(out, props.stats.len(), MAX_STATS, "statistics", ctx)?;
    let columns = shown.min(MAX_STAT_COLUMNS);
    let grid = Element::new("div").class("stats-grid").style(
        Style::new()
            .set("flex", "1")
            .set("display", "grid")
            .set(
                "grid-template-columns",
                format!("repeat({}, minmax(0, 1fr))", columns),
            )
            .px("gap", ctx.spacing.lg)
            .set("align-content", "center")
            .set("min-height", "0"),
    );
    grid.open(out)?;
    let value_size = font_override(style.value_font_size, ctx.font_sizes.stats);
    for stat in props.stats.iter().take(shown) {
        let card = Element::new("div").class("stat-card").style(
            column_card(ctx.spacing.xs)
                .set("align-items", "center")
                .set("text-align", "center"),
        );
        card.open(out)?;
        Element::new("div")
            .class("stat-value")
            .style(
                Style::new()
                    .px("font-size", value_size)
                    .set("font-weight", ctx.font_weights.bold.to_string())
                    .set("font-family", vars::FONT_HEADING)
                    .set("color", vars::PRIMARY)
                    .set("line-height", "1.1"),
            )
            .text(out, stat.value.non_blank().unwrap_or("–"))?;
        if let Some(label) = stat.label.non_blank() {
            Element::new("div")
                .class("stat-label")
                .style(
                    Style::new()
                        .px("font-size", ctx.font_sizes.caption)
                        .set("font-weight", ctx.font_weights.semibold.to_string()),
                )
                .text(out, label)?;
        }
        if let Some(description) = stat.description.non_blank() {
            small_text(out, description, ctx.font_sizes.small, vars::TEXT_MUTED)?;
        }
        if let Some(trend) = stat.trend.non_blank() {
            Element::new("div")
                .class("stat-trend")
                .style(
                    Style::new()
                        .px("font-size", ctx.font_sizes.small)
                        .set("font-weight", ctx.font_weights.semibold.to_string())
                        .set("color", trend_color(trend)),
                )
                .text(out, trend)?;
        }
        card.close(out)?;
    }
    grid.close(out)
}

pub(super) fn render_comparison(
    out: &mut String,
    props: &ComparisonProps,
    style: &ComparisonStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let size = font_override(style.font_size, ctx.font_sizes.body * 0.9);
    let row = Element::new("div").class("comparison").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .set("align-items", "stretch")
            .px("gap", ctx.spacing.lg)
            .set("min-height", "0"),
    );
    row.open(out)?;
    let sides = [
        (&props.left_title, &props.left_items, vars::PRIMARY),
        (&props.right_title, &props.right_items, vars::SECONDARY),
    ];
    for (index, (title, items, accent)) in sides.into_iter().enumerate() {
        if index == 1 {
            Element::new("div")
                .class("versus")
                .style(
                    Style::new()
                        .set("align-self", "center")
                        .set("flex-shrink", "0")
                        .px("font-size", ctx.font_sizes.subtitle)
                        .set("font-weight", ctx.font_weights.bold.to_string())
                        .set("color", vars::TEXT_MUTED),
                )
                .text(out, "VS")?;
        }
        let card = Element::new("div").class("comparison-side").style(
            card_style()
                .set("flex", "1")
                .set("border-top", format!("4px solid {}", accent))
                .set("display", "flex")
                .set("flex-direction", "column"),
        );
        card.open(out)?;
        subheading(out, title, ctx.font_sizes.subtitle, ctx)?;
        if items.iter().all(|i| i.trim().is_empty()) {
            empty_state(out, "No items", ctx)?;
        } else {
            bullet_list(out, items, "✓", size, ctx)?;
        }
        card.close(out)?;
    }
    row.close(out)
}
