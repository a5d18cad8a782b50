//! Sequential slides: timeline, process, roadmap and agenda.

use super::{
    constants::*,
    error::Result,
    grid::{decide, GridKind},
    structure::{
        column_card, empty_state, grid_container, heading, small_text, subheading, truncate,
    },
    utils::{font_override, px, Element, Style},
};
use crate::models::slide::{
    AgendaProps, AgendaStyle, ProcessProps, ProcessStyle, RoadmapProps, RoadmapStyle,
    TimelineProps, TimelineStyle,
};
use crate::themes::TemplateContext;

/// Round numbered marker.
fn badge(diameter: f64, ctx: &TemplateContext) -> Element {
    Element::new("div").class("step-number").style(
        Style::new()
            .px("width", diameter)
            .px("height", diameter)
            .set("flex-shrink", "0")
            .set("display", "flex")
            .set("align-items", "center")
            .set("justify-content", "center")
            .px("border-radius", ctx.radius.full)
            .set("background", vars::PRIMARY)
            .set("color", vars::PRIMARY_CONTRAST)
            .set("font-weight", ctx.font_weights.bold.to_string())
            .px("font-size", diameter * 0.42),
    )
}

pub(super) fn render_timeline(
    out: &mut String,
    props: &TimelineProps,
    style: &TimelineStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    if props.events.is_empty() {
        return empty_state(out, "No events", ctx);
    }
    let shown = truncate(out, props.events.len(), MAX_TIMELINE_EVENTS, "events", ctx)?;
    let size = font_override(style.font_size, ctx.font_sizes.caption);
    let track = Element::new("div").class("timeline").style(
        Style::new()
            .set("flex", "1")
            .set("position", "relative")
            .set("display", "flex")
            .set("align-items", "flex-start")
            .set("padding-top", px(ctx.spacing.xl))
            .px("gap", ctx.spacing.md)
            .set("min-height", "0"),
    );
    track.open(out)?;
    Element::new("div")
        .class("timeline-axis")
        .style(
            Style::new()
                .set("position", "absolute")
                .set("left", "0")
                .set("right", "0")
                .set("top", px(ctx.spacing.xl + 7.0))
                .set("height", "2px")
                .set("background", vars::BORDER),
        )
        .wrap(out, "")?;
    for event in props.events.iter().take(shown) {
        let item = Element::new("div").class("timeline-event").style(
            Style::new()
                .set("flex", "1")
                .set("min-width", "0")
                .set("position", "relative")
                .set("display", "flex")
                .set("flex-direction", "column")
                .px("gap", ctx.spacing.xs),
        );
        item.open(out)?;
        Element::new("div")
            .class("timeline-dot")
            .style(
                Style::new()
                    .set("width", "16px")
                    .set("height", "16px")
                    .px("border-radius", ctx.radius.full)
                    .set("background", vars::PRIMARY)
                    .set("border", format!("3px solid {}", vars::BACKGROUND))
                    .set("box-sizing", "border-box"),
            )
            .wrap(out, "")?;
        if let Some(date) = event.date.non_blank() {
            Element::new("div")
                .class("timeline-date")
                .style(
                    Style::new()
                        .px("font-size", ctx.font_sizes.small)
                        .set("font-weight", ctx.font_weights.bold.to_string())
                        .set("color", vars::PRIMARY),
                )
                .text(out, date)?;
        }
        subheading(out, &event.title, size * 1.1, ctx)?;
        if let Some(description) = event.description.non_blank() {
            small_text(out, description, size * 0.9, vars::TEXT_SECONDARY)?;
        }
        item.close(out)?;
    }
    track.close(out)
}

pub(super) fn render_process(
    out: &mut String,
    props: &ProcessProps,
    style: &ProcessStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    if props.steps.is_empty() {
        return empty_state(out, "No steps", ctx);
    }
    let shown = truncate(out, props.steps.len(), MAX_PROCESS_STEPS, "steps", ctx)?;
    let show_numbers = style.show_numbers.unwrap_or(true);
    let row = Element::new("div").class("process").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .set("align-items", "stretch")
            .px("gap", ctx.spacing.sm)
            .set("min-height", "0"),
    );
    row.open(out)?;
    for (index, step) in props.steps.iter().take(shown).enumerate() {
        if index > 0 {
            Element::new("div")
                .class("process-arrow")
                .attr("aria-hidden", "true")
                .style(
                    Style::new()
                        .set("align-self", "center")
                        .set("flex-shrink", "0")
                        .px("font-size", ctx.font_sizes.subtitle)
                        .set("color", vars::TEXT_MUTED),
                )
                .text(out, "→")?;
        }
        let card = Element::new("div").class("process-step").style(
            column_card(ctx.spacing.sm)
                .set("flex", "1")
                .set("align-items", "center")
                .set("text-align", "center"),
        );
        card.open(out)?;
        if show_numbers {
            badge(44.0, ctx).text(out, &(index + 1).to_string())?;
        }
        subheading(out, &step.title, ctx.font_sizes.caption * 1.15, ctx)?;
        if let Some(description) = step.description.non_blank() {
            small_text(out, description, ctx.font_sizes.small, vars::TEXT_SECONDARY)?;
        }
        card.close(out)?;
    }
    row.close(out)
}

fn status_color(status: &str) -> &'static str {
    match status.trim().to_ascii_lowercase().as_str() {
        "done" | "complete" | "completed" | "shipped" => vars::SUCCESS,
        "in-progress" | "in progress" | "active" | "current" | "ongoing" => vars::PRIMARY,
        "planned" | "next" | "upcoming" => vars::INFO,
        "blocked" | "at-risk" | "delayed" => vars::ERROR,
        _ => vars::TEXT_MUTED,
    }
}

pub(super) fn render_roadmap(
    out: &mut String,
    props: &RoadmapProps,
    style: &RoadmapStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    if props.phases.is_empty() {
        return empty_state(out, "No phases", ctx);
    }
    let shown = truncate(out, props.phases.len(), MAX_ROADMAP_PHASES, "phases", ctx)?;
    let size = font_override(style.font_size, ctx.font_sizes.small);
    let row = Element::new("div").class("roadmap").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .px("gap", ctx.spacing.md)
            .set("min-height", "0"),
    );
    row.open(out)?;
    for phase in props.phases.iter().take(shown) {
        let accent = status_color(&phase.status);
        let card = Element::new("div").class("roadmap-phase").style(
            column_card(ctx.spacing.xs)
                .set("flex", "1")
                .set("border-top", format!("4px solid {}", accent)),
        );
        card.open(out)?;
        if let Some(period) = phase.period.non_blank() {
            Element::new("div")
                .class("roadmap-period")
                .style(
                    Style::new()
                        .px("font-size", ctx.font_sizes.small)
                        .set("font-weight", ctx.font_weights.bold.to_string())
                        .set("color", accent),
                )
                .text(out, period)?;
        }
        subheading(out, &phase.title, ctx.font_sizes.caption * 1.15, ctx)?;
        if let Some(status) = phase.status.non_blank() {
            Element::new("span")
                .class("roadmap-status")
                .style(
                    Style::new()
                        .set("align-self", "flex-start")
                        .set("padding", format!("2px {}", px(ctx.spacing.sm)))
                        .px("border-radius", ctx.radius.full)
                        .set("background", accent)
                        .set("color", vars::TEXT_INVERSE)
                        .px("font-size", ctx.font_sizes.small * 0.85),
                )
                .text(out, status)?;
        }
        let list = Element::new("ul").style(
            Style::new()
                .set("margin", "0")
                .px("padding-left", ctx.spacing.lg)
                .px("font-size", size)
                .set("color", vars::TEXT_SECONDARY),
        );
        list.open(out)?;
        for item in phase.items.iter().filter(|i| !i.trim().is_empty()) {
            Element::new("li").text(out, item)?;
        }
        list.close(out)?;
        card.close(out)?;
    }
    row.close(out)
}

pub(super) fn render_agenda(
    out: &mut String,
    props: &AgendaProps,
    style: &AgendaStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let total = props.items.len();
    if total == 0 {
        return empty_state(out, "No agenda items", ctx);
    }
    let shown = truncate(out, total, GridKind::Agenda.max_items(), "agenda items", ctx)?;
    let decision = decide(shown, GridKind::Agenda);
    let show_numbers = style.show_numbers.unwrap_or(true);
    let font_size = if decision.columns > 1 {
        ctx.font_sizes.caption * 1.1
    } else {
        ctx.font_sizes.body
    };

    let grid = grid_container("agenda", decision, ctx);
    grid.open(out)?;
    for (index, item) in props.items.iter().take(shown).enumerate() {
        let row = Element::new("div").class("agenda-item").style(
            Style::new()
                .set("display", "flex")
                .set("align-items", "center")
                .px("gap", ctx.spacing.md)
                .set("border-bottom", format!("1px solid {}", vars::BORDER_LIGHT))
                .set("min-height", "0")
                .set("overflow", "hidden"),
        );
        row.open(out)?;
        if show_numbers {
            badge(36.0, ctx).text(out, &format!("{:02}", index + 1))?;
        }
        let body = Element::new("div").style(
            Style::new()
                .set("flex", "1")
                .set("min-width", "0"),
        );
        body.open(out)?;
        Element::new("div")
            .class("agenda-title")
            .style(
                Style::new()
                    .px("font-size", font_size)
                    .set("font-weight", ctx.font_weights.semibold.to_string()),
            )
            .text(out, item.title.non_blank().unwrap_or("Untitled"))?;
        if let Some(description) = item.description.non_blank() {
            small_text(out, description, ctx.font_sizes.small, vars::TEXT_MUTED)?;
        }
        body.close(out)?;
        if let Some(duration) = item.duration.non_blank() {
            Element::new("span")
                .class("agenda-duration")
                .style(
                    Style::new()
                        .set("flex-shrink", "0")
                        .px("font-size", ctx.font_sizes.small)
                        .set("color", vars::TEXT_SECONDARY),
                )
                .text(out, duration)?;
        }
        row.close(out)?;
    }
    grid.close(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_status_colors() {
        assert_eq!(status_color("Done"), vars::SUCCESS);
        assert_eq!(status_color("in progress"), vars::PRIMARY);
        assert_eq!(status_color("someday"), vars::TEXT_MUTED);
    }
}
