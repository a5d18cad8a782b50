//! Chart geometry and chart slide rendering.
//!
//! Bars are plain HTML; line, area and pie charts are inline SVG drawn in fixed viewBoxes
//! and scaled to the slide by the browser. All geometry functions are pure.

use log::warn;
use std::f64::consts::PI;

use super::{
    constants::*,
    error::Result,
    structure::{caption, empty_state, heading, truncate},
    utils::{fmt_num, Element, Style},
};
use crate::models::{
    chart::{ChartSeries, ChartType},
    slide::{ChartProps, ChartStyle},
};
use crate::themes::TemplateContext;

/// Smallest and largest numeric value across every series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// `max - min`, or 1 when the range is flat.
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }
}

/// `None` when no series carries a numeric value.
pub fn value_range(data: &[ChartSeries]) -> Option<ValueRange> {
    let mut values = data
        .iter()
        .flat_map(ChartSeries::numeric_values)
        .filter(|v| v.is_finite());
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(ValueRange { min, max })
}

pub fn series_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

/// Data that already looks like percentages is drawn as-is instead of relative to `max`.
pub fn is_percentage_scale(range: ValueRange) -> bool {
    range.max <= 100.0 && range.min >= 0.0 && range.max > 1.0
}

/// Bar length in percent of the track, clamped to `[0, 100]`.
pub fn bar_width_percent(value: f64, range: ValueRange) -> f64 {
    let raw = if is_percentage_scale(range) {
        value
    } else if range.max > 0.0 {
        value / range.max * 100.0
    } else {
        0.0
    };
    if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Drawable region of a line/area chart inside its viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub padding: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PlotArea {
    fn default() -> Self {
        PlotArea {
            padding: CHART_PADDING,
            width: CHART_VIEW_WIDTH - 2.0 * CHART_PADDING,
            height: CHART_VIEW_HEIGHT - 2.0 * CHART_PADDING,
        }
    }
}

impl PlotArea {
    /// x of slot `index` out of `slots`; a single slot is centred.
    pub fn x_at(&self, index: usize, slots: usize) -> f64 {
        if slots <= 1 {
            self.padding + self.width / 2.0
        } else {
            self.padding + index as f64 / (slots - 1) as f64 * self.width
        }
    }

    pub fn y_at(&self, value: f64, range: ValueRange) -> f64 {
        self.padding + self.height - (value - range.min) / range.span() * self.height
    }

    pub fn baseline(&self) -> f64 {
        self.padding + self.height
    }
}

/// Point coordinates for one series; non-numeric entries leave a gap.
pub fn line_points(
    values: &[Option<f64>],
    slots: usize,
    range: ValueRange,
    area: PlotArea,
) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|v| (area.x_at(i, slots), area.y_at(v, range))))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Degrees, starting at -90 (12 o'clock) and increasing clockwise.
    pub start_angle: f64,
    pub sweep: f64,
    pub percentage: f64,
}

/// Slices for the positive values of a series. Empty when nothing positive remains.
pub fn pie_slices(series: &ChartSeries) -> Vec<PieSlice> {
    let points: Vec<(&str, f64)> = series
        .points()
        .filter_map(|(label, value)| value.filter(|v| v.is_finite() && *v > 0.0).map(|v| (label, v)))
        .collect();
    let total: f64 = points.iter().map(|(_, v)| v).sum();
    if !total.is_finite() || total <= 0.0 {
        return Vec::new();
    }
    let mut angle = -90.0;
    points
        .into_iter()
        .map(|(label, value)| {
            let sweep = value / total * 360.0;
            let slice = PieSlice {
                label: label.to_string(),
                value,
                start_angle: angle,
                sweep,
                percentage: value / total * 100.0,
            };
            angle += sweep;
            slice
        })
        .collect()
}

pub fn polar(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

/// `M center L p1 A r r 0 large 1 p2 Z`.
pub fn arc_path(cx: f64, cy: f64, radius: f64, start_angle: f64, sweep: f64) -> String {
    let (x1, y1) = polar(cx, cy, radius, start_angle);
    let (x2, y2) = polar(cx, cy, radius, start_angle + sweep);
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(radius),
        fmt_num(radius),
        large_arc,
        fmt_num(x2),
        fmt_num(y2)
    )
}

/// Label anchor on the slice's mid-angle, just outside the rim.
pub fn label_position(cx: f64, cy: f64, slice: &PieSlice) -> (f64, f64) {
    polar(
        cx,
        cy,
        PIE_RADIUS + PIE_LABEL_OFFSET,
        slice.start_angle + slice.sweep / 2.0,
    )
}

pub fn percent_label(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

fn series_name(series: &ChartSeries, index: usize) -> String {
    series
        .name
        .non_blank()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Series {}", index + 1))
}

pub(super) fn render_chart(
    out: &mut String,
    props: &ChartProps,
    style: &ChartStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;

    let skipped: usize = props
        .data
        .iter()
        .map(|s| s.points().filter(|(_, v)| v.is_none()).count())
        .sum();
    if skipped > 0 {
        warn!(
            "Chart '{}': ignoring {} non-numeric value(s)",
            props.title, skipped
        );
    }

    let container = Element::new("div")
        .class(&format!("chart chart-{}", props.chart_type))
        .attr("data-chart-type", props.chart_type.as_str())
        .style(
            Style::new()
                .set("flex", "1")
                .set("display", "flex")
                .set("flex-direction", "column")
                .set("min-height", "0"),
        );
    container.open(out)?;
    match value_range(&props.data) {
        None => empty_state(out, "No data", ctx)?,
        Some(range) => {
            let show_legend = style.show_legend.unwrap_or(true);
            let show_values = style.show_values.unwrap_or(true);
            match props.chart_type {
                ChartType::Bar => render_bars(out, &props.data, range, show_legend, show_values, ctx)?,
                ChartType::Line => render_lines(out, &props.data, range, false, show_legend, show_values, ctx)?,
                ChartType::Area => render_lines(out, &props.data, range, true, show_legend, show_values, ctx)?,
                ChartType::Pie => render_pies(out, &props.data, show_legend, ctx)?,
            }
        }
    }
    container.close(out)?;

    if let Some(text) = props.description.non_blank() {
        caption(out, text, ctx)?;
    }
    Ok(())
}

fn legend<'a>(
    out: &mut String,
    entries: impl Iterator<Item = (String, &'a str)>,
    ctx: &TemplateContext,
) -> Result<()> {
    let list = Element::new("div").class("chart-legend").style(
        Style::new()
            .set("display", "flex")
            .set("flex-wrap", "wrap")
            .set("justify-content", "center")
            .px("gap", ctx.spacing.md)
            .px("margin-bottom", ctx.spacing.sm)
            .px("font-size", ctx.font_sizes.small)
            .set("color", vars::TEXT_SECONDARY),
    );
    list.open(out)?;
    for (name, color) in entries {
        let item = Element::new("span").class("legend-item").style(
            Style::new()
                .set("display", "inline-flex")
                .set("align-items", "center")
                .px("gap", ctx.spacing.xs * 1.5),
        );
        item.open(out)?;
        Element::new("span")
            .class("legend-swatch")
            .style(
                Style::new()
                    .set("display", "inline-block")
                    .set("width", "12px")
                    .set("height", "12px")
                    .px("border-radius", ctx.radius.sm)
                    .set("background", color),
            )
            .wrap(out, "")?;
        Element::new("span").text(out, &name)?;
        item.close(out)?;
    }
    list.close(out)
}

fn render_bars(
    out: &mut String,
    data: &[ChartSeries],
    range: ValueRange,
    show_legend: bool,
    show_values: bool,
    ctx: &TemplateContext,
) -> Result<()> {
    if show_legend {
        legend(
            out,
            data.iter()
                .enumerate()
                .map(|(i, s)| (series_name(s, i), series_color(i))),
            ctx,
        )?;
    }

    let labels: &[String] = data.first().map(|s| s.labels.as_slice()).unwrap_or(&[]);
    let bars = (labels.len() * data.len()).max(1) as f64;
    let available = f64::from(ctx.slide_size.height) - 2.0 * ctx.spacing.slide_padding - 160.0;
    let thickness = (available / bars * 0.6).clamp(6.0, 40.0);

    let groups = Element::new("div").class("bar-groups").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("justify-content", "space-around")
            .px("gap", ctx.spacing.sm)
            .set("min-height", "0")
            .set("overflow", "hidden"),
    );
    groups.open(out)?;
    for (index, label) in labels.iter().enumerate() {
        let group = Element::new("div").class("bar-group").style(
            Style::new()
                .set("display", "flex")
                .set("align-items", "center")
                .px("gap", ctx.spacing.md),
        );
        group.open(out)?;
        Element::new("div")
            .class("bar-label")
            .style(
                Style::new()
                    .set("width", "120px")
                    .set("flex-shrink", "0")
                    .set("text-align", "right")
                    .px("font-size", ctx.font_sizes.caption)
                    .set("color", vars::TEXT_SECONDARY)
                    .set("overflow", "hidden")
                    .set("text-overflow", "ellipsis")
                    .set("white-space", "nowrap"),
            )
            .text(out, label)?;

        let track = Element::new("div").class("bar-track").style(
            Style::new()
                .set("flex", "1")
                .set("display", "flex")
                .set("flex-direction", "column")
                .set("gap", "4px")
                .set("min-width", "0"),
        );
        track.open(out)?;
        for (series_index, series) in data.iter().enumerate() {
            let Some(value) = series.value_at(index) else {
                continue;
            };
            let row = Element::new("div").class("bar-row").style(
                Style::new()
                    .set("display", "flex")
                    .set("align-items", "center")
                    .px("gap", ctx.spacing.sm),
            );
            row.open(out)?;
            let fill_track = Element::new("div").style(Style::new().set("flex", "1"));
            fill_track.open(out)?;
            Element::new("div")
                .class("bar")
                .attr("data-series", series_index.to_string())
                .style(
                    Style::new()
                        .set("width", format!("{}%", fmt_num(bar_width_percent(value, range))))
                        .px("height", thickness)
                        .set("background", series_color(series_index))
                        .px("border-radius", ctx.radius.sm),
                )
                .wrap(out, "")?;
            fill_track.close(out)?;
            if show_values {
                Element::new("span")
                    .class("bar-value")
                    .style(
                        Style::new()
                            .set("min-width", "48px")
                            .px("font-size", ctx.font_sizes.small)
                            .set("font-weight", ctx.font_weights.semibold.to_string())
                            .set("color", vars::TEXT),
                    )
                    .text(out, &fmt_num(value))?;
            }
            row.close(out)?;
        }
        track.close(out)?;
        group.close(out)?;
    }
    groups.close(out)
}

fn svg_root(view_width: f64, view_height: f64) -> Element {
    Element::new("svg")
        .class("chart-svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr(
            "viewBox",
            format!("0 0 {} {}", fmt_num(view_width), fmt_num(view_height)),
        )
        .attr("preserveAspectRatio", "xMidYMid meet")
        .style(
            Style::new()
                .set("width", "100%")
                .set("flex", "1")
                .set("min-height", "0"),
        )
}

fn svg_text(x: f64, y: f64, anchor: &str, size: f64, fill: &str) -> Element {
    Element::new("text")
        .attr("x", fmt_num(x))
        .attr("y", fmt_num(y))
        .attr("text-anchor", anchor)
        .attr("dominant-baseline", "middle")
        .style(Style::new().px("font-size", size).set("fill", fill))
}

fn render_lines(
    out: &mut String,
    data: &[ChartSeries],
    range: ValueRange,
    fill_area: bool,
    show_legend: bool,
    show_values: bool,
    ctx: &TemplateContext,
) -> Result<()> {
    if show_legend {
        legend(
            out,
            data.iter()
                .enumerate()
                .map(|(i, s)| (series_name(s, i), series_color(i))),
            ctx,
        )?;
    }

    let area = PlotArea::default();
    let slots = data.iter().map(ChartSeries::len).max().unwrap_or(0);
    let axis_labels: &[String] = data
        .iter()
        .find(|s| s.len() == slots)
        .map(|s| &s.labels[..slots])
        .unwrap_or(&[]);

    let svg = svg_root(CHART_VIEW_WIDTH, CHART_VIEW_HEIGHT);
    svg.open(out)?;

    let axis_style = || Style::new().set("stroke", vars::BORDER).set("stroke-width", "1");
    Element::new("line")
        .attr("x1", fmt_num(area.padding))
        .attr("y1", fmt_num(area.baseline()))
        .attr("x2", fmt_num(area.padding + area.width))
        .attr("y2", fmt_num(area.baseline()))
        .style(axis_style())
        .void(out)?;
    Element::new("line")
        .attr("x1", fmt_num(area.padding))
        .attr("y1", fmt_num(area.padding))
        .attr("x2", fmt_num(area.padding))
        .attr("y2", fmt_num(area.baseline()))
        .style(axis_style())
        .void(out)?;
    svg_text(area.padding - 8.0, area.padding, "end", 12.0, vars::TEXT_MUTED)
        .text(out, &fmt_num(range.max))?;
    svg_text(area.padding - 8.0, area.baseline(), "end", 12.0, vars::TEXT_MUTED)
        .text(out, &fmt_num(range.min))?;
    for (i, label) in axis_labels.iter().enumerate() {
        svg_text(area.x_at(i, slots), area.baseline() + 20.0, "middle", 12.0, vars::TEXT_SECONDARY)
            .text(out, label)?;
    }

    for (series_index, series) in data.iter().enumerate() {
        let color = series_color(series_index);
        let values: Vec<Option<f64>> = series.points().map(|(_, v)| v).collect();
        let points = line_points(&values, slots, range, area);
        if points.is_empty() {
            continue;
        }

        if fill_area && points.len() > 1 {
            let mut d = format!("M {} {}", fmt_num(points[0].0), fmt_num(area.baseline()));
            for (x, y) in &points {
                d.push_str(&format!(" L {} {}", fmt_num(*x), fmt_num(*y)));
            }
            if let Some((last_x, _)) = points.last() {
                d.push_str(&format!(" L {} {} Z", fmt_num(*last_x), fmt_num(area.baseline())));
            }
            Element::new("path")
                .class("chart-area")
                .attr("d", d)
                .style(
                    Style::new()
                        .set("fill", color)
                        .set("fill-opacity", fmt_num(AREA_FILL_OPACITY))
                        .set("stroke", "none"),
                )
                .void(out)?;
        }

        let polyline: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
            .collect();
        Element::new("polyline")
            .class("chart-line")
            .attr("points", polyline.join(" "))
            .style(
                Style::new()
                    .set("fill", "none")
                    .set("stroke", color)
                    .set("stroke-width", "3")
                    .set("stroke-linejoin", "round"),
            )
            .void(out)?;

        for (x, y) in &points {
            Element::new("circle")
                .attr("cx", fmt_num(*x))
                .attr("cy", fmt_num(*y))
                .attr("r", fmt_num(CHART_MARKER_RADIUS))
                .style(
                    Style::new()
                        .set("fill", color)
                        .set("stroke", vars::BACKGROUND)
                        .set("stroke-width", "2"),
                )
                .void(out)?;
        }
        if show_values && slots <= 12 {
            for ((x, y), value) in points.iter().zip(values.iter().flatten()) {
                svg_text(*x, y - 14.0, "middle", 11.0, vars::TEXT_SECONDARY)
                    .text(out, &fmt_num(*value))?;
            }
        }
    }
    svg.close(out)
}

fn render_pies(
    out: &mut String,
    data: &[ChartSeries],
    show_legend: bool,
    ctx: &TemplateContext,
) -> Result<()> {
    let shown = truncate(out, data.len(), MAX_PIE_SERIES, "series", ctx)?;

    let row = Element::new("div").class("pie-row").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .px("gap", ctx.spacing.lg)
            .set("min-height", "0"),
    );
    row.open(out)?;
    let center = PIE_VIEW_SIZE / 2.0;
    for (series_index, series) in data.iter().take(shown).enumerate() {
        let cell = Element::new("div").class("pie").style(
            Style::new()
                .set("flex", "1")
                .set("display", "flex")
                .set("flex-direction", "column")
                .set("align-items", "center")
                .set("min-width", "0")
                .set("min-height", "0"),
        );
        cell.open(out)?;
        Element::new("div")
            .class("pie-title")
            .style(
                Style::new()
                    .px("font-size", ctx.font_sizes.caption)
                    .set("font-weight", ctx.font_weights.semibold.to_string())
                    .set("color", vars::TEXT),
            )
            .text(out, &series_name(series, series_index))?;

        let slices = pie_slices(series);
        if slices.is_empty() {
            empty_state(out, "No data", ctx)?;
            cell.close(out)?;
            continue;
        }

        let svg = svg_root(PIE_VIEW_SIZE, PIE_VIEW_SIZE);
        svg.open(out)?;
        for (i, slice) in slices.iter().enumerate() {
            let paint = Style::new()
                .set("fill", series_color(i))
                .set("stroke", vars::BACKGROUND)
                .set("stroke-width", "2");
            if slice.sweep >= FULL_CIRCLE_DEGREES {
                Element::new("circle")
                    .class("pie-slice")
                    .attr("cx", fmt_num(center))
                    .attr("cy", fmt_num(center))
                    .attr("r", fmt_num(PIE_RADIUS))
                    .attr("data-angle", fmt_num(slice.sweep))
                    .style(paint)
                    .void(out)?;
            } else {
                Element::new("path")
                    .class("pie-slice")
                    .attr("d", arc_path(center, center, PIE_RADIUS, slice.start_angle, slice.sweep))
                    .attr("data-angle", fmt_num(slice.sweep))
                    .style(paint)
                    .void(out)?;
            }
        }
        for slice in &slices {
            let (x, y) = label_position(center, center, slice);
            svg_text(x, y, "middle", 14.0, vars::TEXT)
                .class("pie-label")
                .text(out, &percent_label(slice.percentage))?;
        }
        svg.close(out)?;

        if show_legend {
            legend(
                out,
                slices
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (s.label.clone(), series_color(i))),
                ctx,
            )?;
        }
        cell.close(out)?;
    }
    row.close(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn range(min: f64, max: f64) -> ValueRange {
        ValueRange { min, max }
    }

    #[test]
    fn range_spans_all_series_and_skips_gaps() {
        let mut a = ChartSeries::new("a", &["x", "y"], &[3.0, 9.0]);
        a.values.push(crate::models::chart::ChartValue(None));
        let b = ChartSeries::new("b", &["x"], &[-2.0]);
        assert_eq!(value_range(&[a, b]), Some(range(-2.0, 9.0)));
        assert_eq!(value_range(&[]), None);
        let empty = ChartSeries::new("e", &["x"], &[]);
        assert_eq!(value_range(&[empty]), None);
    }

    #[test]
    fn colors_cycle() {
        assert_eq!(series_color(0), "#3b82f6");
        assert_eq!(series_color(5), "#3b82f6");
        assert_eq!(series_color(6), "#10b981");
    }

    #[test]
    fn bar_widths() {
        assert_eq!(bar_width_percent(90.0, range(75.0, 95.0)), 90.0);
        assert_eq!(bar_width_percent(500.0, range(0.0, 1000.0)), 50.0);
        assert_eq!(bar_width_percent(0.5, range(0.0, 1.0)), 50.0);
        assert_eq!(bar_width_percent(-5.0, range(-10.0, 200.0)), 0.0);
        assert_eq!(bar_width_percent(1.0, range(-3.0, -1.0)), 0.0);
        assert_eq!(bar_width_percent(120.0, range(10.0, 100.0)), 100.0);
    }

    #[test]
    fn line_geometry() {
        let area = PlotArea {
            padding: 10.0,
            width: 100.0,
            height: 50.0,
        };
        let pts = line_points(&[Some(0.0), None, Some(10.0)], 3, range(0.0, 10.0), area);
        assert_eq!(pts, vec![(10.0, 60.0), (110.0, 10.0)]);
        let single = line_points(&[Some(4.0)], 1, range(4.0, 4.0), area);
        assert_eq!(single, vec![(60.0, 60.0)]);
    }

    #[test]
    fn pie_geometry() {
        let series = ChartSeries::new("s", &["a", "b", "c"], &[1.0, 3.0, 0.0]);
        let slices = pie_slices(&series);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].start_angle, -90.0);
        assert_eq!(slices[0].sweep, 90.0);
        assert_eq!(slices[1].start_angle, 0.0);
        assert_eq!(slices[1].percentage, 75.0);
        assert_eq!(arc_path(200.0, 200.0, 100.0, -90.0, 90.0), "M 200 200 L 200 100 A 100 100 0 0 1 300 200 Z");
        assert!(arc_path(0.0, 0.0, 1.0, 0.0, 270.0).contains(" 0 1 1 "));
        let (x, y) = label_position(200.0, 200.0, &slices[0]);
        assert!((x - (200.0 + 155.0 * (PI / 4.0).cos())).abs() < 1e-9);
        assert!(y < 200.0);
        assert!(pie_slices(&ChartSeries::new("z", &["a"], &[0.0])).is_empty());
    }

    proptest! {
        #[test]
        fn pie_angles_and_labels_sum_to_whole(values in prop::collection::vec(0.01f64..1.0e6, 1..12)) {
            let labels: Vec<String> = (0..values.len()).map(|i| format!("l{i}")).collect();
            let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let series = ChartSeries::new("p", &label_refs, &values);
            let slices = pie_slices(&series);
            prop_assert_eq!(slices.len(), values.len());
            let angles: f64 = slices.iter().map(|s| s.sweep).sum();
            prop_assert!((angles - 360.0).abs() < 1e-6);
            let labelled: f64 = slices
                .iter()
                .map(|s| percent_label(s.percentage).trim_end_matches('%').parse::<f64>().unwrap())
                .sum();
            prop_assert!((labelled - 100.0).abs() <= 0.05 * values.len() as f64 + 1e-9);
        }
    }
}
