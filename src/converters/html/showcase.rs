//! Card-grid slides: feature grid, team profile, pricing and testimonial.

use super::{
    constants::*,
    error::Result,
    grid::{decide, GridKind},
    structure::{
        column_card, empty_state, grid_container, heading, image_or_placeholder, small_text,
        subheading, truncate,
    },
    utils::{escape_html, font_override, px, Element, Style},
};
use crate::models::slide::{
    FeatureGridProps, FeatureGridStyle, PricingProps, PricingStyle, PricingTier,
    TeamMember, TeamProfileProps, TeamProfileStyle, TestimonialProps, TestimonialStyle,
};
use crate::themes::TemplateContext;

pub(super) fn render_feature_grid(
    out: &mut String,
    props: &FeatureGridProps,
    style: &FeatureGridStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let total = props.features.len();
    if total == 0 {
        return empty_state(out, "No features", ctx);
    }
    let shown = truncate(out, total, GridKind::FeatureGrid.max_items(), "features", ctx)?;
    let decision = decide(shown, GridKind::FeatureGrid);
    let icon_size = font_override(style.icon_size, 36.0);
    let grid = grid_container("feature-grid", decision, ctx);
    grid.open(out)?;
    for feature in props.features.iter().take(shown) {
        let card = Element::new("div").class("feature-card").style(column_card(ctx.spacing.sm));
        card.open(out)?;
        if let Some(icon) = feature.icon.non_blank() {
            Element::new("div")
                .class("feature-icon")
                .style(
                    Style::new()
                        .px("font-size", icon_size)
                        .set("line-height", "1")
                        .set("color", vars::PRIMARY),
                )
                .text(out, icon)?;
        }
        subheading(out, &feature.title, ctx.font_sizes.caption * 1.2, ctx)?;
        if let Some(description) = feature.description.non_blank() {
            small_text(out, description, ctx.font_sizes.small, vars::TEXT_SECONDARY)?;
        }
        card.close(out)?;
    }
    grid.close(out)
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters.to_uppercase()
    }
}

fn team_card(
    out: &mut String,
    member: Option<&TeamMember>,
    show_bio: bool,
    ctx: &TemplateContext,
) -> Result<()> {
    let card = Element::new("div").class("team-card").style(
        column_card(ctx.spacing.sm)
            .set("align-items", "center")
            .set("text-align", "center"),
    );
    card.open(out)?;
    let avatar = Element::new("div").class("team-avatar").style(
        Style::new()
            .set("width", "96px")
            .set("height", "96px")
            .set("flex-shrink", "0")
            .px("border-radius", ctx.radius.full)
            .set("overflow", "hidden")
            .set("display", "flex")
            .set("align-items", "center")
            .set("justify-content", "center")
            .set("background", vars::PRIMARY_LIGHT)
            .set("color", vars::PRIMARY_CONTRAST)
            .px("font-size", ctx.font_sizes.subtitle)
            .set("font-weight", ctx.font_weights.bold.to_string()),
    );
    avatar.open(out)?;
    match member {
        Some(member) if !member.image.is_blank() => {
            image_or_placeholder(out, &member.image, &member.name, "cover", ctx)?
        }
        Some(member) => out.push_str(&escape_html(&initials(&member.name))),
        None => out.push('?'),
    }
    avatar.close(out)?;

    match member {
        Some(member) => {
            subheading(
                out,
                member.name.non_blank().unwrap_or("Team member"),
                ctx.font_sizes.caption * 1.2,
                ctx,
            )?;
            if let Some(role) = member.role.non_blank() {
                Element::new("div")
                    .class("team-role")
                    .style(
                        Style::new()
                            .px("font-size", ctx.font_sizes.small)
                            .set("color", vars::PRIMARY)
                            .set("font-weight", ctx.font_weights.medium.to_string()),
                    )
                    .text(out, role)?;
            }
            if show_bio {
                if let Some(bio) = member.bio.non_blank() {
                    small_text(out, bio, ctx.font_sizes.small, vars::TEXT_SECONDARY)?;
                }
            }
        }
        None => subheading(out, "Team member", ctx.font_sizes.caption * 1.2, ctx)?,
    }
    card.close(out)
}

pub(super) fn render_team_profile(
    out: &mut String,
    props: &TeamProfileProps,
    style: &TeamProfileStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let total = props.members.len();
    let shown = truncate(out, total, GridKind::Team.max_items(), "team members", ctx)?;
    let decision = decide(shown, GridKind::Team);
    let show_bio = style.show_bio.unwrap_or(true);
    let grid = grid_container("team-grid", decision, ctx);
    grid.open(out)?;
    if shown == 0 {
        for _ in 0..decision.capacity() {
            team_card(out, None, show_bio, ctx)?;
        }
    } else {
        for member in props.members.iter().take(shown) {
            team_card(out, Some(member), show_bio, ctx)?;
        }
    }
    grid.close(out)
}

/// Price with the currency prefix, unless the price already carries a symbol or code.
fn display_price(price: &str, currency: &str) -> String {
    let price = price.trim();
    let currency = currency.trim();
    let numeric = price
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);
    if numeric && !currency.is_empty() && !price.contains(currency) {
        format!("{}{}", currency, price)
    } else {
        price.to_string()
    }
}

fn pricing_card(
    out: &mut String,
    tier: Option<&PricingTier>,
    currency: &str,
    ctx: &TemplateContext,
) -> Result<()> {
    let highlighted = tier.map(|t| t.highlighted).unwrap_or(false);
    let border = if highlighted {
        format!("2px solid {}", vars::PRIMARY)
    } else {
        format!("1px solid {}", vars::BORDER_LIGHT)
    };
    let card = Element::new("div")
        .class(if highlighted {
            "pricing-card pricing-card-highlighted"
        } else {
            "pricing-card"
        })
        .style(
            column_card(ctx.spacing.sm)
                .set("border", border)
                .set("position", "relative"),
        );
    card.open(out)?;
    let Some(tier) = tier else {
        subheading(out, "Plan", ctx.font_sizes.subtitle, ctx)?;
        empty_state(out, "No pricing details", ctx)?;
        return card.close(out);
    };
    if highlighted {
        Element::new("span")
            .class("pricing-badge")
            .style(
                Style::new()
                    .set("align-self", "flex-start")
                    .set("padding", format!("2px {}", px(ctx.spacing.sm)))
                    .px("border-radius", ctx.radius.full)
                    .set("background", vars::PRIMARY)
                    .set("color", vars::PRIMARY_CONTRAST)
                    .px("font-size", ctx.font_sizes.small * 0.85)
                    .set("font-weight", ctx.font_weights.semibold.to_string()),
            )
            .text(out, "Recommended")?;
    }
    subheading(
        out,
        tier.name.non_blank().unwrap_or("Plan"),
        ctx.font_sizes.subtitle,
        ctx,
    )?;
    let price_row = Element::new("div").class("pricing-price").style(
        Style::new()
            .set("display", "flex")
            .set("align-items", "baseline")
            .px("gap", ctx.spacing.xs),
    );
    price_row.open(out)?;
    Element::new("span")
        .style(
            Style::new()
                .px("font-size", ctx.font_sizes.stats * 0.8)
                .set("font-weight", ctx.font_weights.bold.to_string())
                .set("font-family", vars::FONT_HEADING)
                .set("color", vars::PRIMARY),
        )
        .text(out, &display_price(&tier.price, currency))?;
    if let Some(period) = tier.period.non_blank() {
        Element::new("span")
            .style(
                Style::new()
                    .px("font-size", ctx.font_sizes.small)
                    .set("color", vars::TEXT_MUTED),
            )
            .text(out, &format!("/ {}", period.trim_start_matches('/').trim()))?;
    }
    price_row.close(out)?;
    if let Some(description) = tier.description.non_blank() {
        small_text(out, description, ctx.font_sizes.small, vars::TEXT_SECONDARY)?;
    }
    let list = Element::new("ul").style(
        Style::new()
            .set("list-style", "none")
            .set("margin", "0")
            .set("padding", "0")
            .set("flex", "1")
            .set("display", "flex")
            .set("flex-direction", "column")
            .px("gap", ctx.spacing.xs)
            .px("font-size", ctx.font_sizes.small),
    );
    list.open(out)?;
    for feature in tier.features.iter().filter(|f| !f.trim().is_empty()) {
        Element::new("li").text(out, &format!("✓ {}", feature))?;
    }
    list.close(out)?;
    if let Some(cta) = tier.cta.non_blank() {
        Element::new("div")
            .class("pricing-cta")
            .style(
                Style::new()
                    .set("text-align", "center")
                    .set("padding", format!("{} {}", vars::BUTTON_PADDING_Y, vars::BUTTON_PADDING_X))
                    .set("border-radius", vars::BUTTON_RADIUS)
                    .set("font-weight", vars::BUTTON_FONT_WEIGHT)
                    .set("background", if highlighted { vars::PRIMARY } else { vars::SURFACE_MUTED })
                    .set("color", if highlighted { vars::PRIMARY_CONTRAST } else { vars::TEXT }),
            )
            .text(out, cta)?;
    }
    card.close(out)
}

pub(super) fn render_pricing(
    out: &mut String,
    props: &PricingProps,
    style: &PricingStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let total = props.tiers.len();
    let shown = truncate(out, total, GridKind::Pricing.max_items(), "pricing tiers", ctx)?;
    let decision = decide(shown, GridKind::Pricing);
    let grid = grid_container("pricing-grid", decision, ctx);
    grid.open(out)?;
    if shown == 0 {
        for _ in 0..decision.capacity() {
            pricing_card(out, None, &style.currency, ctx)?;
        }
    } else {
        for tier in props.tiers.iter().take(shown) {
            pricing_card(out, Some(tier), &style.currency, ctx)?;
        }
    }
    grid.close(out)
}

fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub(super) fn render_testimonial(
    out: &mut String,
    props: &TestimonialProps,
    style: &TestimonialStyle,
    ctx: &TemplateContext,
) -> Result<()> {
    heading(out, &props.title, ctx)?;
    let total = props.testimonials.len();
    if total == 0 {
        return empty_state(out, "No testimonials", ctx);
    }
    let shown = truncate(out, total, MAX_TESTIMONIALS, "testimonials", ctx)?;
    let size = font_override(style.font_size, ctx.font_sizes.caption * 1.1);
    let row = Element::new("div").class("testimonials").style(
        Style::new()
            .set("flex", "1")
            .set("display", "flex")
            .px("gap", ctx.spacing.lg)
            .set("align-items", "stretch")
            .set("min-height", "0"),
    );
    row.open(out)?;
    for entry in props.testimonials.iter().take(shown) {
        let card = Element::new("figure").class("testimonial-card").style(
            column_card(ctx.spacing.md)
                .set("flex", "1")
                .set("margin", "0"),
        );
        card.open(out)?;
        if let Some(rating) = entry.rating.filter(|r| r.is_finite()) {
            Element::new("div")
                .class("rating")
                .attr("aria-label", format!("{} out of 5", rating.clamp(0.0, 5.0)))
                .style(Style::new().set("color", vars::WARNING))
                .text(out, &stars(rating))?;
        }
        Element::new("blockquote")
            .style(
                Style::new()
                    .set("margin", "0")
                    .set("flex", "1")
                    .px("font-size", size)
                    .set("font-style", "italic")
                    .set("line-height", ctx.line_heights.relaxed.to_string()),
            )
            .text(out, &format!("\u{201C}{}\u{201D}", entry.quote.trim()))?;
        let affiliation: Vec<&str> = [entry.role.non_blank(), entry.company.non_blank()]
            .into_iter()
            .flatten()
            .collect();
        let caption = Element::new("figcaption").style(
            Style::new()
                .px("font-size", ctx.font_sizes.small)
                .set("color", vars::TEXT_SECONDARY),
        );
        caption.open(out)?;
        Element::new("strong")
            .style(Style::new().set("color", vars::TEXT))
            .text(out, entry.author.non_blank().unwrap_or("Anonymous"))?;
        if !affiliation.is_empty() {
            Element::new("div").text(out, &affiliation.join(", "))?;
        }
        caption.close(out)?;
        card.close(out)?;
    }
    row.close(out)
}
