//! Defines constants used throughout HTML rendering.

/// Series colors, cycled by series index.
pub const CHART_COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

// Cardinality caps. Input beyond these is truncated with a visible notice.
pub const MAX_PIE_SERIES: usize = 3;
pub const MAX_GALLERY_IMAGES: usize = 12;
pub const MAX_TEAM_MEMBERS: usize = 6;
pub const MAX_AGENDA_ITEMS: usize = 8;
pub const MAX_FEATURES: usize = 9;
pub const MAX_PRICING_TIERS: usize = 4;
pub const MAX_TESTIMONIALS: usize = 3;
pub const MAX_STATS: usize = 8;
pub const MAX_TIMELINE_EVENTS: usize = 6;
pub const MAX_PROCESS_STEPS: usize = 6;
pub const MAX_ROADMAP_PHASES: usize = 5;

// Line/area charts are drawn in a fixed viewBox and scaled by the browser.
pub const CHART_VIEW_WIDTH: f64 = 800.0;
pub const CHART_VIEW_HEIGHT: f64 = 360.0;
pub const CHART_PADDING: f64 = 40.0;
pub const CHART_MARKER_RADIUS: f64 = 4.0;
pub const AREA_FILL_OPACITY: f64 = 0.2;

// Each pie sits in its own square viewBox.
pub const PIE_VIEW_SIZE: f64 = 400.0;
pub const PIE_RADIUS: f64 = 110.0;
/// Distance of percentage labels beyond the rim.
pub const PIE_LABEL_OFFSET: f64 = 45.0;
/// Slices at or above this sweep are drawn as a full circle; an arc cannot start and end on
/// the same point.
pub const FULL_CIRCLE_DEGREES: f64 = 359.999;

/// Bounds applied to per-slide font size overrides, in px.
pub const MIN_FONT_OVERRIDE: f64 = 8.0;
pub const MAX_FONT_OVERRIDE: f64 = 200.0;

pub const DEFAULT_BULLET_ICON: &str = "•";

/// `var()` references to the custom properties emitted by the theme stylesheet.
pub mod vars {
    pub const PRIMARY: &str = "var(--color-primary)";
    pub const PRIMARY_LIGHT: &str = "var(--color-primary-light)";
    pub const PRIMARY_DARK: &str = "var(--color-primary-dark)";
    pub const PRIMARY_CONTRAST: &str = "var(--color-primary-contrast)";
    pub const SECONDARY: &str = "var(--color-secondary)";
    pub const BACKGROUND: &str = "var(--color-background)";
    pub const BACKGROUND_PAPER: &str = "var(--color-background-paper)";
    pub const BACKGROUND_SUBTLE: &str = "var(--color-background-subtle)";
    pub const SURFACE: &str = "var(--color-surface)";
    pub const SURFACE_MUTED: &str = "var(--color-surface-muted)";
    pub const TEXT: &str = "var(--color-text)";
    pub const TEXT_SECONDARY: &str = "var(--color-text-secondary)";
    pub const TEXT_MUTED: &str = "var(--color-text-muted)";
    pub const TEXT_INVERSE: &str = "var(--color-text-inverse)";
    pub const SUCCESS: &str = "var(--color-success)";
    pub const WARNING: &str = "var(--color-warning)";
    pub const ERROR: &str = "var(--color-error)";
    pub const INFO: &str = "var(--color-info)";
    pub const BORDER_LIGHT: &str = "var(--color-border-light)";
    pub const BORDER: &str = "var(--color-border)";
    pub const FONT_HEADING: &str = "var(--font-heading)";
    pub const FONT_BODY: &str = "var(--font-body)";
    pub const CARD_RADIUS: &str = "var(--card-radius)";
    pub const CARD_PADDING: &str = "var(--card-padding)";
    pub const CARD_SHADOW: &str = "var(--card-shadow)";
    pub const BUTTON_RADIUS: &str = "var(--button-radius)";
    pub const BUTTON_PADDING_X: &str = "var(--button-padding-x)";
    pub const BUTTON_PADDING_Y: &str = "var(--button-padding-y)";
    pub const BUTTON_FONT_WEIGHT: &str = "var(--button-font-weight)";
}
