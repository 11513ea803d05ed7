//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The user file is
//! sparse: stock defaults are the base layer and every key the user writes
//! overrides the matching default.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml      # Optional; absent means stock defaults
//! └── assets/          # Copied verbatim to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "assets"
//!
//! [site]
//! title = "Portfolio"
//! owner = "Alex Morgan"
//!
//! [scroll]
//! navbar_offset = 50.0       # navbar gets `scrolled` past this offset
//! back_to_top_offset = 500.0 # back-to-top gets `visible` past this offset
//!
//! [reveal]
//! threshold = 0.1
//! root_margin_bottom = -50.0
//!
//! [counters]
//! duration_ms = 2000
//! frame_interval_ms = 16
//! threshold = 0.5
//!
//! [contact]
//! submit_delay_ms = 1500
//! notice_ms = 5000
//! name_min = 2
//! message_min = 10
//! message_max = 500
//! subjects = ["general", "project", "collaboration", "other"]
//!
//! [projects]
//! featured_count = 3
//! activation_delay_ms = 100
//!
//! [[stats]]
//! label = "Projects Completed"
//! count = 50
//!
//! [[project]]
//! title = "Weather Dashboard"
//! description = "Real-time weather application..."
//! tags = ["API", "JavaScript", "CSS"]
//! category = "web"            # web | design | app
//! icon = "fa-cloud-sun"
//! demo_url = "#"
//! source_url = "#"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key by key; arrays replace. Writing a single `[[project]]`
//! therefore replaces the whole stock catalog rather than appending to it.
//!
//! Unknown keys are rejected to catch typos early.

use crate::catalog::{self, Catalog, Project};
use crate::validate::Limits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the source root) copied verbatim into the output.
    pub assets_dir: String,
    /// Identity and copy shown on the pages.
    pub site: SiteInfo,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Navbar / back-to-top offsets.
    pub scroll: ScrollConfig,
    /// Reveal-on-scroll trigger.
    pub reveal: RevealConfig,
    /// Stat counter animation.
    pub counters: CounterConfig,
    /// Contact form limits and timings.
    pub contact: ContactConfig,
    /// Project grid behaviour.
    pub projects: ProjectsConfig,
    /// Headline numbers animated on the home page.
    pub stats: Vec<Stat>,
    /// The project catalog, one `[[project]]` table per entry.
    #[serde(rename = "project")]
    pub catalog: Vec<Project>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            site: SiteInfo::default(),
            colors: ColorConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            counters: CounterConfig::default(),
            contact: ContactConfig::default(),
            projects: ProjectsConfig::default(),
            stats: default_stats(),
            catalog: catalog::stock_projects(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Validation(msg.into()));

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return fail("reveal.threshold must be between 0 and 1");
        }
        if !(0.0..=1.0).contains(&self.counters.threshold) {
            return fail("counters.threshold must be between 0 and 1");
        }
        if self.counters.frame_interval_ms == 0 {
            return fail("counters.frame_interval_ms must be non-zero");
        }
        if self.counters.duration_ms == 0 {
            return fail("counters.duration_ms must be non-zero");
        }
        if self.scroll.navbar_offset < 0.0 || self.scroll.back_to_top_offset < 0.0 {
            return fail("scroll offsets must not be negative");
        }
        if self.contact.name_min == 0 || self.contact.message_min == 0 {
            return fail("contact minimum lengths must be at least 1");
        }
        if self.contact.message_min > self.contact.message_max {
            return fail("contact.message_min must not exceed contact.message_max");
        }
        if self.contact.subjects.is_empty() {
            return fail("contact.subjects must not be empty");
        }
        if self.contact.subjects.iter().any(|s| s.trim().is_empty()) {
            return fail("contact.subjects must not contain blank entries");
        }
        if let Some(p) = self.catalog.iter().find(|p| p.title.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "project with icon '{}' has a blank title",
                p.icon
            )));
        }
        if self.stats.iter().any(|s| s.label.trim().is_empty()) {
            return fail("stats labels must not be blank");
        }
        Ok(())
    }

    /// The catalog as an immutable value for rendering.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.catalog.clone())
    }

    /// Contact field limits for the validators.
    pub fn limits(&self) -> Limits {
        Limits {
            name_min: self.contact.name_min,
            message_min: self.contact.message_min,
            message_max: self.contact.message_max,
        }
    }
}

/// Identity and copy shown on the pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Browser title and navbar brand.
    pub title: String,
    /// Name in the hero and footer.
    pub owner: String,
    /// One-line hero subtitle.
    pub tagline: String,
    /// Markdown rendered in the home page "About" section.
    pub bio: String,
    /// Footer link; omitted when empty.
    pub github_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            owner: "Alex Morgan".to_string(),
            tagline: "Designer & developer building calm, fast interfaces.".to_string(),
            bio: "I design and build **websites, apps and design systems**. \
                  Most of my work starts with a sketch and ends with a deploy."
                .to_string(),
            github_url: String::new(),
        }
    }
}

/// Scroll offsets (pixels) for the navbar and back-to-top button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Navbar carries `scrolled` once the offset is strictly greater.
    pub navbar_offset: f64,
    /// Back-to-top carries `visible` once the offset is strictly greater.
    pub back_to_top_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_offset: 50.0,
            back_to_top_offset: 500.0,
        }
    }
}

/// Reveal-on-scroll trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Visible fraction that counts as "entered".
    pub threshold: f64,
    /// Pixels added to the viewport's bottom edge (negative shrinks it).
    pub root_margin_bottom: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: -50.0,
        }
    }
}

/// Stat counter animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub duration_ms: u64,
    pub frame_interval_ms: u64,
    /// Visible fraction that starts the animation.
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            frame_interval_ms: 16,
            threshold: 0.5,
        }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Contact form limits and timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Latency of the simulated submission.
    pub submit_delay_ms: u64,
    /// How long a status notice stays up.
    pub notice_ms: u64,
    pub name_min: usize,
    pub message_min: usize,
    pub message_max: usize,
    /// `<option>` values of the subject select, in order.
    pub subjects: Vec<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            notice_ms: 5000,
            name_min: 2,
            message_min: 10,
            message_max: 500,
            subjects: ["general", "project", "collaboration", "other"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

/// Project grid behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsConfig {
    /// How many catalog entries the home page features.
    pub featured_count: usize,
    /// Delay before freshly rendered cards are marked active.
    pub activation_delay_ms: u64,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            featured_count: 3,
            activation_delay_ms: 100,
        }
    }
}

impl ProjectsConfig {
    pub fn activation_delay(&self) -> Duration {
        Duration::from_millis(self.activation_delay_ms)
    }
}

/// One animated headline number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub label: String,
    pub count: u64,
}

fn default_stats() -> Vec<Stat> {
    [
        ("Projects Completed", 50),
        ("Happy Clients", 30),
        ("Years Experience", 5),
    ]
    .into_iter()
    .map(|(label, count)| Stat {
        label: label.to_string(),
        count,
    })
    .collect()
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and navbar background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text; also the character counter within the limit.
    pub text_dim: String,
    /// Buttons, links, active filter.
    pub accent: String,
    /// Field errors, error notices, counter over the limit.
    pub error: String,
    /// Valid fields and success notices.
    pub success: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_dim: "#64748b".to_string(),
            accent: "#6366f1".to_string(),
            error: "#dc2626".to_string(),
            success: "#16a34a".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b1120".to_string(),
            surface: "#111827".to_string(),
            text: "#e2e8f0".to_string(),
            text_dim: "#94a3b8".to_string(),
            accent: "#818cf8".to_string(),
            error: "#f87171".to_string(),
            success: "#4ade80".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely (arrays too).
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(
        root = %root.display(),
        projects = config.catalog.len(),
        "config loaded"
    );
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge with the defaults key by key. Arrays replace: a single
# [[project]] entry replaces the whole sample catalog.
# Unknown keys will cause an error.

# Directory copied verbatim into the output root (favicon, images, fonts).
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
owner = "Alex Morgan"
tagline = "Designer & developer building calm, fast interfaces."
# Markdown, rendered in the "About" section of the home page.
bio = "I design and build **websites, apps and design systems**. Most of my work starts with a sketch and ends with a deploy."
# Footer link; leave empty to hide it.
github_url = ""

# ---------------------------------------------------------------------------
# Scroll effects (pixels)
# ---------------------------------------------------------------------------
[scroll]
# The navbar switches to its compact style past this offset.
navbar_offset = 50.0
# The back-to-top button appears past this offset.
back_to_top_offset = 500.0

# ---------------------------------------------------------------------------
# Reveal-on-scroll
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible before it fades in.
threshold = 0.1
# Added to the bottom edge of the viewport; negative values trigger later.
root_margin_bottom = -50.0

# ---------------------------------------------------------------------------
# Stat counters
# ---------------------------------------------------------------------------
[counters]
duration_ms = 2000
frame_interval_ms = 16
threshold = 0.5

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Simulated delivery latency.
submit_delay_ms = 1500
# How long the success/error notice stays on screen.
notice_ms = 5000
name_min = 2
message_min = 10
message_max = 500
subjects = ["general", "project", "collaboration", "other"]

# ---------------------------------------------------------------------------
# Project grid
# ---------------------------------------------------------------------------
[projects]
# Number of catalog entries shown on the home page.
featured_count = 3
# Delay before rendered cards fade in.
activation_delay_ms = 100

# ---------------------------------------------------------------------------
# Headline numbers (home page)
# ---------------------------------------------------------------------------
[[stats]]
label = "Projects Completed"
count = 50

[[stats]]
label = "Happy Clients"
count = 30

[[stats]]
label = "Years Experience"
count = 5

# ---------------------------------------------------------------------------
# Project catalog. category is one of: web, design, app.
# demo_url and source_url default to "#".
# ---------------------------------------------------------------------------
[[project]]
title = "E-Commerce Platform"
description = "A full-scale online store focusing on user flow, performance optimization, and seamless checkout experience."
tags = ["HTML", "CSS", "JavaScript"]
category = "web"
icon = "fa-shopping-cart"

[[project]]
title = "Portfolio Design System"
description = "A minimalist approach to personal branding with reusable components and design tokens."
tags = ["UI/UX", "Figma", "Design System"]
category = "design"
icon = "fa-palette"

[[project]]
title = "Task Management App"
description = "Helping teams organize workflows through intuitive interfaces and real-time collaboration."
tags = ["React", "Node.js", "MongoDB"]
category = "app"
icon = "fa-tasks"

[[project]]
title = "Weather Dashboard"
description = "Real-time weather application with beautiful visualizations and location-based forecasts."
tags = ["API", "JavaScript", "CSS"]
category = "web"
icon = "fa-cloud-sun"

[[project]]
title = "Mobile Banking UI"
description = "Modern and secure mobile banking interface design with intuitive navigation patterns."
tags = ["UI/UX", "Prototype", "Mobile"]
category = "design"
icon = "fa-mobile-alt"

[[project]]
title = "Fitness Tracker"
description = "Comprehensive fitness tracking application with workout plans and progress analytics."
tags = ["Vue.js", "Firebase", "PWA"]
category = "app"
icon = "fa-heartbeat"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"
text = "#0f172a"
text_dim = "#64748b"
accent = "#6366f1"
error = "#dc2626"
success = "#16a34a"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b1120"
surface = "#111827"
text = "#e2e8f0"
text_dim = "#94a3b8"
accent = "#818cf8"
error = "#f87171"
success = "#4ade80"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = color_vars(&colors.light, "    "),
        dark = color_vars(&colors.dark, "        "),
    )
}

fn color_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("surface", &scheme.surface),
        ("text", &scheme.text),
        ("text-dim", &scheme.text_dim),
        ("accent", &scheme.accent),
        ("error", &scheme.error),
        ("success", &scheme.success),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
