//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is an inventory of what the site contains, not a list of files.
//! Projects are shown by positional index and title, with tags and a short
//! description as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Projects
//! 001 E-Commerce Platform [web]
//!     Tags: HTML, CSS, JavaScript
//!     A full-scale online store focusing on user flow, performance optim...
//!
//! Categories
//!     web: 2
//!     design: 2
//!     app: 2
//!
//! Featured: 3 of 6
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html (9412 bytes)
//! Projects → projects.html (8120 bytes)
//! Contact → contact.html (4410 bytes)
//! Stylesheet → style.css (6021 bytes)
//!
//! Generated 3 pages, 6 projects, 2 assets
//! ```
//!
//! ## Validate
//!
//! ```text
//! name     ok
//! email    Please enter a valid email address
//! subject  ok
//! message  ok
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::render::{BuildSummary, Page};
use crate::validate::ValidationReport;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + title, with an optional bracketed detail.
///
/// ```text
/// 001 Weather Dashboard [web]
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} [{}]", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(config: &SiteConfig) -> Vec<String> {
    let catalog = config.catalog();
    let mut lines = vec!["Projects".to_string()];

    for (i, project) in catalog.projects().iter().enumerate() {
        lines.push(entity_header(i + 1, &project.title, Some(project.category.as_str())));
        if !project.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), project.tags.join(", ")));
        }
        lines.push(format!("{}{}", indent(1), truncate_desc(&project.description, 64)));
    }

    if !catalog.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
        for category in catalog.categories() {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                category,
                catalog.count_in(category)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Featured: {} of {}",
        catalog.featured(config.projects.featured_count).len(),
        catalog.len()
    ));
    lines
}

pub fn print_check_output(config: &SiteConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for page in &summary.pages {
        let label = Page::ALL
            .iter()
            .find(|p| p.file_name() == page.file)
            .map(|p| p.label())
            .unwrap_or("Page");
        lines.push(format!("{} → {} ({} bytes)", label, page.file, page.bytes));
    }
    lines.push(format!(
        "Stylesheet → style.css ({} bytes)",
        summary.stylesheet_bytes
    ));
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(summary.pages.len(), "page", "pages"),
        plural(summary.projects, "project", "projects"),
        plural(summary.assets, "asset", "assets"),
    ));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Validate
// ============================================================================

pub fn format_validation_report(report: &ValidationReport) -> Vec<String> {
    report
        .fields
        .iter()
        .map(|f| {
            let outcome = f.message.as_deref().unwrap_or("ok");
            format!("{:<8} {}", f.field.to_string(), outcome)
        })
        .collect()
}

pub fn print_validation_report(report: &ValidationReport) {
    for line in format_validation_report(report) {
        println!("{}", line);
    }
}
