//! HTML site generation.
//!
//! Renders the static side of the portfolio from a [`SiteConfig`]: three
//! pages sharing one head, navbar and footer, plus a stylesheet. The markup
//! carries every id and class the controllers in [`crate::ui`] look for, so
//! the generated pages and the in-memory page model agree on structure.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, markdown bio, animated stats, featured
//!   project cards
//! - **Projects** (`/projects.html`): filter buttons and the full card grid
//! - **Contact** (`/contact.html`): the validated contact form
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── projects.html
//! ├── contact.html
//! ├── style.css        # color variables + base styles + keyframes
//! └── ...              # everything under <source>/assets, copied as-is
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::catalog::{Catalog, Project};
use crate::config::{self, SiteConfig, Stat};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Entrance animation applied to cards revealed by the project filter.
pub const FADE_IN_UP_KEYFRAMES: &str = "@keyframes fadeInUp {
    from {
        opacity: 0;
        transform: translateY(20px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}";

const ICON_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// The three pages of the site, in navbar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Projects,
    Contact,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Projects, Page::Contact];

    pub fn file_name(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Projects => "projects.html",
            Page::Contact => "contact.html",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Projects => "Projects",
            Page::Contact => "Contact",
        }
    }
}

/// One written page, for the build report.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub file: String,
    pub bytes: usize,
}

/// What a build wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub pages: Vec<PageSummary>,
    pub stylesheet_bytes: usize,
    pub assets: usize,
    pub projects: usize,
}

/// Full stylesheet: config colors, base styles, keyframes.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n{}\n",
        config::generate_color_css(&config.colors),
        CSS_STATIC,
        FADE_IN_UP_KEYFRAMES
    )
}

pub fn generate(
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<BuildSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let catalog = config.catalog();

    let mut pages = Vec::new();
    for page in Page::ALL {
        let html = render_page(page, config, &catalog).into_string();
        fs::write(output_dir.join(page.file_name()), &html)?;
        tracing::info!(page = page.file_name(), bytes = html.len(), "generated page");
        pages.push(PageSummary {
            file: page.file_name().to_string(),
            bytes: html.len(),
        });
    }

    let css = stylesheet(config);
    fs::write(output_dir.join("style.css"), &css)?;

    let assets = copy_assets(&source_dir.join(&config.assets_dir), output_dir)?;

    Ok(BuildSummary {
        output: output_dir.to_path_buf(),
        pages,
        stylesheet_bytes: css.len(),
        assets,
        projects: catalog.len(),
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        tracing::debug!(dir = %src.display(), "no assets directory");
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    tracing::debug!(copied, "assets copied");
    Ok(copied)
}

pub fn render_page(page: Page, config: &SiteConfig, catalog: &Catalog) -> Markup {
    let content = match page {
        Page::Home => render_home(config, catalog),
        Page::Projects => render_projects(catalog),
        Page::Contact => render_contact(config),
    };
    let title = match page {
        Page::Home => config.site.title.clone(),
        _ => format!("{} | {}", page.label(), config.site.title),
    };
    base_document(&title, page, config, content)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, current: Page, config: &SiteConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(ICON_CSS);
                link rel="stylesheet" href="style.css";
            }
            body {
                (navbar(&config.site.title, current))
                main { (content) }
                (footer(config))
                button.back-to-top aria-label="Back to top" {
                    i class="fas fa-arrow-up" {}
                }
            }
        }
    }
}

pub fn navbar(brand: &str, current: Page) -> Markup {
    html! {
        nav.navbar {
            div.container {
                a.logo href="index.html" { (brand) }
                button.mobile-menu-btn aria-label="Toggle menu" {
                    i class="fas fa-bars" {}
                }
                ul.nav-links {
                    @for page in Page::ALL {
                        li {
                            a href=(page.file_name()) class=[(page == current).then_some("current")] {
                                (page.label())
                            }
                        }
                    }
                }
            }
        }
    }
}

fn footer(config: &SiteConfig) -> Markup {
    html! {
        footer {
            div.container {
                p {
                    "© " span id="year" {} " " (config.site.owner)
                    @if !config.site.github_url.is_empty() {
                        " · "
                        a href=(config.site.github_url) { i class="fab fa-github" {} " GitHub" }
                    }
                }
            }
        }
    }
}

/// Inner markup of one project card.
pub fn project_card_body(project: &Project) -> Markup {
    html! {
        div.project-image {
            i class=(format!("fas {}", project.icon)) {}
        }
        div.project-content {
            div.project-tags {
                @for tag in &project.tags {
                    span.project-tag { (tag) }
                }
            }
            h3 { (project.title) }
            p { (project.description) }
            div.project-links {
                a.project-link href=(project.demo_url) {
                    i class="fas fa-external-link-alt" {} " Live Demo"
                }
                a.project-link href=(project.source_url) {
                    i class="fab fa-github" {} " Code"
                }
            }
        }
    }
}

pub fn project_card(project: &Project) -> Markup {
    html! {
        div.project-card.reveal data-category=(project.category.as_str()) {
            (project_card_body(project))
        }
    }
}

fn render_stats(stats: &[Stat]) -> Markup {
    html! {
        section.stats.container {
            @for stat in stats {
                div.stat.reveal {
                    span.stat-number data-count=(stat.count) { "0" }
                    span.stat-label { (stat.label) }
                }
            }
        }
    }
}

fn render_home(config: &SiteConfig, catalog: &Catalog) -> Markup {
    let mut bio_html = String::new();
    md_html::push_html(&mut bio_html, Parser::new(&config.site.bio));
    let featured = catalog.featured(config.projects.featured_count);

    html! {
        section.hero {
            div.container {
                h1 { "Hi, I'm " (config.site.owner) }
                p.tagline { (config.site.tagline) }
                a.btn href="projects.html" { "View my work" }
            }
        }
        section.about.reveal {
            div.container {
                h2.section-title { "About" }
                div.about-content { (PreEscaped(bio_html)) }
            }
        }
        @if !config.stats.is_empty() {
            (render_stats(&config.stats))
        }
        section.featured {
            div.container {
                h2.section-title { "Featured Projects" }
                div.projects-grid id="featured-projects" {
                    @for project in featured {
                        (project_card(project))
                    }
                }
            }
        }
    }
}

fn render_projects(catalog: &Catalog) -> Markup {
    html! {
        section.projects {
            div.container {
                h2.section-title { "Projects" }
                div.filter-buttons {
                    button.filter-btn.active data-filter="all" { "All" }
                    @for category in catalog.categories() {
                        button.filter-btn data-filter=(category.as_str()) { (category.label()) }
                    }
                }
                div.projects-grid id="project-container" {
                    @for project in catalog.projects() {
                        (project_card(project))
                    }
                }
            }
        }
    }
}

fn option_label(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_contact(config: &SiteConfig) -> Markup {
    let contact = &config.contact;
    html! {
        section.contact {
            div.container {
                h2.section-title { "Get in touch" }
                form.contact-form id="contactForm" novalidate {
                    div.form-group {
                        label for="name" { "Name" }
                        input type="text" id="name" name="name";
                        span.error-message {}
                    }
                    div.form-group {
                        label for="email" { "Email" }
                        input type="email" id="email" name="email";
                        span.error-message {}
                    }
                    div.form-group {
                        label for="subject" { "Subject" }
                        select id="subject" name="subject" {
                            option value="" { "Select a subject" }
                            @for subject in &contact.subjects {
                                option value=(subject) { (option_label(subject)) }
                            }
                        }
                        span.error-message {}
                    }
                    div.form-group {
                        label for="message" { "Message" }
                        textarea id="message" name="message" rows="6" {}
                        div.char-counter {
                            span id="charCount" { "0" } "/" (contact.message_max)
                        }
                        span.error-message {}
                    }
                    button.btn.submit-btn type="submit" { "Send Message" }
                    div.form-status id="formStatus" {}
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
