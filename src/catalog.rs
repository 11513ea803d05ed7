//! The project catalog.
//!
//! A [`Catalog`] is an immutable, ordered list of [`Project`] records. It is
//! built once from the site config and handed to whoever renders cards; the
//! list never changes for the lifetime of a page. Cloning a catalog is cheap
//! (the records sit behind an `Arc`).
//!
//! The stock catalog shipped with [`stock_projects`] is what a fresh site
//! shows until `[[project]]` entries are added to `config.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Category a project belongs to. Doubles as a filter tag on the projects page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web,
    Design,
    App,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Web, Category::Design, Category::App];

    /// Value used in `data-category` / `data-filter` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Design => "design",
            Category::App => "app",
        }
    }

    /// Human label for filter buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::Design => "Design",
            Category::App => "Apps",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown project category '{0}' (expected web, design or app)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

fn placeholder_link() -> String {
    "#".to_string()
}

/// A single portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Category,
    /// Font Awesome icon name without the `fas` prefix, e.g. `fa-palette`.
    pub icon: String,
    #[serde(default = "placeholder_link")]
    pub demo_url: String,
    #[serde(default = "placeholder_link")]
    pub source_url: String,
}

/// Immutable, ordered list of projects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    projects: Arc<[Project]>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: projects.into(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// The first `count` projects (fewer if the catalog is shorter).
    pub fn featured(&self, count: usize) -> &[Project] {
        &self.projects[..count.min(self.projects.len())]
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for project in self.projects.iter() {
            if !seen.contains(&project.category) {
                seen.push(project.category);
            }
        }
        seen
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.projects
            .iter()
            .filter(|p| p.category == category)
            .count()
    }
}

impl From<Vec<Project>> for Catalog {
    fn from(projects: Vec<Project>) -> Self {
        Self::new(projects)
    }
}

fn project(
    title: &str,
    description: &str,
    tags: &[&str],
    category: Category,
    icon: &str,
) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category,
        icon: icon.to_string(),
        demo_url: placeholder_link(),
        source_url: placeholder_link(),
    }
}

/// The six sample projects a new site starts with.
pub fn stock_projects() -> Vec<Project> {
    vec![
        project(
            "E-Commerce Platform",
            "A full-scale online store focusing on user flow, performance optimization, and seamless checkout experience.",
            &["HTML", "CSS", "JavaScript"],
            Category::Web,
            "fa-shopping-cart",
        ),
        project(
            "Portfolio Design System",
            "A minimalist approach to personal branding with reusable components and design tokens.",
            &["UI/UX", "Figma", "Design System"],
            Category::Design,
            "fa-palette",
        ),
        project(
            "Task Management App",
            "Helping teams organize workflows through intuitive interfaces and real-time collaboration.",
            &["React", "Node.js", "MongoDB"],
            Category::App,
            "fa-tasks",
        ),
        project(
            "Weather Dashboard",
            "Real-time weather application with beautiful visualizations and location-based forecasts.",
            &["API", "JavaScript", "CSS"],
            Category::Web,
            "fa-cloud-sun",
        ),
        project(
            "Mobile Banking UI",
            "Modern and secure mobile banking interface design with intuitive navigation patterns.",
            &["UI/UX", "Prototype", "Mobile"],
            Category::Design,
            "fa-mobile-alt",
        ),
        project(
            "Fitness Tracker",
            "Comprehensive fitness tracking application with workout plans and progress analytics.",
            &["Vue.js", "Firebase", "PWA"],
            Category::App,
            "fa-heartbeat",
        ),
    ]
}
