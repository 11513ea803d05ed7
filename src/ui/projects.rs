//! Project cards rendered into the page from the catalog.
//!
//! Card markup comes from [`render::project_card_body`], the same template
//! the static pages use. Mounted cards take their container's layout box so
//! reveal-on-scroll sees them where the grid sits.

use super::find_id;
use crate::catalog::{Catalog, Project};
use crate::dom::{Document, ElementId};
use crate::render;

pub const FEATURED_CONTAINER: &str = "featured-projects";
pub const FULL_CONTAINER: &str = "project-container";

/// Build a detached `.project-card.reveal` for `project`.
pub fn create_card(doc: &mut Document, project: &Project) -> ElementId {
    let card = doc
        .build("div")
        .class("project-card reveal")
        .data("category", project.category.as_str())
        .finish();
    doc.set_inner_html(card, render::project_card_body(project).into_string());
    card
}

fn mount(doc: &mut Document, container: ElementId, projects: &[Project]) -> Vec<ElementId> {
    let rect = doc.get(container).rect();
    projects
        .iter()
        .map(|project| {
            let card = create_card(doc, project);
            if let Some(rect) = rect {
                doc.set_rect(card, rect);
            }
            doc.append(container, card);
            card
        })
        .collect()
}

/// Append the first `count` projects to `#featured-projects`.
pub fn mount_featured(doc: &mut Document, catalog: &Catalog, count: usize) -> Option<Vec<ElementId>> {
    let container = find_id(doc, FEATURED_CONTAINER, "featured projects")?;
    Some(mount(doc, container, catalog.featured(count)))
}

/// Replace the contents of `#project-container` with the whole catalog.
pub fn mount_all(doc: &mut Document, catalog: &Catalog) -> Option<Vec<ElementId>> {
    let container = find_id(doc, FULL_CONTAINER, "project grid")?;
    doc.clear_children(container);
    let cards = mount(doc, container, catalog.projects());
    tracing::debug!(cards = cards.len(), "project grid rendered");
    Some(cards)
}

/// Mark every `.project-card.reveal` active. Returns how many cards matched.
pub fn activate_cards(doc: &mut Document) -> usize {
    let cards = doc.by_classes(&["project-card", "reveal"]);
    for card in &cards {
        doc.add_class(*card, "active");
    }
    cards.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stock_projects;

    fn catalog() -> Catalog {
        Catalog::new(stock_projects())
    }

    #[test]
    fn card_carries_category_and_markup() {
        let mut doc = Document::new();
        let projects = stock_projects();
        let card = create_card(&mut doc, &projects[1]);
        assert_eq!(doc.get(card).class_name(), "project-card reveal");
        assert_eq!(doc.data(card, "category"), Some("design"));
        let html = doc.get(card).inner_html().unwrap();
        assert!(html.contains("<h3>Portfolio Design System</h3>"));
        assert!(html.contains(r#"<i class="fas fa-palette"></i>"#));
        assert!(!doc.is_attached(card));
    }

    #[test]
    fn featured_appends_a_prefix() {
        let mut doc = Document::new();
        let body = doc.body();
        let container = doc.build("div").id(FEATURED_CONTAINER).append_to(body);
        let existing = doc.build("p").append_to(container);

        let cards = mount_featured(&mut doc, &catalog(), 3).unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(doc.get(container).children()[0], existing);
        assert_eq!(doc.get(container).children().len(), 4);
    }

    #[test]
    fn full_list_replaces_container_contents() {
        let mut doc = Document::new();
        let body = doc.body();
        let container = doc.build("div").id(FULL_CONTAINER).append_to(body);
        let stale = doc.build("div").class("project-card").append_to(container);

        let cards = mount_all(&mut doc, &catalog()).unwrap();
        assert_eq!(cards.len(), 6);
        assert!(!doc.is_attached(stale));
        assert_eq!(doc.by_class("project-card"), cards);
    }

    #[test]
    fn cards_take_the_container_box() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.build("div").id(FULL_CONTAINER).rect(1200.0, 900.0).append_to(body);
        let cards = mount_all(&mut doc, &catalog()).unwrap();
        assert_eq!(doc.get(cards[0]).rect().map(|r| r.top), Some(1200.0));
    }

    #[test]
    fn missing_containers_are_a_no_op() {
        let mut doc = Document::new();
        assert!(mount_featured(&mut doc, &catalog(), 3).is_none());
        assert!(mount_all(&mut doc, &catalog()).is_none());
        assert!(doc.by_class("project-card").is_empty());
    }

    #[test]
    fn activate_marks_every_reveal_card() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.build("div").id(FULL_CONTAINER).append_to(body);
        let cards = mount_all(&mut doc, &catalog()).unwrap();
        let plain = doc.build("div").class("project-card").append_to(body);

        assert_eq!(activate_cards(&mut doc), 6);
        assert!(cards.iter().all(|c| doc.has_class(*c, "active")));
        assert!(!doc.has_class(plain, "active"));
    }
}
