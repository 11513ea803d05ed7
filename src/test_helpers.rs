//! Shared test utilities for the simple-folio test suite.
//!
//! Builds in-memory page documents with the same ids and classes the
//! generated pages carry, plus layout boxes so the geometric observer has
//! something to measure.
//!
//! # Layout of [`portfolio_page`]
//!
//! ```text
//!    0  navbar, hero
//!  700  about (.reveal)
//! 1100  stats (.reveal, three .stat-number)
//! 1400  #featured-projects
//! 2000  filter buttons
//! 2100  #project-container
//! 3200  #contactForm
//! 3900  footer (#year)
//! ```
//!
//! The default viewport is 800 px high.

use crate::dom::{Document, ElementId};

/// Look up `#id`, panicking with the id when it is missing.
pub fn by_id(doc: &Document, id: &str) -> ElementId {
    doc.by_id(id)
        .unwrap_or_else(|| panic!("no element with id '{id}'"))
}

/// First `.class`, panicking with the class when it is missing.
pub fn by_class(doc: &Document, class: &str) -> ElementId {
    doc.first_by_class(class)
        .unwrap_or_else(|| panic!("no element with class '{class}'"))
}

/// The `.error-message` next to the input with `id`.
pub fn error_message_for(doc: &Document, id: &str) -> ElementId {
    let input = by_id(doc, id);
    let group = doc.parent(input).expect("field has a parent");
    doc.within_by_class(group, "error-message")[0]
}

fn navbar(doc: &mut Document, parent: ElementId) {
    let nav = doc.build("nav").class("navbar").rect(0.0, 70.0).append_to(parent);
    doc.build("a").class("logo").attr("href", "index.html").text("Portfolio").append_to(nav);
    let toggle = doc.build("button").class("mobile-menu-btn").append_to(nav);
    doc.build("i").class("fas fa-bars").append_to(toggle);
    let links = doc.build("ul").class("nav-links").append_to(nav);
    for (href, label) in [
        ("index.html", "Home"),
        ("projects.html", "Projects"),
        ("contact.html", "Contact"),
    ] {
        let li = doc.build("li").append_to(links);
        doc.build("a").attr("href", href).text(label).append_to(li);
    }
}

fn contact_form(doc: &mut Document, parent: ElementId, top: f64) {
    let form = doc
        .build("form")
        .id("contactForm")
        .class("contact-form")
        .rect(top, 600.0)
        .append_to(parent);
    for (tag, id) in [
        ("input", "name"),
        ("input", "email"),
        ("select", "subject"),
        ("textarea", "message"),
    ] {
        let group = doc.build("div").class("form-group").append_to(form);
        doc.build("label").attr("for", id).text(id).append_to(group);
        doc.build(tag).id(id).attr("name", id).append_to(group);
        if id == "message" {
            let counter = doc.build("div").class("char-counter").append_to(group);
            doc.build("span").id("charCount").text("0").append_to(counter);
        }
        doc.build("span").class("error-message").append_to(group);
    }
    doc.build("button")
        .class("btn submit-btn")
        .attr("type", "submit")
        .text("Send Message")
        .append_to(form);
    doc.build("div").id("formStatus").class("form-status").append_to(form);
}

/// A page holding only the contact form.
pub fn contact_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    contact_form(&mut doc, body, 100.0);
    doc
}

/// Every feature on one page, laid out top to bottom.
pub fn portfolio_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    navbar(&mut doc, body);

    let main = doc.build("main").append_to(body);
    doc.build("section").class("hero").rect(70.0, 600.0).append_to(main);
    doc.build("section").class("about reveal").rect(700.0, 300.0).append_to(main);

    let stats = doc.build("section").class("stats").append_to(main);
    for count in ["50", "30", "5"] {
        let stat = doc.build("div").class("stat reveal").rect(1100.0, 120.0).append_to(stats);
        doc.build("span")
            .class("stat-number")
            .data("count", count)
            .text("0")
            .rect(1100.0, 60.0)
            .append_to(stat);
    }

    doc.build("div")
        .id("featured-projects")
        .class("projects-grid")
        .rect(1400.0, 500.0)
        .append_to(main);

    let filters = doc.build("div").class("filter-buttons").append_to(main);
    for tag in ["all", "web", "design", "app"] {
        doc.build("button")
            .class("filter-btn")
            .data("filter", tag)
            .rect(2000.0, 40.0)
            .append_to(filters);
    }
    doc.build("div")
        .id("project-container")
        .class("projects-grid")
        .rect(2100.0, 900.0)
        .append_to(main);

    contact_form(&mut doc, main, 3200.0);

    let footer = doc.build("footer").rect(3900.0, 100.0).append_to(body);
    doc.build("span").id("year").append_to(footer);
    doc.build("button").class("back-to-top").append_to(body);
    doc
}
