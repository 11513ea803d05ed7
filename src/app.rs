//! Application wiring.
//!
//! [`App`] owns one page: the [`Document`], the virtual-time [`Scheduler`],
//! the visibility sources and every controller in [`crate::ui`]. Startup
//! runs in a fixed order:
//!
//! 1. `#year` gets the current year
//! 2. the `fadeInUp` keyframes are injected into `<head>`
//! 3. catalog cards are mounted (featured, then the full grid)
//! 4. menu, scroll effects, reveal, filter, contact form, character counter
//!    and stat counters attach
//! 5. initial visibility entries are delivered
//!
//! Mounting cards before reveal attaches means rendered cards are observed
//! like any other `.reveal` element.
//!
//! After startup the host feeds [`UiEvent`]s to [`App::dispatch`] and moves
//! time forward with [`App::advance`] or [`App::run_until_idle`].
//!
//! ```rust
//! use simple_folio::app::{App, UiEvent};
//! use simple_folio::config::SiteConfig;
//! use simple_folio::dom::Document;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let nav = doc.build("nav").class("navbar").append_to(body);
//!
//! let mut app = App::start(doc, &SiteConfig::default());
//! app.dispatch(UiEvent::Scroll(120.0));
//! assert!(app.document().has_class(nav, "scrolled"));
//! ```

use crate::config::SiteConfig;
use crate::dom::{Document, ElementId};
use crate::observer::{IntersectionObserver, ObserverOptions, VisibilitySource};
use crate::render::FADE_IN_UP_KEYFRAMES;
use crate::runtime::Scheduler;
use crate::ui::contact::{CharCounter, ContactForm, FormEffect, SimulatedSubmitter, Submitter};
use crate::ui::counter::StatCounters;
use crate::ui::filter::ProjectFilter;
use crate::ui::menu::MobileMenu;
use crate::ui::reveal::RevealAnimator;
use crate::ui::scroll::ScrollEffects;
use crate::ui::{find_id, projects};
use chrono::Datelike;
use std::time::Duration;

/// Something the user did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Click(ElementId),
    /// The page scrolled to this vertical offset.
    Scroll(f64),
    /// The value of this field changed.
    Input(ElementId),
    /// This field lost focus.
    Blur(ElementId),
    /// This form was submitted.
    Submit(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    ActivateCards,
    SubmissionSettled,
    NoticeExpired(u64),
    CounterFrame(ElementId),
}

/// Configures and starts an [`App`].
pub struct AppBuilder {
    config: SiteConfig,
    year: Option<i32>,
    submitter: Option<Box<dyn Submitter>>,
    reveal_source: Option<Box<dyn VisibilitySource>>,
    counter_source: Option<Box<dyn VisibilitySource>>,
}

impl AppBuilder {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            config: config.clone(),
            year: None,
            submitter: None,
            reveal_source: None,
            counter_source: None,
        }
    }

    /// Year written into `#year`; defaults to the local clock.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Replace the default [`SimulatedSubmitter`].
    pub fn submitter(mut self, submitter: impl Submitter + 'static) -> Self {
        self.submitter = Some(Box::new(submitter));
        self
    }

    /// Replace the geometric observer used for reveal-on-scroll.
    pub fn reveal_source(mut self, source: impl VisibilitySource + 'static) -> Self {
        self.reveal_source = Some(Box::new(source));
        self
    }

    /// Replace the geometric observer used for the stat counters.
    pub fn counter_source(mut self, source: impl VisibilitySource + 'static) -> Self {
        self.counter_source = Some(Box::new(source));
        self
    }

    pub fn start(self, mut doc: Document) -> App {
        let config = self.config;
        let year = self
            .year
            .unwrap_or_else(|| chrono::Local::now().year());
        let submitter = self.submitter.unwrap_or_else(|| {
            Box::new(SimulatedSubmitter::new(config.contact.submit_delay()))
        });
        let mut reveal_source = self.reveal_source.unwrap_or_else(|| {
            Box::new(IntersectionObserver::new(ObserverOptions::new(
                config.reveal.threshold,
                config.reveal.root_margin_bottom,
            )))
        });
        let mut counter_source = self.counter_source.unwrap_or_else(|| {
            Box::new(IntersectionObserver::new(ObserverOptions::new(
                config.counters.threshold,
                0.0,
            )))
        });
        let mut scheduler = Scheduler::new(config.counters.frame_interval());

        if let Some(el) = find_id(&doc, "year", "footer year") {
            doc.set_text(el, year.to_string());
        }
        doc.inject_style(FADE_IN_UP_KEYFRAMES);

        let catalog = config.catalog();
        projects::mount_featured(&mut doc, &catalog, config.projects.featured_count);
        if projects::mount_all(&mut doc, &catalog).is_some() {
            scheduler.set_timeout(config.projects.activation_delay(), Task::ActivateCards);
        }

        let menu = MobileMenu::attach(&doc);
        let scroll = ScrollEffects::attach(&doc, &config.scroll);
        let reveal = RevealAnimator::attach(&doc, reveal_source.as_mut());
        let filter = ProjectFilter::attach(&mut doc);
        let form = ContactForm::attach(
            &doc,
            config.limits(),
            config.contact.notice_duration(),
        );
        let char_counter = CharCounter::attach(&doc, config.contact.message_max);
        let counters = StatCounters::attach(
            &doc,
            counter_source.as_mut(),
            config.counters.duration(),
            config.counters.frame_interval(),
        );
        tracing::debug!(
            menu = menu.is_some(),
            scroll = scroll.is_some(),
            reveal = reveal.targets().len(),
            filter = filter.is_some(),
            form = form.is_some(),
            counters = counters.len(),
            "page wired"
        );

        let mut app = App {
            doc,
            scheduler,
            submitter,
            reveal_source,
            counter_source,
            menu,
            scroll,
            reveal,
            filter,
            form,
            char_counter,
            counters,
        };
        app.poll_visibility();
        app
    }
}

pub struct App {
    doc: Document,
    scheduler: Scheduler<Task>,
    submitter: Box<dyn Submitter>,
    reveal_source: Box<dyn VisibilitySource>,
    counter_source: Box<dyn VisibilitySource>,
    menu: Option<MobileMenu>,
    scroll: Option<ScrollEffects>,
    reveal: RevealAnimator,
    filter: Option<ProjectFilter>,
    form: Option<ContactForm>,
    char_counter: Option<CharCounter>,
    counters: StatCounters,
}

impl App {
    /// Start with default collaborators.
    pub fn start(doc: Document, config: &SiteConfig) -> Self {
        AppBuilder::new(config).start(doc)
    }

    pub fn builder(config: &SiteConfig) -> AppBuilder {
        AppBuilder::new(config)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access for typing into fields or resizing the viewport.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Virtual time since startup.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn filter(&self) -> Option<&ProjectFilter> {
        self.filter.as_ref()
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click(target) => self.on_click(target),
            UiEvent::Scroll(offset) => {
                self.doc.set_scroll_y(offset);
                if let Some(scroll) = &self.scroll {
                    scroll.on_scroll(&mut self.doc);
                }
                self.poll_visibility();
            }
            UiEvent::Input(target) => {
                if let Some(counter) = &self.char_counter {
                    counter.on_input(&mut self.doc, target);
                }
            }
            UiEvent::Blur(target) => {
                if let Some(form) = &self.form {
                    form.on_blur(&mut self.doc, target);
                }
            }
            UiEvent::Submit(target) => {
                let Some(form) = self.form.as_mut() else {
                    return;
                };
                if target != form.form() {
                    return;
                }
                let effect = form.on_submit(&mut self.doc, self.submitter.latency());
                self.schedule(effect);
            }
        }
    }

    fn on_click(&mut self, target: ElementId) {
        if let Some(menu) = self.menu.as_mut() {
            menu.on_click(&mut self.doc, target);
        }
        if let Some(filter) = self.filter.as_mut() {
            filter.on_click(&mut self.doc, target);
        }
        let scrolled = self
            .scroll
            .as_ref()
            .is_some_and(|scroll| scroll.on_click(&mut self.doc, target));
        if scrolled {
            self.poll_visibility();
        }
    }

    fn schedule(&mut self, effect: Option<FormEffect>) {
        match effect {
            Some(FormEffect::Settle { after }) => {
                self.scheduler.set_timeout(after, Task::SubmissionSettled);
            }
            Some(FormEffect::ExpireNotice { generation, after }) => {
                self.scheduler
                    .set_timeout(after, Task::NoticeExpired(generation));
            }
            None => {}
        }
    }

    /// Deliver pending visibility changes to reveal and the counters.
    pub fn poll_visibility(&mut self) {
        let entries = self.reveal_source.poll(&self.doc);
        self.reveal.handle_entries(&mut self.doc, &entries);

        let entries = self.counter_source.poll(&self.doc);
        let started =
            self.counters
                .handle_entries(&mut self.doc, self.counter_source.as_mut(), &entries);
        for element in started {
            self.scheduler
                .request_animation_frame(Task::CounterFrame(element));
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::ActivateCards => {
                let count = projects::activate_cards(&mut self.doc);
                tracing::debug!(count, "project cards activated");
            }
            Task::SubmissionSettled => {
                if let Some(form) = self.form.as_mut() {
                    let effect = form.on_settled(&mut self.doc, self.submitter.as_mut());
                    self.schedule(effect);
                }
            }
            Task::NoticeExpired(generation) => {
                if let Some(form) = &self.form {
                    form.on_notice_expired(&mut self.doc, generation);
                }
            }
            Task::CounterFrame(element) => {
                if self.counters.on_frame(&mut self.doc, element) {
                    self.scheduler
                        .request_animation_frame(Task::CounterFrame(element));
                }
            }
        }
    }

    /// Run every task due within `duration`, in due order, then leave the
    /// clock at the end of the window.
    pub fn advance(&mut self, duration: Duration) {
        let deadline = self.scheduler.now() + duration;
        while let Some(task) = self.scheduler.pop_due(deadline) {
            self.run(task);
        }
        self.scheduler.settle_at(deadline);
    }

    /// Run tasks until none are left.
    pub fn run_until_idle(&mut self) {
        while let Some(task) = self.scheduler.pop_next() {
            self.run(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Display;
    use crate::observer::{IntersectionEntry, ScriptedVisibility};
    use crate::test_helpers::{by_class, by_id, error_message_for, portfolio_page};
    use crate::ui::contact::{ContactMessage, FAILURE_NOTICE, SubmitError};
    use crate::ui::filter::CARD_ANIMATION;
    use crate::ui::menu::MenuState;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn start() -> App {
        App::builder(&SiteConfig::default()).year(2026).start(portfolio_page())
    }

    fn type_into(app: &mut App, id: &str, value: &str) {
        let el = by_id(app.document(), id);
        app.document_mut().set_value(el, value);
        app.dispatch(UiEvent::Input(el));
    }

    #[test]
    fn startup_sets_year_and_keyframes() {
        let app = start();
        let doc = app.document();
        assert_eq!(doc.text(by_id(doc, "year")), "2026");
        assert_eq!(doc.styles(), vec![FADE_IN_UP_KEYFRAMES]);
    }

    #[test]
    fn startup_mounts_cards() {
        let app = start();
        let doc = app.document();
        let featured = by_id(doc, "featured-projects");
        let full = by_id(doc, "project-container");
        assert_eq!(doc.within_by_class(featured, "project-card").len(), 3);
        assert_eq!(doc.within_by_class(full, "project-card").len(), 6);
    }

    #[test]
    fn startup_normalizes_filter() {
        let app = start();
        assert_eq!(app.filter().unwrap().active().as_str(), "all");
        let doc = app.document();
        assert_eq!(doc.by_classes(&["filter-btn", "active"]).len(), 1);
    }

    #[test]
    fn cards_activate_after_delay() {
        let mut app = start();
        let full = by_id(app.document(), "project-container");
        let cards = app.document().within_by_class(full, "project-card");

        app.advance(ms(99));
        assert!(!app.document().has_class(cards[0], "active"));
        app.advance(ms(1));
        assert!(cards.iter().all(|c| app.document().has_class(*c, "active")));
    }

    #[test]
    fn reveal_follows_scroll() {
        let mut app = start();
        let about = by_class(app.document(), "about");
        // About starts at 700; the viewport ends at 800 minus a 50 px margin.
        assert!(app.document().has_class(about, "active"));

        let featured = by_id(app.document(), "featured-projects");
        let card = app.document().within_by_class(featured, "project-card")[0];
        assert!(!app.document().has_class(card, "active"));

        app.dispatch(UiEvent::Scroll(1000.0));
        assert!(app.document().has_class(card, "active"));

        app.dispatch(UiEvent::Scroll(0.0));
        assert!(app.document().has_class(card, "active"));
    }

    #[test]
    fn scroll_and_back_to_top() {
        let mut app = start();
        let navbar = by_class(app.document(), "navbar");
        let top = by_class(app.document(), "back-to-top");

        app.dispatch(UiEvent::Scroll(600.0));
        assert!(app.document().has_class(top, "visible"));
        assert!(app.document().has_class(navbar, "scrolled"));

        app.dispatch(UiEvent::Click(top));
        assert_eq!(app.document().scroll_y(), 0.0);
        assert!(!app.document().has_class(top, "visible"));
        assert!(!app.document().has_class(navbar, "scrolled"));
    }

    #[test]
    fn menu_opens_and_closes_on_outside_click() {
        let mut app = start();
        let toggle = by_class(app.document(), "mobile-menu-btn");
        let hero = by_class(app.document(), "hero");

        app.dispatch(UiEvent::Click(toggle));
        assert_eq!(app.menu().unwrap().state(), MenuState::Open);
        app.dispatch(UiEvent::Click(hero));
        assert_eq!(app.menu().unwrap().state(), MenuState::Closed);
    }

    #[test]
    fn filter_click_hides_other_categories() {
        let mut app = start();
        let design = app
            .document()
            .by_class("filter-btn")
            .into_iter()
            .find(|b| app.document().data(*b, "filter") == Some("design"))
            .unwrap();
        app.dispatch(UiEvent::Click(design));

        let doc = app.document();
        for card in doc.by_class("project-card") {
            if doc.data(card, "category") == Some("design") {
                assert_eq!(doc.display(card), Display::Block);
                assert_eq!(doc.get(card).animation(), Some(CARD_ANIMATION));
            } else {
                assert_eq!(doc.display(card), Display::None);
            }
        }
    }

    #[test]
    fn counters_animate_once_visible() {
        let mut app = start();
        let stats: Vec<_> = app.document().by_class("stat-number");
        assert_eq!(app.document().text(stats[0]), "0");

        app.dispatch(UiEvent::Scroll(800.0));
        assert_eq!(app.pending_tasks(), 4); // three counters + card activation
        app.run_until_idle();

        let doc = app.document();
        let shown: Vec<_> = stats.iter().map(|s| doc.text(*s)).collect();
        assert_eq!(shown, vec!["50", "30", "5"]);
    }

    #[test]
    fn counter_takes_the_configured_duration() {
        let mut app = start();
        app.advance(ms(200));
        let stat = app.document().by_class("stat-number")[0];
        app.dispatch(UiEvent::Scroll(800.0));

        app.advance(ms(1000));
        let midway: u64 = app.document().text(stat).parse().unwrap();
        assert!(midway > 0 && midway < 50, "midway value {midway}");

        app.advance(ms(1100));
        assert_eq!(app.document().text(stat), "50");
        assert_eq!(app.pending_tasks(), 0);
    }

    #[test]
    fn zero_frame_interval_still_settles() {
        let mut config = SiteConfig::default();
        config.counters.frame_interval_ms = 0;
        let mut app = App::builder(&config).year(2026).start(portfolio_page());
        app.dispatch(UiEvent::Scroll(800.0));
        app.run_until_idle();

        let doc = app.document();
        let shown: Vec<_> = doc.by_class("stat-number").iter().map(|s| doc.text(*s)).collect();
        assert_eq!(shown, vec!["50", "30", "5"]);
    }

    #[test]
    fn character_counter_tracks_message() {
        let mut app = start();
        type_into(&mut app, "message", "Hello");
        let count = by_id(app.document(), "charCount");
        assert_eq!(app.document().text(count), "5");
        type_into(&mut app, "message", &"x".repeat(501));
        assert_eq!(app.document().get(count).color(), Some("var(--error)"));
    }

    #[test]
    fn blur_validates_single_field() {
        let mut app = start();
        let email = by_id(app.document(), "email");
        app.document_mut().set_value(email, "al@x");
        app.dispatch(UiEvent::Blur(email));
        let doc = app.document();
        assert!(doc.has_class(email, "error"));
        assert_eq!(
            doc.text(error_message_for(doc, "email")),
            "Please enter a valid email address"
        );
        assert_eq!(doc.text(error_message_for(doc, "name")), "");
    }

    #[test]
    fn successful_submission_scenario() {
        let mut app = start();
        let form = by_id(app.document(), "contactForm");
        type_into(&mut app, "name", "Al");
        type_into(&mut app, "email", "al@x.com");
        type_into(&mut app, "subject", "general");
        type_into(&mut app, "message", "Hello there, friend");

        app.dispatch(UiEvent::Submit(form));
        let button = app
            .document()
            .within_by_class(form, "submit-btn")[0];
        assert!(app.document().is_disabled(button));

        app.advance(ms(1499));
        assert!(app.form().unwrap().is_submitting());
        app.advance(ms(1));

        let doc = app.document();
        let status = by_id(doc, "formStatus");
        assert_eq!(
            doc.text(status),
            "Thank you, Al! Your message has been sent successfully. I'll get back to you soon."
        );
        assert_eq!(doc.get(status).class_name(), "form-status success");
        assert_eq!(doc.value(by_id(doc, "name")), "");
        assert_eq!(doc.text(by_id(doc, "charCount")), "0");
        assert!(!doc.is_disabled(button));

        // the notice clears 5000 ms after it appeared
        app.advance(ms(4999));
        assert_eq!(app.document().get(status).class_name(), "form-status success");
        app.advance(ms(1));
        assert_eq!(app.document().get(status).class_name(), "form-status");
        assert_eq!(app.document().display(status), Display::None);
    }

    #[test]
    fn submit_while_pending_does_not_double_send() {
        struct Counting(std::rc::Rc<std::cell::Cell<u32>>);
        impl Submitter for Counting {
            fn latency(&self) -> Duration {
                Duration::from_millis(1500)
            }
            fn deliver(&mut self, _: &ContactMessage) -> Result<(), SubmitError> {
                self.0.set(self.0.get() + 1);
                Ok(())
            }
        }

        let sent = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut app = App::builder(&SiteConfig::default())
            .year(2026)
            .submitter(Counting(sent.clone()))
            .start(portfolio_page());
        let form = by_id(app.document(), "contactForm");
        type_into(&mut app, "name", "Al");
        type_into(&mut app, "email", "al@x.com");
        type_into(&mut app, "subject", "general");
        type_into(&mut app, "message", "Hello there, friend");

        app.dispatch(UiEvent::Submit(form));
        app.advance(ms(500));
        app.dispatch(UiEvent::Submit(form));
        app.run_until_idle();
        assert_eq!(sent.get(), 1);
    }

    #[test]
    fn failing_submitter_reports_failure() {
        struct Down;
        impl Submitter for Down {
            fn latency(&self) -> Duration {
                Duration::from_millis(300)
            }
            fn deliver(&mut self, _: &ContactMessage) -> Result<(), SubmitError> {
                Err(SubmitError::Rejected("spam filter".into()))
            }
        }

        let mut app = App::builder(&SiteConfig::default())
            .year(2026)
            .submitter(Down)
            .start(portfolio_page());
        let form = by_id(app.document(), "contactForm");
        type_into(&mut app, "name", "Al");
        type_into(&mut app, "email", "al@x.com");
        type_into(&mut app, "subject", "general");
        type_into(&mut app, "message", "Hello there, friend");
        app.dispatch(UiEvent::Submit(form));
        app.advance(ms(300));

        let doc = app.document();
        assert_eq!(doc.text(by_id(doc, "formStatus")), FAILURE_NOTICE);
        assert_eq!(doc.value(by_id(doc, "name")), "Al");
    }

    #[test]
    fn invalid_submission_blocks_and_explains() {
        let mut app = start();
        let form = by_id(app.document(), "contactForm");
        app.dispatch(UiEvent::Submit(form));
        assert!(!app.form().unwrap().is_submitting());
        let doc = app.document();
        assert_eq!(doc.text(by_id(doc, "formStatus")), "Please fix the errors above");
        assert_eq!(doc.text(error_message_for(doc, "name")), "Name is required");
        assert_eq!(doc.text(error_message_for(doc, "message")), "Message is required");
    }

    #[test]
    fn scripted_sources_drive_reveal_and_counters() {
        let doc = portfolio_page();
        let about = doc.first_by_class("about").unwrap();
        let mut reveal = ScriptedVisibility::new();
        reveal.push(IntersectionEntry::visible(about));

        let mut app = App::builder(&SiteConfig::default())
            .year(2026)
            .reveal_source(reveal)
            .counter_source(ScriptedVisibility::new())
            .start(doc);

        assert!(app.document().has_class(about, "active"));
        // no counter entries were scripted, so nothing animates on scroll
        app.dispatch(UiEvent::Scroll(1000.0));
        let stat = app.document().by_class("stat-number")[0];
        app.run_until_idle();
        assert_eq!(app.document().text(stat), "0");
    }

    #[test]
    fn empty_document_is_inert() {
        let mut app = App::start(Document::new(), &SiteConfig::default());
        let body = app.document().body();
        app.dispatch(UiEvent::Click(body));
        app.dispatch(UiEvent::Scroll(900.0));
        app.dispatch(UiEvent::Submit(body));
        app.run_until_idle();
        assert_eq!(app.pending_tasks(), 0);
        assert_eq!(app.document().styles().len(), 1);
    }
}
