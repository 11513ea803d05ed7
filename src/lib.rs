//! # Simple Folio
//!
//! A personal portfolio site: a static generator for its pages, and a typed
//! model of the behaviour those pages run in the browser.
//!
//! # Two Halves, One Structural Contract
//!
//! ```text
//! config.toml ──► render ──► dist/{index,projects,contact}.html + style.css
//!                              │
//!                              │  same ids and classes
//!                              ▼
//! Document ──► app::App ──► ui controllers (menu, scroll, reveal, filter,
//!                                           contact form, counters)
//! ```
//!
//! The generator writes markup carrying every id and class the controllers
//! look for (`#contactForm`, `.filter-btn[data-filter]`, `.reveal`, ...).
//! The controllers run against an in-memory [`dom::Document`] with virtual
//! time, so every interaction can be exercised without a browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation, CSS colors |
//! | [`catalog`] | Immutable project catalog and the stock sample projects |
//! | [`render`] | Maud page templates, stylesheet assembly, asset copying |
//! | [`validate`] | Contact field validators and whole-form reports |
//! | [`dom`] | Arena-backed document model the controllers mutate |
//! | [`runtime`] | Virtual-time scheduler for timers and animation frames |
//! | [`observer`] | Visibility sources: geometric intersection observer, scripted source |
//! | [`ui`] | One controller per page behaviour |
//! | [`app`] | Startup wiring and event dispatch |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Injected Collaborators
//!
//! The catalog is a value passed in at startup, not a global. Submission goes
//! through a [`ui::contact::Submitter`] and visibility through an
//! [`observer::VisibilitySource`], both chosen when the [`app::App`] is built.
//! The stock submitter waits a fixed latency and always succeeds; a fallible
//! one exercises the failure notice.
//!
//! ## Virtual Time
//!
//! Nothing sleeps. Timers and animation frames are queued on a
//! [`runtime::Scheduler`] and run when the host advances the clock, which
//! makes the 1500 ms submission and the 2000 ms counter animation cheap to
//! test precisely.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error, template variables are Rust expressions and all
//! interpolation is auto-escaped. Project cards use the same template in the
//! static pages and in the in-memory model.

pub mod app;
pub mod catalog;
pub mod config;
pub mod dom;
pub mod logging;
pub mod observer;
pub mod output;
pub mod render;
pub mod runtime;
pub mod ui;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
