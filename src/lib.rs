//! Interaction controller for the clinic marketing site.
//!
//! The crate loads the site markup into an in-memory document, binds the page
//! behaviors once on document-ready, and lets callers drive the page with
//! deterministic user actions and a virtual clock:
//!
//! ```
//! use clinic_page::Page;
//!
//! let html = r#"
//!   <header id="header"></header>
//!   <form id="contactForm">
//!     <div class="form-group"><input id="name" type="text" required></div>
//!     <div class="form-group"><input id="phone" type="tel" required></div>
//!     <div class="form-group"><input id="email" type="email" required></div>
//!     <button type="submit">Send</button>
//!   </form>
//! "#;
//!
//! let mut page = Page::from_html(html)?;
//! page.scroll_to(240.0)?;
//! page.assert_has_class("#header", "scrolled")?;
//!
//! page.type_text("#name", "Al")?;
//! page.type_text("#phone", "555-123-4567")?;
//! page.type_text("#email", "a@b.com")?;
//! page.click("button")?;
//! page.assert_exists("#contactForm > .form-success")?;
//! page.advance_time(5_000)?;
//! page.assert_missing(".form-success")?;
//! # Ok::<(), clinic_page::Error>(())
//! ```

use std::collections::{HashMap, VecDeque};

mod config;
mod controller;
pub mod decisions;
mod dom;
mod html;
mod layout;
mod listeners;
mod observer;
mod page;
mod scheduler;
mod selector;
mod trace;
mod validation;
mod window;

pub use config::{DropdownGate, InteractionConfig};
pub use controller::PageController;
pub use layout::Rect;
pub use page::Page;
pub use scheduler::{PendingTimer, TimerKind};
pub use validation::{
    ErrorClearing, FieldCheck, FieldFailure, FieldRule, FormProfile, FormState, is_valid_email,
    is_valid_phone,
};
pub use window::{ScrollBehavior, ScrollRequest};

use controller::Host;
use dom::{Dom, NodeId};
use layout::LayoutState;
use listeners::{EventKind, EventState, Handler, ListenerStore};
use observer::RevealObserver;
use scheduler::{ScheduledTask, SchedulerState, TimerTask};
use selector::SelectorList;
use trace::TraceState;
use window::WindowState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}
