//! Page-scoped state and its lifecycle.
//!
//! Each page instance owns one [`PageState`], starts in [`Phase::Loading`],
//! and moves to [`Phase::Ready`] exactly once via [`PageController`].

mod controller;

pub use controller::PageController;

use crate::{
    device::{Platform, classify_device},
    locale::{Locale, classify_locale},
};
use std::time::Duration;

/// Lifecycle phase of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Loading,
    /// Terminal for the lifetime of the page.
    Ready,
}

/// Everything the renderer needs to know about one page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageState {
    pub platform: Platform,
    pub locale: Locale,
    pub phase: Phase,
}

impl PageState {
    /// Final state computed from the runtime signals.
    pub fn classified(signals: &Signals) -> Self {
        Self {
            platform: classify_device(&signals.user_agent),
            locale: classify_locale(&signals.language),
            phase: Phase::Ready,
        }
    }

    pub const fn loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready)
    }
}

/// Runtime-provided inputs, read once when the page mounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub user_agent: String,
    pub language: String,
}

impl Signals {
    pub fn new(user_agent: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            language: language.into(),
        }
    }
}

/// Per-route page behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Use locale-specific copy and show the detected locale.
    pub localized: bool,
    /// Wait this long between mount and the Ready transition.
    pub artificial_delay: Duration,
}

impl PageOptions {
    pub const fn new(localized: bool, artificial_delay: Duration) -> Self {
        Self {
            localized,
            artificial_delay,
        }
    }
}
