//! Navigation bar and its mobile-menu state machine.

use serde::Serialize;

use mms_content::{Anchor, Variant};

/// Whether the mobile menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavState {
    #[default]
    Collapsed,
    Expanded,
}

/// User actions the navigation bar reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The menu button was activated.
    Toggle,
    /// A navigation link was activated.
    LinkSelected,
}

impl NavState {
    /// Next state after `event`.
    pub fn apply(self, event: NavEvent) -> Self {
        match (self, event) {
            (NavState::Collapsed, NavEvent::Toggle) => NavState::Expanded,
            (NavState::Expanded, NavEvent::Toggle) => NavState::Collapsed,
            (_, NavEvent::LinkSelected) => NavState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == NavState::Expanded
    }

    pub fn name(self) -> &'static str {
        match self {
            NavState::Collapsed => "collapsed",
            NavState::Expanded => "expanded",
        }
    }
}

/// A (label, target-anchor) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display label
    pub label: &'static str,
    /// Anchor id without `#`
    pub id: &'static str,
    /// Link target
    pub href: String,
}

impl From<Anchor> for NavLink {
    fn from(anchor: Anchor) -> Self {
        Self {
            label: anchor.label(),
            id: anchor.id(),
            href: anchor.href(),
        }
    }
}

/// The page's navigation bar. Owns the only mutable state on the page.
#[derive(Debug, Clone)]
pub struct NavigationBar {
    variant: Variant,
    state: NavState,
    links: Vec<NavLink>,
}

impl NavigationBar {
    /// A collapsed navigation bar for `variant`.
    pub fn new(variant: Variant) -> Self {
        Self::with_state(variant, NavState::Collapsed)
    }

    /// A navigation bar starting in `state`.
    pub fn with_state(variant: Variant, state: NavState) -> Self {
        let links = Anchor::for_variant(variant)
            .iter()
            .copied()
            .map(NavLink::from)
            .collect();

        Self {
            variant,
            state,
            links,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Flip the mobile menu.
    pub fn toggle(&mut self) -> NavState {
        self.state = self.state.apply(NavEvent::Toggle);
        self.state
    }

    /// Follow a link; an open mobile menu closes.
    ///
    /// Returns the anchor to scroll to.
    pub fn select_link(&mut self, anchor: Anchor) -> Anchor {
        self.state = self.state.apply(NavEvent::LinkSelected);
        anchor
    }

    /// Links shown in the desktop bar. Independent of state.
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Links shown in the mobile drawer, only while it is open.
    pub fn mobile_links(&self) -> Option<&[NavLink]> {
        self.state.is_expanded().then_some(self.links.as_slice())
    }
}
