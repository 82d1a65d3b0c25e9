//! Page composition root.

use mms_content::{Anchor, Variant};

use crate::nav::{NavState, NavigationBar};
use crate::section::SectionKind;

/// Navigation bar followed by the ordered sections of a variant.
#[derive(Debug, Clone)]
pub struct Page {
    variant: Variant,
    nav: NavigationBar,
    sections: Vec<SectionKind>,
}

impl Page {
    /// The page for `variant` with a collapsed navigation bar.
    pub fn new(variant: Variant) -> Self {
        Self::with_nav_state(variant, NavState::Collapsed)
    }

    pub fn with_nav_state(variant: Variant, state: NavState) -> Self {
        let sections = match variant {
            Variant::Basic => vec![
                SectionKind::Hero {
                    background_image: false,
                },
                SectionKind::Products,
                SectionKind::Services,
                SectionKind::About,
                SectionKind::Contact,
                SectionKind::Team,
                SectionKind::Footer,
            ],
            Variant::Extended => vec![
                SectionKind::Hero {
                    background_image: variant.has_background_image(),
                },
                SectionKind::TrustStats,
                SectionKind::Products,
                SectionKind::BulkOrder,
                SectionKind::Services,
                SectionKind::Testimonials,
                SectionKind::PaymentTerms,
                SectionKind::About,
                SectionKind::Contact,
                SectionKind::Team,
                SectionKind::Footer,
            ],
        };

        Self {
            variant,
            nav: NavigationBar::with_state(variant, state),
            sections,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn nav(&self) -> &NavigationBar {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavigationBar {
        &mut self.nav
    }

    /// Sections in render order.
    pub fn sections(&self) -> &[SectionKind] {
        &self.sections
    }

    /// Anchors provided by the sections, in document order.
    pub fn anchors(&self) -> Vec<Anchor> {
        self.sections.iter().filter_map(|s| s.anchor()).collect()
    }
}
