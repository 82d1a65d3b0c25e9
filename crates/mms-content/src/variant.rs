//! Site variants and the in-page anchors they expose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two published configurations of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Hero, products, services, about, contact and team.
    #[serde(alias = "a")]
    Basic,

    /// Basic plus trust stats, bulk-order form, testimonials, payment terms
    /// and a hero background image.
    #[default]
    #[serde(alias = "b")]
    Extended,
}

/// Error returned for an unknown variant name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown variant '{0}' (expected 'basic' or 'extended')")]
pub struct ParseVariantError(pub String);

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Extended => "extended",
        }
    }

    /// Whether the hero section uses the background image.
    pub fn has_background_image(self) -> bool {
        matches!(self, Variant::Extended)
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "a" => Ok(Variant::Basic),
            "extended" | "b" => Ok(Variant::Extended),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named location in the page that navigation links scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Home,
    Products,
    BulkOrder,
    Services,
    About,
    Contact,
}

impl Anchor {
    /// Element id in the rendered document.
    pub fn id(self) -> &'static str {
        match self {
            Anchor::Home => "home",
            Anchor::Products => "products",
            Anchor::BulkOrder => "bulk-order",
            Anchor::Services => "services",
            Anchor::About => "about",
            Anchor::Contact => "contact",
        }
    }

    /// Link target, e.g. `#products`.
    pub fn href(self) -> String {
        format!("#{}", self.id())
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Anchor::Home => "Home",
            Anchor::Products => "Products",
            Anchor::BulkOrder => "Bulk Order",
            Anchor::Services => "Services",
            Anchor::About => "About Us",
            Anchor::Contact => "Contact",
        }
    }

    /// Ordered navigation anchors for a variant.
    pub fn for_variant(variant: Variant) -> &'static [Anchor] {
        match variant {
            Variant::Basic => &[
                Anchor::Home,
                Anchor::Products,
                Anchor::Services,
                Anchor::About,
                Anchor::Contact,
            ],
            Variant::Extended => &[
                Anchor::Home,
                Anchor::Products,
                Anchor::BulkOrder,
                Anchor::Services,
                Anchor::About,
                Anchor::Contact,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variant_names() {
        assert_eq!("basic".parse::<Variant>(), Ok(Variant::Basic));
        assert_eq!("A".parse::<Variant>(), Ok(Variant::Basic));
        assert_eq!("Extended".parse::<Variant>(), Ok(Variant::Extended));
        assert_eq!("b".parse::<Variant>(), Ok(Variant::Extended));
        assert_eq!(
            "c".parse::<Variant>(),
            Err(ParseVariantError("c".to_string()))
        );
    }

    #[test]
    fn deserializes_variant_aliases() {
        #[derive(Deserialize)]
        struct Holder {
            variant: Variant,
        }

        let holder: Holder = serde_yaml::from_str("variant: a").unwrap();
        assert_eq!(holder.variant, Variant::Basic);

        let holder: Holder = serde_yaml::from_str("variant: extended").unwrap();
        assert_eq!(holder.variant, Variant::Extended);
    }

    #[test]
    fn basic_variant_skips_bulk_order() {
        let labels: Vec<_> = Anchor::for_variant(Variant::Basic)
            .iter()
            .map(|a| a.label())
            .collect();

        assert_eq!(labels, ["Home", "Products", "Services", "About Us", "Contact"]);
    }

    #[test]
    fn extended_variant_includes_bulk_order() {
        let labels: Vec<_> = Anchor::for_variant(Variant::Extended)
            .iter()
            .map(|a| a.label())
            .collect();

        assert_eq!(
            labels,
            ["Home", "Products", "Bulk Order", "Services", "About Us", "Contact"]
        );
    }

    #[test]
    fn anchor_href_uses_id() {
        assert_eq!(Anchor::BulkOrder.href(), "#bulk-order");
        assert_eq!(Anchor::About.href(), "#about");
    }
}
