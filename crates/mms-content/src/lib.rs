//! Content catalog for the MMS building-materials site.
//!
//! Holds the literal records every section renders (products, services,
//! testimonials, team, payment options, trust stats), the two site variants
//! with their in-page anchors, and builders for outbound hand-off links.

pub mod catalog;
pub mod links;
pub mod variant;

pub use catalog::{
    About, BulkOrderContent, Catalog, CatalogError, Company, ContactInfo, EmailContact, Hero,
    Highlight, OpeningHours, PaymentOption, ProductCategory, Service, TeamMember, Testimonial,
    TrustStat,
};
pub use links::{mailto, PhoneError, PhoneNumber};
pub use variant::{Anchor, ParseVariantError, Variant};
