//! Content sections.
//!
//! Each section is a pure projection of the catalog: one block per record,
//! in catalog order.

use serde::Serialize;
use serde_json::{json, Value};

use mms_content::{mailto, Anchor, Catalog};

use crate::form::BulkOrderForm;

/// A section of the page, in the order it may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero { background_image: bool },
    TrustStats,
    Products,
    BulkOrder,
    Services,
    Testimonials,
    PaymentTerms,
    About,
    Contact,
    Team,
    Footer,
}

impl SectionKind {
    /// Anchor this section provides, if any.
    pub fn anchor(self) -> Option<Anchor> {
        match self {
            SectionKind::Hero { .. } => Some(Anchor::Home),
            SectionKind::Products => Some(Anchor::Products),
            SectionKind::BulkOrder => Some(Anchor::BulkOrder),
            SectionKind::Services => Some(Anchor::Services),
            SectionKind::About => Some(Anchor::About),
            SectionKind::Contact => Some(Anchor::Contact),
            SectionKind::TrustStats
            | SectionKind::Testimonials
            | SectionKind::PaymentTerms
            | SectionKind::Team
            | SectionKind::Footer => None,
        }
    }

    /// Template used to render the section.
    pub fn template(self) -> &'static str {
        match self {
            SectionKind::Hero { .. } => "sections/hero.html",
            SectionKind::TrustStats => "sections/trust_stats.html",
            SectionKind::Products => "sections/products.html",
            SectionKind::BulkOrder => "sections/bulk_order.html",
            SectionKind::Services => "sections/services.html",
            SectionKind::Testimonials => "sections/testimonials.html",
            SectionKind::PaymentTerms => "sections/payment_terms.html",
            SectionKind::About => "sections/about.html",
            SectionKind::Contact => "sections/contact.html",
            SectionKind::Team => "sections/team.html",
            SectionKind::Footer => "sections/footer.html",
        }
    }

    /// Template data for this section.
    pub fn data(self, catalog: &Catalog) -> Value {
        match self {
            SectionKind::Hero { background_image } => json!({
                "hero": &catalog.hero,
                "background_image": catalog
                    .company
                    .background_image
                    .as_ref()
                    .filter(|_| background_image),
            }),
            SectionKind::TrustStats => json!({ "stats": &catalog.trust_stats }),
            SectionKind::Products => json!({ "categories": &catalog.products }),
            SectionKind::BulkOrder => {
                let form = BulkOrderForm::new(&catalog.bulk_order);
                json!({
                    "content": &catalog.bulk_order,
                    "fields": form.fields(),
                    "handoffs": form.handoffs(),
                })
            }
            SectionKind::Services => json!({ "services": &catalog.services }),
            SectionKind::Testimonials => json!({ "testimonials": &catalog.testimonials }),
            SectionKind::PaymentTerms => json!({ "options": &catalog.payment_options }),
            SectionKind::About => json!({ "about": &catalog.about }),
            SectionKind::Contact => {
                let contact = &catalog.contact;
                let emails: Vec<Value> = contact
                    .emails
                    .iter()
                    .map(|e| {
                        json!({
                            "label": e.label,
                            "address": e.address,
                            "href": mailto(&e.address, None, None),
                        })
                    })
                    .collect();

                json!({
                    "phone": {
                        "display": contact.phone.display(),
                        "href": contact.phone.tel_uri(),
                    },
                    "whatsapp": {
                        "display": contact.whatsapp.display(),
                        "href": contact.whatsapp.whatsapp_uri(None),
                    },
                    "emails": emails,
                    "location": contact.location,
                    "hours": contact.hours,
                    "quick_contact": contact.quick_contact,
                })
            }
            SectionKind::Team => {
                let members: Vec<Value> = catalog
                    .team
                    .iter()
                    .map(|m| {
                        json!({
                            "initials": m.initials,
                            "role": m.role,
                            "description": m.description,
                            "phone": m.phone.display(),
                            "tel_href": m.phone.tel_uri(),
                            "chat_href": m.phone.whatsapp_uri(None),
                        })
                    })
                    .collect();
                json!({ "members": members })
            }
            SectionKind::Footer => json!({ "company": &catalog.company }),
        }
    }
}
