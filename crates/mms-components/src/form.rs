//! Bulk-order lead form.
//!
//! The form never transmits anything itself. It offers two hand-off links
//! (WhatsApp and e-mail) carrying fixed text from the catalog.

use serde::Serialize;

use mms_content::{mailto, BulkOrderContent};

/// HTML input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Tel,
    Email,
    Textarea,
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// `name` and `id` attribute
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

/// External application a hand-off link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    WhatsApp,
    Email,
}

/// A link that opens a chat or mail client with pre-filled text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffLink {
    pub channel: Channel,
    pub label: &'static str,
    pub href: String,
}

const FIELDS: &[FormField] = &[
    FormField {
        name: "company",
        label: "Company Name",
        kind: FieldKind::Text,
        required: true,
        placeholder: "Your company",
    },
    FormField {
        name: "contact_person",
        label: "Contact Person",
        kind: FieldKind::Text,
        required: true,
        placeholder: "Full name",
    },
    FormField {
        name: "phone",
        label: "Phone Number",
        kind: FieldKind::Tel,
        required: true,
        placeholder: "+222 ...",
    },
    FormField {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: false,
        placeholder: "you@company.com",
    },
    FormField {
        name: "products",
        label: "Products Needed",
        kind: FieldKind::Textarea,
        required: true,
        placeholder: "e.g. 200 bars of 12mm rebar, 50 bags of cement",
    },
    FormField {
        name: "delivery_location",
        label: "Delivery Location",
        kind: FieldKind::Text,
        required: true,
        placeholder: "City or site address",
    },
    FormField {
        name: "additional_info",
        label: "Additional Information",
        kind: FieldKind::Textarea,
        required: false,
        placeholder: "Deadlines, payment preferences, special requirements",
    },
];

/// The bulk-order form of the extended variant.
#[derive(Debug, Clone)]
pub struct BulkOrderForm<'a> {
    content: &'a BulkOrderContent,
}

impl<'a> BulkOrderForm<'a> {
    pub fn new(content: &'a BulkOrderContent) -> Self {
        Self { content }
    }

    /// All fields in display order.
    pub fn fields(&self) -> &'static [FormField] {
        FIELDS
    }

    /// Fields marked required in the markup.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FormField> {
        FIELDS.iter().filter(|f| f.required)
    }

    /// WhatsApp and e-mail hand-off links with the catalog's fixed text.
    pub fn handoffs(&self) -> Vec<HandoffLink> {
        vec![
            HandoffLink {
                channel: Channel::WhatsApp,
                label: "Send via WhatsApp",
                href: self
                    .content
                    .phone
                    .whatsapp_uri(Some(&self.content.whatsapp_message)),
            },
            HandoffLink {
                channel: Channel::Email,
                label: "Send via Email",
                href: mailto(
                    &self.content.email,
                    Some(&self.content.email_subject),
                    Some(&self.content.email_body),
                ),
            },
        ]
    }
}
