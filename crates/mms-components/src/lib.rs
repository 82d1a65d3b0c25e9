//! Page components for the MMS site.
//!
//! The navigation bar owns the page's single piece of mutable state (whether
//! the mobile menu is open). Everything else is a stateless projection of the
//! content catalog, assembled by [`Page`].

pub mod form;
pub mod nav;
pub mod page;
pub mod section;

pub use form::{BulkOrderForm, Channel, FieldKind, FormField, HandoffLink};
pub use nav::{NavEvent, NavLink, NavState, NavigationBar};
pub use page::Page;
pub use section::SectionKind;
