//! Content catalog: every literal record the page renders.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::links::PhoneNumber;

/// Catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../content/catalog.yaml");

/// All page content, loaded once and never mutated.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Catalog {
    pub company: Company,
    pub hero: Hero,
    #[serde(default)]
    pub trust_stats: Vec<TrustStat>,
    pub products: Vec<ProductCategory>,
    pub services: Vec<Service>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub payment_options: Vec<PaymentOption>,
    pub about: About,
    pub contact: ContactInfo,
    pub team: Vec<TeamMember>,
    pub bulk_order: BulkOrderContent,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Company {
    pub name: String,
    pub short_name: String,
    pub tagline: String,
    /// Logo file name inside the assets directory
    pub logo: String,
    /// Hero background file name inside the assets directory
    #[serde(default)]
    pub background_image: Option<String>,
    pub copyright_year: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Hero {
    pub heading: String,
    pub lead: String,
    pub mission_title: String,
    pub mission: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TrustStat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProductCategory {
    pub name: String,
    pub description: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Testimonial {
    pub company: String,
    pub person: String,
    pub role: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PaymentOption {
    pub title: String,
    pub description: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct About {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub highlights_title: String,
    pub highlights: Vec<Highlight>,
    pub closing: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Highlight {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TeamMember {
    /// Shown in the avatar circle
    pub initials: String,
    pub role: String,
    pub description: String,
    /// Used for both the call link and the WhatsApp link
    pub phone: PhoneNumber,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ContactInfo {
    pub phone: PhoneNumber,
    pub whatsapp: PhoneNumber,
    pub emails: Vec<EmailContact>,
    pub location: String,
    pub hours: Vec<OpeningHours>,
    pub quick_contact: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EmailContact {
    pub label: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OpeningHours {
    pub days: String,
    pub time: String,
}

/// Copy and hand-off targets for the bulk-order form.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BulkOrderContent {
    pub heading: String,
    pub lead: String,
    /// WhatsApp number receiving bulk-order requests
    pub phone: PhoneNumber,
    /// Fixed text pre-filled into the WhatsApp hand-off
    pub whatsapp_message: String,
    pub email: String,
    pub email_subject: String,
    pub email_body: String,
}

/// Errors that can occur when loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid catalog YAML: {0}")]
    InvalidYaml(String),
}

impl Catalog {
    /// Parse the catalog embedded at compile time.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Raw YAML of the embedded catalog, used to scaffold new projects.
    pub fn builtin_source() -> &'static str {
        BUILTIN_CATALOG
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(source).map_err(|e| CatalogError::InvalidYaml(e.to_string()))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&source)
    }

    /// Load `path` if given, otherwise the builtin catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.company.short_name, "MMS");
        assert_eq!(catalog.products.len(), 6);
        assert_eq!(catalog.services.len(), 4);
        assert_eq!(catalog.testimonials.len(), 3);
        assert_eq!(catalog.team.len(), 3);
    }

    #[test]
    fn product_categories_keep_declared_order() {
        let catalog = Catalog::builtin().unwrap();
        let names: Vec<&str> = catalog.products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Paint & Coatings",
                "Steel Plates & Sheets",
                "Steel & Rebar",
                "Steel Pipes & Tubes",
                "Lumber & Wood",
                "Hardware & Tools",
            ]
        );
        assert_eq!(
            catalog.products[0].items,
            vec!["Wall Paint", "Wood Stain", "Primers", "Varnish", "Anti-rust Paint"]
        );
        assert_eq!(catalog.products[2].items[0], "Rebar (Various sizes)");
    }

    #[test]
    fn team_phones_are_preserved() {
        let catalog = Catalog::builtin().unwrap();
        let digits: Vec<&str> = catalog.team.iter().map(|m| m.phone.digits()).collect();

        assert_eq!(digits, vec!["22246619392", "22246619392", "22298765432"]);
        assert_eq!(catalog.contact.phone.tel_uri(), "tel:+22246619392");
    }

    #[test]
    fn loads_minimal_catalog_without_optional_sections() {
        let yaml = Catalog::builtin_source()
            .split("\ntrust_stats:")
            .next()
            .unwrap()
            .to_string()
            + "\n"
            + &Catalog::builtin_source()
                .split("\nproducts:")
                .nth(1)
                .map(|rest| format!("products:{}", rest))
                .unwrap();

        let catalog = Catalog::from_yaml(&yaml).unwrap();

        assert!(catalog.trust_stats.is_empty());
        assert_eq!(catalog.products.len(), 6);
    }

    #[test]
    fn rejects_invalid_phone() {
        let yaml = Catalog::builtin_source().replace("+222 9876 5432", "98765432");

        let result = Catalog::from_yaml(&yaml);

        assert!(matches!(result, Err(CatalogError::InvalidYaml(_))));
    }

    #[test]
    fn reads_catalog_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("catalog.yaml");
        fs::write(&path, Catalog::builtin_source()).unwrap();

        let catalog = Catalog::load(Some(&path)).unwrap();

        assert_eq!(catalog, Catalog::builtin().unwrap());
    }

    #[test]
    fn reports_missing_file() {
        let result = Catalog::from_path(Path::new("/nonexistent/catalog.yaml"));
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }
}
