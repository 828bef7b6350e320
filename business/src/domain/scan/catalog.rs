use std::collections::HashSet;

use serde::Deserialize;

use super::errors::CatalogError;

/// One retailer and the product codes it is known to print.
#[derive(Debug, Clone, Deserialize)]
pub struct RetailerEntry {
    pub retailer: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Clone)]
struct Retailer {
    name: String,
    codes: HashSet<String>,
}

/// Read-only retailer → product code table.
///
/// Declaration order is significant: retailer attribution walks the
/// retailers in the order they were given and stops at the first match.
#[derive(Debug, Clone, Default)]
pub struct RetailerCatalog {
    retailers: Vec<Retailer>,
    all_codes: HashSet<String>,
}

impl RetailerCatalog {
    pub fn new(entries: Vec<RetailerEntry>) -> Result<Self, CatalogError> {
        let mut retailers: Vec<Retailer> = Vec::with_capacity(entries.len());
        let mut all_codes = HashSet::new();

        for entry in entries {
            let name = entry.retailer.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::EmptyRetailerName);
            }
            if retailers.iter().any(|r| r.name == name) {
                return Err(CatalogError::DuplicatedRetailer(name));
            }

            let codes: HashSet<String> = entry
                .codes
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            all_codes.extend(codes.iter().cloned());
            retailers.push(Retailer { name, codes });
        }

        Ok(Self {
            retailers,
            all_codes,
        })
    }

    /// Parses `[{"retailer": "...", "codes": ["..."]}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<RetailerEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// True when any retailer lists `code`.
    pub fn contains_code(&self, code: &str) -> bool {
        self.all_codes.contains(code)
    }

    /// Retailers in declaration order, each with a membership test.
    pub fn retailers(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.retailers.iter().map(|r| (r.name.as_str(), &r.codes))
    }

    pub fn len(&self) -> usize {
        self.retailers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retailers.is_empty()
    }

    pub fn code_count(&self) -> usize {
        self.all_codes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(retailer: &str, codes: &[&str]) -> RetailerEntry {
        RetailerEntry {
            retailer: retailer.to_string(),
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn should_contain_codes_from_every_retailer() {
        let catalog = RetailerCatalog::new(vec![
            entry("Acme", &["7891910000197"]),
            entry("Globex", &["372437", "1234"]),
        ])
        .unwrap();

        assert!(catalog.contains_code("7891910000197"));
        assert!(catalog.contains_code("372437"));
        assert!(!catalog.contains_code("999999"));
        assert_eq!(catalog.code_count(), 3);
    }

    #[test]
    fn should_preserve_declaration_order() {
        let catalog = RetailerCatalog::new(vec![
            entry("Zeta", &["1111"]),
            entry("Alpha", &["2222"]),
        ])
        .unwrap();

        let names: Vec<&str> = catalog.retailers().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn should_parse_catalog_from_json() {
        let catalog = RetailerCatalog::from_json(
            r#"[{"retailer":"Acme","codes":["7891910000197"," 4567 "]}]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains_code("4567"));
    }

    #[test]
    fn should_reject_malformed_json() {
        let result = RetailerCatalog::from_json(r#"{"Acme": ["123"]}"#);
        assert!(matches!(result, Err(CatalogError::InvalidFormat(_))));
    }

    #[test]
    fn should_reject_empty_retailer_name() {
        let result = RetailerCatalog::new(vec![entry("  ", &["1234"])]);
        assert!(matches!(result, Err(CatalogError::EmptyRetailerName)));
    }

    #[test]
    fn should_reject_duplicated_retailer() {
        let result = RetailerCatalog::new(vec![entry("Acme", &["1234"]), entry("Acme", &["5678"])]);
        assert!(matches!(result, Err(CatalogError::DuplicatedRetailer(name)) if name == "Acme"));
    }

    #[test]
    fn should_accept_empty_catalog() {
        let catalog = RetailerCatalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert!(!catalog.contains_code("1234"));
    }
}
