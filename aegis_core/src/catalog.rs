//! Built-in symptom catalog.
//!
//! The catalog maps body regions to the symptom tags the checker can
//! record for them. It defines the classifier's input vocabulary; the
//! classifier itself accepts any tag strings.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<SymptomCatalog> = Lazy::new(build_default_catalog_internal);

/// A selectable body region and its associated symptom tags
#[derive(Clone, Debug)]
pub struct BodyRegion {
    pub id: String,
    pub name: String,
    pub symptoms: Vec<String>,
}

/// The complete catalog of body regions
#[derive(Clone, Debug)]
pub struct SymptomCatalog {
    pub regions: HashMap<String, BodyRegion>,
}

impl SymptomCatalog {
    /// Look up a region by its id
    pub fn region(&self, id: &str) -> Option<&BodyRegion> {
        self.regions.get(id)
    }

    /// All regions, sorted by id for deterministic iteration
    pub fn regions_sorted(&self) -> Vec<&BodyRegion> {
        let mut regions: Vec<_> = self.regions.values().collect();
        regions.sort_by(|a, b| a.id.cmp(&b.id));
        regions
    }

    /// Every known symptom tag across all regions, deduplicated and sorted
    pub fn all_symptoms(&self) -> Vec<String> {
        let mut symptoms: Vec<String> = self
            .regions
            .values()
            .flat_map(|r| r.symptoms.iter().cloned())
            .collect();
        symptoms.sort();
        symptoms.dedup();
        symptoms
    }

    /// Validate the catalog, returning human-readable problems
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, region) in &self.regions {
            if key != &region.id {
                errors.push(format!(
                    "Region key '{}' does not match region id '{}'",
                    key, region.id
                ));
            }
            if region.name.is_empty() {
                errors.push(format!("Region '{}' has an empty name", region.id));
            }
            if region.symptoms.is_empty() {
                errors.push(format!("Region '{}' has no symptoms", region.id));
            }
        }

        errors
    }
}

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static SymptomCatalog {
    &DEFAULT_CATALOG
}

/// Build the default catalog of body regions
///
/// **Note**: prefer `get_default_catalog()` which returns a cached
/// reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> SymptomCatalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> SymptomCatalog {
    let mut regions = HashMap::new();

    insert_region(
        &mut regions,
        "head",
        "Head",
        &["headache", "dizziness", "nausea"],
    );
    insert_region(
        &mut regions,
        "chest",
        "Chest",
        &["chest pain", "shortness of breath", "heart palpitations"],
    );
    insert_region(
        &mut regions,
        "stomach",
        "Stomach",
        &["stomach pain", "indigestion", "bloating"],
    );
    insert_region(&mut regions, "arm", "Arm", &["arm pain", "numbness", "weakness"]);
    insert_region(&mut regions, "leg", "Leg", &["leg pain", "swelling", "cramps"]);

    SymptomCatalog { regions }
}

fn insert_region(
    regions: &mut HashMap<String, BodyRegion>,
    id: &str,
    name: &str,
    symptoms: &[&str],
) {
    regions.insert(
        id.into(),
        BodyRegion {
            id: id.into(),
            name: name.into(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_default_catalog_has_five_regions() {
        let catalog = get_default_catalog();
        assert_eq!(catalog.regions.len(), 5);
        assert!(catalog.region("chest").is_some());
        assert!(catalog.region("tail").is_none());
    }

    #[test]
    fn test_chest_region_covers_cardiac_tags() {
        let catalog = get_default_catalog();
        let chest = catalog.region("chest").unwrap();

        assert!(chest.symptoms.contains(&"chest pain".to_string()));
        assert!(chest.symptoms.contains(&"heart palpitations".to_string()));
    }

    #[test]
    fn test_all_symptoms_sorted_and_unique() {
        let symptoms = get_default_catalog().all_symptoms();

        assert_eq!(symptoms.len(), 15);
        let mut sorted = symptoms.clone();
        sorted.sort();
        assert_eq!(symptoms, sorted);
    }

    #[test]
    fn test_validate_flags_empty_symptoms() {
        let mut catalog = build_default_catalog();
        catalog.regions.insert(
            "neck".into(),
            BodyRegion {
                id: "neck".into(),
                name: "Neck".into(),
                symptoms: vec![],
            },
        );

        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("neck"));
    }
}
