use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map a raw `class` value. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Numeric value used as the scatter chart y coordinate.
    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Payload mass in kilograms, finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    /// Record with only the required columns populated.
    pub fn new(site: &str, payload_mass_kg: f64, outcome: Outcome, booster: &str) -> Self {
        Self {
            launch_site: site.to_string(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster.to_string(),
            flight_number: None,
            booster_version: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector / range inputs
// ---------------------------------------------------------------------------

/// Which launch site(s) the dashboard is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => f.write_str("All Sites"),
            SiteSelector::Site(s) => f.write_str(s),
        }
    }
}

/// Inclusive payload mass interval in kilograms.
///
/// No ordering is enforced between the bounds: a range with `min_kg > max_kg`
/// (or a NaN bound) simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl PayloadRange {
    pub fn new(min_kg: f64, max_kg: f64) -> Self {
        Self { min_kg, max_kg }
    }

    /// `[0, ∞)`
    #[cfg(test)]
    pub fn unbounded() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.min_kg && payload_kg <= self.max_kg
    }

    pub fn is_empty(&self) -> bool {
        !matches!(
            self.min_kg.partial_cmp(&self.max_kg),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches, in source order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-occurrence order.
    pub sites: Vec<String>,
    /// Distinct booster version categories in first-occurrence order.
    pub booster_categories: Vec<String>,
    /// Smallest and largest payload mass, `None` for an empty table.
    pub payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build category indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                None => (m, m),
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// Full payload range of the table, `[0, 0]` when empty.
    pub fn full_payload_range(&self) -> PayloadRange {
        let (lo, hi) = self.payload_bounds.unwrap_or((0.0, 0.0));
        PayloadRange::new(lo, hi)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_indexes_categories_in_first_occurrence_order() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 2000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("CCAFS LC-40", 9600.0, Outcome::Success, "v1.1"),
        ]);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.booster_categories, vec!["v1.1", "FT"]);
        assert_eq!(ds.payload_bounds, Some((500.0, 9600.0)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_degenerate_range() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.full_payload_range(), PayloadRange::new(0.0, 0.0));
    }

    #[test]
    fn inverted_or_nan_range_is_empty() {
        assert!(PayloadRange::new(10.0, 5.0).is_empty());
        assert!(PayloadRange::new(f64::NAN, 5.0).is_empty());
        assert!(!PayloadRange::new(5.0, 5.0).is_empty());
        assert!(PayloadRange::new(5.0, 5.0).contains(5.0));
        assert!(!PayloadRange::new(10.0, 5.0).contains(7.0));
    }

    #[test]
    fn selector_matching() {
        assert!(SiteSelector::All.matches("anything"));
        assert!(SiteSelector::Site("A".into()).matches("A"));
        assert!(!SiteSelector::Site("A".into()).matches("B"));
        assert_eq!(SiteSelector::All.to_string(), "All Sites");
    }

    #[test]
    fn outcome_class_mapping() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::Success.as_class(), 1);
    }
}
