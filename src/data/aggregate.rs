use super::model::{LaunchRecord, Outcome, SiteSelector};

// ---------------------------------------------------------------------------
// Success counts feeding the pie chart
// ---------------------------------------------------------------------------

/// Result of [`site_success_counts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessCounts {
    /// Successful launches per site, in first-occurrence order.
    BySite(Vec<(String, usize)>),
    /// Outcome counts for a single site: both outcomes, in first-occurrence
    /// order, an outcome that never happens at the site trailing with 0.
    ByOutcome {
        site: String,
        counts: Vec<(Outcome, usize)>,
    },
}

impl SuccessCounts {
    /// Flatten into `(label, count)` pairs in display order.
    pub fn slices(&self) -> Vec<(String, usize)> {
        match self {
            SuccessCounts::BySite(counts) => counts.clone(),
            SuccessCounts::ByOutcome { counts, .. } => counts
                .iter()
                .map(|(outcome, n)| (outcome.label().to_string(), *n))
                .collect(),
        }
    }

    pub fn total(&self) -> usize {
        match self {
            SuccessCounts::BySite(counts) => counts.iter().map(|(_, n)| n).sum(),
            SuccessCounts::ByOutcome { counts, .. } => counts.iter().map(|(_, n)| n).sum(),
        }
    }
}

/// Count `keys` by value, keeping the order in which each value first appears.
fn count_in_order<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// Aggregate launch outcomes for the pie chart.
///
/// * `All` → count successful records per site.
/// * `Site(s)` → split the records of site `s` into successes and failures.
pub fn site_success_counts(records: &[LaunchRecord], selector: &SiteSelector) -> SuccessCounts {
    match selector {
        SiteSelector::All => SuccessCounts::BySite(count_in_order(
            records
                .iter()
                .filter(|r| r.outcome.is_success())
                .map(|r| r.launch_site.clone()),
        )),
        SiteSelector::Site(site) => {
            let mut counts = count_in_order(
                records
                    .iter()
                    .filter(|r| r.launch_site == *site)
                    .map(|r| r.outcome),
            );
            for outcome in [Outcome::Failure, Outcome::Success] {
                if !counts.iter().any(|(o, _)| *o == outcome) {
                    counts.push((outcome, 0));
                }
            }
            SuccessCounts::ByOutcome {
                site: site.clone(),
                counts,
            }
        }
    }
}
