use super::model::{LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Row predicate: site selector + inclusive payload range
// ---------------------------------------------------------------------------

fn passes(record: &LaunchRecord, selector: &SiteSelector, range: &PayloadRange) -> bool {
    selector.matches(&record.launch_site) && range.contains(record.payload_mass_kg)
}

/// Return indices of records that pass the site and payload filters.
///
/// A record passes when:
/// * the selector is `All`, or its launch site equals the selected site, and
/// * its payload mass lies in `[range.min_kg, range.max_kg]`.
///
/// An inverted range yields no indices.
pub fn filtered_indices(
    records: &[LaunchRecord],
    selector: &SiteSelector,
    range: &PayloadRange,
) -> Vec<usize> {
    if range.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| passes(rec, selector, range))
        .map(|(i, _)| i)
        .collect()
}

/// Subsequence of `records` matching the selector and payload range, in
/// source order.
pub fn filter_by_payload<'a>(
    records: &'a [LaunchRecord],
    selector: &SiteSelector,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    filtered_indices(records, selector, range)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn sample() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 1500.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("B", 800.0, Outcome::Success, "FT"),
        ]
    }

    #[test]
    fn filters_by_site_and_payload() {
        let records = sample();
        let out = filter_by_payload(
            &records,
            &SiteSelector::Site("A".into()),
            &PayloadRange::new(0.0, 1000.0),
        );
        assert_eq!(out, vec![&records[0]]);
    }

    #[test]
    fn all_sites_with_unbounded_range_is_identity() {
        let records = sample();
        let out = filter_by_payload(&records, &SiteSelector::All, &PayloadRange::unbounded());
        let expected: Vec<&LaunchRecord> = records.iter().collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn bounds_are_inclusive() {
        let records = sample();
        let idx = filtered_indices(&records, &SiteSelector::All, &PayloadRange::new(800.0, 1500.0));
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let records = sample();
        for (a, b) in [(1000.0, 0.0), (1500.0, 1499.9), (f64::INFINITY, 0.0)] {
            let out = filter_by_payload(&records, &SiteSelector::All, &PayloadRange::new(a, b));
            assert!(out.is_empty(), "range [{a}, {b}] should be empty");
        }
    }

    #[test]
    fn unknown_site_yields_nothing() {
        let records = sample();
        let out = filter_by_payload(
            &records,
            &SiteSelector::Site("Z".into()),
            &PayloadRange::unbounded(),
        );
        assert!(out.is_empty());
    }
}
