use eframe::egui::Color32;
use serde::Serialize;

use crate::color::{self, ColorMap};
use crate::data::aggregate::SuccessCounts;
use crate::data::model::{LaunchRecord, Outcome, SiteSelector};

// ---------------------------------------------------------------------------
// Renderer-independent chart descriptions
// ---------------------------------------------------------------------------

/// Inner radius of the donut as a fraction of the outer radius.
pub const PIE_HOLE: f32 = 0.5;

pub const MIN_MARKER_RADIUS: f32 = 3.0;
pub const MAX_MARKER_RADIUS: f32 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    #[serde(serialize_with = "color::serialize_hex")]
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub hole: f32,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Fraction of the whole taken by `slice`, 0 for an empty pie.
    pub fn share(&self, slice: &PieSlice) -> f64 {
        match self.total() {
            0 => 0.0,
            total => slice.value as f64 / total as f64,
        }
    }

    /// Nothing to draw: no slices or all of them zero.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    #[serde(serialize_with = "color::serialize_hex")]
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
    pub radius: f32,
    #[serde(serialize_with = "color::serialize_hex")]
    pub color: Color32,
}

impl ScatterPoint {
    /// Plot coordinates: payload on x, class (0/1) on y.
    pub fn xy(&self) -> [f64; 2] {
        [self.payload_mass_kg, f64::from(self.outcome.as_class())]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    /// Booster categories present in `points`, in dataset order.
    pub legend: Vec<LegendEntry>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Describe the success pie for the current site selection.
pub fn pie_chart(counts: &SuccessCounts) -> PieChart {
    let slices = counts.slices();
    let (title, colors) = match counts {
        SuccessCounts::BySite(_) => (
            "Total Successful Launches for All Sites".to_string(),
            color::categorical_palette(slices.len()),
        ),
        SuccessCounts::ByOutcome { site, counts } => (
            format!("Total Successful Launches for {site}"),
            counts
                .iter()
                .map(|(outcome, _)| color::outcome_color(*outcome))
                .collect(),
        ),
    };

    PieChart {
        title,
        hole: PIE_HOLE,
        slices: slices
            .into_iter()
            .zip(colors)
            .map(|((label, value), color)| PieSlice {
                label,
                value,
                color,
            })
            .collect(),
    }
}

/// Marker radius grows with the square root of the payload so marker
/// area tracks mass.
pub fn marker_radius(payload_mass_kg: f64, max_payload_kg: f64) -> f32 {
    if max_payload_kg <= 0.0 {
        return MIN_MARKER_RADIUS;
    }
    let t = (payload_mass_kg / max_payload_kg).clamp(0.0, 1.0).sqrt() as f32;
    MIN_MARKER_RADIUS + (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS) * t
}

/// Describe the payload/outcome scatter for already filtered rows.
///
/// `booster_colors` is built over the whole dataset and `max_payload_kg` is
/// the dataset maximum, so colours and marker sizes do not shift as the
/// filters change.
pub fn scatter_chart(
    records: &[&LaunchRecord],
    selector: &SiteSelector,
    booster_colors: &ColorMap,
    max_payload_kg: f64,
) -> ScatterChart {
    let title = match selector {
        SiteSelector::All => "Correlation Between Payload and Success for all Sites".to_string(),
        SiteSelector::Site(site) => format!("Correlation Between Payload and Success for {site}"),
    };

    let points = records
        .iter()
        .map(|rec| ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
            radius: marker_radius(rec.payload_mass_kg, max_payload_kg),
            color: booster_colors.color_for(&rec.booster_version_category),
        })
        .collect::<Vec<_>>();

    let legend = booster_colors
        .legend_entries()
        .iter()
        .filter(|(label, _)| points.iter().any(|p| p.booster_version_category == *label))
        .map(|(label, color)| LegendEntry {
            label: label.clone(),
            color: *color,
        })
        .collect();

    ScatterChart {
        title,
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "Launch Outcome".to_string(),
        points,
        legend,
    }
}

/// Both chart descriptions, as written by File → Export.
#[derive(Debug, Serialize)]
pub struct ChartExport<'a> {
    pub pie: &'a PieChart,
    pub scatter: &'a ScatterChart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::site_success_counts;
    use crate::data::filter::filter_by_payload;
    use crate::data::model::PayloadRange;

    fn sample() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 1500.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("B", 800.0, Outcome::Success, "FT"),
        ]
    }

    #[test]
    fn all_sites_pie() {
        let pie = pie_chart(&site_success_counts(&sample(), &SiteSelector::All));
        assert_eq!(pie.title, "Total Successful Launches for All Sites");
        assert_eq!(pie.hole, 0.5);
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(pie.slices[0].color, color::G10[0]);
        let shares: f64 = pie.slices.iter().map(|s| pie.share(s)).sum();
        assert!((shares - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_site_pie_uses_outcome_colours() {
        let pie = pie_chart(&site_success_counts(&sample(), &SiteSelector::Site("A".into())));
        assert_eq!(pie.title, "Total Successful Launches for A");
        assert_eq!(pie.slices[0].label, "Success");
        assert_eq!(pie.slices[0].color, color::outcome_color(Outcome::Success));
        assert_eq!(pie.slices[1].label, "Failure");
        assert_eq!(pie.slices[1].value, 1);
    }

    #[test]
    fn single_site_pie_keeps_failure_first_when_it_came_first() {
        let records = vec![
            LaunchRecord::new("A", 100.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("A", 200.0, Outcome::Success, "FT"),
        ];
        let pie = pie_chart(&site_success_counts(&records, &SiteSelector::Site("A".into())));
        assert_eq!(pie.slices[0].label, "Failure");
        assert_eq!(pie.slices[0].color, color::outcome_color(Outcome::Failure));
        assert_eq!(pie.slices[1].label, "Success");
        assert_eq!(pie.slices[1].color, color::outcome_color(Outcome::Success));
    }

    #[test]
    fn empty_pie() {
        let pie = pie_chart(&site_success_counts(&[], &SiteSelector::All));
        assert!(pie.is_empty());
        let pie = pie_chart(&site_success_counts(&sample(), &SiteSelector::Site("Z".into())));
        assert!(pie.is_empty());
        assert_eq!(pie.share(&pie.slices[0]), 0.0);
    }

    #[test]
    fn scatter_colours_are_stable_across_filters() {
        let records = sample();
        let colors = ColorMap::new(&["v1.0".to_string(), "FT".to_string()]);

        let all = filter_by_payload(&records, &SiteSelector::All, &PayloadRange::unbounded());
        let chart = scatter_chart(&all, &SiteSelector::All, &colors, 1500.0);
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.legend.len(), 2);

        let narrow = filter_by_payload(&records, &SiteSelector::All, &PayloadRange::new(0.0, 900.0));
        let chart = scatter_chart(&narrow, &SiteSelector::All, &colors, 1500.0);
        assert!(chart.points.iter().all(|p| p.color == colors.color_for("FT")));
        let legend: Vec<&str> = chart.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(legend, vec!["FT"]);
    }

    #[test]
    fn scatter_points_and_title() {
        let records = sample();
        let rows = filter_by_payload(
            &records,
            &SiteSelector::Site("A".into()),
            &PayloadRange::unbounded(),
        );
        let colors = ColorMap::new(&["FT".to_string(), "v1.0".to_string()]);
        let chart = scatter_chart(&rows, &SiteSelector::Site("A".into()), &colors, 1500.0);
        assert_eq!(chart.title, "Correlation Between Payload and Success for A");
        assert_eq!(chart.points[0].xy(), [500.0, 1.0]);
        assert_eq!(chart.points[1].xy(), [1500.0, 0.0]);
        assert_eq!(chart.points[1].radius, MAX_MARKER_RADIUS);
    }

    #[test]
    fn marker_radius_bounds() {
        assert_eq!(marker_radius(0.0, 10_000.0), MIN_MARKER_RADIUS);
        assert_eq!(marker_radius(10_000.0, 10_000.0), MAX_MARKER_RADIUS);
        assert_eq!(marker_radius(5.0, 0.0), MIN_MARKER_RADIUS);
        assert!(marker_radius(2_500.0, 10_000.0) > marker_radius(1_000.0, 10_000.0));
    }

    #[test]
    fn export_serializes_hex_colours() {
        let pie = pie_chart(&site_success_counts(&sample(), &SiteSelector::Site("B".into())));
        let scatter = scatter_chart(&[], &SiteSelector::All, &ColorMap::new(&[]), 0.0);
        let json = serde_json::to_value(ChartExport {
            pie: &pie,
            scatter: &scatter,
        })
        .unwrap();
        assert_eq!(json["pie"]["slices"][0]["color"], "#008000");
        assert_eq!(json["pie"]["slices"][1]["value"], 0);
        assert!(json["scatter"]["points"].as_array().unwrap().is_empty());
    }
}
