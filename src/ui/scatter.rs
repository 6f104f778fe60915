use eframe::egui::{RichText, Ui};
use egui_plot::{GridMark, MarkerShape, Plot, PlotPoint, Points};

use crate::chart::ScatterChart;

const SCATTER_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter (central panel, bottom)
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter chart.
pub fn payload_scatter(ui: &mut Ui, chart: &ScatterChart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    if chart.points.is_empty() {
        ui.label(RichText::new("No launches in the selected payload range.").weak());
    }

    Plot::new("payload_scatter")
        .height(SCATTER_HEIGHT)
        .legend(egui_plot::Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .y_axis_formatter(|mark: GridMark, _range| outcome_tick(mark.value))
        .label_formatter(|name, value: &PlotPoint| {
            let outcome = outcome_tick(value.y.round());
            if name.is_empty() {
                format!("{:.0} kg", value.x)
            } else {
                format!("{name}\n{:.0} kg\n{outcome}", value.x)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One item per marker so each can carry its own size; items
            // sharing a booster name share one legend entry.
            for point in &chart.points {
                plot_ui.points(
                    Points::new(vec![point.xy()])
                        .name(&point.booster_version_category)
                        .color(point.color)
                        .radius(point.radius)
                        .shape(MarkerShape::Circle)
                        .filled(true),
                );
            }
        });
}

/// Y axis labels: only the two outcome classes get a tick label.
fn outcome_tick(y: f64) -> String {
    if y == 0.0 {
        "Failure".to_string()
    } else if y == 1.0 {
        "Success".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_class_values_are_labelled() {
        assert_eq!(outcome_tick(0.0), "Failure");
        assert_eq!(outcome_tick(1.0), "Success");
        assert_eq!(outcome_tick(0.5), "");
    }
}
