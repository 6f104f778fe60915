use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Ui, Vec2};

use crate::chart::PieChart;

const PIE_HEIGHT: f32 = 320.0;
/// Slices narrower than this share get no percentage label.
const MIN_LABEL_SHARE: f64 = 0.04;

// ---------------------------------------------------------------------------
// Donut chart (central panel, top)
// ---------------------------------------------------------------------------

/// Paint the success pie with its legend and hover tooltip.
pub fn success_pie(ui: &mut Ui, pie: &PieChart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&pie.title);
    });

    // Horizontal legend above the chart.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for slice in &pie.slices {
            ui.label(RichText::new("■").color(slice.color));
            ui.label(&slice.label);
            ui.add_space(8.0);
        }
    });

    let size = Vec2::new(ui.available_width(), PIE_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    if pie.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No launches",
            FontId::proportional(16.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let center = rect.center();
    let outer = rect.width().min(rect.height()) * 0.45;
    let inner = outer * pie.hole;
    let total = pie.total() as f32;

    let mut mesh = Mesh::default();
    let mut start = -FRAC_PI_2;
    let mut labels = Vec::new();
    for slice in &pie.slices {
        if slice.value == 0 {
            continue;
        }
        let sweep = TAU * slice.value as f32 / total;
        annular_sector(&mut mesh, center, inner, outer, start, sweep, slice.color);

        let share = pie.share(slice);
        if share >= MIN_LABEL_SHARE {
            let mid = start + sweep / 2.0;
            let pos = center + Vec2::angled(mid) * (inner + outer) / 2.0;
            labels.push((pos, format!("{:.1}%", share * 100.0)));
        }
        start += sweep;
    }
    painter.add(egui::Shape::mesh(mesh));
    for (pos, text) in labels {
        painter.text(pos, Align2::CENTER_CENTER, text, FontId::proportional(13.0), Color32::WHITE);
    }

    // Hover: hit-test the ring and show label / count / share.
    let hovered = response.hover_pos().and_then(|pos| {
        let d = pos - center;
        let r = d.length();
        if r < inner || r > outer {
            return None;
        }
        let angle = (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU);
        slice_at(pie, angle)
    });
    if let Some(idx) = hovered {
        let slice = &pie.slices[idx];
        let share = pie.share(slice);
        response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&slice.label);
            ui.label(format!("Count: {}", slice.value));
            ui.label(format!("{:.1}%", share * 100.0));
        });
    }
}

/// Index of the slice covering `angle` radians, measured clockwise from
/// twelve o'clock.
pub fn slice_at(pie: &PieChart, angle: f32) -> Option<usize> {
    let total = pie.total();
    if total == 0 {
        return None;
    }
    let mut end = 0.0;
    for (i, slice) in pie.slices.iter().enumerate() {
        if slice.value == 0 {
            continue;
        }
        end += TAU * slice.value as f32 / total as f32;
        if angle < end {
            return Some(i);
        }
    }
    // Rounding can leave a sliver just below TAU.
    pie.slices.iter().rposition(|s| s.value > 0)
}

fn annular_sector(
    mesh: &mut Mesh,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / TAU) * 128.0).ceil().max(1.0) as u32;
    let base = mesh.vertices.len() as u32;
    for i in 0..=steps {
        let dir = Vec2::angled(start + sweep * i as f32 / steps as f32);
        mesh.colored_vertex(center + dir * inner, color);
        mesh.colored_vertex(center + dir * outer, color);
    }
    for i in 0..steps {
        let k = base + 2 * i;
        mesh.add_triangle(k, k + 1, k + 2);
        mesh.add_triangle(k + 1, k + 3, k + 2);
    }
}
