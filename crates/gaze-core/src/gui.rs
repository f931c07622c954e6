use egui;

use crate::controller::Face;
use crate::state::Field;

/// Debug/tuning side panel: emotion switching, generic sliders over the
/// field table, blink controls and the eye color.
pub fn eye_control_panel(ctx: &egui::Context, face: &mut Face) {
    egui::SidePanel::right("eye_controls")
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Eye Controls");
            ui.separator();

            ui.horizontal_wrapped(|ui| {
                let names: Vec<String> =
                    face.presets().names().map(str::to_owned).collect();
                for name in names {
                    let selected = face.current_emotion() == name;
                    if ui.selectable_label(selected, name.as_str()).clicked() {
                        face.set_emotion(&name);
                    }
                }
            });

            ui.separator();

            egui::CollapsingHeader::new("Tuning")
                .default_open(true)
                .show(ui, |ui| {
                    // Every slider binds through the typed accessor table, so
                    // adding a field to the table adds its control here.
                    let state = face.state_mut();
                    for field in Field::ALL {
                        let mut value = field.get(state);
                        let slider =
                            egui::Slider::new(&mut value, field.slider_range())
                                .text(field.label());
                        if ui.add(slider).changed() {
                            field.set(state, value);
                        }
                    }
                });

            ui.separator();

            if ui.button("Blink now").clicked() {
                face.trigger_blink();
            }
            let mut interval = face.blink().interval();
            let slider = egui::Slider::new(&mut interval, 0.5..=10.0).text("Blink Interval");
            if ui.add(slider).changed() {
                // The slider range keeps the value positive.
                let _ = face.set_blink_interval(interval);
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Eye Color");
                color_edit_rgb(ui, &mut face.state_mut().color);
            });
        });
}

fn color_edit_rgb(ui: &mut egui::Ui, color: &mut [f32; 3]) {
    let mut rgba = egui::Color32::from_rgb(
        (color[0] * 255.0) as u8,
        (color[1] * 255.0) as u8,
        (color[2] * 255.0) as u8,
    );
    if ui.color_edit_button_srgba(&mut rgba).changed() {
        color[0] = rgba.r() as f32 / 255.0;
        color[1] = rgba.g() as f32 / 255.0;
        color[2] = rgba.b() as f32 / 255.0;
    }
}
