use egui::{Align2, Color32, FontId, Id, LayerId, Order, Slider, Ui};
use glam::Vec3;

use crate::state::RenderParams;

const LINE_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=50.0;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Tab {
    #[default]
    Stars,
    Line,
    Misc,
}

/// The tabbed "Debug menu" window and the FPS readout.
#[derive(Debug, Default)]
pub struct DebugPanel {
    tab: Tab,
}

impl DebugPanel {
    /// Draws nothing when `visible` is false; `params` is left untouched then.
    pub fn show(&mut self, ctx: &egui::Context, params: &mut RenderParams, fps: &str, visible: bool) {
        if !visible {
            return;
        }

        egui::Window::new("Debug menu")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.tab, Tab::Stars, "Stars");
                    ui.selectable_value(&mut self.tab, Tab::Line, "Line");
                    ui.selectable_value(&mut self.tab, Tab::Misc, "Misc.");
                });
                ui.separator();

                match self.tab {
                    Tab::Stars => {
                        color_row(ui, "Background color", &mut params.background_color);
                        ui.add(Slider::new(&mut params.star_density, 0.0..=1.0).text("Density"));
                    }
                    Tab::Line => {
                        color_row(ui, "Line color", &mut params.line_color);
                        ui.add(
                            Slider::new(&mut params.line_start_width, LINE_WIDTH_RANGE)
                                .text("Start width"),
                        );
                        ui.add(
                            Slider::new(&mut params.line_end_width, LINE_WIDTH_RANGE)
                                .text("End width"),
                        );
                    }
                    Tab::Misc => {
                        ui.checkbox(&mut params.show_fps, "Show FPS");
                    }
                }
            });

        if params.show_fps {
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("fps")))
                .text(
                    egui::pos2(8.0, 8.0),
                    Align2::LEFT_TOP,
                    fps,
                    FontId::monospace(14.0),
                    Color32::WHITE,
                );
        }
    }

    #[cfg(test)]
    pub fn tab(&self) -> Tab {
        self.tab
    }
}

fn color_row(ui: &mut Ui, label: &str, color: &mut Vec3) {
    ui.horizontal(|ui| {
        let mut rgb = color.to_array();
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = Vec3::from_array(rgb);
        }
        ui.label(label);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(panel: &mut DebugPanel, params: &mut RenderParams, visible: bool) -> egui::FullOutput {
        let ctx = egui::Context::default();
        ctx.run(egui::RawInput::default(), |ctx| {
            panel.show(ctx, params, "60 fps", visible)
        })
    }

    #[test]
    fn visible_panel_draws_every_tab() {
        let mut params = RenderParams::default();
        for tab in [Tab::Stars, Tab::Line, Tab::Misc] {
            let mut panel = DebugPanel { tab };
            let out = run(&mut panel, &mut params, true);
            assert!(!out.shapes.is_empty());
            assert_eq!(panel.tab(), tab);
        }
        assert_eq!(params, RenderParams::default());
    }

    #[test]
    fn hidden_panel_draws_nothing() {
        let mut params = RenderParams::default();
        let out = run(&mut DebugPanel::default(), &mut params, false);
        assert!(out.shapes.is_empty());
    }

    #[test]
    fn starts_on_stars_tab() {
        assert_eq!(DebugPanel::default().tab(), Tab::Stars);
    }
}
