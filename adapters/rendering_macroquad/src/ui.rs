//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter
//! can remain agnostic of Macroquad's UI types. The control panel draws the
//! transport buttons, the zoom and speed controls, and the status block.

use macroquad::{
    color::Color,
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use langton_core::Heading;
use langton_rendering::HudView;

/// Snapshot of the control panel's layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour applied to the window skin so the UI matches the
    /// adapter's solid rectangle.
    pub background: Color,
    /// Colour applied to button faces.
    pub button: Color,
    /// Colour applied to text.
    pub text: Color,
    /// Colour applied to the zoom indicator.
    pub panel_accent: Color,
    /// Colour applied to statistics values.
    pub accent: Color,
    /// Status values mirrored from the simulation.
    pub hud: HudView,
    /// Direction the ant currently faces.
    pub heading: Heading,
    /// Multiplier of the currently selected zoom slot.
    pub zoom_multiplier: f32,
}

/// Buttons pressed on the control panel during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlPanelUiResult {
    /// Whether the play button was pressed.
    pub play: bool,
    /// Whether the pause button was pressed.
    pub pause: bool,
    /// Whether the single-step button was pressed.
    pub step: bool,
    /// Whether the reset button was pressed.
    pub reset: bool,
    /// Whether the zoom-in button was pressed.
    pub zoom_in: bool,
    /// Whether the zoom-out button was pressed.
    pub zoom_out: bool,
    /// Whether the speed-up button was pressed.
    pub faster: bool,
    /// Whether the slow-down button was pressed.
    pub slower: bool,
    /// Whether the help button was pressed.
    pub help: bool,
}

impl ControlPanelUiResult {
    /// Reports whether any button was pressed this frame.
    pub(crate) fn any(self) -> bool {
        self.play
            || self.pause
            || self.step
            || self.reset
            || self.zoom_in
            || self.zoom_out
            || self.faster
            || self.slower
            || self.help
    }
}

/// Renders the control panel's interactive elements for the current frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(context.text)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(context.text)
        .text_color_hovered(context.text)
        .text_color_clicked(context.text)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(context.text)
        .text_color_hovered(context.text)
        .text_color_clicked(context.text)
        .color(context.button)
        .color_hovered(lightened(context.button, 0.15))
        .color_clicked(darkened(context.button, 0.15))
        .color_selected(context.button)
        .color_selected_hovered(lightened(context.button, 0.15))
        .color_inactive(darkened(context.button, 0.3))
        .margin(RectOffset::new(12.0, 12.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    let mut accent_skin = skin.clone();
    accent_skin.label_style = ui
        .style_builder()
        .text_color(context.accent)
        .text_color_hovered(context.accent)
        .text_color_clicked(context.accent)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();

    let mut zoom_skin = skin.clone();
    zoom_skin.label_style = ui
        .style_builder()
        .text_color(context.panel_accent)
        .text_color_hovered(context.panel_accent)
        .text_color_clicked(context.panel_accent)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();

    ui.push_skin(&skin);

    let mut result = ControlPanelUiResult::default();
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        ui.label(None, "Langton's Ant");
        ui.push_skin(&zoom_skin);
        ui.label(None, format!("Zoom: {:.2}x", context.zoom_multiplier).as_str());
        ui.pop_skin();
        ui.separator();

        result.play = ui.button(None, "Play");
        ui.same_line(0.0);
        result.pause = ui.button(None, "Pause");

        result.step = ui.button(None, "Step");
        ui.same_line(0.0);
        result.reset = ui.button(None, "Reset");

        ui.label(None, "Zoom");
        result.zoom_in = ui.button(None, "+");
        ui.same_line(0.0);
        result.zoom_out = ui.button(None, "-");

        ui.label(None, "Speed");
        result.faster = ui.button(None, "Faster");
        ui.same_line(0.0);
        result.slower = ui.button(None, "Slower");
        ui.separator();

        ui.push_skin(&accent_skin);
        ui.label(None, format!("Steps: {}", context.hud.steps).as_str());
        ui.label(
            None,
            format!("Speed: {}/10", context.hud.speed.get()).as_str(),
        );
        ui.pop_skin();
        ui.label(
            None,
            if context.hud.running {
                "State: Running"
            } else {
                "State: Paused"
            },
        );
        ui.label(
            None,
            format!("Heading: {}", context.heading.name()).as_str(),
        );
        ui.label(
            None,
            format!("Phase: {}", context.hud.phase.name()).as_str(),
        );
        ui.separator();

        result.help = ui.button(None, "Rules & controls");
    });

    ui.pop_skin();

    result
}

fn lightened(color: Color, amount: f32) -> Color {
    Color::new(
        color.r + (1.0 - color.r) * amount,
        color.g + (1.0 - color.g) * amount,
        color.b + (1.0 - color.b) * amount,
        color.a,
    )
}

fn darkened(color: Color, amount: f32) -> Color {
    Color::new(
        color.r * (1.0 - amount),
        color.g * (1.0 - amount),
        color.b * (1.0 - amount),
        color.a,
    )
}
