#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Langton's Ant.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in containerised CI environments. To keep
//! `cargo test` usable everywhere we depend on macroquad without its default
//! `audio` feature; the simulator plays no sound anyway.
//!
//! The adapter owns everything pointer-and-pixel shaped: it applies wheel
//! zooms and drag pans straight to the scene's viewport, folds panel button
//! presses and keyboard shortcuts into the [`FrameInput`] handed to the
//! update closure, and draws the canvas, the side control panel, and the
//! non-blocking help overlay. All `macroquad::ui` calls live inside the local
//! `ui` module to avoid leaking UI types throughout the renderer.

mod theme;
mod ui;

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    input::{
        get_last_key_pressed, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed,
        mouse_position, mouse_wheel, KeyCode, MouseButton,
    },
    math::Vec2 as MacroquadVec2,
    shapes::{draw_rectangle, draw_rectangle_lines, draw_triangle},
    text::draw_text,
};
use langton_rendering::{
    visuals, Color, FrameInput, Presentation, RenderingBackend, Scene, Theme, ZoomDirection,
};

use self::ui::{draw_control_panel_ui, ControlPanelUiContext, ControlPanelUiResult};

const THEME_MANIFEST_PATH: &str = "assets/theme.toml";

const HELP_TITLE_SIZE: f32 = 30.0;
const HELP_BODY_SIZE: f32 = 20.0;
const HELP_LINE_HEIGHT: f32 = 26.0;
const HELP_SCROLL_STEP: f32 = 40.0;

const HELP_LINES: &[&str] = &[
    "LANGTON'S ANT",
    "",
    "A two-dimensional cellular automaton with a single mobile agent,",
    "devised by Chris Langton in 1986. Two rules produce surprisingly",
    "complex behaviour:",
    "",
    "  * On a dark cell: turn 90 degrees right, light the cell, advance.",
    "  * On a lit cell: turn 90 degrees left, darken the cell, advance.",
    "",
    "The grid is a torus: walking off one edge continues on the opposite",
    "edge.",
    "",
    "Emergent behaviour:",
    "  * ~0-500 steps: chaotic wandering.",
    "  * ~500-10,000 steps: recurring motifs.",
    "  * beyond ~10,000 steps: the famous periodic 'highway'.",
    "",
    "Controls:",
    "  Left click   toggle a cell",
    "  Right drag   pan the canvas",
    "  Mouse wheel  zoom at the pointer",
    "  Space        run / pause",
    "  Right arrow  single step",
    "  R            reset",
    "  +/-          speed up / slow down",
    "  H            open or close this help",
    "",
    "Zooming keeps the cell under the pointer fixed while the level",
    "changes.",
];

/// Buttons available on the side control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelButton {
    /// Starts automatic stepping.
    Play,
    /// Pauses automatic stepping.
    Pause,
    /// Executes a single step.
    Step,
    /// Resets the simulation.
    Reset,
    /// Zooms in one slot, anchored at the window centre.
    ZoomIn,
    /// Zooms out one slot, anchored at the window centre.
    ZoomOut,
    /// Raises the speed setting.
    Faster,
    /// Lowers the speed setting.
    Slower,
    /// Opens the help overlay.
    Help,
}

impl PanelButton {
    const COUNT: usize = 9;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Tracks UI-sourced button presses so they can be merged with physical input
/// on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    latched: [bool; PanelButton::COUNT],
}

impl ControlPanelInputState {
    /// Records that a control-panel button was pressed this frame.
    pub fn register(&mut self, button: PanelButton) {
        self.latched[button.index()] = true;
    }

    /// Returns whether the button was pressed and clears the latch so the
    /// action fires only once.
    pub fn take(&mut self, button: PanelButton) -> bool {
        let latched = self.latched[button.index()];
        self.latched[button.index()] = false;
        latched
    }

    fn register_presses(&mut self, result: ControlPanelUiResult) {
        if !result.any() {
            return;
        }
        let presses = [
            (result.play, PanelButton::Play),
            (result.pause, PanelButton::Pause),
            (result.step, PanelButton::Step),
            (result.reset, PanelButton::Reset),
            (result.zoom_in, PanelButton::ZoomIn),
            (result.zoom_out, PanelButton::ZoomOut),
            (result.faster, PanelButton::Faster),
            (result.slower, PanelButton::Slower),
            (result.help, PanelButton::Help),
        ];
        for (pressed, button) in presses {
            if pressed {
                self.register(button);
            }
        }
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single
/// frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the frame loop.
    quit_requested: bool,
    /// `Space` toggles automatic stepping.
    playback_toggled: bool,
    /// `Right` executes a single step.
    step: bool,
    /// `R` resets the simulation.
    reset: bool,
    /// `H` opens the help overlay.
    help: bool,
    /// `+` raises the speed setting.
    faster: bool,
    /// `-` lowers the speed setting.
    slower: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            playback_toggled: is_key_pressed(KeyCode::Space),
            step: is_key_pressed(KeyCode::Right),
            reset: is_key_pressed(KeyCode::R),
            help: is_key_pressed(KeyCode::H),
            faster: is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd),
            slower: is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract),
        }
    }
}

/// Tracks the anchor of an in-progress right-button drag.
#[derive(Clone, Copy, Debug, Default)]
struct DragState {
    last_position: Option<Vec2>,
}

/// Non-blocking help overlay with wheel scrolling.
#[derive(Debug, Default)]
struct HelpOverlay {
    visible: bool,
    scroll: f32,
}

impl HelpOverlay {
    fn visible(&self) -> bool {
        self.visible
    }

    fn open(&mut self) {
        self.visible = true;
        self.scroll = 0.0;
    }

    /// Scrolls on wheel input and closes on any click or key press. Called
    /// instead of regular input gathering while the overlay is open.
    fn consume_input(&mut self) {
        let (_, wheel_y) = mouse_wheel();
        if wheel_y > 0.0 {
            self.scroll = (self.scroll - HELP_SCROLL_STEP).max(0.0);
        } else if wheel_y < 0.0 {
            self.scroll += HELP_SCROLL_STEP;
        }
        if is_mouse_button_pressed(MouseButton::Left) || get_last_key_pressed().is_some() {
            self.visible = false;
        }
    }

    fn draw(&mut self, theme: &Theme, screen: Vec2) {
        draw_rectangle(
            0.0,
            0.0,
            screen.x,
            screen.y,
            to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.7)),
        );

        let modal = Vec2::new(
            (screen.x - 160.0).min(820.0).max(240.0),
            (screen.y - 160.0).min(640.0).max(200.0),
        );
        let top_left = (screen - modal) * 0.5;
        draw_rectangle(
            top_left.x,
            top_left.y,
            modal.x,
            modal.y,
            to_macroquad_color(theme.help_background),
        );
        draw_rectangle_lines(
            top_left.x,
            top_left.y,
            modal.x,
            modal.y,
            3.0,
            to_macroquad_color(theme.button_border),
        );

        let padding = 24.0;
        let inner_height = modal.y - padding * 2.0;
        let content_height = HELP_LINES.len() as f32 * HELP_LINE_HEIGHT;
        let max_scroll = (content_height - inner_height).max(0.0);
        self.scroll = self.scroll.min(max_scroll);

        let text_color = to_macroquad_color(theme.text);
        for (index, line) in HELP_LINES.iter().enumerate() {
            let baseline =
                top_left.y + padding + (index + 1) as f32 * HELP_LINE_HEIGHT - self.scroll;
            if baseline < top_left.y + padding + HELP_LINE_HEIGHT * 0.5
                || baseline > top_left.y + padding + inner_height
            {
                continue;
            }
            let size = if index == 0 {
                HELP_TITLE_SIZE
            } else {
                HELP_BODY_SIZE
            };
            draw_text(line, top_left.x + padding, baseline, size, text_color);
        }
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once one second has
    /// elapsed.
    fn record(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }
        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            scene,
        } = presentation;

        let theme = theme::load_theme(Path::new(THEME_MANIFEST_PATH))
            .context("failed to load theme overrides")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 1300,
            window_height: 820,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            scene.theme = theme;

            let mut panel_input = ControlPanelInputState::default();
            let mut drag = DragState::default();
            let mut help = HelpOverlay::default();
            let mut fps_counter = FpsCounter::default();
            let mut last_canvas_view: Option<Vec2> = None;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let panel_width = control_panel_width(screen.x);
                let canvas_view = Vec2::new((screen.x - panel_width).max(0.0), screen.y);

                // Window resizes narrow or widen the clamp interval.
                if last_canvas_view != Some(canvas_view) {
                    scene.viewport.clamp_pan(canvas_view);
                    last_canvas_view = Some(canvas_view);
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let frame_input = if help.visible() {
                    help.consume_input();
                    FrameInput::default()
                } else if keyboard.help || panel_input.take(PanelButton::Help) {
                    help.open();
                    FrameInput::default()
                } else {
                    gather_frame_input(
                        &mut scene,
                        &mut panel_input,
                        &mut drag,
                        keyboard,
                        canvas_view,
                        screen,
                    )
                };

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(to_macroquad_color(
                    scene.theme.window_background,
                ));
                draw_canvas(&scene, canvas_view);
                let presses = draw_control_panel(&scene, screen, panel_width);
                // Clicks that land while the overlay is up belong to the
                // overlay, not to the buttons underneath it.
                if !help.visible() {
                    panel_input.register_presses(presses);
                } else {
                    help.draw(&scene.theme, screen);
                }

                if show_fps {
                    if let Some(fps) = fps_counter.record(frame_dt) {
                        println!("frames per second: {fps:.1}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Width of the side control panel: roughly 28% of the window, kept between
/// 300 and 420 pixels.
fn control_panel_width(screen_width: f32) -> f32 {
    (screen_width * 0.28).clamp(300.0, 420.0)
}

/// Applies viewport gestures directly and folds the remaining interactions
/// into a [`FrameInput`] for the update closure.
fn gather_frame_input(
    scene: &mut Scene,
    panel_input: &mut ControlPanelInputState,
    drag: &mut DragState,
    keyboard: KeyboardShortcuts,
    canvas_view: Vec2,
    screen: Vec2,
) -> FrameInput {
    let cursor = {
        let (x, y) = mouse_position();
        Vec2::new(x, y)
    };
    let over_canvas = cursor.x >= 0.0 && cursor.x < canvas_view.x && cursor.y >= 0.0;

    let (_, wheel_y) = mouse_wheel();
    if wheel_y != 0.0 && over_canvas {
        let direction = if wheel_y > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        let _ = scene.viewport.zoom_at(cursor, direction, canvas_view);
    }

    if is_mouse_button_down(MouseButton::Right) {
        if let Some(last) = drag.last_position {
            scene.viewport.pan_by(cursor - last, canvas_view);
        }
        drag.last_position = Some(cursor);
    } else {
        drag.last_position = None;
    }

    // Panel zoom buttons anchor at the window centre, like the keyboard-less
    // zoom path.
    if panel_input.take(PanelButton::ZoomIn) {
        let _ = scene
            .viewport
            .zoom_at(screen * 0.5, ZoomDirection::In, canvas_view);
    }
    if panel_input.take(PanelButton::ZoomOut) {
        let _ = scene
            .viewport
            .zoom_at(screen * 0.5, ZoomDirection::Out, canvas_view);
    }

    let toggled_cell = if is_mouse_button_pressed(MouseButton::Left) && over_canvas {
        scene.viewport.cell_at(cursor)
    } else {
        None
    };

    // Resetting the simulation also returns the camera home.
    let reset_pressed = keyboard.reset || panel_input.take(PanelButton::Reset);
    if reset_pressed {
        scene.viewport.reset(canvas_view);
    }

    FrameInput {
        toggled_cell,
        play_pressed: panel_input.take(PanelButton::Play),
        pause_pressed: panel_input.take(PanelButton::Pause),
        playback_toggled: keyboard.playback_toggled,
        step_pressed: keyboard.step || panel_input.take(PanelButton::Step),
        reset_pressed,
        faster_pressed: keyboard.faster || panel_input.take(PanelButton::Faster),
        slower_pressed: keyboard.slower || panel_input.take(PanelButton::Slower),
    }
}

/// Draws the canvas backdrop, the lit cells, and the ant. The side panel is
/// drawn afterwards and covers any canvas overflow on its side; the window
/// edges clip the rest.
fn draw_canvas(scene: &Scene, canvas_view: Vec2) {
    let viewport = &scene.viewport;
    let origin = viewport.origin();
    let canvas = viewport.canvas_size();
    draw_rectangle(
        origin.x,
        origin.y,
        canvas.x,
        canvas.y,
        to_macroquad_color(scene.theme.canvas_background),
    );

    let cell_size = viewport.cell_size();
    let live_color = to_macroquad_color(scene.theme.live_cell);
    for cell in &scene.live_cells {
        let pos = viewport.cell_origin(*cell);
        if pos.x + cell_size < 0.0
            || pos.y + cell_size < 0.0
            || pos.x > canvas_view.x
            || pos.y > canvas_view.y
        {
            continue;
        }
        draw_rectangle(pos.x, pos.y, cell_size, cell_size, live_color);
    }

    let center = viewport.cell_origin(scene.ant.cell) + Vec2::splat(cell_size * 0.5);
    let half_extent = (cell_size * 0.5).max(2.0);
    let [a, b, c] = visuals::ant_triangle(center, half_extent, scene.ant.heading);
    draw_triangle(
        to_macroquad_vec2(a),
        to_macroquad_vec2(b),
        to_macroquad_vec2(c),
        to_macroquad_color(scene.theme.ant),
    );
}

/// Draws the side panel and reports which of its buttons were pressed.
fn draw_control_panel(scene: &Scene, screen: Vec2, panel_width: f32) -> ControlPanelUiResult {
    let origin_x = screen.x - panel_width;
    draw_rectangle(
        origin_x,
        0.0,
        panel_width,
        screen.y,
        to_macroquad_color(scene.theme.panel_background),
    );

    let context = ControlPanelUiContext {
        origin: MacroquadVec2::new(origin_x, 0.0),
        size: MacroquadVec2::new(panel_width, screen.y),
        background: to_macroquad_color(scene.theme.panel_background),
        button: to_macroquad_color(scene.theme.button_background),
        text: to_macroquad_color(scene.theme.text),
        panel_accent: to_macroquad_color(scene.theme.panel_accent),
        accent: to_macroquad_color(scene.theme.accent),
        hud: scene.hud,
        heading: scene.ant.heading,
        zoom_multiplier: scene.viewport.zoom_multiplier(),
    };
    let mut control_panel_ui = macroquad::ui::root_ui();
    draw_control_panel_ui(&mut control_panel_ui, context)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn to_macroquad_vec2(position: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(position.x, position.y)
}
