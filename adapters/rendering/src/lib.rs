#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Langton's Ant adapters.
//!
//! Besides the scene description passed between the simulation and a
//! [`RenderingBackend`], this crate owns the [`Viewport`]: the camera that
//! maps grid cells to screen pixels under a discrete zoom table and a clamped
//! pan offset. The viewport depends only on geometry configuration, never on
//! the world, so every coordinate rule can be exercised without a window.

use anyhow::Result as AnyResult;
use glam::Vec2;
use langton_core::{AntSnapshot, CellCoord, GridSize, Heading, Phase, SpeedSetting};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Palette applied across the canvas and the control panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Solid color used to clear each frame.
    pub window_background: Color,
    /// Fill behind the grid canvas.
    pub canvas_background: Color,
    /// Fill of a lit cell.
    pub live_cell: Color,
    /// Fill of the ant's triangle.
    pub ant: Color,
    /// Fill of the side control panel.
    pub panel_background: Color,
    /// Accent used for panel headings and the zoom indicator.
    pub panel_accent: Color,
    /// Accent used for statistics values and button glyphs.
    pub accent: Color,
    /// Fill of panel buttons.
    pub button_background: Color,
    /// Border of panel buttons.
    pub button_border: Color,
    /// Primary text color.
    pub text: Color,
    /// Fill behind the help overlay.
    pub help_background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            window_background: Color::from_rgb_u8(12, 14, 20),
            canvas_background: Color::from_rgb_u8(18, 22, 30),
            live_cell: Color::from_rgb_u8(100, 220, 160),
            ant: Color::from_rgb_u8(255, 140, 60),
            panel_background: Color::from_rgb_u8(28, 36, 48),
            panel_accent: Color::from_rgb_u8(72, 148, 200),
            accent: Color::from_rgb_u8(245, 200, 80),
            button_background: Color::from_rgb_u8(36, 46, 60),
            button_border: Color::from_rgb_u8(120, 130, 140),
            text: Color::from_rgb_u8(240, 244, 248),
            help_background: Color::from_rgb_u8(30, 30, 40),
        }
    }
}

/// Direction of a discrete zoom request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    /// Move one slot toward the largest multiplier.
    In,
    /// Move one slot toward the smallest multiplier.
    Out,
}

/// Geometry configuration injected into the viewport at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    grid: GridSize,
    base_cell_size: f32,
    zoom_levels: Vec<f32>,
    default_zoom_index: usize,
    margin: f32,
}

impl ViewportConfig {
    /// Creates the standard configuration for the provided grid: 8 px base
    /// cells, the 0.5×–3.0× zoom table with 1.0× as the default slot, and a
    /// 20 px canvas margin.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            base_cell_size: 8.0,
            zoom_levels: vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0],
            default_zoom_index: 2,
            margin: 20.0,
        }
    }

    /// Overrides the zoom multiplier table. An empty table is normalised to a
    /// single 1.0× slot and the default index is clamped into the table.
    #[must_use]
    pub fn with_zoom_levels(mut self, zoom_levels: Vec<f32>, default_index: usize) -> Self {
        self.zoom_levels = if zoom_levels.is_empty() {
            vec![1.0]
        } else {
            zoom_levels
        };
        self.default_zoom_index = default_index.min(self.zoom_levels.len() - 1);
        self
    }

    /// Overrides the unzoomed cell edge length in pixels.
    #[must_use]
    pub fn with_base_cell_size(mut self, base_cell_size: f32) -> Self {
        self.base_cell_size = base_cell_size.max(1.0);
        self
    }

    /// Grid dimensions the viewport projects.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Unzoomed cell edge length in pixels.
    #[must_use]
    pub const fn base_cell_size(&self) -> f32 {
        self.base_cell_size
    }

    /// Ascending table of zoom multipliers.
    #[must_use]
    pub fn zoom_levels(&self) -> &[f32] {
        &self.zoom_levels
    }

    /// Slot the viewport starts at and returns to on reset.
    #[must_use]
    pub const fn default_zoom_index(&self) -> usize {
        self.default_zoom_index
    }

    /// Fixed gap between the viewport edge and the canvas origin, in pixels.
    #[must_use]
    pub const fn margin(&self) -> f32 {
        self.margin
    }
}

/// Camera state mapping grid cells to screen pixels.
///
/// The pan offset is kept in real-valued pixels so repeated pointer-anchored
/// zooms do not accumulate rounding drift. Every mutating operation re-clamps
/// the pan against the viewport it was given.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    config: ViewportConfig,
    zoom_index: usize,
    pan: Vec2,
}

impl Viewport {
    /// Creates a viewport at the configured default zoom with no pan.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        let zoom_index = config.default_zoom_index();
        Self {
            config,
            zoom_index,
            pan: Vec2::ZERO,
        }
    }

    /// Configuration the viewport was constructed with.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Slot currently selected in the zoom table.
    #[must_use]
    pub const fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    /// Multiplier of the currently selected zoom slot.
    #[must_use]
    pub fn zoom_multiplier(&self) -> f32 {
        self.config.zoom_levels[self.zoom_index]
    }

    /// Current pan offset in screen pixels.
    #[must_use]
    pub const fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Edge length of one cell at the current zoom: the base size scaled by
    /// the zoom multiplier, rounded to whole pixels, never below one.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        (self.config.base_cell_size * self.zoom_multiplier())
            .round()
            .max(1.0)
    }

    /// Pixel dimensions of the full canvas at the current zoom.
    #[must_use]
    pub fn canvas_size(&self) -> Vec2 {
        let cell_size = self.cell_size();
        Vec2::new(
            self.config.grid.columns() as f32 * cell_size,
            self.config.grid.rows() as f32 * cell_size,
        )
    }

    /// Screen position of the canvas origin: the margin shifted by the pan.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::splat(self.config.margin) + self.pan
    }

    /// Screen position of a cell's top-left corner. This is the coordinate
    /// contract renderers draw with: `origin + cell × cell_size`.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        self.origin() + Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_size()
    }

    /// Inverse-maps a screen pixel to signed grid coordinates using floor
    /// division, so positions left of or above the canvas map to negative
    /// cells rather than clamping onto the grid. Out-of-range results are
    /// valid return values meaning "outside the grid"; callers bounds-check
    /// before use (or go through [`Viewport::cell_at`]).
    #[must_use]
    pub fn screen_to_grid(&self, pos: Vec2) -> (i64, i64) {
        let rel = (pos - self.origin()) / self.cell_size();
        (rel.x.floor() as i64, rel.y.floor() as i64)
    }

    /// The cell under a screen pixel, or `None` when the position lies
    /// outside the grid.
    #[must_use]
    pub fn cell_at(&self, pos: Vec2) -> Option<CellCoord> {
        let (column, row) = self.screen_to_grid(pos);
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        let cell = CellCoord::new(column, row);
        self.config.grid.contains(cell).then_some(cell)
    }

    /// Clamps the pan so the canvas cannot drift arbitrarily far off-screen:
    /// per axis the offset stays within
    /// `[min(0, view − canvas − margin), margin]`.
    pub fn clamp_pan(&mut self, view: Vec2) {
        let margin = Vec2::splat(self.config.margin);
        let min = (view - self.canvas_size() - margin).min(Vec2::ZERO);
        self.pan = self.pan.clamp(min, margin);
    }

    /// Adds a screen-pixel delta to the pan and re-clamps. Used for
    /// drag-panning.
    pub fn pan_by(&mut self, delta: Vec2, view: Vec2) {
        self.pan += delta;
        self.clamp_pan(view);
    }

    /// Pointer-anchored zoom: moves one slot through the zoom table and
    /// adjusts the pan so the grid cell under `pos` stays under `pos`.
    ///
    /// At either end of the table the request is a complete no-op and
    /// `false` is returned. When the pointer sits left of or above the canvas
    /// the anchor correction is skipped while the zoom level change still
    /// applies; this asymmetry is intentional and mirrors the clamped origin
    /// the pointer was interacting with.
    pub fn zoom_at(&mut self, pos: Vec2, direction: ZoomDirection, view: Vec2) -> bool {
        let target = match direction {
            ZoomDirection::In => {
                if self.zoom_index + 1 < self.config.zoom_levels.len() {
                    self.zoom_index + 1
                } else {
                    self.zoom_index
                }
            }
            ZoomDirection::Out => self.zoom_index.saturating_sub(1),
        };
        if target == self.zoom_index {
            return false;
        }

        let old_cell_size = self.cell_size();
        let rel = pos - self.origin();
        self.zoom_index = target;
        let new_cell_size = self.cell_size();

        if rel.x >= 0.0 && rel.y >= 0.0 {
            let reprojected = rel / old_cell_size * new_cell_size;
            self.pan += rel - reprojected;
        }
        self.clamp_pan(view);
        true
    }

    /// Returns to the default zoom slot with no pan, then re-clamps.
    pub fn reset(&mut self, view: Vec2) {
        self.zoom_index = self.config.default_zoom_index();
        self.pan = Vec2::ZERO;
        self.clamp_pan(view);
    }
}

/// Pure drawing helpers shared by rendering backends.
pub mod visuals {
    use glam::Vec2;
    use langton_core::Heading;

    /// Vertices of the triangle representing the ant, centred in its cell
    /// with the apex pointing along the heading.
    #[must_use]
    pub fn ant_triangle(center: Vec2, half_extent: f32, heading: Heading) -> [Vec2; 3] {
        let s = half_extent;
        match heading {
            Heading::North => [
                center + Vec2::new(0.0, -s),
                center + Vec2::new(-s, s),
                center + Vec2::new(s, s),
            ],
            Heading::East => [
                center + Vec2::new(s, 0.0),
                center + Vec2::new(-s, -s),
                center + Vec2::new(-s, s),
            ],
            Heading::South => [
                center + Vec2::new(0.0, s),
                center + Vec2::new(-s, -s),
                center + Vec2::new(s, -s),
            ],
            Heading::West => [
                center + Vec2::new(-s, 0.0),
                center + Vec2::new(s, -s),
                center + Vec2::new(s, s),
            ],
        }
    }
}

/// Status values surfaced on the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudView {
    /// Number of transitions executed since the last reset.
    pub steps: u64,
    /// Current speed setting.
    pub speed: SpeedSetting,
    /// Whether automatic stepping is active.
    pub running: bool,
    /// Phase classification of the step counter.
    pub phase: Phase,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            steps: 0,
            speed: SpeedSetting::default(),
            running: false,
            phase: Phase::Chaotic,
        }
    }
}

/// Scene content that should be displayed by a backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Palette applied across the frame.
    pub theme: Theme,
    /// Camera projecting the grid onto the screen.
    pub viewport: Viewport,
    /// Coordinates of every lit cell, in row-major order.
    pub live_cells: Vec<CellCoord>,
    /// The ant's position and facing.
    pub ant: AntSnapshot,
    /// Status values surfaced on the control panel.
    pub hud: HudView,
}

impl Scene {
    /// Creates an empty scene over the provided grid: default theme, default
    /// viewport, no lit cells, the ant centred facing north.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            theme: Theme::default(),
            viewport: Viewport::new(ViewportConfig::new(grid)),
            live_cells: Vec::new(),
            ant: AntSnapshot {
                cell: grid.center(),
                heading: Heading::North,
            },
            hud: HudView::default(),
        }
    }
}

/// Input snapshot gathered by a backend before updating the scene.
///
/// Viewport-only gestures (wheel zoom, drag pan) are applied by the backend
/// directly; this struct carries the interactions that concern the
/// simulation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cell the user clicked on the canvas this frame, already
    /// bounds-checked against the grid.
    pub toggled_cell: Option<CellCoord>,
    /// Whether the play button was pressed.
    pub play_pressed: bool,
    /// Whether the pause button was pressed.
    pub pause_pressed: bool,
    /// Whether the keyboard playback toggle was pressed.
    pub playback_toggled: bool,
    /// Whether a manual single step was requested.
    pub step_pressed: bool,
    /// Whether a reset was requested.
    pub reset_pressed: bool,
    /// Whether a speed increase was requested.
    pub faster_pressed: bool,
    /// Whether a speed decrease was requested.
    pub slower_pressed: bool,
}

/// Everything a backend needs to open its window and draw the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

/// Contract implemented by windowed frontends.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(ViewportConfig::new(GridSize::new(120, 100)))
    }

    #[test]
    fn cell_size_tracks_the_zoom_table() {
        let mut viewport = viewport();
        let expected = [4.0, 6.0, 8.0, 10.0, 12.0, 16.0, 24.0];
        let view = Vec2::new(10_000.0, 10_000.0);
        viewport.reset(view);
        while viewport.zoom_index() > 0 {
            let _ = viewport.zoom_at(Vec2::ZERO, ZoomDirection::Out, view);
        }
        for (index, expected) in expected.iter().enumerate() {
            assert_eq!(viewport.zoom_index(), index);
            assert_eq!(viewport.cell_size(), *expected);
            let _ = viewport.zoom_at(Vec2::ZERO, ZoomDirection::In, view);
        }
    }

    #[test]
    fn cell_size_never_collapses_below_one_pixel() {
        let config = ViewportConfig::new(GridSize::new(10, 10))
            .with_base_cell_size(1.0)
            .with_zoom_levels(vec![0.1, 0.5, 1.0], 2);
        let mut viewport = Viewport::new(config);
        let view = Vec2::new(400.0, 400.0);
        let _ = viewport.zoom_at(Vec2::ZERO, ZoomDirection::Out, view);
        let _ = viewport.zoom_at(Vec2::ZERO, ZoomDirection::Out, view);
        assert_eq!(viewport.zoom_index(), 0);
        assert_eq!(viewport.cell_size(), 1.0);
    }

    #[test]
    fn screen_to_grid_floor_divides_negative_positions() {
        let viewport = viewport();
        // Origin sits at (20, 20) with an 8 px cell.
        assert_eq!(viewport.screen_to_grid(Vec2::new(20.0, 20.0)), (0, 0));
        assert_eq!(viewport.screen_to_grid(Vec2::new(19.0, 20.0)), (-1, 0));
        assert_eq!(viewport.screen_to_grid(Vec2::new(4.0, 3.0)), (-2, -3));
        assert_eq!(viewport.screen_to_grid(Vec2::new(27.9, 35.9)), (0, 1));
    }

    #[test]
    fn cell_at_rejects_positions_outside_the_grid() {
        let viewport = viewport();
        assert_eq!(
            viewport.cell_at(Vec2::new(21.0, 21.0)),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(viewport.cell_at(Vec2::new(19.0, 21.0)), None);
        // 120 columns at 8 px end at x = 20 + 960.
        assert_eq!(
            viewport.cell_at(Vec2::new(979.0, 21.0)),
            Some(CellCoord::new(119, 0))
        );
        assert_eq!(viewport.cell_at(Vec2::new(981.0, 21.0)), None);
    }

    #[test]
    fn zoom_at_the_table_ends_is_a_complete_no_op() {
        let view = Vec2::new(800.0, 700.0);
        let mut viewport = viewport();
        while viewport.zoom_at(Vec2::new(100.0, 100.0), ZoomDirection::Out, view) {}
        assert_eq!(viewport.zoom_index(), 0);

        let before = viewport.clone();
        assert!(!viewport.zoom_at(Vec2::new(100.0, 100.0), ZoomDirection::Out, view));
        assert_eq!(viewport, before);
    }

    #[test]
    fn pointer_left_of_the_canvas_skips_the_anchor_correction() {
        let view = Vec2::new(2_000.0, 2_000.0);
        let mut viewport = viewport();
        let before_pan = viewport.pan();
        assert!(viewport.zoom_at(Vec2::new(5.0, 100.0), ZoomDirection::In, view));
        assert_eq!(viewport.zoom_index(), 3);
        // The zoom applied but the pan survived untouched (clamping aside).
        assert_eq!(viewport.pan(), before_pan);
    }

    #[test]
    fn ant_triangle_apex_points_along_the_heading() {
        let center = Vec2::new(50.0, 50.0);
        let [apex, _, _] = visuals::ant_triangle(center, 4.0, Heading::North);
        assert_eq!(apex, Vec2::new(50.0, 46.0));
        let [apex, _, _] = visuals::ant_triangle(center, 4.0, Heading::East);
        assert_eq!(apex, Vec2::new(54.0, 50.0));
        let [apex, _, _] = visuals::ant_triangle(center, 4.0, Heading::South);
        assert_eq!(apex, Vec2::new(50.0, 54.0));
        let [apex, _, _] = visuals::ant_triangle(center, 4.0, Heading::West);
        assert_eq!(apex, Vec2::new(46.0, 50.0));
    }
}
