#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Langton's Ant engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the simulator boots.
pub const WELCOME_BANNER: &str = "Welcome to Langton's Ant.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's toroidal grid using the provided dimensions.
    ConfigureGrid {
        /// Dimensions the rebuilt grid should adopt.
        size: GridSize,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Executes a single transition of the automaton.
    StepAnt,
    /// Requests that an arbitrary cell flip between its two states.
    ToggleCell {
        /// Coordinate of the cell that should flip.
        cell: CellCoord,
    },
    /// Starts or pauses automatic stepping.
    SetRunning {
        /// Whether the simulation should advance on its own.
        running: bool,
    },
    /// Updates the speed setting that derives the automatic step period.
    SetSpeed {
        /// Speed the simulation should adopt.
        speed: SpeedSetting,
    },
    /// Returns the world to its initial state on the current grid.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the grid was rebuilt with new dimensions.
    GridConfigured {
        /// Dimensions of the rebuilt grid.
        size: GridSize,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the ant completed one transition.
    AntStepped {
        /// Cell the ant occupied before moving. This is also the cell whose
        /// state flipped during the transition.
        previous: CellCoord,
        /// Cell the ant occupies after completing the move.
        current: CellCoord,
        /// Heading the ant adopted before advancing.
        heading: Heading,
        /// State the departed cell holds after the flip.
        flipped_to: CellState,
        /// Total number of transitions executed since the last reset.
        steps: u64,
    },
    /// Confirms that a cell flipped in response to an explicit toggle.
    CellToggled {
        /// Coordinate of the cell that flipped.
        cell: CellCoord,
        /// State the cell holds after the flip.
        state: CellState,
    },
    /// Reports that a toggle request addressed a cell outside the grid.
    CellToggleRejected {
        /// Out-of-bounds coordinate provided in the request.
        cell: CellCoord,
    },
    /// Announces that automatic stepping started or paused.
    PlaybackChanged {
        /// Whether the simulation now advances on its own.
        running: bool,
    },
    /// Announces that the speed setting changed.
    SpeedChanged {
        /// Speed the simulation now uses.
        speed: SpeedSetting,
    },
    /// Confirms that the world returned to its initial state.
    SimulationReset {
        /// Snapshot of the recentered ant.
        ant: AntSnapshot,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell. Rows grow downward on screen.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Dimensions of the toroidal grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid size. Zero dimensions are normalised to one cell so
    /// wrap-around arithmetic stays total.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        let columns = if columns == 0 { 1 } else { columns };
        let rows = if rows == 0 { 1 } else { rows };
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let capacity = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(capacity).unwrap_or(0)
    }

    /// Reports whether the provided coordinate addresses a cell inside the
    /// grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Cell at the centre of the grid, where the ant starts.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Moves one cell along the provided heading, wrapping each axis
    /// independently modulo the grid dimension. The torus has no edges, so
    /// every move from an in-bounds cell lands on an in-bounds cell.
    #[must_use]
    pub const fn advance(&self, cell: CellCoord, heading: Heading) -> CellCoord {
        match heading {
            Heading::North => {
                CellCoord::new(cell.column(), (cell.row() + self.rows - 1) % self.rows)
            }
            Heading::East => CellCoord::new((cell.column() + 1) % self.columns, cell.row()),
            Heading::South => CellCoord::new(cell.column(), (cell.row() + 1) % self.rows),
            Heading::West => {
                CellCoord::new((cell.column() + self.columns - 1) % self.columns, cell.row())
            }
        }
    }
}

/// Facing direction of the ant, cycled by quarter turns.
///
/// The variants follow the clockwise order used by the turn rule: the
/// successor of each heading is a clockwise quarter turn away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward decreasing row indices.
    #[default]
    North,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward increasing row indices.
    South,
    /// Facing toward decreasing column indices.
    West,
}

impl Heading {
    /// Position of the heading within the clockwise cycle, in `0..4`.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Heading occupying the provided position within the clockwise cycle.
    /// Indices beyond the cycle wrap modulo four.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }

    /// Heading after a clockwise quarter turn.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Heading after a counter-clockwise quarter turn.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Human-readable name suitable for status labels.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Heading::North => "North",
            Heading::East => "East",
            Heading::South => "South",
            Heading::West => "West",
        }
    }
}

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// The cell is dark; the ant turns clockwise when standing here.
    #[default]
    Off,
    /// The cell is lit; the ant turns counter-clockwise when standing here.
    On,
}

impl CellState {
    /// The opposite cell state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            CellState::Off => CellState::On,
            CellState::On => CellState::Off,
        }
    }

    /// Reports whether the cell is lit.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, CellState::On)
    }
}

/// User-selectable simulation speed, constrained to `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeedSetting(u8);

impl SpeedSetting {
    /// Slowest permitted speed.
    pub const MIN: SpeedSetting = SpeedSetting(1);
    /// Fastest permitted speed.
    pub const MAX: SpeedSetting = SpeedSetting(10);

    /// Creates a speed setting, clamping the value into the permitted range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        let value = if value < Self::MIN.0 {
            Self::MIN.0
        } else if value > Self::MAX.0 {
            Self::MAX.0
        } else {
            value
        };
        Self(value)
    }

    /// Retrieves the numeric representation of the setting.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The next faster setting, saturating at the maximum.
    #[must_use]
    pub const fn faster(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// The next slower setting, saturating at the minimum.
    #[must_use]
    pub const fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Wall-clock interval between automatic steps at this speed:
    /// `max(0.02 s, 1.1 s − speed × 0.1 s)`.
    #[must_use]
    pub fn step_period(self) -> Duration {
        let seconds = (1.1 - f64::from(self.0) * 0.1).max(0.02);
        Duration::from_secs_f64(seconds)
    }
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self(5)
    }
}

/// Coarse label for the automaton's empirically observed long-run regimes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The early regime without apparent structure.
    Chaotic,
    /// The middle regime dominated by recurring motifs.
    Recurrent,
    /// The late regime where the ant builds its periodic highway.
    Highway,
}

impl Phase {
    /// Human-readable name suitable for status labels.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Phase::Chaotic => "Chaotic",
            Phase::Recurrent => "Recurrent",
            Phase::Highway => "Highway",
        }
    }
}

/// Step-count boundaries separating the phases.
///
/// The defaults are empirical placeholders from the literature, not a
/// measured detection of the highway pattern; they classify by step count
/// alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseThresholds {
    recurrent_after: u64,
    highway_after: u64,
}

impl PhaseThresholds {
    /// Creates thresholds with explicit boundaries. The highway boundary is
    /// raised to the recurrent boundary when the two are provided out of
    /// order.
    #[must_use]
    pub const fn new(recurrent_after: u64, highway_after: u64) -> Self {
        let highway_after = if highway_after < recurrent_after {
            recurrent_after
        } else {
            highway_after
        };
        Self {
            recurrent_after,
            highway_after,
        }
    }

    /// Step count at which the chaotic regime gives way to recurrence.
    #[must_use]
    pub const fn recurrent_after(&self) -> u64 {
        self.recurrent_after
    }

    /// Step count at which the highway regime begins.
    #[must_use]
    pub const fn highway_after(&self) -> u64 {
        self.highway_after
    }

    /// Classifies a step count into its phase.
    #[must_use]
    pub const fn classify(&self, steps: u64) -> Phase {
        if steps < self.recurrent_after {
            Phase::Chaotic
        } else if steps < self.highway_after {
            Phase::Recurrent
        } else {
            Phase::Highway
        }
    }
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self::new(500, 10_000)
    }
}

/// Read-only snapshot of the ant's position and facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AntSnapshot {
    /// Cell the ant currently occupies.
    pub cell: CellCoord,
    /// Direction the ant currently faces.
    pub heading: Heading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_cycle_is_closed_under_quarter_turns() {
        for index in 0..4 {
            let heading = Heading::from_index(index);
            assert_eq!(heading.clockwise().index(), (heading.index() + 1) % 4);
            assert_eq!(
                heading.counter_clockwise().index(),
                (heading.index() + 3) % 4
            );
            assert_eq!(heading.clockwise().counter_clockwise(), heading);
        }
    }

    #[test]
    fn advance_wraps_every_edge() {
        let size = GridSize::new(120, 100);
        assert_eq!(
            size.advance(CellCoord::new(5, 0), Heading::North),
            CellCoord::new(5, 99)
        );
        assert_eq!(
            size.advance(CellCoord::new(5, 99), Heading::South),
            CellCoord::new(5, 0)
        );
        assert_eq!(
            size.advance(CellCoord::new(119, 7), Heading::East),
            CellCoord::new(0, 7)
        );
        assert_eq!(
            size.advance(CellCoord::new(0, 7), Heading::West),
            CellCoord::new(119, 7)
        );
    }

    #[test]
    fn advance_stays_in_bounds_for_every_heading() {
        let size = GridSize::new(7, 5);
        for column in 0..size.columns() {
            for row in 0..size.rows() {
                for index in 0..4 {
                    let heading = Heading::from_index(index);
                    let next = size.advance(CellCoord::new(column, row), heading);
                    assert!(size.contains(next), "{next:?} escaped the grid");
                }
            }
        }
    }

    #[test]
    fn grid_size_normalises_zero_dimensions() {
        let size = GridSize::new(0, 0);
        assert_eq!(size.columns(), 1);
        assert_eq!(size.rows(), 1);
        assert_eq!(size.advance(size.center(), Heading::East), size.center());
    }

    #[test]
    fn speed_setting_clamps_and_saturates() {
        assert_eq!(SpeedSetting::new(0), SpeedSetting::MIN);
        assert_eq!(SpeedSetting::new(99), SpeedSetting::MAX);
        assert_eq!(SpeedSetting::MAX.faster(), SpeedSetting::MAX);
        assert_eq!(SpeedSetting::MIN.slower(), SpeedSetting::MIN);
        assert_eq!(SpeedSetting::new(4).faster().get(), 5);
    }

    #[test]
    fn step_period_follows_the_speed_formula() {
        assert_eq!(
            SpeedSetting::MIN.step_period(),
            Duration::from_secs_f64(1.0)
        );
        assert_eq!(
            SpeedSetting::MAX.step_period(),
            Duration::from_secs_f64(0.1)
        );
        assert!(SpeedSetting::new(7).step_period() < SpeedSetting::new(3).step_period());
    }

    #[test]
    fn phase_classification_honours_threshold_boundaries() {
        let thresholds = PhaseThresholds::default();
        assert_eq!(thresholds.classify(0), Phase::Chaotic);
        assert_eq!(thresholds.classify(499), Phase::Chaotic);
        assert_eq!(thresholds.classify(500), Phase::Recurrent);
        assert_eq!(thresholds.classify(9_999), Phase::Recurrent);
        assert_eq!(thresholds.classify(10_000), Phase::Highway);
    }

    #[test]
    fn phase_thresholds_reorder_inverted_boundaries() {
        let thresholds = PhaseThresholds::new(1_000, 10);
        assert_eq!(thresholds.highway_after(), 1_000);
        assert_eq!(thresholds.classify(999), Phase::Chaotic);
        assert_eq!(thresholds.classify(1_000), Phase::Highway);
    }
}
