#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Langton's Ant.
//!
//! The world owns the toroidal grid, the ant, the step counter, and the
//! playback state. Adapters and systems never touch that state directly:
//! mutations travel through [`apply`] as [`Command`] values and observations
//! travel through [`query`] functions, so every run of the simulation is a
//! pure function of its command script.

use langton_core::{
    AntSnapshot, CellCoord, CellState, Command, Event, GridSize, Heading, PhaseThresholds,
    SpeedSetting, WELCOME_BANNER,
};

const DEFAULT_GRID_SIZE: GridSize = GridSize::new(120, 100);

/// Dense storage for the toroidal grid's cell states.
#[derive(Clone, Debug)]
struct Grid {
    size: GridSize,
    cells: Vec<CellState>,
}

impl Grid {
    fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![CellState::Off; size.cell_count()],
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.size.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size.columns()).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell).map(|index| self.cells[index])
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = state;
        }
    }

    /// Flips the addressed cell, returning its new state. Out-of-bounds
    /// coordinates leave the grid untouched and return `None`.
    fn toggle(&mut self, cell: CellCoord) -> Option<CellState> {
        let index = self.index(cell)?;
        let state = self.cells[index].toggled();
        self.cells[index] = state;
        Some(state)
    }

    fn clear(&mut self) {
        self.cells.fill(CellState::Off);
    }

    fn live_cells(&self) -> Vec<CellCoord> {
        let width = self.size.columns();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_on())
            .map(|(index, _)| {
                let index = index as u64;
                let column = (index % u64::from(width)) as u32;
                let row = (index / u64::from(width)) as u32;
                CellCoord::new(column, row)
            })
            .collect()
    }
}

/// The mobile agent: a small value type replaced wholesale on each
/// transition rather than mutated field by field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ant {
    cell: CellCoord,
    heading: Heading,
}

impl Ant {
    const fn centered_in(size: GridSize) -> Self {
        Self {
            cell: size.center(),
            heading: Heading::North,
        }
    }

    const fn snapshot(self) -> AntSnapshot {
        AntSnapshot {
            cell: self.cell,
            heading: self.heading,
        }
    }
}

/// Represents the authoritative Langton's Ant world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    ant: Ant,
    steps: u64,
    running: bool,
    speed: SpeedSetting,
    thresholds: PhaseThresholds,
    tick_index: u64,
}

impl World {
    /// Creates a new world on the default 120×100 grid, paused, with the ant
    /// at the centre facing north.
    #[must_use]
    pub fn new() -> Self {
        Self::with_configuration(DEFAULT_GRID_SIZE, PhaseThresholds::default())
    }

    /// Creates a new world with explicit grid dimensions and phase
    /// thresholds.
    #[must_use]
    pub fn with_configuration(size: GridSize, thresholds: PhaseThresholds) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(size),
            ant: Ant::centered_in(size),
            steps: 0,
            running: false,
            speed: SpeedSetting::default(),
            thresholds,
            tick_index: 0,
        }
    }

    /// Executes one transition of the automaton.
    ///
    /// Exactly one cell flips (the one under the ant) and exactly one axis of
    /// the ant's position changes by one wrapped unit. There are no failure
    /// states: wrap-around keeps every move in bounds.
    fn step_ant(&mut self, out_events: &mut Vec<Event>) {
        let previous = self.ant.cell;
        let state = self.grid.state(previous).unwrap_or_default();
        let heading = match state {
            CellState::Off => self.ant.heading.clockwise(),
            CellState::On => self.ant.heading.counter_clockwise(),
        };
        let flipped_to = state.toggled();
        self.grid.set(previous, flipped_to);

        let current = self.grid.size.advance(previous, heading);
        self.ant = Ant {
            cell: current,
            heading,
        };
        self.steps = self.steps.saturating_add(1);

        out_events.push(Event::AntStepped {
            previous,
            current,
            heading,
            flipped_to,
            steps: self.steps,
        });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.grid.clear();
        self.ant = Ant::centered_in(self.grid.size);
        self.steps = 0;
        if self.running {
            self.running = false;
            out_events.push(Event::PlaybackChanged { running: false });
        }
        out_events.push(Event::SimulationReset {
            ant: self.ant.snapshot(),
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            world.grid = Grid::new(size);
            out_events.push(Event::GridConfigured { size });
            world.reset(out_events);
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::StepAnt => {
            world.step_ant(out_events);
        }
        Command::ToggleCell { cell } => match world.grid.toggle(cell) {
            Some(state) => out_events.push(Event::CellToggled { cell, state }),
            None => out_events.push(Event::CellToggleRejected { cell }),
        },
        Command::SetRunning { running } => {
            if world.running != running {
                world.running = running;
                out_events.push(Event::PlaybackChanged { running });
            }
        }
        Command::SetSpeed { speed } => {
            if world.speed != speed {
                world.speed = speed;
                out_events.push(Event::SpeedChanged { speed });
            }
        }
        Command::Reset => {
            world.reset(out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use langton_core::{AntSnapshot, CellCoord, CellState, GridSize, Phase, SpeedSetting};

    /// Retrieves the welcome banner that adapters may display on boot.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the world's toroidal grid.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid.size
    }

    /// State of the addressed cell, or `None` outside the grid.
    #[must_use]
    pub fn cell_state(world: &World, cell: CellCoord) -> Option<CellState> {
        world.grid.state(cell)
    }

    /// Coordinates of every lit cell in row-major order.
    #[must_use]
    pub fn live_cells(world: &World) -> Vec<CellCoord> {
        world.grid.live_cells()
    }

    /// Snapshot of the ant's position and facing.
    #[must_use]
    pub fn ant(world: &World) -> AntSnapshot {
        world.ant.snapshot()
    }

    /// Number of transitions executed since the last reset.
    #[must_use]
    pub fn steps(world: &World) -> u64 {
        world.steps
    }

    /// Whether automatic stepping is active.
    #[must_use]
    pub fn is_running(world: &World) -> bool {
        world.running
    }

    /// The current speed setting.
    #[must_use]
    pub fn speed(world: &World) -> SpeedSetting {
        world.speed
    }

    /// Phase classification of the current step counter.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.thresholds.classify(world.steps)
    }
}
