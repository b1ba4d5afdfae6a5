use std::time::Duration;

use langton_core::{CellCoord, CellState, Command, Event, GridSize, SpeedSetting};
use langton_world::{self as world, query, World};

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    live_cells: Vec<CellCoord>,
    ant_cell: CellCoord,
    ant_heading: langton_core::Heading,
    steps: u64,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let ant = query::ant(&world);
    ReplayOutcome {
        events,
        live_cells: query::live_cells(&world),
        ant_cell: ant.cell,
        ant_heading: ant.heading,
        steps: query::steps(&world),
    }
}

fn build_sequence() -> Vec<Command> {
    let mut script = vec![
        Command::ConfigureGrid {
            size: GridSize::new(40, 30),
        },
        Command::SetSpeed {
            speed: SpeedSetting::new(8),
        },
        Command::ToggleCell {
            cell: CellCoord::new(20, 15),
        },
        Command::ToggleCell {
            cell: CellCoord::new(21, 15),
        },
        Command::SetRunning { running: true },
    ];
    for _ in 0..256 {
        script.push(Command::StepAnt);
        script.push(Command::Tick {
            dt: Duration::from_millis(16),
        });
    }
    script.push(Command::Reset);
    for _ in 0..128 {
        script.push(Command::StepAnt);
    }
    script
}

#[test]
fn replaying_the_same_script_reproduces_the_same_world() {
    let first = replay(build_sequence());
    let second = replay(build_sequence());

    assert_eq!(first, second, "world replay diverged");
    assert_eq!(first.steps, 128, "reset should have restarted the counter");
}

#[test]
fn manual_edits_participate_in_the_replayed_trajectory() {
    let script = vec![
        Command::ConfigureGrid {
            size: GridSize::new(11, 11),
        },
        // Pre-lighting the centre makes the very first turn counter-clockwise.
        Command::ToggleCell {
            cell: CellCoord::new(5, 5),
        },
        Command::StepAnt,
    ];
    let outcome = replay(script);

    let Some(Event::AntStepped {
        heading,
        flipped_to,
        ..
    }) = outcome.events.last()
    else {
        panic!("expected the script to end with an AntStepped event");
    };
    assert_eq!(*heading, langton_core::Heading::West);
    assert_eq!(*flipped_to, CellState::Off);
    assert_eq!(outcome.ant_cell, CellCoord::new(4, 5));
}
