#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Langton's Ant experience.
//!
//! The binary wires the authoritative world, the cadence system, and the
//! macroquad backend together. Each frame the backend's input snapshot is
//! translated into commands, a `Tick` is appended, everything is pumped
//! through `world::apply`, the cadence system proposes follow-up steps, and
//! the scene is refreshed from world queries.

use anyhow::Result;
use clap::Parser;
use langton_core::{Command, GridSize, PhaseThresholds, SpeedSetting};
use langton_rendering::{FrameInput, HudView, Presentation, RenderingBackend, Scene};
use langton_rendering_macroquad::MacroquadBackend;
use langton_system_cadence::Cadence;
use langton_world::{self as world, query, World};

/// Interactive simulator of Langton's Ant on a toroidal grid.
#[derive(Debug, Parser)]
#[command(name = "langton-ant")]
struct Args {
    /// Number of grid columns.
    #[arg(long, default_value_t = 120)]
    columns: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = 100)]
    rows: u32,
    /// Simulation speed from 1 (slowest) to 10 (fastest).
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    speed: u8,
    /// Start with automatic stepping enabled.
    #[arg(long)]
    run: bool,
    /// Apply this many steps without opening a window, print a summary, and
    /// exit.
    #[arg(long, value_name = "STEPS")]
    headless: Option<u64>,
    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let size = GridSize::new(args.columns, args.rows);
    let mut world = World::with_configuration(size, PhaseThresholds::default());
    println!("{}", query::welcome_banner(&world));

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetSpeed {
            speed: SpeedSetting::new(args.speed),
        },
        &mut events,
    );

    if let Some(steps) = args.headless {
        return run_headless(&mut world, steps);
    }

    world::apply(
        &mut world,
        Command::SetRunning { running: args.run },
        &mut events,
    );

    // Prime the cadence mirrors with the startup speed and playback events.
    let mut cadence = Cadence::new();
    let mut discarded = Vec::new();
    cadence.handle(&events, &mut discarded);

    let mut scene = Scene::new(size);
    refresh_scene(&world, &mut scene);
    let presentation = Presentation {
        window_title: "Langton's Ant".to_string(),
        scene,
    };

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);
    backend.run(presentation, move |dt, input, scene| {
        let mut commands = Vec::new();
        translate_input(&world, input, &mut commands);
        commands.push(Command::Tick { dt });

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }

        let mut follow_ups = Vec::new();
        cadence.handle(&events, &mut follow_ups);
        for follow_up in follow_ups {
            world::apply(&mut world, follow_up, &mut events);
        }

        refresh_scene(&world, scene);
    })
}

/// Applies a batch of steps without opening a window and prints a summary.
fn run_headless(world: &mut World, steps: u64) -> Result<()> {
    let mut events = Vec::new();
    for _ in 0..steps {
        world::apply(world, Command::StepAnt, &mut events);
        events.clear();
    }

    let ant = query::ant(world);
    println!("steps executed: {}", query::steps(world));
    println!("lit cells: {}", query::live_cells(world).len());
    println!(
        "ant at ({}, {}) facing {}",
        ant.cell.column(),
        ant.cell.row(),
        ant.heading.name()
    );
    println!("phase: {}", query::phase(world).name());
    Ok(())
}

/// Translates one frame's input snapshot into world commands.
fn translate_input(world: &World, input: FrameInput, out: &mut Vec<Command>) {
    if let Some(cell) = input.toggled_cell {
        out.push(Command::ToggleCell { cell });
    }
    if input.play_pressed {
        out.push(Command::SetRunning { running: true });
    }
    if input.pause_pressed {
        out.push(Command::SetRunning { running: false });
    }
    if input.playback_toggled {
        out.push(Command::SetRunning {
            running: !query::is_running(world),
        });
    }
    if input.step_pressed {
        out.push(Command::StepAnt);
    }
    if input.reset_pressed {
        out.push(Command::Reset);
    }
    if input.faster_pressed {
        out.push(Command::SetSpeed {
            speed: query::speed(world).faster(),
        });
    }
    if input.slower_pressed {
        out.push(Command::SetSpeed {
            speed: query::speed(world).slower(),
        });
    }
}

/// Mirrors the world state into the scene handed to the renderer.
fn refresh_scene(world: &World, scene: &mut Scene) {
    scene.live_cells = query::live_cells(world);
    scene.ant = query::ant(world);
    scene.hud = HudView {
        steps: query::steps(world),
        speed: query::speed(world),
        running: query::is_running(world),
        phase: query::phase(world),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use langton_core::CellCoord;

    #[test]
    fn empty_input_translates_to_no_commands() {
        let world = World::new();
        let mut commands = Vec::new();
        translate_input(&world, FrameInput::default(), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn playback_toggle_inverts_the_current_state() {
        let mut world = World::new();
        let input = FrameInput {
            playback_toggled: true,
            ..FrameInput::default()
        };

        let mut commands = Vec::new();
        translate_input(&world, input, &mut commands);
        assert_eq!(commands, vec![Command::SetRunning { running: true }]);

        let mut events = Vec::new();
        world::apply(&mut world, Command::SetRunning { running: true }, &mut events);
        commands.clear();
        translate_input(&world, input, &mut commands);
        assert_eq!(commands, vec![Command::SetRunning { running: false }]);
    }

    #[test]
    fn clicks_and_transport_buttons_map_to_commands() {
        let world = World::new();
        let input = FrameInput {
            toggled_cell: Some(CellCoord::new(3, 4)),
            step_pressed: true,
            reset_pressed: true,
            faster_pressed: true,
            ..FrameInput::default()
        };

        let mut commands = Vec::new();
        translate_input(&world, input, &mut commands);
        assert_eq!(
            commands,
            vec![
                Command::ToggleCell {
                    cell: CellCoord::new(3, 4),
                },
                Command::StepAnt,
                Command::Reset,
                Command::SetSpeed {
                    speed: SpeedSetting::new(6),
                },
            ]
        );
    }

    #[test]
    fn speed_adjustments_saturate_at_the_range_ends() {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SetSpeed {
                speed: SpeedSetting::MAX,
            },
            &mut events,
        );

        let mut commands = Vec::new();
        translate_input(
            &world,
            FrameInput {
                faster_pressed: true,
                ..FrameInput::default()
            },
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::SetSpeed {
                speed: SpeedSetting::MAX,
            }]
        );
    }

    #[test]
    fn refresh_scene_mirrors_world_queries() {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::StepAnt, &mut events);
        world::apply(&mut world, Command::SetRunning { running: true }, &mut events);

        let mut scene = Scene::new(query::grid_size(&world));
        refresh_scene(&world, &mut scene);
        assert_eq!(scene.hud.steps, 1);
        assert!(scene.hud.running);
        assert_eq!(scene.live_cells, vec![CellCoord::new(60, 50)]);
        assert_eq!(scene.ant.cell, CellCoord::new(61, 50));
    }
}
