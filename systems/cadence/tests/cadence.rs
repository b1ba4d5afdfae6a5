use std::time::Duration;

use langton_core::{Command, Event, SpeedSetting};
use langton_system_cadence::Cadence;
use langton_world::{self as world, query, World};

/// Applies one command, feeds the resulting events to the cadence system, and
/// immediately applies whatever follow-up commands it proposed.
fn pump(world: &mut World, cadence: &mut Cadence, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);

    let mut follow_ups = Vec::new();
    cadence.handle(&events, &mut follow_ups);
    for follow_up in follow_ups {
        world::apply(world, follow_up, &mut events);
    }
    events
}

#[test]
fn running_world_advances_once_per_period() {
    let mut world = World::new();
    let mut cadence = Cadence::new();

    let _ = pump(
        &mut world,
        &mut cadence,
        Command::SetSpeed {
            speed: SpeedSetting::MAX,
        },
    );
    let _ = pump(&mut world, &mut cadence, Command::SetRunning { running: true });

    // At a 0.1 s period a step lands every seventh 16 ms frame (112 ms), and
    // the gate discards the overshoot at each crossing.
    for _ in 0..60 {
        let _ = pump(
            &mut world,
            &mut cadence,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
        );
    }
    assert_eq!(query::steps(&world), 8);
}

#[test]
fn paused_world_never_advances() {
    let mut world = World::new();
    let mut cadence = Cadence::new();

    for _ in 0..100 {
        let _ = pump(
            &mut world,
            &mut cadence,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
        );
    }
    assert_eq!(query::steps(&world), 0);
}

#[test]
fn reset_clears_the_pending_interval() {
    let mut world = World::new();
    let mut cadence = Cadence::new();

    let _ = pump(&mut world, &mut cadence, Command::SetRunning { running: true });
    let _ = pump(
        &mut world,
        &mut cadence,
        Command::Tick {
            dt: Duration::from_millis(500),
        },
    );
    assert!(cadence.accumulated() > Duration::ZERO);

    // Reset pauses playback and the cadence mirrors both facts.
    let _ = pump(&mut world, &mut cadence, Command::Reset);
    assert_eq!(cadence.accumulated(), Duration::ZERO);

    let _ = pump(
        &mut world,
        &mut cadence,
        Command::Tick {
            dt: Duration::from_secs(10),
        },
    );
    assert_eq!(query::steps(&world), 0);
}

#[test]
fn replaying_the_same_tick_script_is_deterministic() {
    let run = || {
        let mut world = World::new();
        let mut cadence = Cadence::new();
        let mut observed = Vec::new();

        let _ = pump(&mut world, &mut cadence, Command::SetRunning { running: true });
        for frame in 0..240u64 {
            // A deliberately uneven frame pattern: 16 ms with a 33 ms hitch
            // every seventh frame.
            let dt = if frame % 7 == 0 { 33 } else { 16 };
            let events = pump(
                &mut world,
                &mut cadence,
                Command::Tick {
                    dt: Duration::from_millis(dt),
                },
            );
            observed.extend(events);
        }
        (observed, query::steps(&world))
    };

    let (first_events, first_steps) = run();
    let (second_events, second_steps) = run();
    assert_eq!(first_events, second_events, "cadence replay diverged");
    assert_eq!(first_steps, second_steps);
    assert!(first_steps > 0);
}
