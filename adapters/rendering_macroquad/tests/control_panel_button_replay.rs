use langton_rendering_macroquad::{ControlPanelInputState, PanelButton};

/// Drains the latch at the top of each simulated frame, then registers the
/// scripted press, mirroring the one-frame delay between drawing a button and
/// acting on it.
fn run_sequence(button: PanelButton, sequence: &[bool]) -> Vec<bool> {
    let mut state = ControlPanelInputState::default();
    let mut taken = Vec::new();
    for &pressed in sequence {
        taken.push(state.take(button));
        if pressed {
            state.register(button);
        }
    }

    // Flush any trailing latched press so the harness observes the final one.
    taken.push(state.take(button));
    taken
}

#[test]
fn button_press_sequence_is_deterministic() {
    let presses = [false, true, false, true, true, false];
    let expected = vec![false, false, true, false, true, true, false];

    let first_run = run_sequence(PanelButton::Step, &presses);
    let second_run = run_sequence(PanelButton::Step, &presses);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn each_press_fires_exactly_once() {
    let mut state = ControlPanelInputState::default();
    state.register(PanelButton::Reset);
    assert!(state.take(PanelButton::Reset));
    assert!(!state.take(PanelButton::Reset));
}

#[test]
fn latches_are_independent_per_button() {
    let mut state = ControlPanelInputState::default();
    state.register(PanelButton::Play);
    state.register(PanelButton::Faster);

    assert!(!state.take(PanelButton::Pause));
    assert!(state.take(PanelButton::Play));
    assert!(state.take(PanelButton::Faster));
    assert!(!state.take(PanelButton::Play));
}
