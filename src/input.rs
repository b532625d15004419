//! Input handling: crossterm events to runner actions.

use crate::audio::CuePlayer;
use crate::high_score::ScoreStore;
use crate::runner::{GamePhase, RunnerSession};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    Jump,    // Space, Up arrow, left click
    Restart, // Enter or R
    Quit,    // Q, Esc, Ctrl+C
    Other,
}

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the loop normally.
    Continue,
    /// Throw the session away and build a fresh one.
    Reload,
    Quit,
}

pub fn map_key(key: KeyEvent) -> RunnerInput {
    if key.kind == KeyEventKind::Release {
        return RunnerInput::Other;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => RunnerInput::Quit,
        KeyCode::Char(' ') | KeyCode::Up => RunnerInput::Jump,
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => RunnerInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => RunnerInput::Quit,
        _ => RunnerInput::Other,
    }
}

pub fn map_mouse(mouse: MouseEvent) -> RunnerInput {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => RunnerInput::Jump,
        _ => RunnerInput::Other,
    }
}

/// Map a terminal event. Resizes and focus changes are not inputs.
pub fn map_event(event: &Event) -> Option<RunnerInput> {
    match event {
        Event::Key(key) => Some(map_key(*key)),
        Event::Mouse(mouse) => Some(map_mouse(*mouse)),
        _ => None,
    }
}

/// Apply one input to the session.
pub fn handle_input<A: CuePlayer, S: ScoreStore>(
    session: &mut RunnerSession<A, S>,
    input: RunnerInput,
) -> InputResult {
    match input {
        RunnerInput::Quit => InputResult::Quit,
        RunnerInput::Jump => {
            session.press_jump();
            InputResult::Continue
        }
        // Restart is a full reload, and only once the run is over
        RunnerInput::Restart if session.phase() == GamePhase::Over => InputResult::Reload,
        RunnerInput::Restart | RunnerInput::Other => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingCuePlayer;
    use crate::config::RunnerConfig;
    use crate::high_score::MemoryScoreStore;
    use crate::runner::Obstacle;
    use crossterm::event::KeyEventState;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> RunnerSession<RecordingCuePlayer, MemoryScoreStore> {
        let config = RunnerConfig {
            seed: Some(3),
            ..RunnerConfig::default()
        };
        RunnerSession::new(config, RecordingCuePlayer::default(), MemoryScoreStore::default())
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), RunnerInput::Jump);
        assert_eq!(map_key(press(KeyCode::Up)), RunnerInput::Jump);
        assert_eq!(map_key(press(KeyCode::Enter)), RunnerInput::Restart);
        assert_eq!(map_key(press(KeyCode::Char('r'))), RunnerInput::Restart);
        assert_eq!(map_key(press(KeyCode::Char('q'))), RunnerInput::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), RunnerInput::Quit);
        assert_eq!(map_key(press(KeyCode::Char('x'))), RunnerInput::Other);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            RunnerInput::Quit
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), RunnerInput::Other);
    }

    #[test]
    fn test_left_click_jumps() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_mouse(click), RunnerInput::Jump);
        assert_eq!(map_event(&Event::Mouse(click)), Some(RunnerInput::Jump));
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_restart_only_when_over() {
        let mut s = session();
        assert_eq!(handle_input(&mut s, RunnerInput::Restart), InputResult::Continue);

        assert_eq!(handle_input(&mut s, RunnerInput::Jump), InputResult::Continue);
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(handle_input(&mut s, RunnerInput::Restart), InputResult::Continue);

        s.spawner.timer_ms = 1.0e9;
        let hitbox = s.player.hitbox();
        s.obstacles.push(Obstacle {
            x: hitbox.x,
            y: s.player.ground_y - 40.0,
            width: 30.0,
            height: 40.0,
            passed: false,
        });
        s.tick(Duration::from_millis(16));
        assert_eq!(s.phase(), GamePhase::Over);

        assert_eq!(handle_input(&mut s, RunnerInput::Restart), InputResult::Reload);
    }

    #[test]
    fn test_quit_in_any_phase() {
        let mut s = session();
        assert_eq!(handle_input(&mut s, RunnerInput::Quit), InputResult::Quit);
    }
}
