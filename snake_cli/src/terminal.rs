// snake_cli/src/terminal.rs
#![forbid(unsafe_code)]

/*
Interactive keyboard play

Keys:
  arrows / WASD   steer
  space           pause / resume
  enter / n       start a session (also after one has ended)
  e               end the current session
  q / esc / ^C    quit (an active session is ended and reported first)

The terminal is put into raw mode on the alternate screen for the whole run and
restored on every exit path by `TerminalGuard`'s Drop.
*/

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::warn;

use snake_engine::{
    Control, Direction, Game, InputSource, Renderer, RewardOutcome, ScoreReporter, Session,
    SessionReport,
};

const HELP: &str = "arrows/WASD steer  space pause  enter start  e end  q quit";

/// What keyboard play hands back to `main` for the summary line.
pub struct PlayOutcome {
    pub sessions: u64,
    pub last: Option<SessionReport>,
    pub reward: Option<RewardOutcome>,
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Keyboard input source. Pending key events are drained once per frame, when the
/// session asks for its control request. The last control wins; for directions the
/// last key that is not a reverse of the current heading wins.
#[derive(Default)]
pub struct KeyboardInput {
    directions: Vec<Direction>,
    control: Option<Control>,
    quit: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn drain(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.on_key(key);
            }
        }
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.directions.push(Direction::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.directions.push(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.directions.push(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.directions.push(Direction::Right)
            }
            KeyCode::Char(' ') => self.control = Some(Control::TogglePause),
            KeyCode::Enter | KeyCode::Char('n') => self.control = Some(Control::Start),
            KeyCode::Char('e') => self.control = Some(Control::End),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }
}

impl InputSource for KeyboardInput {
    fn direction_request(&mut self, game: &Game) -> Option<Direction> {
        let current = game.direction();
        self.directions
            .drain(..)
            .filter(|d| !d.is_reverse_of(current))
            .last()
    }

    fn control_request(&mut self, _game: &Game) -> Option<Control> {
        if let Err(e) = self.drain() {
            warn!("keyboard input failed, quitting: {e}");
            self.quit = true;
        }
        self.control.take()
    }

    fn teardown(&mut self) -> bool {
        self.quit
    }
}

/// Redraws the whole board in place on the alternate screen.
pub struct TerminalRenderer {
    out: Stdout,
    failed: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            failed: false,
        }
    }

    fn draw(&mut self, game: &Game, reward: Option<RewardOutcome>) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // raw mode: no implicit carriage return
        for line in game.render_ascii().lines() {
            write!(self.out, "{line}\r\n")?;
        }
        if let Some(r) = reward {
            write!(self.out, "reward: coins={} accepted={}\r\n", r.coins, r.accepted)?;
        }
        write!(self.out, "{HELP}\r\n")?;
        self.out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, game: &Game, reward: Option<RewardOutcome>) {
        if self.failed {
            return;
        }
        if let Err(e) = self.draw(game, reward) {
            warn!("terminal renderer disabled after write error: {e}");
            self.failed = true;
        }
    }
}

/// Runs keyboard play until the player quits. Frames are paced by the configured
/// tick interval.
pub fn play(game: Game, reporter: Box<dyn ScoreReporter>) -> Result<PlayOutcome> {
    let wait = game.config().report.timeout();
    let guard = TerminalGuard::enter().context("failed to prepare the terminal")?;

    let mut session = Session::new(
        game,
        Box::new(KeyboardInput::new()),
        Box::new(TerminalRenderer::new()),
        reporter,
    );
    let interval = session.tick_interval();

    let mut next = Instant::now();
    while !session.frame().torn_down {
        next += interval;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            next = now;
        }
    }
    drop(guard);

    let reward = session.wait_reward(wait);
    Ok(PlayOutcome {
        sessions: session.reports_sent(),
        last: session.game().report(),
        reward,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut KeyboardInput, code: KeyCode) {
        input.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn running_game() -> Game {
        let mut g = Game::new(7);
        assert!(g.start());
        assert_eq!(g.direction(), Direction::Right);
        g
    }

    #[test]
    fn reverse_key_after_valid_turn_keeps_the_turn() {
        let mut g = running_game();
        let mut input = KeyboardInput::new();
        press(&mut input, KeyCode::Up);
        press(&mut input, KeyCode::Left);

        let requested = input.direction_request(&g).expect("a turn is requested");
        assert_eq!(requested, Direction::Up);
        assert!(g.set_direction(requested));
        assert_eq!(g.pending_direction(), Direction::Up);

        assert_eq!(input.direction_request(&g), None);
    }

    #[test]
    fn last_acceptable_key_wins_and_lone_reverse_is_dropped() {
        let g = running_game();
        let mut input = KeyboardInput::new();
        press(&mut input, KeyCode::Char('w'));
        press(&mut input, KeyCode::Char('s'));
        assert_eq!(input.direction_request(&g), Some(Direction::Down));

        press(&mut input, KeyCode::Char('a'));
        assert_eq!(input.direction_request(&g), None);
    }

    #[test]
    fn control_and_quit_keys() {
        let mut input = KeyboardInput::new();
        press(&mut input, KeyCode::Enter);
        press(&mut input, KeyCode::Char(' '));
        assert_eq!(input.control.take(), Some(Control::TogglePause));
        assert!(!input.teardown());

        input.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(input.teardown());
    }
}
