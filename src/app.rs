use crate::command::Command;
use crate::config::Config;
use crate::game::{Direction, GameEvent, GamePhase, GameSession};
use crate::highscores::{HighScoreStorage, HighScoreStore};
use crate::surface::{ControlSurface, Palette};
use crate::util::get_display_area;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{backend::Backend, Frame, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;
use tracing::debug;

/// The running program: a game session, what the player sees of it, and any
/// warnings waiting to be acknowledged
#[derive(Clone, Debug)]
pub(crate) struct App<S = HighScoreStorage, R = ThreadRng> {
    session: GameSession<S, R>,
    surface: ControlSurface,
    warnings: VecDeque<Warning>,
    quitting: bool,
}

impl App {
    pub(crate) fn new(config: &Config) -> App {
        let store = config.high_score_storage();
        match store {
            HighScoreStorage::File(ref f) => {
                debug!(path = ?f.path(), "keeping high score in file");
            }
            HighScoreStorage::Memory(_) => debug!("keeping high score in memory"),
        }
        App::with_session(GameSession::new(store), config.palette())
    }
}

impl<S: HighScoreStore, R: Rng> App<S, R> {
    pub(crate) fn with_session(session: GameSession<S, R>, palette: Palette) -> App<S, R> {
        let surface = ControlSurface::new(session.grid(), session.high_score(), palette);
        let mut app = App {
            session,
            surface,
            warnings: VecDeque::new(),
            quitting: false,
        };
        app.dispatch_events(Instant::now());
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        debug!(
            phase = ?self.session.phase(),
            score = self.session.score(),
            high_score = self.session.high_score(),
            "quitting"
        );
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(&self.surface, frame.area());
        if let Some(warning) = self.warnings.front() {
            frame.render_widget(warning, get_display_area(frame.area()));
        }
    }

    /// Wait for input until the next tick is due, then handle whichever came
    /// first
    fn process_input(&mut self) -> io::Result<()> {
        match self.session.next_timeout(Instant::now()) {
            Some(wait) => {
                if poll(wait)? {
                    self.handle_event(read()?, Instant::now());
                } else {
                    self.session.on_timer(Instant::now());
                    self.dispatch_events(Instant::now());
                }
            }
            None => self.handle_event(read()?, Instant::now()),
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        if event == Event::FocusLost {
            if self.session.phase() == GamePhase::Running {
                self.session.toggle_pause(now);
            }
        } else if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
            self.handle_command(cmd, now);
        }
        self.dispatch_events(now);
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) {
        if let Some(warning) = self.warnings.front() {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => {
                    self.warnings.pop_front();
                }
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
            return;
        }
        match cmd {
            Command::Quit | Command::Q => self.quitting = true,
            Command::Up => {
                self.session.steer(Direction::North);
            }
            Command::Down => {
                self.session.steer(Direction::South);
            }
            Command::Left => {
                self.session.steer(Direction::West);
            }
            Command::Right => {
                self.session.steer(Direction::East);
            }
            Command::Enter | Command::Space => self.session.start(now),
            Command::P | Command::Esc => self.session.toggle_pause(now),
            Command::R => self.session.reset(),
        }
    }

    /// Pass the session's events on to the surface.  Storage failures become
    /// warnings, and a running game is paused while one is shown.
    fn dispatch_events(&mut self, now: Instant) {
        while let Some(event) = self.session.poll_event() {
            if let GameEvent::StorageFailed(msgs) = event {
                if self.session.phase() == GamePhase::Running {
                    self.session.toggle_pause(now);
                }
                self.warnings.push_back(Warning::storage_failure(msgs));
            } else {
                self.surface.apply(event);
            }
        }
    }
}
