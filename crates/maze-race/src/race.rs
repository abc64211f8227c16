//! Race session controller.
//!
//! The engine keeps no session of its own, so a "race" here is a loop that
//! maps keys to engine commands and reads the race marker around every
//! dispatch. A marker that was present before a move and is gone after it is
//! taken as "race finished". That inference is approximate: a move that
//! clears the marker for any other reason looks exactly the same.

use crate::engine::{
    CommandResult, CommandRunner, Direction, EngineBridge, EngineCommand, StateProbe,
};
use crate::error::Result;
use crate::input::InputSource;
use crate::markers::EngineState;
use crate::present::{Notice, Presenter, RaceView};
use crate::redraw::RedrawScheduler;
use crate::results::ResultsViewer;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const NO_MAZE_MESSAGE: &str = "No valid maze loaded! Generate or load a maze first.";
pub const NO_PATH_MESSAGE: &str = "Current maze has no valid path! Cannot start race mode.";
pub const NO_RACE_MESSAGE: &str = "No active race! Start a race first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Control,
    Movement,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Control => Mode::Movement,
            Mode::Movement => Mode::Control,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Reset,
    ViewResults,
    Move(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Exit,
    Toggle,
    Intent(Intent),
    Ignore,
}

pub fn map_key(key: &KeyEvent, mode: Mode) -> KeyAction {
    match key.code {
        KeyCode::Esc => return KeyAction::Exit,
        KeyCode::Tab => return KeyAction::Toggle,
        _ => {}
    }
    let intent = match (mode, key.code) {
        (Mode::Control, KeyCode::Char('1')) => Intent::Start,
        (Mode::Control, KeyCode::Char('2')) => Intent::Reset,
        (Mode::Control, KeyCode::Char('3')) => Intent::ViewResults,
        (Mode::Movement, KeyCode::Up) => Intent::Move(Direction::Up),
        (Mode::Movement, KeyCode::Down) => Intent::Move(Direction::Down),
        (Mode::Movement, KeyCode::Left) => Intent::Move(Direction::Left),
        (Mode::Movement, KeyCode::Right) => Intent::Move(Direction::Right),
        _ => return KeyAction::Ignore,
    };
    KeyAction::Intent(intent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exited,
    NoMaze,
    NoPath,
}

/// Per-visit state. Lives only while the race screen is up.
#[derive(Debug)]
pub struct SessionState {
    mode: Mode,
    last_maze_render: Option<String>,
    redraw: RedrawScheduler,
}

impl SessionState {
    pub fn new(initial_size: Option<(u16, u16)>) -> Self {
        Self {
            mode: Mode::Control,
            last_maze_render: None,
            redraw: RedrawScheduler::new(initial_size),
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    fn return_to_control(&mut self) {
        if self.mode == Mode::Movement {
            self.toggle_mode();
        }
    }
}

struct Dispatch {
    result: CommandResult,
    finished: bool,
}

pub struct RaceSession<'a, R: CommandRunner, S: EngineState> {
    bridge: &'a EngineBridge<R>,
    state: &'a S,
    poll_interval: Duration,
}

impl<'a, R: CommandRunner, S: EngineState> RaceSession<'a, R, S> {
    pub fn new(bridge: &'a EngineBridge<R>, state: &'a S, poll_interval: Duration) -> Self {
        Self {
            bridge,
            state,
            poll_interval,
        }
    }

    /// Runs until Escape. Refuses to start without a loaded maze that has a
    /// path; the refusal notice is left on screen for the caller to dismiss.
    pub fn run(
        &self,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<SessionEnd> {
        if !self.state.maze_loaded() {
            warn!(event = "race_refused", reason = "no_maze");
            presenter.show_notice(&Notice::error(NO_MAZE_MESSAGE))?;
            return Ok(SessionEnd::NoMaze);
        }
        if !StateProbe::new(self.bridge).probe_path_exists() {
            warn!(event = "race_refused", reason = "no_path");
            presenter.show_notice(&Notice::error(NO_PATH_MESSAGE))?;
            return Ok(SessionEnd::NoPath);
        }

        info!(event = "race_enter");
        let mut session = SessionState::new(input.size().ok());
        loop {
            session.redraw.check_resize(input.size());
            if session.redraw.take() {
                self.draw(&mut session, presenter)?;
            }

            let Some(key) = input.poll_key(self.poll_interval)? else {
                continue;
            };

            match map_key(&key, session.mode) {
                KeyAction::Exit => break,
                KeyAction::Toggle => {
                    session.toggle_mode();
                    session.redraw.request();
                    debug!(event = "race_mode", mode = ?session.mode);
                }
                KeyAction::Ignore => {}
                KeyAction::Intent(intent) => {
                    if let Err(err) = self.handle_intent(intent, &mut session, input, presenter) {
                        warn!(event = "race_key_error", intent = ?intent, error = %err);
                        presenter.show_notice(&Notice::error(err.to_string()))?;
                        input.wait_key()?;
                        session.redraw.request();
                    }
                }
            }
        }
        info!(event = "race_exit");
        Ok(SessionEnd::Exited)
    }

    fn draw(&self, session: &mut SessionState, presenter: &mut dyn Presenter) -> Result<()> {
        let race_active = self.state.race_active();
        if race_active && session.last_maze_render.is_none() {
            session.last_maze_render = StateProbe::new(self.bridge).probe_race_state();
        }
        let maze = if race_active {
            session.last_maze_render.as_deref()
        } else {
            None
        };
        presenter.draw_race(&RaceView {
            mode: session.mode,
            race_active,
            maze,
        })?;
        Ok(())
    }

    fn handle_intent(
        &self,
        intent: Intent,
        session: &mut SessionState,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        match intent {
            Intent::ViewResults => {
                ResultsViewer::new(self.state).show(presenter, input)?;
                presenter.restore()?;
            }
            Intent::Start | Intent::Reset => {
                let command = if intent == Intent::Start {
                    EngineCommand::race_start()
                } else {
                    EngineCommand::race_reset()
                };
                let dispatch = self.dispatch(&command, session);
                let notice = if dispatch.result.classification.is_failure() {
                    Notice::error(dispatch.result.message())
                } else {
                    Notice::info(dispatch.result.message())
                };
                presenter.show_notice(&notice)?;
                input.wait_key()?;
                if dispatch.finished {
                    self.finish_race(session, input, presenter)?;
                }
            }
            Intent::Move(direction) => {
                if session.mode == Mode::Movement && !self.state.race_active() {
                    debug!(event = "race_move_rejected", direction = direction.as_str());
                    presenter.show_notice(&Notice::error(NO_RACE_MESSAGE))?;
                    input.wait_key()?;
                    session.return_to_control();
                    session.redraw.request();
                    return Ok(());
                }
                let dispatch = self.dispatch(&EngineCommand::race_move(direction), session);
                if dispatch.result.classification.is_failure() {
                    presenter.show_notice(&Notice::error(dispatch.result.message()))?;
                    input.wait_key()?;
                }
                if dispatch.finished {
                    self.finish_race(session, input, presenter)?;
                }
            }
        }
        Ok(())
    }

    /// Invokes the engine with marker reads on both sides of the call.
    fn dispatch(&self, command: &EngineCommand, session: &mut SessionState) -> Dispatch {
        let before = self.state.race_active();
        let result = self.bridge.invoke(command);
        let after = self.state.race_active();

        session.last_maze_render = None;
        session.redraw.request();

        let finished = before && !after && session.mode == Mode::Movement;
        Dispatch { result, finished }
    }

    fn finish_race(
        &self,
        session: &mut SessionState,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        info!(event = "race_finished");
        ResultsViewer::new(self.state).show(presenter, input)?;
        session.return_to_control();
        session.redraw.request();
        Ok(())
    }
}
