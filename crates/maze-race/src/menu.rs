//! Main menu: thin dispatch from menu entries to engine commands.

use crate::engine::{CommandResult, CommandRunner, EngineBridge, EngineCommand, Reason, StateProbe};
use crate::error::{RaceError, Result};
use crate::input::InputSource;
use crate::markers::EngineState;
use crate::present::{MenuView, Notice, Presenter, PromptView};
use crate::race::{RaceSession, SessionEnd, NO_MAZE_MESSAGE};
use crossterm::event::KeyCode;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub const MIN_SIDE: u16 = 5;
pub const MAX_SIDE: u16 = 60;

const NO_MAZE: &str = "No maze loaded! Generate or load a maze first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Generate,
    Load,
    Save,
    FindPath,
    Print,
    Statistics,
    Race,
    Exit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 8] = [
        MenuEntry::Generate,
        MenuEntry::Load,
        MenuEntry::Save,
        MenuEntry::FindPath,
        MenuEntry::Print,
        MenuEntry::Statistics,
        MenuEntry::Race,
        MenuEntry::Exit,
    ];

    /// Section header shown above this entry, if it opens a group.
    pub fn group(self) -> Option<&'static str> {
        match self {
            MenuEntry::Generate => Some("Maze Operations"),
            MenuEntry::FindPath => Some("Pathfinding"),
            MenuEntry::Race => Some("Interactive"),
            MenuEntry::Exit => Some("System"),
            _ => None,
        }
    }
}

/// Parses "rows cols" and checks both sides against the engine's limits.
pub fn parse_dimensions(raw: &str) -> Result<(u16, u16)> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [rows, cols] = parts.as_slice() else {
        return Err(RaceError::invalid_input("Enter two numbers"));
    };
    let (Ok(rows), Ok(cols)) = (rows.parse::<u16>(), cols.parse::<u16>()) else {
        return Err(RaceError::invalid_input("Invalid numbers"));
    };
    if rows < MIN_SIDE || cols < MIN_SIDE {
        return Err(RaceError::invalid_input(format!(
            "Min {MIN_SIDE}x{MIN_SIDE}"
        )));
    }
    if rows > MAX_SIDE || cols > MAX_SIDE {
        return Err(RaceError::invalid_input(format!(
            "Max {MAX_SIDE}x{MAX_SIDE}"
        )));
    }
    Ok((rows, cols))
}

fn engine_failed(result: &CommandResult) -> bool {
    matches!(
        result.classification.reason(),
        Some(Reason::ErrorStream | Reason::SpawnFailed)
    )
}

pub struct MainMenu<'a, R: CommandRunner, S: EngineState> {
    bridge: &'a EngineBridge<R>,
    state: &'a S,
    workdir: PathBuf,
    poll_interval: Duration,
    selected: usize,
}

impl<'a, R: CommandRunner, S: EngineState> MainMenu<'a, R, S> {
    pub fn new(
        bridge: &'a EngineBridge<R>,
        state: &'a S,
        workdir: PathBuf,
        poll_interval: Duration,
    ) -> Self {
        Self {
            bridge,
            state,
            workdir,
            poll_interval,
            selected: 0,
        }
    }

    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        loop {
            presenter.draw_menu(&MenuView {
                maze_loaded: self.state.maze_loaded(),
                race_active: self.state.race_active(),
                selected: self.selected,
            })?;

            let key = input.wait_key()?;
            let entry = match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let len = MenuEntry::ALL.len();
                    self.selected = (self.selected + len - 1) % len;
                    continue;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.selected = (self.selected + 1) % MenuEntry::ALL.len();
                    continue;
                }
                KeyCode::Char(digit @ '1'..='8') => {
                    self.selected = digit as usize - '1' as usize;
                    MenuEntry::ALL[self.selected]
                }
                KeyCode::Enter => MenuEntry::ALL[self.selected],
                KeyCode::Esc | KeyCode::Char('q') => MenuEntry::Exit,
                _ => continue,
            };

            if !self.activate(entry, input, presenter)? {
                return Ok(());
            }
        }
    }

    /// Returns `false` once the user chose to leave.
    fn activate(
        &mut self,
        entry: MenuEntry,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<bool> {
        info!(event = "menu_select", entry = ?entry);
        let outcome = match entry {
            MenuEntry::Exit => {
                presenter.show_notice(
                    &Notice::info("Thank you for using!\nSee you next time!").titled("GOODBYE"),
                )?;
                input.wait_key()?;
                return Ok(false);
            }
            MenuEntry::Generate => self.generate(input, presenter),
            MenuEntry::Load => self.load(input, presenter),
            MenuEntry::Save => self.save(input, presenter),
            MenuEntry::FindPath => self.find_path(presenter),
            MenuEntry::Print => self.print(),
            MenuEntry::Statistics => Ok(Some(self.statistics())),
            MenuEntry::Race => self.race(input, presenter),
        };

        let notice = match outcome {
            Ok(Some(notice)) => notice,
            Ok(None) => return Ok(true),
            Err(RaceError::Terminal(err)) => return Err(RaceError::Terminal(err)),
            Err(err) => {
                warn!(event = "menu_action_failed", entry = ?entry, error = %err);
                Notice::error(err.to_string())
            }
        };
        presenter.show_notice(&notice)?;
        input.wait_key()?;
        Ok(true)
    }

    fn generate(
        &self,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<Option<Notice>> {
        let Some(raw) = prompt(
            input,
            presenter,
            "GENERATE NEW MAZE",
            "Enter maze size (rows cols, e.g., 20 20):",
            "20 20",
        )?
        else {
            return Ok(None);
        };
        let (rows, cols) = parse_dimensions(&raw)?;

        presenter.show_busy(&format!("Generating {rows}×{cols} maze..."))?;
        let result = self.bridge.invoke(&EngineCommand::gen(rows, cols));
        if engine_failed(&result) {
            return Ok(Some(Notice::error(result.message())));
        }

        presenter.show_busy("Verifying maze has valid path...")?;
        let notice = if StateProbe::new(self.bridge).probe_path_exists() {
            Notice::success(format!("{}\nMaze has valid path", result.message()))
        } else {
            Notice::warning(format!(
                "{}\nGenerated maze has no valid path!\nTry generating again...",
                result.message()
            ))
        };
        Ok(Some(notice))
    }

    fn load(
        &self,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<Option<Notice>> {
        let Some(file) = prompt(
            input,
            presenter,
            "LOAD MAZE FROM FILE",
            "Enter filename:",
            "maze.txt",
        )?
        else {
            return Ok(None);
        };
        if !self.workdir.join(&file).is_file() {
            return Err(RaceError::invalid_input(format!("File '{file}' not found!")));
        }

        presenter.show_busy(&format!("Loading maze from '{file}'..."))?;
        let result = self.bridge.invoke(&EngineCommand::load(&file));
        if engine_failed(&result) {
            return Ok(Some(Notice::error(result.message())));
        }
        if !StateProbe::new(self.bridge).verify_load() {
            return Ok(Some(Notice::error(format!(
                "Failed to load maze from '{file}'!\nFile may be corrupted or invalid format."
            ))));
        }
        Ok(Some(Notice::success(result.message())))
    }

    fn save(
        &self,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<Option<Notice>> {
        if !StateProbe::new(self.bridge).probe_maze_loaded() {
            return Ok(Some(Notice::error(NO_MAZE)));
        }

        let Some(answer) = prompt(
            input,
            presenter,
            "SAVE CURRENT MAZE",
            "Save with custom filename? (y/N)",
            "n",
        )?
        else {
            return Ok(None);
        };
        let custom = if answer.to_ascii_lowercase().starts_with('y') {
            let Some(file) = prompt(
                input,
                presenter,
                "SAVE CURRENT MAZE",
                "Enter filename:",
                "my_maze.txt",
            )?
            else {
                return Ok(None);
            };
            Some(file)
        } else {
            None
        };

        let target = custom.as_deref().unwrap_or("maze.txt");
        presenter.show_busy(&format!("Saving maze to '{target}'..."))?;
        let result = self.bridge.invoke(&EngineCommand::save(custom.as_deref()));
        if result.classification.is_failure() {
            return Ok(Some(Notice::error(result.message())));
        }
        Ok(Some(Notice::success(result.message())))
    }

    fn find_path(&self, presenter: &mut dyn Presenter) -> Result<Option<Notice>> {
        if !StateProbe::new(self.bridge).probe_maze_loaded() {
            return Ok(Some(Notice::error(NO_MAZE_MESSAGE)));
        }
        presenter.show_busy("Computing optimal path...")?;
        let result = self.bridge.invoke(&EngineCommand::find());
        let notice = match result.classification.reason() {
            None => Notice::success(result.message()).titled("PATH FOUND"),
            Some(Reason::NoPath) => Notice::error(result.message()).titled("NO PATH"),
            Some(_) => Notice::error(result.message()),
        };
        Ok(Some(notice))
    }

    fn print(&self) -> Result<Option<Notice>> {
        if !StateProbe::new(self.bridge).probe_maze_loaded() {
            return Ok(Some(Notice::error(NO_MAZE)));
        }
        let result = self.bridge.invoke(&EngineCommand::print());
        if result.classification.is_failure() {
            return Ok(Some(Notice::error(result.message())));
        }
        Ok(Some(Notice::info(result.message()).titled("CURRENT MAZE")))
    }

    fn statistics(&self) -> Notice {
        let result = self.bridge.invoke(&EngineCommand::current());
        if engine_failed(&result) {
            return Notice::error(result.message());
        }
        Notice::info(result.message()).titled("MAZE STATISTICS")
    }

    fn race(
        &self,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> Result<Option<Notice>> {
        let session = RaceSession::new(self.bridge, self.state, self.poll_interval);
        match session.run(input, presenter)? {
            SessionEnd::Exited => {}
            SessionEnd::NoMaze | SessionEnd::NoPath => {
                input.wait_key()?;
            }
        }
        Ok(None)
    }
}

/// Single-line text input. Enter on an empty line takes `default`; Esc
/// cancels.
fn prompt(
    input: &mut dyn InputSource,
    presenter: &mut dyn Presenter,
    title: &str,
    label: &str,
    default: &str,
) -> Result<Option<String>> {
    let mut value = String::new();
    loop {
        presenter.draw_prompt(&PromptView {
            title,
            label,
            value: &value,
            default,
        })?;
        let key = input.wait_key()?;
        match key.code {
            KeyCode::Enter => {
                let trimmed = value.trim();
                let chosen = if trimmed.is_empty() { default } else { trimmed };
                return Ok(Some(chosen.to_string()));
            }
            KeyCode::Esc => return Ok(None),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(c) => value.push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{bridge, StubRunner};
    use crate::input::testing::{ch, key, ScriptedInput};
    use crate::markers::{MarkerFiles, MAZE_MARKER};
    use crate::present::testing::{RecordingPresenter, Shown};
    use crate::present::Tone;
    use crossterm::event::KeyEvent;
    use std::fs;
    use std::path::Path;

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(ch).collect()
    }

    fn run_menu(
        runner: StubRunner,
        dir: &Path,
        keys: Vec<KeyEvent>,
    ) -> (Vec<String>, RecordingPresenter) {
        let bridge = bridge(runner, dir);
        let markers = MarkerFiles::new(dir);
        let mut menu = MainMenu::new(&bridge, &markers, dir.to_path_buf(), Duration::ZERO);
        let mut input = ScriptedInput::new(keys);
        let mut presenter = RecordingPresenter::default();
        menu.run(&mut input, &mut presenter).expect("menu runs");
        (bridge.runner().calls(), presenter)
    }

    #[test]
    fn dimensions_are_validated_locally() {
        assert_eq!(parse_dimensions("20 20").expect("valid"), (20, 20));
        assert_eq!(parse_dimensions("  5   60 ").expect("valid"), (5, 60));
        for bad in ["20", "a b", "4 10", "10 61", "1 2 3", "-5 10"] {
            assert!(
                matches!(parse_dimensions(bad), Err(RaceError::InvalidInput(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn out_of_range_generate_makes_no_engine_call() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut keys = vec![ch('1')];
        keys.extend(typed("4 4"));
        keys.push(key(KeyCode::Enter));
        keys.push(ch(' '));

        let (calls, presenter) = run_menu(StubRunner::new(), dir.path(), keys);

        assert!(calls.is_empty());
        let notices = presenter.notices();
        assert_eq!(notices[0], &Notice::error("Min 5x5"));
        assert_eq!(notices.last().map(|n| n.title.as_str()), Some("GOODBYE"));
    }

    #[test]
    fn generate_uses_default_size_and_verifies_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new()
            .reply("gen", "Generated 20x20 maze")
            .reply("find", "ERROR: No path found");
        let keys = vec![ch('1'), key(KeyCode::Enter), ch(' ')];

        let (calls, presenter) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["gen 20 20", "find"]);
        assert_eq!(presenter.notices()[0].tone, Tone::Warning);
        assert!(presenter
            .shown
            .contains(&Shown::Busy("Generating 20×20 maze...".to_string())));
    }

    #[test]
    fn loading_missing_file_is_rejected_before_engine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut keys = vec![ch('2')];
        keys.extend(typed("nope.txt"));
        keys.extend([key(KeyCode::Enter), ch(' ')]);

        let (calls, presenter) = run_menu(StubRunner::new(), dir.path(), keys);

        assert!(calls.is_empty());
        assert_eq!(
            presenter.notices()[0],
            &Notice::error("File 'nope.txt' not found!")
        );
    }

    #[test]
    fn load_is_verified_with_current() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("maze.txt"), "5 5\n").expect("write");
        let runner = StubRunner::new()
            .reply("load", "Loaded maze.txt")
            .reply("current", "Error: corrupted grid");
        let keys = vec![ch('2'), key(KeyCode::Enter), ch(' ')];

        let (calls, presenter) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["load maze.txt", "current"]);
        assert_eq!(presenter.notices()[0].tone, Tone::Error);
    }

    #[test]
    fn save_with_custom_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new().reply("current", "Maze 10x10");
        let mut keys = vec![ch('3'), ch('y'), key(KeyCode::Enter)];
        keys.extend(typed("race.txt"));
        keys.extend([key(KeyCode::Enter), ch(' ')]);

        let (calls, _) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["current", "save race.txt"]);
    }

    #[test]
    fn find_path_reports_no_path_panel() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new()
            .reply("current", "Maze 10x10")
            .reply("find", "No path found!");
        let keys = vec![ch('4'), ch(' ')];

        let (calls, presenter) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["current", "find"]);
        assert_eq!(presenter.notices()[0].title, "NO PATH");
    }

    #[test]
    fn print_requires_loaded_maze() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new().reply("current", "No maze loaded");
        let keys = vec![key(KeyCode::Down); 4]
            .into_iter()
            .chain([key(KeyCode::Enter), ch(' ')])
            .collect();

        let (calls, presenter) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["current"]);
        assert_eq!(presenter.notices()[0], &Notice::error(NO_MAZE));
    }

    #[test]
    fn find_path_requires_loaded_maze() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new().reply("current", "No maze loaded");
        let keys = vec![ch('4'), ch(' ')];

        let (calls, presenter) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["current"]);
        assert_eq!(presenter.notices()[0], &Notice::error(NO_MAZE_MESSAGE));
    }

    #[test]
    fn race_refusal_waits_for_acknowledgement() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(MAZE_MARKER), "x").expect("write");
        let runner = StubRunner::new().reply("find", "No path found!");
        let keys = vec![ch('7'), ch(' '), ch('q')];

        let (calls, presenter) = run_menu(runner, dir.path(), keys);

        assert_eq!(calls, vec!["find"]);
        let menus = presenter
            .shown
            .iter()
            .filter(|item| matches!(item, Shown::Menu(_)))
            .count();
        assert_eq!(menus, 2);
    }
}
