//! Bridge to the external maze engine.
//!
//! The engine is stateless from our side: every command is a fresh process
//! whose streams are captured and classified. Anything the engine remembers
//! between calls lives in files it writes into the work directory.

pub mod classify;
pub mod probe;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

pub use classify::{Classification, Classifier, Reason, ENGINE_SENTINELS, LOAD_SENTINELS};
pub use probe::StateProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    name: &'static str,
    args: Vec<String>,
}

impl EngineCommand {
    fn bare(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    pub fn gen(rows: u16, cols: u16) -> Self {
        Self {
            name: "gen",
            args: vec![rows.to_string(), cols.to_string()],
        }
    }

    pub fn load(file: &str) -> Self {
        Self {
            name: "load",
            args: vec![file.to_string()],
        }
    }

    pub fn save(file: Option<&str>) -> Self {
        Self {
            name: "save",
            args: file.map(str::to_string).into_iter().collect(),
        }
    }

    pub fn find() -> Self {
        Self::bare("find")
    }

    pub fn current() -> Self {
        Self::bare("current")
    }

    pub fn print() -> Self {
        Self::bare("print")
    }

    pub fn race_start() -> Self {
        Self::bare("race_start")
    }

    pub fn race_reset() -> Self {
        Self::bare("race_reset")
    }

    pub fn race_state() -> Self {
        Self::bare("race_state")
    }

    pub fn race_move(direction: Direction) -> Self {
        let name = match direction {
            Direction::Up => "race_up",
            Direction::Down => "race_down",
            Direction::Left => "race_left",
            Direction::Right => "race_right",
        };
        Self::bare(name)
    }

    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.name.to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Captured streams of one finished engine process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_failed: bool,
    pub classification: Classification,
}

impl CommandResult {
    fn spawn_failure(err: &io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Error: {err}"),
            exit_failed: true,
            classification: Classification::Failure(Reason::SpawnFailed),
        }
    }

    pub fn is_success(&self) -> bool {
        self.classification.is_success()
    }

    /// Text worth showing to the user: stderr when the engine complained,
    /// stdout otherwise.
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            self.stdout.trim_end()
        } else {
            self.stderr.trim_end()
        }
    }

    pub fn has_output(&self) -> bool {
        !self.stdout.trim().is_empty()
    }
}

pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<RawOutput>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<RawOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

/// One synchronous invocation per command. There is no timeout: a hung
/// engine blocks the caller until it exits.
#[derive(Debug)]
pub struct EngineBridge<R: CommandRunner = ProcessRunner> {
    program: PathBuf,
    workdir: PathBuf,
    runner: R,
    classifier: Classifier,
}

impl EngineBridge<ProcessRunner> {
    pub fn new(program: PathBuf, workdir: PathBuf) -> Self {
        Self::with_runner(program, workdir, ProcessRunner)
    }
}

impl<R: CommandRunner> EngineBridge<R> {
    pub fn with_runner(program: PathBuf, workdir: PathBuf, runner: R) -> Self {
        Self {
            program,
            workdir,
            runner,
            classifier: Classifier::default(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn invoke(&self, command: &EngineCommand) -> CommandResult {
        self.invoke_with(command, self.classifier)
    }

    pub fn invoke_with(&self, command: &EngineCommand, classifier: Classifier) -> CommandResult {
        let argv = command.argv();
        let result = match self.runner.run(&self.program, &argv, &self.workdir) {
            Ok(output) => {
                let classification = classifier.classify(&output.stdout, &output.stderr);
                CommandResult {
                    stdout: output.stdout,
                    stderr: output.stderr,
                    exit_failed: !output.success,
                    classification,
                }
            }
            Err(err) => {
                warn!(event = "engine_spawn_failed", command = %command, error = %err);
                CommandResult::spawn_failure(&err)
            }
        };
        debug!(
            event = "engine_invoke",
            command = %command,
            exit_failed = result.exit_failed,
            classification = ?result.classification
        );
        result
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{bridge, StubRunner};
    use super::*;

    #[test]
    fn commands_render_as_space_separated_arguments() {
        assert_eq!(EngineCommand::gen(20, 25).to_string(), "gen 20 25");
        assert_eq!(EngineCommand::save(None).to_string(), "save");
        assert_eq!(
            EngineCommand::save(Some("my_maze.txt")).to_string(),
            "save my_maze.txt"
        );
        assert_eq!(
            EngineCommand::race_move(Direction::Left).to_string(),
            "race_left"
        );
    }

    #[test]
    fn spawn_failure_becomes_failure_result() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bridge = bridge(StubRunner::failing_spawn(), dir.path());
        let result = bridge.invoke(&EngineCommand::current());
        assert_eq!(
            result.classification,
            Classification::Failure(Reason::SpawnFailed)
        );
        assert!(result.exit_failed);
        assert!(result.message().contains("no such file"));
    }

    #[test]
    fn stderr_is_failure_even_with_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = StubRunner::new().reply_err("find", "segfault");
        let bridge = bridge(runner, dir.path());
        let result = bridge.invoke(&EngineCommand::find());
        assert!(result.classification.is_failure());
        assert_eq!(result.message(), "segfault");
    }

    #[test]
    fn real_process_spawn_failure_is_contained() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bridge = EngineBridge::new(
            dir.path().join("definitely-not-here"),
            dir.path().to_path_buf(),
        );
        let result = bridge.invoke(&EngineCommand::print());
        assert_eq!(
            result.classification,
            Classification::Failure(Reason::SpawnFailed)
        );
    }
}
