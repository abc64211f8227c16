use crate::config::Config;
use crate::engine::{CommandRunner, EngineBridge};
use crate::error::{RaceError, Result};
use crate::input::InputSource;
use crate::markers::MarkerFiles;
use crate::menu::MainMenu;
use crate::present::Presenter;
use tracing::{info, warn};

/// Checked once before the terminal is touched. The menu is never shown
/// without an engine to drive.
pub fn preflight(config: &Config) -> Result<EngineBridge> {
    let program = config.engine_path();
    if !program.is_file() {
        warn!(event = "engine_missing", path = %program.display());
        return Err(RaceError::EngineMissing { path: program });
    }
    info!(
        event = "startup",
        engine = %program.display(),
        workdir = %config.workdir.display()
    );
    Ok(EngineBridge::new(program, config.workdir.clone()))
}

/// Runs the menu to completion and clears the engine's markers whatever
/// the outcome.
pub fn run<R: CommandRunner>(
    config: &Config,
    bridge: &EngineBridge<R>,
    input: &mut dyn InputSource,
    presenter: &mut dyn Presenter,
) -> Result<()> {
    let markers = MarkerFiles::new(config.workdir.clone());
    let result = MainMenu::new(bridge, &markers, config.workdir.clone(), config.poll_interval)
        .run(input, presenter);
    markers.cleanup();
    info!(event = "shutdown", ok = result.is_ok());
    result
}
