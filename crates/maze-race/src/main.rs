use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use maze_race::{
    app,
    config::Config,
    input::CrosstermInput,
    logging::init_logging,
    theme::Skin,
    ui::TerminalPresenter,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("maze-race: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_logging(&config);
    let bridge = app::preflight(&config)?;

    let terminal = setup_terminal().context("setting up terminal")?;
    let mut presenter = TerminalPresenter::new(terminal, Skin::for_kind(config.skin));
    let mut input = CrosstermInput;
    let result = app::run(&config, &bridge, &mut input, &mut presenter);
    restore_terminal(presenter.terminal_mut()).context("restoring terminal")?;

    result.map_err(Into::into)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
