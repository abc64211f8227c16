//! What the controller and menu ask of the screen. The state machine only
//! talks to [`Presenter`]; styling and labels belong to the implementation.

use crate::race::Mode;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(tone: Tone, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(body: impl Into<String>) -> Self {
        Self::new(Tone::Info, "INFO", body)
    }

    pub fn success(body: impl Into<String>) -> Self {
        Self::new(Tone::Success, "SUCCESS", body)
    }

    pub fn warning(body: impl Into<String>) -> Self {
        Self::new(Tone::Warning, "WARNING", body)
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self::new(Tone::Error, "ERROR", body)
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceView<'a> {
    pub mode: Mode,
    pub race_active: bool,
    pub maze: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub maze_loaded: bool,
    pub race_active: bool,
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptView<'a> {
    pub title: &'a str,
    pub label: &'a str,
    pub value: &'a str,
    pub default: &'a str,
}

pub trait Presenter {
    fn draw_race(&mut self, view: &RaceView<'_>) -> io::Result<()>;

    /// Paints a notice. Acknowledgement is the caller's job.
    fn show_notice(&mut self, notice: &Notice) -> io::Result<()>;

    /// `None` means the engine has not written a results log yet.
    fn show_results(&mut self, log: Option<&str>) -> io::Result<()>;

    /// Repaints the last race screen after an overlay went away.
    fn restore(&mut self) -> io::Result<()>;

    fn draw_menu(&mut self, view: &MenuView) -> io::Result<()>;

    fn draw_prompt(&mut self, view: &PromptView<'_>) -> io::Result<()>;

    fn show_busy(&mut self, message: &str) -> io::Result<()>;
}
