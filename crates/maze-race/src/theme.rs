use crate::present::Tone;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub const KEYCAP_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const MUTED_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Yellow)
    .fg(Color::Black)
    .add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkinKind {
    #[default]
    Fancy,
    Plain,
}

impl SkinKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fancy" | "emoji" => Some(SkinKind::Fancy),
            "plain" | "ascii" => Some(SkinKind::Plain),
            _ => None,
        }
    }
}

/// Labels, glyphs and colors for one look of the UI. Both looks drive the
/// same controller.
#[derive(Debug, Clone)]
pub struct Skin {
    pub app_title: &'static str,
    pub race_title: &'static str,
    pub results_title: &'static str,
    pub control_title: &'static str,
    pub movement_title: &'static str,
    pub menu: [&'static str; 8],
    pub race_controls: [&'static str; 3],
    pub moves: [&'static str; 4],
    pub arrow_keys: [&'static str; 4],
    pub warning_mark: &'static str,
    pub ok_mark: &'static str,
    pub accent: Color,
    pub gold: Color,
    pub border: BorderType,
    pub strong_border: BorderType,
}

impl Skin {
    pub fn for_kind(kind: SkinKind) -> Self {
        match kind {
            SkinKind::Fancy => Self::fancy(),
            SkinKind::Plain => Self::plain(),
        }
    }

    pub fn fancy() -> Self {
        Self {
            app_title: "MAZE RACE",
            race_title: "🏁 RACE MODE",
            results_title: "🏆 RACE RESULTS",
            control_title: "🎮 RACE CONTROL",
            movement_title: "🕹️ MOVEMENT",
            menu: [
                "🎲 Generate New Maze",
                "📂 Load Maze from File",
                "💾 Save Current Maze",
                "🔍 Find Path (A*)",
                "🖨️ Print Current Maze",
                "📊 Show Maze Statistics",
                "🏁 Race Mode",
                "🚪 Exit",
            ],
            race_controls: ["🚀 Start New Race", "🔄 Reset Race", "🏆 View Results"],
            moves: ["Move Up", "Move Down", "Move Left", "Move Right"],
            arrow_keys: ["↑", "↓", "←", "→"],
            warning_mark: "⚠️",
            ok_mark: "✓",
            accent: Color::Cyan,
            gold: Color::Rgb(255, 215, 0),
            border: BorderType::Rounded,
            strong_border: BorderType::Thick,
        }
    }

    pub fn plain() -> Self {
        Self {
            app_title: "MAZE RACE",
            race_title: "RACE MODE",
            results_title: "RACE RESULTS",
            control_title: "RACE CONTROL",
            movement_title: "MOVEMENT",
            menu: [
                "Generate New Maze",
                "Load Maze from File",
                "Save Current Maze",
                "Find Path (A*)",
                "Print Current Maze",
                "Show Maze Statistics",
                "Race Mode",
                "Exit",
            ],
            race_controls: ["Start New Race", "Reset Race", "View Results"],
            moves: ["Up", "Down", "Left", "Right"],
            arrow_keys: ["Up", "Down", "Left", "Right"],
            warning_mark: "!",
            ok_mark: "+",
            accent: Color::Cyan,
            gold: Color::Yellow,
            border: BorderType::Plain,
            strong_border: BorderType::Double,
        }
    }

    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Info => self.accent,
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Error => Color::Red,
        }
    }

    pub fn tone_style(&self, tone: Tone) -> Style {
        Style::new()
            .fg(self.tone_color(tone))
            .add_modifier(Modifier::BOLD)
    }
}
