use crate::menu::MenuEntry;
use crate::present::{MenuView, Notice, Presenter, PromptView, RaceView, Tone};
use crate::race::Mode;
use crate::theme::{Skin, KEYCAP_STYLE, MUTED_STYLE, SELECTED_STYLE};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone)]
struct RaceSnapshot {
    mode: Mode,
    race_active: bool,
    maze: Option<String>,
}

pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    skin: Skin,
    last_race: Option<RaceSnapshot>,
}

impl<B: Backend> TerminalPresenter<B> {
    pub fn new(terminal: Terminal<B>, skin: Skin) -> Self {
        Self {
            terminal,
            skin,
            last_race: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn paint_race(&mut self) -> io::Result<()> {
        let skin = &self.skin;
        let Some(snapshot) = self.last_race.as_ref() else {
            return Ok(());
        };
        self.terminal
            .draw(|f| render_race(f, skin, snapshot))
            .map(|_| ())
    }
}

impl<B: Backend> Presenter for TerminalPresenter<B> {
    fn draw_race(&mut self, view: &RaceView<'_>) -> io::Result<()> {
        self.last_race = Some(RaceSnapshot {
            mode: view.mode,
            race_active: view.race_active,
            maze: view.maze.map(str::to_string),
        });
        self.paint_race()
    }

    fn show_notice(&mut self, notice: &Notice) -> io::Result<()> {
        let skin = &self.skin;
        self.terminal
            .draw(|f| render_notice(f, skin, notice))
            .map(|_| ())
    }

    fn show_results(&mut self, log: Option<&str>) -> io::Result<()> {
        let skin = &self.skin;
        self.terminal
            .draw(|f| render_results(f, skin, log))
            .map(|_| ())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.paint_race()
    }

    fn draw_menu(&mut self, view: &MenuView) -> io::Result<()> {
        self.last_race = None;
        let skin = &self.skin;
        self.terminal
            .draw(|f| render_menu(f, skin, view))
            .map(|_| ())
    }

    fn draw_prompt(&mut self, view: &PromptView<'_>) -> io::Result<()> {
        let skin = &self.skin;
        self.terminal
            .draw(|f| render_prompt(f, skin, view))
            .map(|_| ())
    }

    fn show_busy(&mut self, message: &str) -> io::Result<()> {
        let skin = &self.skin;
        self.terminal
            .draw(|f| render_busy(f, skin, message))
            .map(|_| ())
    }
}

fn render_race(f: &mut Frame, skin: &Skin, race: &RaceSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let title = Paragraph::new(Span::styled(
        skin.race_title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(panel(skin.strong_border, Color::Yellow));
    f.render_widget(title, rows[0]);

    let maze = match (&race.maze, race.race_active) {
        (Some(maze), true) => Paragraph::new(Text::raw(maze.as_str())),
        (None, true) => Paragraph::new(Span::styled("Race view unavailable", MUTED_STYLE)),
        (_, false) => Paragraph::new(Span::styled(
            "No race in progress. Press 1 in race control to start one.",
            MUTED_STYLE,
        )),
    };
    f.render_widget(
        maze.alignment(Alignment::Center)
            .block(panel(skin.border, skin.accent)),
        rows[1],
    );

    let (badge, badge_color) = if race.race_active {
        ("ACTIVE", Color::Green)
    } else {
        ("INACTIVE", Color::Gray)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw("Race Status: "),
        Span::styled(
            badge,
            Style::default()
                .fg(badge_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(panel(skin.border, badge_color));
    f.render_widget(status, rows[2]);

    let (heading, color, actions) = match race.mode {
        Mode::Control => {
            let mut spans = Vec::new();
            for (idx, label) in skin.race_controls.iter().enumerate() {
                spans.push(keycap(&(idx + 1).to_string()));
                spans.push(Span::raw(format!(" {label}    ")));
            }
            (skin.control_title, Color::Yellow, spans)
        }
        Mode::Movement => {
            let mut spans = Vec::new();
            for (arrow, label) in skin.arrow_keys.iter().zip(skin.moves.iter()) {
                spans.push(keycap(arrow));
                spans.push(Span::raw(format!(" {label}    ")));
            }
            (skin.movement_title, skin.accent, spans)
        }
    };
    let menu = Paragraph::new(vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(actions),
    ])
    .alignment(Alignment::Center)
    .block(panel(skin.border, color));
    f.render_widget(menu, rows[3]);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Press ", MUTED_STYLE),
        keycap("Tab"),
        Span::styled(" to switch menus | ", MUTED_STYLE),
        keycap("Esc"),
        Span::styled(" to exit", MUTED_STYLE),
    ]))
    .alignment(Alignment::Center)
    .block(panel(skin.border, Color::DarkGray));
    f.render_widget(hint, rows[4]);
}

fn render_notice(f: &mut Frame, skin: &Skin, notice: &Notice) {
    let area = centered_rect(70, 60, f.size());
    f.render_widget(Clear, area);

    let style = skin.tone_style(notice.tone);
    let mark = match notice.tone {
        Tone::Error | Tone::Warning => format!("{} ", skin.warning_mark),
        Tone::Success => format!("{} ", skin.ok_mark),
        Tone::Info => String::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if notice.tone == Tone::Error {
            skin.strong_border
        } else {
            skin.border
        })
        .border_style(Style::default().fg(skin.tone_color(notice.tone)))
        .title(Span::styled(format!(" {mark}{} ", notice.title), style))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let body = Paragraph::new(Text::raw(notice.body.as_str()))
        .style(Style::default().fg(skin.tone_color(notice.tone)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(body, sections[0]);
    f.render_widget(any_key_line(), sections[1]);
}

fn render_results(f: &mut Frame, skin: &Skin, log: Option<&str>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.size());
    f.render_widget(Clear, f.size());

    let header = Paragraph::new(Span::styled(
        skin.results_title,
        Style::default().fg(skin.gold).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(panel(skin.strong_border, skin.gold));
    f.render_widget(header, rows[0]);

    let body = match log {
        Some(text) => Paragraph::new(Text::raw(text)).block(panel(BorderType::Double, skin.gold)),
        None => Paragraph::new(vec![
            Line::from(Span::styled(
                "No race results found yet.",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Complete a race to see your statistics!",
                MUTED_STYLE,
            )),
        ])
        .block(panel(skin.border, Color::Yellow)),
    };
    f.render_widget(
        body.alignment(Alignment::Center).wrap(Wrap { trim: false }),
        rows[1],
    );
    f.render_widget(any_key_line(), rows[2]);
}

fn render_menu(f: &mut Frame, skin: &Skin, view: &MenuView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let title = Paragraph::new(Span::styled(
        skin.app_title,
        Style::default().fg(skin.accent).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(panel(skin.strong_border, skin.accent));
    f.render_widget(title, rows[0]);

    let maze = if view.maze_loaded {
        Span::styled("LOADED", bold(Color::Green))
    } else {
        Span::styled("NOT LOADED", bold(Color::Red))
    };
    let race = if view.race_active {
        Span::styled("ACTIVE", bold(Color::Green))
    } else {
        Span::styled("INACTIVE", bold(Color::Gray))
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw("Maze: "),
        maze,
        Span::raw("    Race: "),
        race,
    ]))
    .alignment(Alignment::Center)
    .block(panel(skin.border, Color::Gray));
    f.render_widget(status, rows[1]);

    let mut lines = vec![Line::from(Span::styled(
        "What would you like to do?",
        bold(Color::Yellow),
    ))];
    for (idx, entry) in MenuEntry::ALL.iter().enumerate() {
        if let Some(group) = entry.group() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(group, MUTED_STYLE)));
        }
        let label = format!(" {} {} ", idx + 1, skin.menu[idx]);
        let style = if idx == view.selected {
            SELECTED_STYLE
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(label, style)));
    }
    let list = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel(skin.border, Color::Yellow));
    f.render_widget(list, rows[2]);

    let footer = Paragraph::new(Line::from(vec![
        keycap("j/k"),
        Span::raw(" move  "),
        keycap("Enter"),
        Span::raw(" select  "),
        keycap("1-8"),
        Span::raw(" jump  "),
        keycap("q"),
        Span::raw(" quit"),
    ]))
    .alignment(Alignment::Center)
    .block(panel(skin.border, Color::DarkGray));
    f.render_widget(footer, rows[3]);
}

fn render_prompt(f: &mut Frame, skin: &Skin, view: &PromptView<'_>) {
    let area = centered_rect(60, 40, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(skin.border)
        .border_style(Style::default().fg(skin.accent))
        .title(Span::styled(format!(" {} ", view.title), bold(skin.accent)))
        .title_alignment(Alignment::Center);
    let lines = vec![
        Line::from(Span::styled(view.label, Style::default().fg(skin.accent))),
        Line::from(Span::styled(format!("(default: {})", view.default), MUTED_STYLE)),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", KEYCAP_STYLE),
            Span::raw(view.value),
            Span::styled("_", MUTED_STYLE),
        ]),
        Line::from(""),
        Line::from(vec![
            keycap("Enter"),
            Span::raw(" confirm  "),
            keycap("Esc"),
            Span::raw(" cancel"),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_busy(f: &mut Frame, skin: &Skin, message: &str) {
    let area = centered_rect(60, 20, f.size());
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(Span::styled(message, bold(skin.accent)))
        .alignment(Alignment::Center)
        .block(panel(skin.border, skin.accent));
    f.render_widget(paragraph, area);
}

fn panel(border: BorderType, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(border)
        .border_style(Style::default().fg(color))
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn any_key_line() -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("Press ", MUTED_STYLE),
        Span::styled("any key", KEYCAP_STYLE),
        Span::styled(" to continue...", MUTED_STYLE),
    ]))
    .alignment(Alignment::Center)
}

fn keycap(label: &str) -> Span<'static> {
    Span::styled(format!("[{label}]"), KEYCAP_STYLE)
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    horizontal[1]
}
