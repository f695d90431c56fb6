use std::io;
use std::rc::Rc;

use itertools::Itertools;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Terminal,
};

use crate::feedback::FeedbackClass;
use crate::game::{GameStatus, MAX_ATTEMPTS};
use crate::snapshot::{Renderer, RowView, Snapshot};
use crate::word::{Letter, WORD_LENGTH};

const GRAY: Color = Color::Rgb(0x21, 0x21, 0x21);
const LIGHT_GRAY: Color = Color::Rgb(0x88, 0x88, 0x88);
const MIDDLE_GRAY: Color = Color::Rgb(0x66, 0x66, 0x66);
const GREEN: Color = Color::Rgb(0x53, 0x8d, 0x4e);
const YELLOW: Color = Color::Rgb(0xb5, 0x9f, 0x3b);
const BLACK: Color = Color::Rgb(0x11, 0x11, 0x11);

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

fn feedback_color(class: FeedbackClass) -> Color {
    match class {
        FeedbackClass::Correct => GREEN,
        FeedbackClass::Present => YELLOW,
        FeedbackClass::Absent => GRAY,
    }
}

fn cell_span(letter: Option<Letter>, background: Color, border: Color) -> Span<'static> {
    let text = match letter {
        Some(letter) => format!(" {} ", letter.as_char().to_ascii_uppercase()),
        None => " · ".to_string(),
    };
    Span::styled(
        text,
        Style::default()
            .bg(background)
            .fg(if letter.is_some() { Color::White } else { border })
            .add_modifier(Modifier::BOLD),
    )
}

fn grid_line(row: &RowView) -> Line<'static> {
    let spans = (0..WORD_LENGTH)
        .map(|i| {
            let letter = row.letter_at(i);
            match row {
                RowView::Submitted { feedback, .. } => {
                    let color = feedback_color(feedback.classes()[i]);
                    cell_span(letter, color, color)
                }
                _ => cell_span(letter, BLACK, MIDDLE_GRAY),
            }
        })
        .interleave_shortest(std::iter::repeat(Span::raw(" ")).take(WORD_LENGTH - 1))
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// One cell of the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCell {
    Letter(Letter),
    Enter,
    Backspace,
    Gap,
}

impl KeyCell {
    fn label(self) -> String {
        match self {
            KeyCell::Letter(letter) => format!(" {letter} "),
            KeyCell::Enter => " ENTER ".to_string(),
            KeyCell::Backspace => " ⌫ ".to_string(),
            KeyCell::Gap => " ".to_string(),
        }
    }

    /// The name a click on this cell produces, as understood by
    /// [`GameInput::from_key_name`](crate::input::GameInput::from_key_name).
    fn key_name(self) -> Option<String> {
        match self {
            KeyCell::Letter(letter) => Some(letter.to_string()),
            KeyCell::Enter => Some("Enter".to_string()),
            KeyCell::Backspace => Some("Backspace".to_string()),
            KeyCell::Gap => None,
        }
    }
}

fn keyboard_row(row_index: usize) -> Vec<KeyCell> {
    let Some(letters) = KEYBOARD_ROWS.get(row_index) else {
        return Vec::new();
    };
    let is_last = row_index == KEYBOARD_ROWS.len() - 1;

    let mut cells = Vec::new();
    if is_last {
        cells.extend([KeyCell::Enter, KeyCell::Gap]);
    }
    cells.extend(
        letters
            .chars()
            .filter_map(Letter::new)
            .map(KeyCell::Letter)
            .interleave_shortest(std::iter::repeat(KeyCell::Gap).take(letters.len() - 1)),
    );
    if is_last {
        cells.extend([KeyCell::Gap, KeyCell::Backspace]);
    }
    cells
}

fn keyboard_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let action_style = Style::default().bg(LIGHT_GRAY).fg(Color::White);
    let cell_style = |cell: KeyCell| match cell {
        KeyCell::Letter(letter) => {
            let background = snapshot
                .keyboard
                .get(letter)
                .map_or(LIGHT_GRAY, feedback_color);
            Style::default().bg(background).fg(Color::White)
        }
        KeyCell::Enter | KeyCell::Backspace => action_style,
        KeyCell::Gap => Style::default(),
    };

    (0..KEYBOARD_ROWS.len())
        .map(|row_index| {
            keyboard_row(row_index)
                .into_iter()
                .map(|cell| Span::styled(cell.label(), cell_style(cell)))
                .collect::<Line>()
        })
        .collect()
}

fn status_text(snapshot: &Snapshot) -> String {
    match (snapshot.status, snapshot.revealed) {
        (GameStatus::Won, _) => format!(
            "solved in {}/{MAX_ATTEMPTS}  ·  (esc) quit",
            snapshot.attempts_used()
        ),
        (GameStatus::Lost, Some(secret)) => {
            format!("the word was {}  ·  (esc) quit", secret.to_string().to_uppercase())
        }
        _ if snapshot.locked => "…".to_string(),
        _ => format!(
            "attempt {}/{MAX_ATTEMPTS}  ·  (enter) submit  ·  (esc) quit",
            snapshot.attempts_used() + 1
        ),
    }
}

/// Centered rectangle of the given size, clamped to `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Title, grid, spacer, keyboard, status line, rest.
fn sections(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(MAX_ATTEMPTS as u16 * 2),
                Constraint::Length(1),
                Constraint::Length(KEYBOARD_ROWS.len() as u16 * 2),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area)
}

/// Column where a centered line of `line_width` starts, matching
/// `Paragraph`'s centering.
fn centered_start(area: Rect, line_width: u16) -> u16 {
    area.x + (area.width / 2).saturating_sub(line_width / 2)
}

/// Name of the on-screen key drawn at (`column`, `row`) when the game
/// fills `area`, e.g. `"q"`, `"Enter"` or `"Backspace"`.
pub fn key_at(area: Rect, column: u16, row: u16) -> Option<String> {
    let keyboard = sections(area)[3];
    if row < keyboard.y || row >= keyboard.bottom() {
        return None;
    }
    // keyboard rows are separated by blank lines
    let offset = row - keyboard.y;
    if offset % 2 != 0 {
        return None;
    }

    let cells = keyboard_row(usize::from(offset / 2));
    let widths: Vec<u16> = cells
        .iter()
        .map(|cell| Span::raw(cell.label()).width() as u16)
        .collect();
    let mut x = centered_start(keyboard, widths.iter().sum());
    for (cell, width) in cells.into_iter().zip(widths) {
        if (x..x + width).contains(&column) {
            return cell.key_name();
        }
        x += width;
    }
    None
}

impl Widget for &Snapshot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM);

        let chunks = sections(area);

        Paragraph::new(Span::styled("W O R D L E", bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let grid = Itertools::intersperse(self.rows.iter().map(grid_line), Line::default())
            .collect::<Vec<_>>();
        Paragraph::new(grid)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let keyboard = Itertools::intersperse(keyboard_lines(self).into_iter(), Line::default())
            .collect::<Vec<_>>();
        Paragraph::new(keyboard)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(status_text(self), italic_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        if let Some(notice) = &self.notice {
            let message = notice.to_string();
            let popup = centered(area, message.chars().count() as u16 + 8, 3);
            Clear.render(popup, buf);
            Paragraph::new(Span::styled(message, bold_style))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL))
                .render(popup, buf);
        }
    }
}

/// Draws snapshots onto a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    type Error = io::Error;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.terminal
            .draw(|f| f.render_widget(snapshot, f.area()))?;
        Ok(())
    }
}
