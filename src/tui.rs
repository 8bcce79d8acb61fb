//! The Textual User Interface for the checkers engine.
//!
//! A keyboard cursor stands in for the mouse: the arrow keys (or hjkl) move
//! it and Enter/Space clicks the cell under it.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use engine::constants::{BOARD_DIM, Player};
use engine::game::{CellView, ClickOutcome, Game, GameStatus};
use std::io::{self, Write};
use tracing::info;

const CELL_WIDTH: u16 = 3;

/// Runs the main game loop for the terminal UI.
pub fn run() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut stdout);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn event_loop(out: &mut impl Write) -> io::Result<()> {
    let mut app = App::new();
    info!("terminal game started");

    loop {
        draw(out, &app)?;
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match action_for(key) {
            Some(Action::Quit) => return Ok(()),
            Some(action) => app.apply(action),
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveCursor(i32, i32),
    Click,
    NewGame,
    Restart,
    Quit,
}

fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor(-1, 0)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor(1, 0)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor(0, -1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor(0, 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Click),
        KeyCode::Char('n') => Some(Action::NewGame),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

struct App {
    game: Game,
    cursor: (i32, i32),
    message: String,
}

impl App {
    fn new() -> Self {
        Self {
            game: Game::default(),
            cursor: (2, 1),
            message: String::from("Black to move."),
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::MoveCursor(dr, dc) => {
                let max = BOARD_DIM as i32 - 1;
                self.cursor = (
                    (self.cursor.0 + dr).clamp(0, max),
                    (self.cursor.1 + dc).clamp(0, max),
                );
            }
            Action::Click => {
                let outcome = self.game.on_cell_clicked(self.cursor.0, self.cursor.1);
                if let Some(message) = describe(outcome) {
                    self.message = message;
                }
            }
            Action::NewGame => {
                self.game.new_game();
                self.message = String::from("New game.");
            }
            Action::Restart => {
                self.game.restart();
                self.message = String::from("Pieces re-dealt.");
            }
            Action::Quit => {}
        }
    }
}

fn describe(outcome: ClickOutcome) -> Option<String> {
    match outcome {
        ClickOutcome::Ignored => None,
        ClickOutcome::Selected(sq) => Some(format!("Selected {sq}.")),
        ClickOutcome::Deselected => Some(String::from("Selection cleared.")),
        ClickOutcome::ChainContinues { to, captured, .. } => {
            Some(format!("Took {captured}; keep jumping from {to}."))
        }
        ClickOutcome::MoveCompleted(done) => Some(format!(
            "{:?} moved {} -> {}{}.",
            done.player,
            done.from,
            done.to,
            match done.captures {
                0 => String::new(),
                n => format!(" taking {n}"),
            }
        )),
    }
}

fn draw(out: &mut impl Write, app: &App) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(out, Print("--- Checkers in Rust ---"))?;

    let view = app.game.snapshot();
    for (r, row) in view.iter().enumerate() {
        let y = r as u16 + 2;
        queue!(out, cursor::MoveTo(0, y), Print(format!("{} ", r + 1)))?;
        for (c, cell) in row.iter().enumerate() {
            let under_cursor = app.cursor == (r as i32, c as i32);
            let (fg, text) = piece_glyph(cell);
            queue!(
                out,
                cursor::MoveTo(2 + c as u16 * CELL_WIDTH, y),
                SetBackgroundColor(cell_background(cell, under_cursor)),
                SetForegroundColor(fg),
                Print(text),
                ResetColor
            )?;
        }
    }

    let files: String = (0..BOARD_DIM)
        .map(|c| format!(" {} ", (b'a' + c as u8) as char))
        .collect();
    queue!(out, cursor::MoveTo(2, BOARD_DIM as u16 + 2), Print(files))?;

    let game = &app.game;
    let status = match game.status() {
        GameStatus::Won(winner) => format!("{winner:?} wins! Press n for a new game."),
        GameStatus::InProgress if game.chain_capture_in_progress() => {
            format!("{:?} must keep jumping.", game.current_player())
        }
        GameStatus::InProgress if game.mandatory_capture_active() => {
            format!("{:?} to move (capture required).", game.current_player())
        }
        GameStatus::InProgress => format!("{:?} to move.", game.current_player()),
    };
    let lines = [
        status,
        format!(
            "Black: {:2}   Red: {:2}",
            game.count(Player::Black),
            game.count(Player::Red)
        ),
        app.message.clone(),
        String::from("arrows/hjkl move, Enter/Space click, n new game, r restart, q quit"),
    ];
    for (i, line) in lines.iter().enumerate() {
        queue!(out, cursor::MoveTo(0, BOARD_DIM as u16 + 4 + i as u16), Print(line))?;
    }

    out.flush()
}

fn cell_background(cell: &CellView, under_cursor: bool) -> Color {
    if under_cursor {
        Color::Blue
    } else if cell.is_selected {
        Color::DarkYellow
    } else if cell.is_highlighted {
        Color::DarkGreen
    } else if cell.is_playable {
        Color::DarkGrey
    } else {
        Color::Grey
    }
}

fn piece_glyph(cell: &CellView) -> (Color, &'static str) {
    match (cell.occupant, cell.is_king) {
        (Some(Player::Black), false) => (Color::Black, " o "),
        (Some(Player::Black), true) => (Color::Black, " K "),
        (Some(Player::Red), false) => (Color::Red, " o "),
        (Some(Player::Red), true) => (Color::Red, " K "),
        (None, _) => (Color::Reset, "   "),
    }
}
