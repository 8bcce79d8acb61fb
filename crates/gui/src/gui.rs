//! The GUI for the checkers engine, built with Iced.
//!
//! Follows the Elm architecture:
//! - `CheckersApp` is the Model. It owns the `Game`, the only thing that mutates the board.
//! - `Message` lists the events: cell clicks and the two reset commands.
//! - `update` forwards them to the engine.
//! - `view` draws the status line, the board canvas and the controls.

use engine::constants::{BOARD_DIM, Player};
use engine::game::{CellView, ClickOutcome, Game, GameStatus, MoveCompleted};
use engine::square::Square;
use iced::{
    executor,
    widget::{canvas::{self, event, Frame, Geometry, Path, Program, Stroke}, text, Button, Column, Container, Row},
    Application, Command, Element, Length, Pixels, Point, Rectangle, Renderer, Settings, Size, Theme, mouse
};
use tracing::debug;

const BOARD_SIZE: f32 = 560.0;
const CELL_SIZE: f32 = BOARD_SIZE / BOARD_DIM as f32;

/// Runs the GUI application.
pub fn run() -> iced::Result {
    CheckersApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(640.0, 720.0),
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}

#[derive(Debug, Clone)]
enum Message {
    CellClicked(i32, i32),
    /// Fresh board.
    NewGame,
    /// Re-deal onto the existing board.
    Restart,
}

struct CheckersApp {
    game: Game,
    last_move: Option<MoveCompleted>,
}

impl Application for CheckersApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let app = CheckersApp {
            game: Game::default(),
            last_move: None,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Checkers")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::CellClicked(row, col) => {
                let outcome = self.game.on_cell_clicked(row, col);
                debug!(row, col, ?outcome, "cell clicked");
                if let ClickOutcome::MoveCompleted(done) = outcome {
                    self.last_move = Some(done);
                }
            }
            Message::NewGame => {
                self.game.new_game();
                self.last_move = None;
            }
            Message::Restart => {
                self.game.restart();
                self.last_move = None;
            }
        }
        Command::none()
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let canvas = canvas::Canvas::new(BoardCanvas {
            cells: self.game.snapshot(),
            last_move: self.last_move,
        })
        .width(Length::Fixed(BOARD_SIZE))
        .height(Length::Fixed(BOARD_SIZE));

        let counts = format!(
            "Black: {}   Red: {}",
            self.game.count(Player::Black),
            self.game.count(Player::Red)
        );

        let controls = Row::new()
            .spacing(10)
            .push(Button::new(text("New Game")).on_press(Message::NewGame))
            .push(Button::new(text("Restart")).on_press(Message::Restart));

        let content = Column::new()
            .spacing(20)
            .align_items(iced::Alignment::Center)
            .push(text(status_text(&self.game)).size(Pixels(24.0)))
            .push(canvas)
            .push(text(counts))
            .push(controls);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}

fn status_text(game: &Game) -> String {
    match game.status() {
        GameStatus::Won(winner) => format!("{winner:?} wins!"),
        GameStatus::InProgress if game.chain_capture_in_progress() => {
            format!("{:?}: keep jumping", game.current_player())
        }
        GameStatus::InProgress if game.mandatory_capture_active() => {
            format!("{:?} to move (must capture)", game.current_player())
        }
        GameStatus::InProgress => format!("{:?} to move", game.current_player()),
    }
}

/// Maps a point inside the board to (row, col). Points past the edge give
/// out-of-range values, which the engine ignores.
fn cell_at(pos: Point) -> (i32, i32) {
    ((pos.y / CELL_SIZE).floor() as i32, (pos.x / CELL_SIZE).floor() as i32)
}

fn cell_origin(row: usize, col: usize) -> Point {
    Point::new(col as f32 * CELL_SIZE, row as f32 * CELL_SIZE)
}

// --- Canvas Drawing Logic ---

struct BoardCanvas {
    cells: [[CellView; BOARD_DIM]; BOARD_DIM],
    last_move: Option<MoveCompleted>,
}

impl Program<Message> for BoardCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        self.draw_cells(&mut frame);
        self.draw_last_move(&mut frame);
        self.draw_pieces(&mut frame);

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: event::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if let event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(pos) = cursor.position_in(bounds) {
                let (row, col) = cell_at(pos);
                return (event::Status::Captured, Some(Message::CellClicked(row, col)));
            }
        }
        (event::Status::Ignored, None)
    }
}

// --- Canvas Drawing Helper Functions ---

impl BoardCanvas {
    fn draw_cells(&self, frame: &mut Frame) {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let base = if cell.is_playable {
                    iced::Color::from_rgb8(169, 169, 169)
                } else {
                    iced::Color::from_rgb8(210, 180, 140)
                };
                // Selected and reachable cells are drawn brighter.
                let color = if cell.is_selected || cell.is_highlighted {
                    brighten(base, 1.25)
                } else {
                    base
                };
                let path = Path::rectangle(cell_origin(r, c), Size::new(CELL_SIZE, CELL_SIZE));
                frame.fill(&path, color);

                if cell.is_selected || cell.is_highlighted {
                    let edge = if cell.is_selected {
                        iced::Color::from_rgb(1.0, 1.0, 0.0)
                    } else {
                        iced::Color::from_rgb(0.0, 1.0, 0.0)
                    };
                    frame.stroke(&path, Stroke::default().with_width(3.0).with_color(edge));
                }
            }
        }
    }

    fn draw_last_move(&self, frame: &mut Frame) {
        if let Some(done) = self.last_move {
            for (sq, color) in [
                (done.from, iced::Color::from_rgba(1.0, 1.0, 0.0, 0.3)),
                (done.to, iced::Color::from_rgba(0.0, 1.0, 0.0, 0.3)),
            ] {
                let path = Path::rectangle(square_origin(sq), Size::new(CELL_SIZE, CELL_SIZE));
                frame.fill(&path, color);
            }
        }
    }

    fn draw_pieces(&self, frame: &mut Frame) {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let Some(owner) = cell.occupant else { continue };
                let color = match owner {
                    Player::Red => iced::Color::from_rgb8(220, 20, 20),
                    Player::Black => iced::Color::from_rgb8(40, 40, 40),
                };
                let origin = cell_origin(r, c);
                let centre = Point::new(origin.x + CELL_SIZE / 2.0, origin.y + CELL_SIZE / 2.0);
                let radius = CELL_SIZE / 3.0;

                let shadow = Path::circle(Point::new(centre.x + 3.0, centre.y + 3.0), radius);
                frame.fill(&shadow, iced::Color::from_rgba8(0, 0, 0, 0.4));
                let circle = Path::circle(centre, radius);
                frame.fill(&circle, color);
                frame.stroke(&circle, Stroke::default().with_width(2.0).with_color(brighten(color, 1.35)));

                if cell.is_king {
                    draw_crown(frame, centre, radius, brighten(color, 0.5));
                }
            }
        }
    }
}

/// A band with three spikes, centred in the piece.
fn draw_crown(frame: &mut Frame, centre: Point, radius: f32, color: iced::Color) {
    let width = radius;
    let left = centre.x - width / 2.0;
    let top = centre.y - radius / 3.0;
    let spike_height = radius / 4.0;
    let band = Path::rectangle(
        Point::new(left, top + spike_height),
        Size::new(width, radius / 2.0),
    );
    frame.fill(&band, color);
    for (offset, spike_width) in [(0.0, width / 6.0), (width / 3.0, width / 3.0), (width * 5.0 / 6.0, width / 6.0)] {
        let spike = Path::rectangle(Point::new(left + offset, top), Size::new(spike_width, spike_height));
        frame.fill(&spike, color);
    }
}

fn square_origin(sq: Square) -> Point {
    cell_origin(sq.row() as usize, sq.col() as usize)
}

fn brighten(color: iced::Color, factor: f32) -> iced::Color {
    iced::Color {
        r: (color.r * factor).clamp(0.0, 1.0),
        g: (color.g * factor).clamp(0.0, 1.0),
        b: (color.b * factor).clamp(0.0, 1.0),
        a: color.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_map_to_cells() {
        assert_eq!(cell_at(Point::new(1.0, 1.0)), (0, 0));
        assert_eq!(cell_at(Point::new(CELL_SIZE * 1.5, CELL_SIZE * 2.5)), (2, 1));
        assert_eq!(cell_at(Point::new(BOARD_SIZE - 0.5, BOARD_SIZE - 0.5)), (7, 7));
        assert_eq!(cell_at(Point::new(BOARD_SIZE + 1.0, 0.0)), (0, 8));
    }

    #[test]
    fn clicks_update_the_last_move() {
        let (mut app, _) = CheckersApp::new(());
        let _ = app.update(Message::CellClicked(2, 1));
        let _ = app.update(Message::CellClicked(3, 2));
        let done = app.last_move.expect("move completed");
        assert_eq!(done.player, Player::Black);
        assert_eq!(app.game.current_player(), Player::Red);

        let _ = app.update(Message::Restart);
        assert!(app.last_move.is_none());
        assert_eq!(app.game.current_player(), Player::Black);
    }

    #[test]
    fn status_mentions_the_side_to_move() {
        assert_eq!(status_text(&Game::default()), "Black to move");
    }

    #[test]
    fn brighten_clamps() {
        let c = brighten(iced::Color::from_rgb(0.9, 0.5, 0.0), 2.0);
        assert_eq!((c.r, c.g, c.b), (1.0, 1.0, 0.0));
    }
}
