use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style,
    style::Color,
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::config::Rect;
use crate::engine::animation::SPAWN_VALUE;
use crate::engine::movement::Direction;
use crate::engine::session::{Frame, Status, TileView};
use crate::error::{Error, Result};
use crate::tui::colors::{board_colors, tile_colors, Rgb};
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::renderer::Renderer;

/// Logical units per terminal column and per terminal row. Terminal cells are about twice as tall
/// as they are wide.
const COLUMN_UNITS: u32 = 13;
const ROW_UNITS: u32 = 26;

const BOARD_X_OFFSET: u16 = 2;
const BOARD_Y_OFFSET: u16 = 5;
const BORDER_WIDTH: u16 = 1;

const HELP: &str = "arrows/hjkl move  u undo  q quit";

/// Terminal area covered by a logical rectangle, clamped so every tile is at least one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Area {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

impl Area {
    fn from_rect(rect: &Rect) -> Self {
        Self {
            x: BOARD_X_OFFSET + (rect.x / COLUMN_UNITS) as u16,
            y: BOARD_Y_OFFSET + (rect.y / ROW_UNITS) as u16,
            width: ((rect.size / COLUMN_UNITS) as u16).max(1),
            height: ((rect.size / ROW_UNITS) as u16).max(1),
        }
    }

    fn board(extent: u32) -> Self {
        Self::from_rect(&Rect {
            x: 0,
            y: 0,
            size: extent,
        })
    }
}

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
    active: bool,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w, active: true })
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.w.execute(cursor::Show)?;
        self.w.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("unable to restore terminal: {}", e);
        }
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        match self.check_size(frame) {
            Ok(()) => self.draw(frame)?,
            Err(Error::TerminalTooSmall(width, height)) => {
                self.w.queue(cursor::MoveTo(0, 0))?;
                self.w.queue(style::Print(format!(
                    "hey there! the terminal must be at least {} x {}, try resizing it!",
                    width, height
                )))?;
            }
            Err(e) => return Err(e),
        }
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.queue(style::ResetColor)?;
        self.w.execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn recover(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("unable to restore terminal: {}", e);
        }
    }
}

impl<T: Write> Crossterm<T> {
    fn check_size(&self, frame: &Frame) -> Result<()> {
        let board = Area::board(frame.extent);
        let width = (board.x + board.width + BORDER_WIDTH) as usize + 1;
        let height = (board.y + board.height + BORDER_WIDTH) as usize + 2;
        let (cwidth, cheight) = self.size_hint()?;
        if (cwidth as usize) < width || (cheight as usize) < height {
            return Err(Error::TerminalTooSmall(width, height));
        }
        Ok(())
    }

    fn draw(&mut self, frame: &Frame) -> Result<()> {
        let dimmed = frame.status != Status::Running;
        let board = Area::board(frame.extent);
        let (board_bg, board_fg) = board_colors(dimmed);

        self.draw_score(frame.score, board)?;
        self.fill(board, board_bg)?;
        self.draw_border(board, board_fg)?;

        for tile in &frame.tiles {
            self.draw_tile(tile, dimmed)?;
        }

        match frame.status {
            Status::Running => (),
            Status::Won => self.draw_message(board, "Congratulations!")?,
            Status::Lost => self.draw_message(board, "Game Over!")?,
        }

        self.print(
            board.x - BORDER_WIDTH,
            board.y + board.height + BORDER_WIDTH + 1,
            HELP,
            None,
        )?;
        Ok(())
    }

    fn draw_score(&mut self, score: u32, board: Area) -> Result<()> {
        let text = format!(" score {:>8} ", score);
        let width = text.chars().count() as u16;
        let x = (board.x + board.width).saturating_sub(width);
        let area = Area {
            x: x.saturating_sub(BORDER_WIDTH),
            y: 1,
            width: width + 2 * BORDER_WIDTH,
            height: 1,
        };
        let (bg, fg) = board_colors(false);
        self.fill(area, bg)?;
        self.draw_border(area, fg)?;
        self.print(x, 1, &text, Some((fg, bg)))
    }

    fn draw_tile(&mut self, tile: &TileView, dimmed: bool) -> Result<()> {
        let area = Area::from_rect(&tile.rect);
        if tile.progress.is_some() {
            let (bg, _) = tile_colors(SPAWN_VALUE, dimmed);
            return self.fill(area, bg);
        }
        if !tile.occupied {
            let (slot, _) = board_colors(!dimmed);
            return self.fill(area, slot);
        }
        let (bg, fg) = tile_colors(tile.value, dimmed);
        self.fill(area, bg)?;
        let text = tile.value.to_string();
        let len = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        let y = area.y + area.height / 2;
        self.print(x, y, &text, Some((fg, bg)))
    }

    fn draw_message(&mut self, board: Area, title: &str) -> Result<()> {
        let width = (board.width as usize).saturating_sub(4).max(1);
        let mut lines: Vec<String> = textwrap::wrap(title, width)
            .into_iter()
            .map(|l| l.into_owned())
            .collect();
        lines.push(String::new());
        lines.extend(
            textwrap::wrap("Press any key to reset", width)
                .into_iter()
                .map(|l| l.into_owned()),
        );
        let top = board.y + (board.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (offset, line) in lines.iter().enumerate() {
            let len = line.chars().count() as u16;
            let x = board.x + board.width.saturating_sub(len) / 2;
            let colors = (Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
            self.print(x, top + offset as u16, line, Some(colors))?;
        }
        Ok(())
    }

    fn draw_border(&mut self, area: Area, fg: Rgb) -> Result<()> {
        let corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();

        let left = area.x.saturating_sub(BORDER_WIDTH);
        let top = area.y.saturating_sub(BORDER_WIDTH);
        let right = area.x + area.width;
        let bottom = area.y + area.height;
        let span: String = std::iter::repeat(horizontal)
            .take(area.width as usize)
            .collect();

        let upper_left: char = corner.clone().into();
        let upper_right: char = corner.clone().rotate_cw(1).into();
        let lower_right: char = corner.clone().rotate_cw(2).into();
        let lower_left: char = corner.clone().rotate_ccw(1).into();

        self.w.queue(style::ResetColor)?;
        self.w.queue(style::SetForegroundColor(Color::from(fg)))?;
        self.w.queue(cursor::MoveTo(left, top))?;
        self.w.queue(style::Print(format!("{}{}{}", upper_left, span, upper_right)))?;
        for y in area.y..bottom {
            self.w.queue(cursor::MoveTo(left, y))?;
            self.w.queue(style::Print(vertical))?;
            self.w.queue(cursor::MoveTo(right, y))?;
            self.w.queue(style::Print(vertical))?;
        }
        self.w.queue(cursor::MoveTo(left, bottom))?;
        self.w.queue(style::Print(format!("{}{}{}", lower_left, span, lower_right)))?;
        Ok(())
    }

    fn fill(&mut self, area: Area, bg: Rgb) -> Result<()> {
        let blank = " ".repeat(area.width as usize);
        self.w.queue(style::SetBackgroundColor(Color::from(bg)))?;
        for y in area.y..area.y + area.height {
            self.w.queue(cursor::MoveTo(area.x, y))?;
            self.w.queue(style::Print(&blank))?;
        }
        self.w.queue(style::ResetColor)?;
        Ok(())
    }

    fn print(&mut self, x: u16, y: u16, s: &str, colors: Option<(Rgb, Rgb)>) -> Result<()> {
        if let Some((fg, bg)) = colors {
            self.w.queue(style::SetForegroundColor(Color::from(fg)))?;
            self.w.queue(style::SetBackgroundColor(Color::from(bg)))?;
        }
        self.w.queue(cursor::MoveTo(x, y))?;
        self.w.queue(style::Print(s))?;
        self.w.queue(style::ResetColor)?;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            CrossTermEvent::Key(ke) if ke.kind == KeyEventKind::Press => {
                Some(Event::UserInput(handle_key_event(ke)))
            }
            CrossTermEvent::Resize(_, _) => Some(Event::Resize),
            _ => None,
        })
    }
}

fn handle_key_event(ke: KeyEvent) -> UserInput {
    match ke {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => UserInput::Quit,
        KeyEvent { code, .. } => match code {
            KeyCode::Left | KeyCode::Char('h') => UserInput::Direction(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => UserInput::Direction(Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => UserInput::Direction(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => UserInput::Direction(Direction::Down),
            KeyCode::Char('u') => UserInput::Undo,
            KeyCode::Char('q') | KeyCode::Esc => UserInput::Quit,
            _ => UserInput::Other,
        },
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::arrow_left(KeyCode::Left, UserInput::Direction(Direction::Left))]
    #[case::vi_down(KeyCode::Char('j'), UserInput::Direction(Direction::Down))]
    #[case::vi_up(KeyCode::Char('k'), UserInput::Direction(Direction::Up))]
    #[case::arrow_right(KeyCode::Right, UserInput::Direction(Direction::Right))]
    #[case::undo(KeyCode::Char('u'), UserInput::Undo)]
    #[case::quit(KeyCode::Char('q'), UserInput::Quit)]
    #[case::escape(KeyCode::Esc, UserInput::Quit)]
    #[case::unbound(KeyCode::Char('x'), UserInput::Other)]
    #[case::enter(KeyCode::Enter, UserInput::Other)]
    fn key_bindings(#[case] code: KeyCode, #[case] expected: UserInput) {
        assert_eq!(handle_key_event(KeyEvent::new(code, KeyModifiers::NONE)), expected);
    }

    #[test]
    fn ctrl_c_quits() {
        let ke = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ke), UserInput::Quit);
    }

    #[rstest]
    #[case::full_tile(Rect { x: 10, y: 10, size: 120 }, Area { x: 2, y: 5, width: 9, height: 4 })]
    #[case::last_column(
        Rect { x: 400, y: 10, size: 120 },
        Area { x: 32, y: 5, width: 9, height: 4 },
    )]
    #[case::spawning(Rect { x: 37, y: 37, size: 66 }, Area { x: 4, y: 6, width: 5, height: 2 })]
    #[case::tiny(Rect { x: 0, y: 0, size: 1 }, Area { x: 2, y: 5, width: 1, height: 1 })]
    fn logical_to_terminal_area(#[case] rect: Rect, #[case] expected: Area) {
        assert_eq!(Area::from_rect(&rect), expected);
    }
}
