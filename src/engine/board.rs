use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use anyhow::{Context, Result, ensure};

/// Largest supported side length. Points are written as two letters from
/// `a` to `s`, so nothing beyond 19 can be named.
pub const MAX_SIDE: usize = 19;

// ---------------------------------------------------------------------------
// Cell / Stone
// ---------------------------------------------------------------------------

/// The occupancy state of a single intersection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// A player colour. Unlike [`Cell`] this has no empty variant, so it is the
/// type used wherever "whose turn" or "whose stone" is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl From<Stone> for Cell {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Cell::Black,
            Stone::White => Cell::White,
        }
    }
}

impl Cell {
    /// The stone occupying this cell, if any.
    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Stone::Black),
            Cell::White => Some(Stone::White),
        }
    }
}

impl Display for Stone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stone::Black => "Black",
            Stone::White => "White",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 0-indexed intersection, counted from the top-left corner.
///
/// Written as two lowercase letters, column first and row second, so `"dc"`
/// is column 3, row 2:
///
/// ```text
///        a  b  c  d  e
///     a  .  .  .  .  .
///     b  .  .  .  .  .
///     c  .  .  .  X  .
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

fn axis_letter(n: usize) -> char {
    (b'a' + n as u8) as char
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", axis_letter(self.col), axis_letter(self.row))
    }
}

impl FromStr for Point {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let decode = |c: char| -> Option<usize> {
            if c.is_ascii_lowercase() {
                let v = c as usize - 'a' as usize;
                if v < MAX_SIDE { Some(v) } else { None }
            } else {
                None
            }
        };

        let mut chars = s.chars();
        let a = chars
            .next()
            .context(format!("Invalid point {:?}: too short", s))?;
        let b = chars
            .next()
            .context(format!("Invalid point {:?}: too short", s))?;
        ensure!(chars.next().is_none(), "Invalid point {:?}: too long", s);

        let col = decode(a).context(format!("Invalid point {:?}: column {:?} out of range", s, a))?;
        let row = decode(b).context(format!("Invalid point {:?}: row {:?} out of range", s, b))?;
        Ok(Self { row, col })
    }
}

// ---------------------------------------------------------------------------
// BoardState
// ---------------------------------------------------------------------------

/// The grid plus the per-game counters.
///
/// `BoardState` is plain data. Every rule (captures, suicide, repetition,
/// scoring) lives in the sibling modules and is driven by
/// [`GameController`](crate::engine::GameController), which is the only
/// thing that mutates a live board. Cells are stored row-major.
///
/// Width and height are fixed for the lifetime of the value; a new game
/// gets a new `BoardState` rather than a cleared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    width: usize,
    height: usize,
    cells: Vec<Cell>,

    pub current_player: Stone,
    /// Stones captured *by* Black.
    pub black_captures: usize,
    /// Stones captured *by* White.
    pub white_captures: usize,
    /// Only meaningful once `game_over` is set.
    pub black_territory: usize,
    pub white_territory: usize,
    pub consecutive_passes: u8,
    pub game_over: bool,
}

impl BoardState {
    /// An empty board with Black to move.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            current_player: Stone::Black,
            black_captures: 0,
            white_captures: 0,
            black_territory: 0,
            white_territory: 0,
            consecutive_passes: 0,
            game_over: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// # Panics
    ///
    /// If `p` lies outside the board.
    pub fn cell(&self, p: Point) -> Cell {
        self.cells[self.index(p)]
    }

    /// Returns the previous value so callers can log it for undo.
    pub(crate) fn set(&mut self, p: Point, cell: Cell) -> Cell {
        let idx = self.index(p);
        std::mem::replace(&mut self.cells[idx], cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every point on the board in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Point::new(row, col)))
    }

    /// The up-to-four orthogonal neighbours of `p` that lie on the board.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + use<> {
        let (width, height) = (self.width, self.height);
        [
            p.row.checked_sub(1).map(|r| Point::new(r, p.col)),
            (p.row + 1 < height).then(|| Point::new(p.row + 1, p.col)),
            p.col.checked_sub(1).map(|c| Point::new(p.row, c)),
            (p.col + 1 < width).then(|| Point::new(p.row, p.col + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Number of occupied intersections.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn captures_of(&self, stone: Stone) -> usize {
        match stone {
            Stone::Black => self.black_captures,
            Stone::White => self.white_captures,
        }
    }

    pub(crate) fn captures_mut(&mut self, stone: Stone) -> &mut usize {
        match stone {
            Stone::Black => &mut self.black_captures,
            Stone::White => &mut self.white_captures,
        }
    }

    fn index(&self, p: Point) -> usize {
        assert!(self.in_bounds(p.row, p.col), "point {:?} is off the board", p);
        p.row * self.width + p.col
    }
}

/// Text diagram with lettered axes: `.` empty, `X` black, `O` white.
impl Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.width {
            write!(f, " {}", axis_letter(col))?;
        }
        writeln!(f)?;
        for row in 0..self.height {
            write!(f, " {}", axis_letter(row))?;
            for col in 0..self.width {
                let c = match self.cell(Point::new(row, col)) {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty_with_black_to_move() {
        let board = BoardState::new(7, 5);
        assert_eq!(board.width(), 7);
        assert_eq!(board.height(), 5);
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.current_player, Stone::Black);
        assert_eq!(board.consecutive_passes, 0);
        assert!(!board.game_over);
    }

    #[test]
    fn neighbors_respect_edges() {
        let board = BoardState::new(7, 7);
        assert_eq!(board.neighbors(Point::new(0, 0)).count(), 2);
        assert_eq!(board.neighbors(Point::new(0, 3)).count(), 3);
        assert_eq!(board.neighbors(Point::new(3, 3)).count(), 4);
        assert_eq!(board.neighbors(Point::new(6, 6)).count(), 2);
    }

    #[test]
    fn set_returns_previous_value() {
        let mut board = BoardState::new(3, 3);
        let p = Point::new(1, 2);
        assert_eq!(board.set(p, Cell::Black), Cell::Empty);
        assert_eq!(board.set(p, Cell::Empty), Cell::Black);
        assert_eq!(board.cell(p), Cell::Empty);
    }

    #[test]
    fn point_notation_is_column_then_row() {
        let p: Point = "dc".parse().unwrap();
        assert_eq!(p, Point::new(2, 3));
        assert_eq!(p.to_string(), "dc");
    }

    #[test]
    fn point_rejects_bad_input() {
        assert!("d".parse::<Point>().is_err());
        assert!("ddd".parse::<Point>().is_err());
        assert!("tt".parse::<Point>().is_err());
        assert!("D4".parse::<Point>().is_err());
    }

    #[test]
    fn display_draws_stones() {
        let mut board = BoardState::new(3, 2);
        board.set(Point::new(0, 1), Cell::Black);
        board.set(Point::new(1, 2), Cell::White);
        assert_eq!(board.to_string(), "   a b c\n a . X .\n b . . O\n");
    }
}
