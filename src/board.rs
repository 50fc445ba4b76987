use std::fmt;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    Goal,
    Box,
    BoxOnGoal,
    Player,
    PlayerOnGoal,
}

impl Cell {
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Goal => '.',
            Cell::Box => '$',
            Cell::BoxOnGoal => '*',
            Cell::Player => '@',
            Cell::PlayerOnGoal => '+',
        }
    }

    pub fn has_box(&self) -> bool {
        matches!(self, Cell::Box | Cell::BoxOnGoal)
    }

    pub fn has_player(&self) -> bool {
        matches!(self, Cell::Player | Cell::PlayerOnGoal)
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Cell::Goal | Cell::BoxOnGoal | Cell::PlayerOnGoal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
];

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// A snapshot of a puzzle board.
///
/// Boards are plain values: every legal move produces a new `Board` rather
/// than mutating in place, so search frontiers and visited sets can hold many
/// of them without aliasing. Equality and hashing cover the cell grid only;
/// the move counter is deliberately excluded so that two boards reached by
/// different paths count as the same search node.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    player: (i32, i32),
    moves: u32,
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.width == other.width && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.cells.hash(state);
    }
}

impl Board {
    /// Parse a board from text format.
    ///
    /// Characters:
    /// - `#` = Wall
    /// - ` ` = Empty
    /// - `.` = Goal (target location for boxes)
    /// - `$` = Box
    /// - `*` = Box on goal
    /// - `@` = Player
    /// - `+` = Player on goal
    ///
    /// Rows shorter than the widest row are padded with empty cells.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let mut rows = Vec::new();
        for (y, line) in text.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    ' ' => Cell::Empty,
                    '.' => Cell::Goal,
                    '$' => Cell::Box,
                    '*' => Cell::BoxOnGoal,
                    '@' => Cell::Player,
                    '+' => Cell::PlayerOnGoal,
                    _ => {
                        return Err(format!(
                            "Invalid character '{}' at position ({}, {})",
                            ch, x, y
                        ));
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }
        Self::from_grid(rows)
    }

    /// Build a board from a grid of cells, validating the result.
    ///
    /// Requires a non-empty grid, exactly one player-bearing cell and equal
    /// box and goal counts; anything else cannot form a playable board.
    pub fn from_grid(mut rows: Vec<Vec<Cell>>) -> Result<Self, String> {
        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err("Empty board".to_string());
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
            cells.extend_from_slice(row);
        }

        let mut player = None;
        let mut box_count = 0;
        let mut goal_count = 0;
        for (i, cell) in cells.iter().enumerate() {
            let pos = ((i % width) as i32, (i / width) as i32);
            if cell.has_player() {
                if player.is_some() {
                    return Err("Multiple players found".to_string());
                }
                player = Some(pos);
            }
            if cell.has_box() {
                box_count += 1;
            }
            if cell.is_goal() {
                goal_count += 1;
            }
        }

        let player = player.ok_or("No player found on board")?;
        if box_count != goal_count {
            return Err(format!(
                "Box count ({}) does not match goal count ({})",
                box_count, goal_count
            ));
        }

        Ok(Board {
            cells,
            width: width as i32,
            height: height as i32,
            player,
            moves: 0,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn player_pos(&self) -> (i32, i32) {
        self.player
    }

    /// Number of successful moves applied since the board was built.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Cell at (x, y). Coordinates outside the grid read as walls, so
    /// edge-adjacent pushes fail like any other blocked move.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Cell::Wall;
        }
        self.cells[(y * self.width + x) as usize]
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        self.cells[(y * self.width + x) as usize] = cell;
    }

    /// All boxes are on goals (win condition).
    pub fn is_won(&self) -> bool {
        !self.cells.contains(&Cell::Box)
    }

    pub fn box_positions(&self) -> Vec<(i32, i32)> {
        self.positions(Cell::has_box)
    }

    pub fn goal_positions(&self) -> Vec<(i32, i32)> {
        self.positions(Cell::is_goal)
    }

    fn positions(&self, pred: fn(&Cell) -> bool) -> Vec<(i32, i32)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| pred(cell))
            .map(|(i, _)| (i as i32 % self.width, i as i32 / self.width))
            .collect()
    }

    /// Step the player one cell in the given direction, pushing a box ahead
    /// of it when the push is legal.
    ///
    /// Returns the successor board, or `None` when the move is blocked (wall
    /// ahead, or a box with no free cell behind it). The input board is never
    /// modified.
    pub fn move_player(&self, dir: Direction) -> Option<Board> {
        let (dx, dy) = dir.delta();
        let (px, py) = self.player;
        let (nx, ny) = (px + dx, py + dy);

        let ahead = self.get(nx, ny);
        let pushed = match ahead {
            Cell::Empty | Cell::Goal => None,
            Cell::Box | Cell::BoxOnGoal => match self.get(nx + dx, ny + dy) {
                Cell::Empty => Some(Cell::Box),
                Cell::Goal => Some(Cell::BoxOnGoal),
                _ => return None,
            },
            _ => return None,
        };

        let mut next = self.clone();
        if let Some(cell) = pushed {
            next.set(nx + dx, ny + dy, cell);
        }
        next.set(
            nx,
            ny,
            if ahead.is_goal() {
                Cell::PlayerOnGoal
            } else {
                Cell::Player
            },
        );
        next.set(
            px,
            py,
            if self.get(px, py) == Cell::PlayerOnGoal {
                Cell::Goal
            } else {
                Cell::Empty
            },
        );
        next.player = (nx, ny);
        next.moves += 1;
        Some(next)
    }

    /// Successor boards for every legal move from this one.
    pub fn successors(&self) -> ArrayVec<(Direction, Board), 4> {
        let mut out = ArrayVec::new();
        for &dir in &ALL_DIRECTIONS {
            if let Some(next) = self.move_player(dir) {
                out.push((dir, next));
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let mut line = String::new();
            for x in 0..self.width {
                line.push(self.get(x, y).symbol());
            }
            // Trim trailing padding to match the original input format
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
