use rand::Rng;

use crate::board::Cell;

const MIN_ROOM_W: i32 = 4;
const MAX_ROOM_W: i32 = 8;
const MIN_ROOM_H: i32 = 3;
const MAX_ROOM_H: i32 = 6;

#[derive(Debug, Clone, Copy)]
struct Room {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Room {
    fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Carve a room-and-corridor candidate into a solid wall field: a handful of
/// non-overlapping rooms, L-shaped corridors between consecutive room
/// centers, a goal at each room center, a box on a random outer edge of each
/// room and the player somewhere inside the first room.
///
/// `None` signals a degenerate candidate (grid too small for any room, the
/// player's cell already taken, nothing left after balancing); the caller
/// counts it against the attempt bound like any other rejection.
pub fn candidate<R: Rng>(width: i32, height: i32, rng: &mut R) -> Option<Vec<Vec<Cell>>> {
    let max_w = MAX_ROOM_W.min(width - 2);
    let max_h = MAX_ROOM_H.min(height - 2);
    if max_w < MIN_ROOM_W || max_h < MIN_ROOM_H {
        return None;
    }

    let mut grid = vec![vec![Cell::Wall; width as usize]; height as usize];
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..rng.gen_range(5..=8) {
        let w = rng.gen_range(MIN_ROOM_W..=max_w);
        let h = rng.gen_range(MIN_ROOM_H..=max_h);
        let room = Room {
            x: rng.gen_range(1..=width - w - 1),
            y: rng.gen_range(1..=height - h - 1),
            w,
            h,
        };
        if rooms.iter().any(|other| room.overlaps(other)) {
            continue;
        }
        for y in room.y..room.y + room.h {
            for x in room.x..room.x + room.w {
                grid[y as usize][x as usize] = Cell::Empty;
            }
        }
        rooms.push(room);
    }
    if rooms.is_empty() {
        return None;
    }

    // L-shaped corridor between each pair of consecutive room centers
    for pair in rooms.windows(2) {
        let (px, py) = pair[0].center();
        let (cx, cy) = pair[1].center();
        for x in px.min(cx)..=px.max(cx) {
            grid[py as usize][x as usize] = Cell::Empty;
        }
        for y in py.min(cy)..=py.max(cy) {
            grid[y as usize][cx as usize] = Cell::Empty;
        }
    }

    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    for room in &rooms {
        let (gx, gy) = room.center();
        if grid[gy as usize][gx as usize] == Cell::Empty {
            grid[gy as usize][gx as usize] = Cell::Goal;
            goals.push((gx, gy));
        }
        if let Some((bx, by)) = edge_cell(room, width, height, rng) {
            if grid[by as usize][bx as usize] == Cell::Empty {
                grid[by as usize][bx as usize] = Cell::Box;
                boxes.push((bx, by));
            }
        }
    }

    let first = rooms[0];
    let px = rng.gen_range(first.x + 1..first.x + first.w - 1);
    let py = rng.gen_range(first.y + 1..first.y + first.h - 1);
    if grid[py as usize][px as usize] != Cell::Empty {
        return None;
    }
    grid[py as usize][px as usize] = Cell::Player;

    // Balance to equal counts, dropping the most recent placements
    while boxes.len() > goals.len() {
        if let Some((x, y)) = boxes.pop() {
            grid[y as usize][x as usize] = Cell::Empty;
        }
    }
    while goals.len() > boxes.len() {
        if let Some((x, y)) = goals.pop() {
            grid[y as usize][x as usize] = Cell::Empty;
        }
    }
    if boxes.is_empty() {
        return None;
    }

    Some(grid)
}

/// Pick a cell hugging a random outer side of the room, where a box ends up
/// if a corridor or neighboring room happens to have carved that cell open.
fn edge_cell<R: Rng>(room: &Room, width: i32, height: i32, rng: &mut R) -> Option<(i32, i32)> {
    match rng.gen_range(0..4) {
        0 if room.y > 1 => Some((rng.gen_range(room.x + 1..room.x + room.w - 1), room.y - 1)),
        1 if room.y + room.h < height - 1 => {
            Some((rng.gen_range(room.x + 1..room.x + room.w - 1), room.y + room.h))
        }
        2 if room.x > 1 => Some((room.x - 1, rng.gen_range(room.y + 1..room.y + room.h - 1))),
        3 if room.x + room.w < width - 1 => {
            Some((room.x + room.w, rng.gen_range(room.y + 1..room.y + room.h - 1)))
        }
        _ => None,
    }
}
