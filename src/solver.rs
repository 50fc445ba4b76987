use std::collections::HashSet;

use log::debug;

use crate::board::{Board, Direction};
use crate::pqueue::PriorityQueue;

/// Uniform-cost search over the implicit graph of board states.
///
/// Every legal move is an edge of cost one, so the lowest-cost entry popped
/// off the frontier is always reached by a shortest path and the first
/// winning board popped yields a minimum-length solution. The reachable
/// state space of a finite board is finite; an exhausted frontier therefore
/// proves there is no solution at all.
pub struct Solver {
    nodes_explored: usize,
}

impl Solver {
    pub fn new() -> Self {
        Solver { nodes_explored: 0 }
    }

    /// Find a shortest move sequence that puts every box on a goal, or
    /// `None` if no sequence of moves can.
    pub fn solve(&mut self, board: &Board) -> Option<Vec<Direction>> {
        let mut frontier = PriorityQueue::new();
        let mut visited: HashSet<Board> = HashSet::new();

        frontier.push(0, (board.clone(), Vec::new()));

        while let Some((current, path)) = frontier.pop_min() {
            // A state can sit in the frontier several times with different
            // costs; only the cheapest (first-popped) copy is expanded
            if !visited.insert(current.clone()) {
                continue;
            }

            if current.is_won() {
                return Some(path);
            }

            self.nodes_explored += 1;
            if self.nodes_explored % 1000 == 0 {
                debug!(
                    "explored {} states, frontier: {}, visited: {}",
                    self.nodes_explored,
                    frontier.len(),
                    visited.len()
                );
            }

            for (dir, successor) in current.successors() {
                if !visited.contains(&successor) {
                    let mut next_path = path.clone();
                    next_path.push(dir);
                    let cost = next_path.len();
                    frontier.push(cost, (successor, next_path));
                }
            }
        }

        None
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(board: &Board, path: &[Direction]) -> Board {
        let mut current = board.clone();
        for &dir in path {
            current = current.move_player(dir).expect("solution move was illegal");
        }
        current
    }

    #[test]
    fn test_solve_one_push() {
        let board = Board::from_text("#####\n#@$.#\n#####").unwrap();
        let solution = Solver::new().solve(&board).unwrap();

        assert_eq!(solution.len(), 1);
        assert!(replay(&board, &solution).is_won());
    }

    #[test]
    fn test_solve_known_distance() {
        // Three pushes down a corridor; no shorter path exists
        let board = Board::from_text("#######\n#@$  .#\n#######").unwrap();
        let solution = Solver::new().solve(&board).unwrap();

        assert_eq!(solution.len(), 3);
        assert!(replay(&board, &solution).is_won());
    }

    #[test]
    fn test_solve_requires_walking_around() {
        // The player has to leave the box, loop around and push from above
        let board = Board::from_text(
            "######\n\
             #    #\n\
             # $  #\n\
             # @ .#\n\
             ######",
        )
        .unwrap();
        let solution = Solver::new().solve(&board).unwrap();

        assert!(replay(&board, &solution).is_won());
        // Two steps to the pushing spot, two pushes right, two steps around,
        // one push down; no route does better
        assert_eq!(solution.len(), 7);
    }

    #[test]
    fn test_solve_already_won() {
        let board = Board::from_text("####\n#@*#\n####").unwrap();
        let solution = Solver::new().solve(&board);
        assert_eq!(solution, Some(Vec::new()));
    }

    #[test]
    fn test_unsolvable_corner_returns_none() {
        // Box stuck against the top and right walls
        let board = Board::from_text("#####\n#@ $#\n#  .#\n#####").unwrap();
        let mut solver = Solver::new();
        assert_eq!(solver.solve(&board), None);
        assert!(solver.nodes_explored() > 0);
    }

    #[test]
    fn test_solution_is_sound_with_two_boxes() {
        let board = Board::from_text(
            "#######\n\
             #     #\n\
             # $$  #\n\
             # ..@ #\n\
             #     #\n\
             #######",
        )
        .unwrap();
        let solution = Solver::new().solve(&board).unwrap();
        assert!(replay(&board, &solution).is_won());
    }
}
