mod board;
mod deadlocks;
mod generator;
mod levels;
mod pqueue;
mod reach;
mod rooms;
mod solver;

use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use board::{Board, Direction};
use generator::{Generator, Layout};
use levels::Levels;
use solver::Solver;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Scatter,
    Rooms,
}

impl From<LayoutArg> for Layout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Scatter => Layout::Scatter,
            LayoutArg::Rooms => Layout::Rooms,
        }
    }
}

#[derive(Parser)]
#[command(name = "sokogen")]
#[command(about = "A Sokoban level solver and generator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve levels from a text file
    Solve {
        /// Path to the levels file
        #[arg(value_name = "FILE")]
        levels_file: String,

        /// Level number to solve (1-indexed); solves every level when omitted
        #[arg(value_name = "LEVEL")]
        level: Option<usize>,

        /// Print the solution step-by-step
        #[arg(short, long)]
        print_solution: bool,
    },
    /// Generate a random level that is proven solvable
    Generate {
        /// Board width including the border
        #[arg(short = 'W', long, default_value = "7")]
        width: i32,

        /// Board height including the border
        #[arg(short = 'H', long, default_value = "7")]
        height: i32,

        /// Probability of an interior wall (scatter layout)
        #[arg(long, default_value = "0.3")]
        wall_chance: f64,

        /// Probability of a box on a free cell (scatter layout)
        #[arg(long, default_value = "0.25")]
        box_chance: f64,

        /// Probability of a goal on a free cell (scatter layout)
        #[arg(long, default_value = "0.2")]
        target_chance: f64,

        /// Candidate boards to try before giving up
        #[arg(short = 'n', long, default_value = "100")]
        attempts: u32,

        /// Seed for reproducible generation
        #[arg(short, long)]
        seed: Option<u64>,

        /// Candidate layout
        #[arg(short, long, value_enum, default_value = "scatter")]
        layout: LayoutArg,

        /// Solve the generated level and print the solution
        #[arg(short, long)]
        print_solution: bool,
    },
}

fn format_moves(path: &[Direction]) -> String {
    path.iter().map(|dir| dir.letter()).collect()
}

fn print_replay(board: &Board, path: &[Direction]) {
    println!("\nStarting position:\n{}", board);
    let mut current = board.clone();
    let total = path.len();
    for (count, &dir) in path.iter().enumerate() {
        current = match current.move_player(dir) {
            Some(next) => next,
            None => {
                eprintln!("Error: solution step {} ({}) is illegal", count + 1, dir);
                std::process::exit(1);
            }
        };
        println!("Move {} ({}/{}):\n{}", dir, count + 1, total, current);
    }
}

fn solve_file(levels_file: &str, level: Option<usize>, print_solution: bool) {
    let levels = match Levels::from_file(levels_file) {
        Ok(levels) => levels,
        Err(err) => {
            eprintln!("Error loading levels: {}", err);
            std::process::exit(1);
        }
    };

    if levels.is_empty() {
        eprintln!("Error: no levels found in {}", levels_file);
        std::process::exit(1);
    }

    let (start, end) = match level {
        None => (1, levels.len()),
        Some(0) => {
            eprintln!("Error: level numbers must be at least 1");
            std::process::exit(1);
        }
        Some(num) if num > levels.len() => {
            eprintln!(
                "Error: level {} not found (file contains {} levels)",
                num,
                levels.len()
            );
            std::process::exit(1);
        }
        Some(num) => (num, num),
    };

    for num in start..=end {
        let board = levels.get(num - 1).unwrap();
        let mut solver = Solver::new();
        let started = Instant::now();
        let solution = solver.solve(board);
        let elapsed_ms = started.elapsed().as_millis();

        match &solution {
            Some(path) => {
                println!(
                    "level: {:<3}  solved: Y  moves: {:<4}  states: {:<9}  elapsed: {} ms",
                    num,
                    path.len(),
                    solver.nodes_explored(),
                    elapsed_ms
                );
                println!("solution: {}", format_moves(path));
                if print_solution {
                    print_replay(board, path);
                }
            }
            None => {
                println!(
                    "level: {:<3}  solved: N  moves: -     states: {:<9}  elapsed: {} ms",
                    num,
                    solver.nodes_explored(),
                    elapsed_ms
                );
            }
        }
    }
}

fn generate_level(generator: Generator, seed: Option<u64>, print_solution: bool) {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let started = Instant::now();
    let board = match generator.generate(&mut rng) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    let elapsed_ms = started.elapsed().as_millis();

    print!("{}", board);
    println!("generated in {} ms", elapsed_ms);

    if print_solution {
        match Solver::new().solve(&board) {
            Some(path) => println!("solution ({} moves): {}", path.len(), format_moves(&path)),
            None => {
                // generate() only surfaces solvable boards
                eprintln!("Error: generated board failed to re-solve");
                std::process::exit(1);
            }
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Solve {
            levels_file,
            level,
            print_solution,
        } => solve_file(&levels_file, level, print_solution),
        Command::Generate {
            width,
            height,
            wall_chance,
            box_chance,
            target_chance,
            attempts,
            seed,
            layout,
            print_solution,
        } => {
            if width < 3 || height < 3 {
                eprintln!("Error: board must be at least 3x3 to fit a border");
                std::process::exit(1);
            }
            for (name, chance) in [
                ("wall-chance", wall_chance),
                ("box-chance", box_chance),
                ("target-chance", target_chance),
            ] {
                if !(0.0..=1.0).contains(&chance) {
                    eprintln!("Error: {} must lie within [0, 1]", name);
                    std::process::exit(1);
                }
            }
            if attempts == 0 {
                eprintln!("Error: at least one attempt is required");
                std::process::exit(1);
            }

            let generator = Generator {
                width,
                height,
                wall_chance,
                box_chance,
                target_chance,
                max_attempts: attempts,
                layout: layout.into(),
            };
            generate_level(generator, seed, print_solution);
        }
    }
}
