use clap::Parser;
use jewel_solver::engine::{Board, ROW_COUNT};
use jewel_solver::error::Error;
use jewel_solver::geometry::{BoardGeometry, GameMode};
use jewel_solver::heuristics::ScoringPolicy;
use jewel_solver::patterns::{DestinationMask, PatternLibrary};
use jewel_solver::solver::{find_candidates, solve};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares scoring policies on seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 200)]
    boards: u64,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Pattern source to load instead of the built-in patterns
    #[clap(short, long)]
    patterns: Option<PathBuf>,

    /// Whether the destination cell counts as a required cell
    #[clap(long, value_enum, default_value_t = DestinationMask::Vacant)]
    destination: DestinationMask,
}

#[derive(Default)]
struct PolicyStats {
    solved: u64,
    priority_sum: u64,
    row_sum: u64,
    four_by_four: u64,
}

fn run(args: &Args) -> Result<(), Error> {
    let library = match &args.patterns {
        Some(path) => PatternLibrary::load_file(path, args.destination)?,
        None => PatternLibrary::builtin(args.destination)?,
    };
    let geometry = BoardGeometry::reference(GameMode::Classic);
    let policies = [
        ("Plain", ScoringPolicy::Plain),
        ("RowWeighted", ScoringPolicy::RowWeighted),
    ];
    let mut stats: Vec<PolicyStats> = policies.iter().map(|_| PolicyStats::default()).collect();
    let mut candidate_total = 0u64;

    println!("Starting pattern evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx;
        let board = Board::new_random_with_seed(seed);
        let candidates = find_candidates(&board, &library).len() as u64;
        candidate_total += candidates;
        log::debug!("Board {} (seed {}): {} candidates", board_idx, seed, candidates);

        for ((_, policy), stats) in policies.iter().zip(stats.iter_mut()) {
            if let Some(solution) = solve(&board, &library, &geometry, *policy) {
                let (src_row, _) = solution.candidate.source_cell();
                stats.solved += 1;
                stats.priority_sum += u64::from(solution.candidate.pattern.priority);
                stats.row_sum += src_row as u64;
                if solution.candidate.pattern.side_length == 4 {
                    stats.four_by_four += 1;
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    if args.boards > 0 {
        println!(
            "Average candidates per board: {:.2}",
            candidate_total as f64 / args.boards as f64
        );
    }
    println!("\n--- Per Policy ---");

    for ((name, _), stats) in policies.iter().zip(&stats) {
        if stats.solved == 0 {
            println!("Policy {:<12}: no board solved", name);
            continue;
        }
        let solved = stats.solved as f64;
        println!(
            "Policy {:<12}: solved {}/{}, mean priority {:.2}, mean source row {:.2} of {}, 4x4 moves {}",
            name,
            stats.solved,
            args.boards,
            stats.priority_sum as f64 / solved,
            stats.row_sum as f64 / solved,
            ROW_COUNT - 1,
            stats.four_by_four
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults_and_pattern_source() {
        let args = Args::try_parse_from(["pattern_evaluator"]).unwrap();
        assert_eq!(args.destination, DestinationMask::Vacant);
        assert!(args.patterns.is_none());
        assert_eq!((args.boards, args.seed), (200, 0));

        let args = Args::try_parse_from(["pattern_evaluator", "-p", "custom.txt"]).unwrap();
        assert_eq!(args.patterns, Some(PathBuf::from("custom.txt")));
    }

    #[test]
    fn test_run_reports_missing_pattern_source() {
        let args = Args::try_parse_from(["pattern_evaluator", "-p", "does/not/exist.txt"]).unwrap();
        assert!(matches!(run(&args), Err(Error::PatternSource { .. })));
    }
}
