use clap::Parser;
use jewel_solver::engine::Board;
use jewel_solver::error::Error;
use jewel_solver::geometry::{BoardGeometry, GameMode};
use jewel_solver::heuristics::ScoringPolicy;
use jewel_solver::patterns::{DestinationMask, PatternLibrary};
use jewel_solver::scanner::{open_capture, scan_board, SamplingWindow};
use jewel_solver::solver::solve;
use jewel_solver::utils::board_from_file;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Screenshot of the game window, or a board file when --text is given
    input: PathBuf,

    /// Read the input as an 8x8 board of color letters (R P B G Y O W)
    #[clap(long)]
    text: bool,

    /// Pattern source to load instead of the built-in patterns
    #[clap(short, long)]
    patterns: Option<PathBuf>,

    /// Game mode, which selects the board layout and the scoring policy
    #[clap(short, long, value_enum, default_value_t = GameMode::Classic)]
    mode: GameMode,

    /// Whether the destination cell must already hold the matched color
    #[clap(long, value_enum, default_value_t = DestinationMask::Vacant)]
    destination: DestinationMask,
}

fn load_board(args: &Args) -> Result<(Board, BoardGeometry), Error> {
    if args.text {
        let board = board_from_file(&args.input)?;
        return Ok((board, BoardGeometry::reference(args.mode)));
    }

    let capture = open_capture(&args.input)?;
    let (width, height) = capture.dimensions();
    let geometry = BoardGeometry::for_capture(args.mode, width, height);
    if !geometry.fits_within(width, height) {
        return Err(Error::CaptureTooSmall { width, height });
    }
    log::info!(
        "Capture {}x{}: board at {} with {}px cells",
        width,
        height,
        geometry.origin,
        geometry.cell_width
    );
    let board = scan_board(&capture, &geometry, &SamplingWindow::default());
    Ok((board, geometry))
}

fn run(args: &Args) -> Result<(), Error> {
    let library = match &args.patterns {
        Some(path) => PatternLibrary::load_file(path, args.destination)?,
        None => PatternLibrary::builtin(args.destination)?,
    };
    log::info!(
        "Using {} 3x3 and {} 4x4 patterns",
        library.patterns_3x3().len(),
        library.patterns_4x4().len()
    );

    let (board, geometry) = load_board(args)?;
    println!("Loaded board from {}\n", args.input.display());

    let policy = ScoringPolicy::from(args.mode);
    match solve(&board, &library, &geometry, policy) {
        Some(solution) => {
            let candidate = solution.candidate;
            let marks = [candidate.source_cell(), candidate.destination_cell()];
            println!("{}\n", board.to_string_with_marks(&marks));
            println!(
                "Move {:?} from {:?} to {:?} ({}x{} pattern, score {})",
                candidate.color,
                marks[0],
                marks[1],
                candidate.pattern.side_length,
                candidate.pattern.side_length,
                solution.score
            );
            println!("Drag {} -> {}", solution.source, solution.destination);

            let timing = args.mode.timing();
            println!(
                "Hold {}ms per move, rescan every {}ms",
                timing.move_time.as_millis(),
                timing.scan_interval.as_millis()
            );
        }
        None => {
            println!("{}\n", board);
            println!("No move found.");
        }
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
    fn test_destination_defaults_to_vacant() {
        let args = Args::try_parse_from(["ai_solver", "capture.png"]).unwrap();
        assert_eq!(args.destination, DestinationMask::Vacant);
        assert_eq!(args.mode, GameMode::Classic);
        assert!(!args.text);

        let args =
            Args::try_parse_from(["ai_solver", "board.txt", "--destination", "required"]).unwrap();
        assert_eq!(args.destination, DestinationMask::Required);
    }
}
