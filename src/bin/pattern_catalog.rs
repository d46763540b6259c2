use clap::Parser;
use jewel_solver::error::Error;
use jewel_solver::patterns::{DestinationMask, Pattern, PatternLibrary};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Prints every pattern compiled from a pattern source", long_about = None)]
struct Args {
    /// Pattern source to load instead of the built-in patterns
    patterns: Option<PathBuf>,

    /// Whether the destination cell counts as a required cell
    #[clap(long, value_enum, default_value_t = DestinationMask::Vacant)]
    destination: DestinationMask,
}

fn print_pattern(index: usize, pattern: &Pattern) {
    println!(
        "#{:<3} {}x{}  priority {}  mask {:#06x}  swap {:?} -> {:?}",
        index,
        pattern.side_length,
        pattern.side_length,
        pattern.priority,
        pattern.required_mask,
        pattern.source_offset(),
        pattern.destination_offset()
    );
    for row in pattern.to_rows() {
        println!("      {}", row);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let library = match &args.patterns {
        Some(path) => PatternLibrary::load_file(path, args.destination)?,
        None => PatternLibrary::builtin(args.destination)?,
    };

    println!("--- 4x4 patterns ({}) ---", library.patterns_4x4().len());
    for (i, pattern) in library.patterns_4x4().iter().enumerate() {
        print_pattern(i, pattern);
    }
    println!("\n--- 3x3 patterns ({}) ---", library.patterns_3x3().len());
    for (i, pattern) in library.patterns_3x3().iter().enumerate() {
        print_pattern(i, pattern);
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
        let args = Args::try_parse_from(["pattern_catalog"]).unwrap();
        assert_eq!(args.destination, DestinationMask::Vacant);
        assert!(args.patterns.is_none());
    }
}
