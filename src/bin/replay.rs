// Standalone replay tool for light-cycle debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all logged calls
//   --ids <id1,id2>        Replay specific calls (comma-separated correlation ids)
//   --validate             Check the final logged move of specific calls
//   --verbose              Show detailed output for each call
//   --config <path>        Path to Cycle.toml (default: Cycle.toml)

use std::env;
use std::process;

use light_cycle_bot::config::Config;
use light_cycle_bot::replay::ReplayEngine;
use light_cycle_bot::types::RelativeMove;

fn print_usage() {
    eprintln!("Light-cycle Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay every call in the log");
    eprintln!("  --ids <ID1,ID2,...>     Replay specific calls (comma-separated)");
    eprintln!("  --validate <ID:M,...>   Validate final moves (format: id:move|move,...)");
    eprintln!("  --verbose               Show detailed output for each call");
    eprintln!("  --config <path>         Path to Cycle.toml (default: Cycle.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay light_cycle_debug.jsonl --all");
    eprintln!("  replay light_cycle_debug.jsonl --ids c-17,c-18");
    eprintln!("  replay light_cycle_debug.jsonl --validate c-17:STARBOARD|LARBOARD");
}

fn parse_ids(s: &str) -> Vec<String> {
    s.split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(String, Vec<RelativeMove>)>, String> {
    s.split(',')
        .map(|pair| {
            let (id, moves) = pair
                .trim()
                .rsplit_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'id:move'", pair))?;

            // Support multiple acceptable moves separated by '|'
            let moves: Result<Vec<RelativeMove>, String> =
                moves.split('|').map(RelativeMove::parse).collect();

            Ok((id.to_string(), moves?))
        })
        .collect()
}

/// Value following `flag`, or exit with an error
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: {} requires an argument", flag);
            process::exit(1);
        }
    }
}

enum Mode {
    All,
    Ids(String),
    Validate(String),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Cycle.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => mode = Some(Mode::All),
            "--ids" => {
                mode = Some(Mode::Ids(flag_value(&args, i, "--ids").to_string()));
                i += 1;
            }
            "--validate" => {
                mode = Some(Mode::Validate(flag_value(&args, i, "--validate").to_string()));
                i += 1;
            }
            "--config" => {
                config_path = flag_value(&args, i, "--config").to_string();
                i += 1;
            }
            "--verbose" => verbose = true,
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all, --ids, or --validate");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} calls...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Ids(arg) => {
            let ids = parse_ids(&arg);
            println!("Replaying {} specific call(s)...\n", ids.len());
            match engine.replay_ids(&entries, &ids) {
                Ok(results) => engine.print_report(&results),
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(arg) => {
            let expected_moves = match parse_expected_moves(&arg) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Error parsing expected moves: {}", e);
                    process::exit(1);
                }
            };

            println!("Validating {} expected move(s)...\n", expected_moves.len());
            match engine.validate_expected_moves(&entries, &expected_moves) {
                Ok(()) => println!("✓ All expected moves validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
