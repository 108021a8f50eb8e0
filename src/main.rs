/*!
 * Command-line interface for clip4llm
 */

use std::fs;
use std::io;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use clip4llm::clipboard::copy_to_clipboard;
use clip4llm::config::{Args, Overrides};
use clip4llm::report::{Reporter, ScanReport};
use clip4llm::scanner::Scanner;
use clip4llm::stack::ConfigStack;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    let root = fs::canonicalize(args.target_dir()).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Cannot open directory {}: {}", args.directory_path, e),
        )
    })?;

    let scanner = Scanner::new(&root, Overrides::from_args(&args))?;
    let mut stack = ConfigStack::for_current_user(&root);

    let start_time = Instant::now();
    let output = scanner.scan(&mut stack)?;
    let duration = start_time.elapsed();

    copy_to_clipboard(&output.content).map_err(clip4llm::Clip4llmError::from)?;

    if args.verbose {
        let report = ScanReport::from_output(root.display().to_string(), &output, duration);
        Reporter::new().print_report(&report);
    }

    println!("Content copied to clipboard successfully.");
    Ok(())
}

/// Route `log` records to stderr; `--verbose` shows per-entry decisions
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
