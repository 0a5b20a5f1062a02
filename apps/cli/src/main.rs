use clap::Parser;
use sharescan_cli_lib::{format_summary, init_tracing, run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            let warnings = report.outcome.warnings.len();
            if warnings > 0 {
                eprintln!("{warnings} malformed value(s) were treated as 0; see log above");
            }
            print!("{}", format_summary(&report.outcome.view, cli.top));
            for path in &report.written {
                println!("Report written to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
