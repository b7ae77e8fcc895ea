//! Interactive prompt loop: `<domain> [recordType]` per line, `q` quits.

use delver_application::{QueryOutcome, ResolveQueryUseCase};
use delver_domain::config::ResolveMode;
use delver_domain::RecordType;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const SEPARATOR: &str = "-----------------------------------------------------------";

pub async fn run(
    orchestrator: &ResolveQueryUseCase,
    mode: ResolveMode,
    verbose: bool,
) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("Enter a <domain name> [record type] to query ('q' to quit): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // stdin closed
            return Ok(());
        };
        let line = line.trim();
        if line == "q" {
            return Ok(());
        }
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(domain) = tokens.next() else {
            continue;
        };
        let record_type = match tokens.next() {
            Some(token) => match token.parse::<RecordType>() {
                Ok(record_type) => record_type,
                Err(_) => {
                    println!(
                        "Not a valid record type: must be one of \"A\", \"AAAA\", \"TXT\" (or \"ANY\" to get all)."
                    );
                    continue;
                }
            },
            None => RecordType::A,
        };

        println!("Querying for {}...", domain);
        match orchestrator.execute(domain, record_type).await {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    for record in outcome.records.iter() {
                        println!("{}", record);
                    }
                    if verbose {
                        print_diagnostics(outcome, mode);
                    }
                }
            }
            Err(e) if e.is_not_found() => println!("Unable to find domain"),
            Err(e) => println!("{}", e),
        }
    }
}

fn print_diagnostics(outcome: &QueryOutcome, mode: ResolveMode) {
    let elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0;
    println!("{}", SEPARATOR);
    println!("{:>12}  {:<45}", "Time (ms):", format!("{:.3}", elapsed_ms));
    println!("{:>12}  {:<45}", "Cached?", outcome.cache_hit);
    if mode == ResolveMode::Iterative {
        let path: Vec<String> = outcome.path.iter().map(|ip| ip.to_string()).collect();
        println!("{:>12}  {:<65}", "Path:", path.join(" --> "));
    }
    println!("{}", SEPARATOR);
}
