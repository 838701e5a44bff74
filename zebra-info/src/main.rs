use std::{net::SocketAddr, process::ExitCode, time::{Duration, Instant}};

use clap::Parser;
use clap_verbosity::Verbosity;
use zebra::{execute_batch, fields::derive_fields, QuerySpec};

mod report;
mod target;

/// Print status, network and hardware information of a Zebra printer.
#[derive(Parser)]
struct Cli {
    /// Hostname or IP address of the printer.
    target: String,

    /// Raw printing port of the printer.
    #[arg(short, long, default_value_t = zebra::DEFAULT_PORT)]
    port: u16,

    /// Connect and read timeout, in seconds.
    #[arg(short, long, default_value_t = zebra::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = Cli::parse();
    env_logger::builder()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let input = cli.target.trim();

    let addr = match target::resolve(input) {
        Ok(ip) => SocketAddr::new(ip, cli.port),
        Err(e) => {
            eprintln!("-- {input} :: unknown host :: {} --", target::describe(&e));
            return ExitCode::FAILURE;
        }
    };
    log::info!("querying {input} at {addr}");

    let spec = QuerySpec::device_info();
    let (mut result, status) = match execute_batch(addr, &spec, Duration::from_secs(cli.timeout)) {
        Ok(result) => (result, ExitCode::SUCCESS),
        Err(e) => {
            log::debug!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::debug!("  caused by: {cause}");
                source = cause.source();
            }
            eprintln!("-- {input} - unable to reach - {} --", e.kind());
            (e.into_partial(), ExitCode::FAILURE)
        }
    };

    derive_fields(&mut result);
    print!("{}", report::render(&result));
    println!("DURATION: {}", report::format_duration(start.elapsed()));

    status
}
