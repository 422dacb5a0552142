mod exit;
mod logging;

use std::io;

use clap::Parser;
use xfpport::device::DeviceRegistry;
use xfpport::frame::{FrameConfig, FrameReader, FrameWriter};
use xfpport::Server;

use crate::logging::{init_logging, LogFormat, LogLevel};

/// Serves XFP driver requests framed on stdin, answering on stdout.
///
/// Meant to be spawned by the host runtime as a port program with no arguments.
#[derive(Parser, Debug)]
#[command(name = "xfpport", version, about = "XFP transceiver port program")]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let reader = match FrameReader::try_with_config(io::stdin().lock(), FrameConfig::default()) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::error!(error = %err, "input buffer allocation failed");
            std::process::exit(exit::frame_error_code(&err));
        }
    };
    let writer = FrameWriter::new(io::stdout().lock());
    let mut server = Server::new(reader, writer, Box::new(DeviceRegistry::new()));
    tracing::debug!(backend = server.backend().name(), "port started");

    let err = server.run();
    let code = exit::server_error_code(&err);
    if err.is_end_of_input() {
        tracing::info!(served = server.served(), "input closed");
    } else {
        tracing::error!(error = %err, served = server.served(), code, "port stopped");
    }
    std::process::exit(code);
}
