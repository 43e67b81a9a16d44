use crossterm::style::Stylize;
use qrscribe::config::RenderConfig;
use qrscribe::generator::{FileStore, QrCodeGenerator};
use qrscribe::session::Session;
use qrscribe::terminal::TerminalInput;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = RenderConfig::default();
    let stdin = io::stdin();
    let mut session = Session::new(
        QrCodeGenerator::new(config.clone()),
        FileStore,
        stdin.lock(),
        io::stdout(),
    )
    .with_config(config);

    match session.run(&mut TerminalInput::stdout()) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "run finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", format!("Error: {}", err).red());
            ExitCode::FAILURE
        }
    }
}
