use clap::Parser;
use docstore_textsearch::cli::Cli;
use docstore_textsearch::commands;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    docstore_textsearch::tracing::init(cli.verbose, cli.log_format);

    tracing::debug!(command = ?cli.command, "starting");

    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());
    let result = commands::run(&cli.command, stdin, &mut out)
        .and_then(|()| out.flush().map_err(anyhow::Error::from));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
