//! `dbushelp` binary entry point.
use std::io::Write as _;

use anyhow::Result;
use clap::Parser;

use dbushelp::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command_name = args.command.log_name();
    logging::init_subscriber(args.verbose, command_name);
    let log = logging::Logger::new(command_name);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &args.command {
        cli::Command::Version => commands::version::run(&mut out),
        command => commands::CommandSetup::init(&args.global, &log).and_then(|setup| {
            commands::dispatch(
                &setup.conn,
                &setup.config,
                command,
                args.global.parallel,
                &log,
                &mut out,
            )
        }),
    };
    out.flush()?;

    if let (Err(e), Some(path)) = (&result, log.log_path()) {
        log.debug(&format!("{e:#}"));
        log.warn(&format!("see {} for details", path.display()));
    }
    result
}
