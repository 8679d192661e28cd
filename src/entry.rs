use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::error;

use judgeload::app::{emit_report, run_harness};
use judgeload::args::TesterArgs;
use judgeload::config::{apply_config, load_config};
use judgeload::error::AppResult;
use judgeload::system::logger::init_logging;

/// Every fatal error is reported here, once, after logging is up.
pub(crate) fn run() -> ExitCode {
    let (mut args, matches) = match parse_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    init_logging(args.verbose, args.no_color);

    match execute(&mut args, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Run aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> AppResult<(TesterArgs, ArgMatches)> {
    let matches = TesterArgs::command().get_matches();
    let args = TesterArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn execute(args: &mut TesterArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(args, matches, &config)?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(run_harness(args))?;
    emit_report(&report, args.output_format, args.output.as_deref())
}
