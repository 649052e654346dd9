use std::ffi::OsString;

use clap::Parser;
use cs_core::CmdScriptError;

mod cli_args;
mod commands;
mod dialect_loader;
mod error_map;
mod logging;

pub(crate) use cli_args::{
    Cli, ConvertArgs, DescribeArgs, ExportDialectArgs, InspectArgs, Mode, RetargetArgs,
};
pub(crate) use dialect_loader::build_registry;
pub(crate) use error_map::{
    emit_error, map_cli_dialect_scan, map_cli_export_encode, map_cli_export_write, map_cli_path,
};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    logging::init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, CmdScriptError> {
    let registry = build_registry(&cli.dialects, cli.dialect_dir.as_deref())?;
    let serializer = cs_api::serializer_for(registry);

    match cli.command {
        Mode::Dialects => commands::run_dialects(serializer.registry()),
        Mode::Describe(args) => commands::run_describe(serializer.registry(), args),
        Mode::ExportDialect(args) => commands::run_export_dialect(serializer.registry(), args),
        Mode::Inspect(args) => commands::run_inspect(&serializer, args),
        Mode::Retarget(args) => commands::run_retarget(&serializer, args),
        Mode::Convert(args) => commands::run_convert(&serializer, args),
    }
}

#[cfg(test)]
mod cli_test_support;
#[cfg(test)]
mod tests;
