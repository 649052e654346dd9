use clap::{Args, Parser, Subcommand};
use cs_serial::Encoding;

#[derive(Debug, Parser)]
#[command(name = "cmdscript")]
#[command(about = "Inspect, convert and retarget saved command scripts")]
pub(crate) struct Cli {
    /// Extra dialect definition file, registered after the built-in dialects.
    #[arg(long = "dialects", global = true)]
    pub(crate) dialects: Vec<String>,
    /// Directory scanned for `*.dialect.json` definition files.
    #[arg(long = "dialect-dir", global = true)]
    pub(crate) dialect_dir: Option<String>,
    #[arg(long = "verbose", global = true)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Dialects,
    Describe(DescribeArgs),
    ExportDialect(ExportDialectArgs),
    Inspect(InspectArgs),
    Retarget(RetargetArgs),
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub(crate) struct DescribeArgs {
    #[arg(long = "dialect")]
    pub(crate) dialect: String,
}

#[derive(Debug, Args)]
pub(crate) struct ExportDialectArgs {
    #[arg(long = "dialect")]
    pub(crate) dialect: String,
    #[arg(long = "out")]
    pub(crate) out: String,
}

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    #[arg(long = "in")]
    pub(crate) input: String,
}

#[derive(Debug, Args)]
pub(crate) struct RetargetArgs {
    #[arg(long = "in")]
    pub(crate) input: String,
    #[arg(long = "dialect")]
    pub(crate) dialect: String,
    #[arg(long = "out")]
    pub(crate) out: String,
    #[arg(long = "format", default_value = "binary")]
    pub(crate) format: Encoding,
}

#[derive(Debug, Args)]
pub(crate) struct ConvertArgs {
    #[arg(long = "in")]
    pub(crate) input: String,
    #[arg(long = "out")]
    pub(crate) out: String,
    #[arg(long = "format")]
    pub(crate) format: Encoding,
}
