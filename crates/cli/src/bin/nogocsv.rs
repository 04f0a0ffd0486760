// nogocsv - derive the "not going yet" working CSV from a roster

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mailmerge_cli::{finish, init_logging, long_version, CliError, ColumnArgs};
use mailmerge_merge::Table;

#[derive(Parser)]
#[command(name = "nogocsv")]
#[command(about = "Write a copy of a roster with every attending recipient marked as not going")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Rows already declined (going starts with n/N) are dropped; every remaining
row gets going=n, adding the column if needed. Flip individual rows to `y`
as replies arrive and mail them with `mailmerge`.

Examples:
  nogocsv --csv guests.csv --nogo rsvp.csv")]
struct Cli {
    /// Path to source CSV file
    #[arg(long)]
    csv: PathBuf,

    /// Path to nogo CSV file being created
    #[arg(long)]
    nogo: PathBuf,

    #[command(flatten)]
    columns: ColumnArgs,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    finish(cmd_nogocsv(cli))
}

fn cmd_nogocsv(cli: Cli) -> Result<(), CliError> {
    let roster = Table::load_with(&cli.csv, cli.columns.into()).map_err(CliError::load)?;
    let nogo = roster.select_attending().with_declined_flag();
    nogo.write(&cli.nogo).map_err(CliError::write)?;

    log::info!(
        "{} of {} row(s) written to {}",
        nogo.len(),
        roster.len(),
        cli.nogo.display()
    );
    Ok(())
}
