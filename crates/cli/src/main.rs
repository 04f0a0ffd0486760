// mailmerge - send a templated message to every row of a recipient CSV

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mailmerge_cli::{finish, init_logging, long_version, CliError, ColumnArgs};
use mailmerge_config::credentials::CONFIG_ENV;
use mailmerge_config::Credentials;
use mailmerge_merge::Selection;
use mailmerge_send::{run, DryRunSender, MergeOptions, Sender, SmtpSender};

#[derive(Parser)]
#[command(name = "mailmerge")]
#[command(about = "Send a templated email to each recipient in a CSV file")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
The CSV needs a header row with at least `name` and `email` columns. Every
column is available to the template, e.g. `Hi {{ name }}`.

Examples:
  mailmerge --csv guests.csv --template invite.txt --subject 'Reunion' --dry-run
  mailmerge --csv guests.csv --template invite.txt --subject 'Reunion'
  mailmerge --csv guests.csv --template invite.txt --subject 'Reunion' --index 42
  mailmerge --csv guests.csv --template reminder.txt --subject 'Reminder' --emails 'a@x.com, b@x.com'
  mailmerge --csv guests.csv --template invite.txt --subject 'Reunion' --noemails 'ceo@x.com'")]
struct Cli {
    /// Path to template file
    #[arg(long)]
    template: PathBuf,

    /// Path to CSV file
    #[arg(long)]
    csv: PathBuf,

    /// Subject line
    #[arg(long)]
    subject: String,

    /// Print messages instead of sending them
    #[arg(long, alias = "dryrun")]
    dry_run: bool,

    /// Starting index into the selected recipients (resume an interrupted run)
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Comma separated emails to include
    #[arg(long, value_name = "EMAILS")]
    emails: Option<String>,

    /// Comma separated emails to exclude. Ignored if --emails is present
    #[arg(long, value_name = "EMAILS")]
    noemails: Option<String>,

    /// Credentials file (default: ~/.mailmerge.yaml)
    #[arg(long, env = CONFIG_ENV, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    columns: ColumnArgs,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    finish(cmd_mailmerge(cli))
}

fn cmd_mailmerge(cli: Cli) -> Result<(), CliError> {
    if cli.subject.trim().is_empty() {
        return Err(CliError::args("--subject must not be empty")
            .with_hint("mailmerge --csv guests.csv --template invite.txt --subject 'Reunion'"));
    }

    let options = MergeOptions {
        csv: cli.csv,
        template: cli.template,
        subject: cli.subject,
        start_index: cli.index,
        selection: Selection::from_lists(cli.emails.as_deref(), cli.noemails.as_deref()),
        columns: cli.columns.into(),
    };

    // Dry runs never touch the credentials file.
    let mut sender: Box<dyn Sender> = if cli.dry_run {
        Box::new(DryRunSender::new(io::stdout()))
    } else {
        let path = Credentials::resolve_path(cli.config.as_deref());
        let credentials = Credentials::load(&path).map_err(CliError::config)?;
        Box::new(SmtpSender::new(&credentials).map_err(CliError::send)?)
    };

    let summary = run(&options, &mut sender, io::stdout()).map_err(CliError::run)?;

    let verb = if cli.dry_run { "rendered" } else { "sent" };
    eprintln!(
        "{verb} {} of {} message(s){}",
        summary.sent,
        summary.total,
        if summary.skipped > 0 {
            format!(" (skipped first {})", summary.skipped)
        } else {
            String::new()
        }
    );
    Ok(())
}
