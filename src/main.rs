/*!
# Faith Journal

Command-line front end for the faith journal store.

This file contains the main application flow: it sets up logging, loads the
configuration, opens the database and hands the parsed command to
[`faith_journal::cli::commands::run`].

## Usage

```text
faith-journal [OPTIONS] <COMMAND>

Commands:
  entry         Journal entries
  prayer        Prayer requests
  verse         Bible verses and the verse of the day
  devotional    Devotionals
  mood          Mood check-ins
  profile       The user profile
  subscription  The subscription record

Options:
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [possible values: text, json]
      --json                     Print records as JSON
```

## Configuration

- `FAITH_JOURNAL_DIR`: Data directory (defaults to ~/.faith-journal)
- `FAITH_JOURNAL_DB`: Database file (defaults to `<data dir>/journal.db`)
- `FAITH_JOURNAL_EXPORT_DIR`: Where PDF exports are written
- `FAITH_JOURNAL_LOG_FORMAT`: `text` or `json`
- `RUST_LOG`: Overrides the log filter
*/

use clap::Parser;
use faith_journal::cli::commands::{self, Context};
use faith_journal::cli::CliArgs;
use faith_journal::config::Config;
use faith_journal::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use faith_journal::errors::{AppResult, ErrorReporter};
use faith_journal::{DataService, Database, Exporter};
use std::io;
use std::process;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use uuid::Uuid;

fn init_tracing(verbose: bool, log_format: &str) {
    let level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = Registry::default().with(env_filter);

    // Logs go to stderr so command output on stdout stays clean.
    if log_format == LOG_FORMAT_JSON {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init();
    }
}

fn run(args: CliArgs, config: Config) -> AppResult<()> {
    config.validate()?;
    config.ensure_data_dir_exists()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let ctx = Context {
        service: DataService::new(db),
        exporter: Exporter::new(config.export_dir.clone()),
        json: args.json,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(args.command, &ctx, &mut out)
}

fn main() {
    let args = CliArgs::parse();

    // A config that fails to load still needs logging to report it.
    let loaded = Config::load();
    let log_format = args
        .log_format
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|config| config.log_format.clone()))
        .unwrap_or_default();
    init_tracing(args.verbose, &log_format);

    let invocation_id = Uuid::new_v4().to_string();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %invocation_id
    );
    let _guard = span.enter();

    info!("Starting faith-journal");
    debug!("CLI arguments: {:?}", args);

    let result = loaded.and_then(|config| run(args, config));

    if let Err(err) = result {
        error!("Command failed: {}", err);

        let mut reporter = ErrorReporter::new();
        reporter.report(&err);
        if let Some(user_error) = reporter.current_error() {
            eprintln!("Error: {}", user_error.description());
            eprintln!("{}", user_error.recovery_suggestion());
        }
        process::exit(1);
    }

    info!("Finished successfully");
}
