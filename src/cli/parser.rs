use crate::core::pagination::{LIMIT_OPTIONS, is_valid_limit};
use crate::models::chart::ChartMode;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for hourlog
#[derive(Parser)]
#[command(
    name = "hourlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work sessions with a start/stop timer, edit them in a paged table and chart the hours",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_limit(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if is_valid_limit(n) {
        Ok(n)
    } else {
        Err(format!("limit must be one of {:?}", LIMIT_OPTIONS))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start the timer, or stop it if it is running
    #[command(visible_alias = "t")]
    Toggle,

    /// Show whether the timer is running
    Status,

    /// Add a finished work session
    Add {
        /// Start time (YYYY-MM-DD HH:MM, RFC 3339 or 'now')
        #[arg(long = "start", help = "Start time (YYYY-MM-DD HH:MM)")]
        start: String,

        /// End time (YYYY-MM-DD HH:MM, RFC 3339 or 'now')
        #[arg(long = "end", help = "End time (YYYY-MM-DD HH:MM)")]
        end: String,
    },

    /// Change the start and/or end time of a record
    #[command(group(
        ArgGroup::new("fields")
            .required(true)
            .multiple(true)
            .args(["start", "end"])
    ))]
    Edit {
        /// Record id or a unique prefix of it
        id: String,

        #[arg(long = "start", help = "New start time (YYYY-MM-DD HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "New end time (YYYY-MM-DD HH:MM)")]
        end: Option<String>,
    },

    /// Delete a record
    Del {
        /// Record id or a unique prefix of it
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List finished sessions, one page at a time
    List {
        #[arg(
            long,
            short,
            allow_negative_numbers = true,
            help = "Page number (values below 1 show page 1)"
        )]
        page: Option<i64>,

        #[arg(
            long,
            short,
            value_parser = parse_limit,
            help = "Rows per page: 10, 20, 30, 40, 50, 100 or 200"
        )]
        limit: Option<usize>,
    },

    /// Chart worked hours per day of a month or per month of a year
    Chart {
        #[arg(long, value_enum, help = "Bucket by days of a month or months of a year")]
        mode: Option<ChartMode>,

        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=12),
            help = "Month for --mode days (1-12, default: current month)"
        )]
        month: Option<u32>,

        #[arg(long, help = "Year (default: current year)")]
        year: Option<i32>,
    },
}
