use crate::core::backup::Compression;
use crate::export::{ExportFormat, ReportKind};
use clap::{Args, Parser, Subcommand};

/// Command-line interface of the outreach staff portal.
#[derive(Parser)]
#[command(
    name = "outreach",
    version = env!("CARGO_PKG_VERSION"),
    about = "Youth-outreach events: registrations, feedback, reports and certificates",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Portal secret key, required by every staff command
    #[arg(global = true, long = "key", value_name = "KEY")]
    pub key: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration (secrets masked)")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Create, list and manage events
    #[command(subcommand)]
    Event(EventCommand),

    /// Manage registrations
    #[command(subcommand)]
    Registration(RegistrationCommand),

    /// Read feedback submissions and forms
    #[command(subcommand)]
    Feedback(FeedbackCommand),

    /// Manage the facilitator directory
    #[command(subcommand)]
    Facilitator(FacilitatorCommand),

    /// Manage the team directory
    #[command(subcommand)]
    Team(TeamCommand),

    /// Export a report (registrations, feedback or events)
    Export {
        #[arg(long, value_enum, default_value = "registrations")]
        report: ReportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Restrict to one event (required for the feedback report)
        #[arg(long, value_name = "EVENT_ID")]
        event: Option<String>,

        /// Date range to export.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM              → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD           → specific day  (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format:
        /// - YYYY:YYYY            → year range           (e.g. "2024:2025")
        /// - YYYY-MM:YYYY-MM      → month range          (e.g. "2025-06:2025-08")
        /// - YYYY-MM-DD:YYYY-MM-DD→ day range           (e.g. "2025-06-01:2025-06-30")
        ///
        /// Special value:
        /// - all                   → no date filtering
        ///
        /// Registrations and feedback are filtered by submission date, events
        /// by session dates.
        #[arg(long, value_name = "RANGE", help = "Filter by year/month/day or a custom range")]
        range: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Generate certificates of participation
    Certificate {
        #[arg(long, value_name = "EVENT_ID")]
        event: String,

        /// Output directory (absolute path required)
        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: String,

        /// Write a single multi-page PDF
        #[arg(long)]
        combined: bool,

        /// Only participants who submitted feedback
        #[arg(long = "feedback-only")]
        feedback_only: bool,

        /// Email each participant their certificate
        #[arg(long)]
        send: bool,

        /// Overwrite files and allow events that are not completed yet
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show mail queued by the outbox mailer
    Outbox {
        #[arg(long = "print", help = "Print queued messages")]
        print: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup
        #[arg(long, value_enum, value_name = "KIND")]
        compress: Option<Compression>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Serve the public and portal HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Print JSON instead of a table.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Create an event
    Create {
        #[arg(long)]
        title: String,

        /// Programme module: leadership, digital_skills, career, wellbeing, general
        #[arg(long = "type", value_name = "MODULE", default_value = "general")]
        event_type: String,

        /// Session: YYYY-MM-DD[@HH:MM-HH:MM][=Title]; repeat for multi-day events
        #[arg(long = "session", value_name = "SPEC")]
        sessions: Vec<String>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        country: String,

        #[arg(long, default_value = "")]
        region: String,

        /// Stored status, used when the event has no sessions
        #[arg(long)]
        status: Option<String>,

        /// facilitator:<id> or team:<id>
        #[arg(long)]
        conductor: Option<String>,

        /// Agenda item; repeatable
        #[arg(long = "agenda", value_name = "ITEM")]
        agenda: Vec<String>,

        /// Image URL; repeatable
        #[arg(long = "image", value_name = "URL")]
        images: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List events with their current status
    List {
        /// upcoming, ongoing or completed
        #[arg(long)]
        status: Option<String>,

        /// Only events with a session in this period (same grammar as export --range)
        #[arg(long, short)]
        period: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one event
    Show {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Set the stored status of an event
    Status { id: String, status: String },

    /// Delete an event with its registrations and feedback
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum RegistrationCommand {
    /// Register a participant
    Add {
        #[arg(long, value_name = "EVENT_ID")]
        event: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        country: String,

        /// Accept even when registration is closed
        #[arg(long = "walk-in")]
        walk_in: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List registrations
    List {
        #[arg(long, value_name = "EVENT_ID")]
        event: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete a registration
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum FeedbackCommand {
    /// List feedback for an event
    List {
        #[arg(long, value_name = "EVENT_ID")]
        event: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the feedback form of an event
    Form {
        #[arg(long, value_name = "EVENT_ID")]
        event: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
pub enum FacilitatorCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        organisation: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long)]
        photo: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    List {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
pub enum TeamCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long)]
        photo: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    List {
        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Commands {
    /// Commands that work without the portal key.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Commands::Init | Commands::Config { .. } | Commands::Serve { .. }
        )
    }
}
