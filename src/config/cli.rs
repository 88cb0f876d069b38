use crate::config::toml_config::DEFAULT_CONFIG_FILE;
use crate::domain::model::SettingsPatch;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "xmas-countdown")]
#[command(about = "Counts down to Christmas and schedules festive reminders")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Evaluate at a fixed local time instead of now (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, global = true)]
    pub at: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the countdown once
    Status {
        /// Year to count toward instead of the saved one
        #[arg(long)]
        year: Option<i32>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Print the share message instead of the status line
        #[arg(long)]
        share: bool,
    },
    /// Refresh the countdown every tick until Ctrl-C
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Start background music while watching
        #[arg(long)]
        music: bool,
    },
    /// Manage reminder notifications
    #[command(subcommand)]
    Reminders(ReminderCommand),
    /// Show or change saved settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// List the available colour themes
    Themes,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReminderCommand {
    /// Schedule the 1 week / 3 days / 1 day reminders
    Schedule,
    /// Forget which reminders were already scheduled for a year
    Reset {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Cancel every scheduled reminder
    Cancel,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set(SettingsArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub snow_intensity: Option<u8>,
    #[arg(long)]
    pub music_volume: Option<u8>,
    #[arg(long)]
    pub music_url: Option<String>,
    #[arg(long)]
    pub notifications: Option<bool>,
    #[arg(long)]
    pub one_week_message: Option<String>,
    #[arg(long)]
    pub three_days_message: Option<String>,
    #[arg(long)]
    pub one_day_message: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        SettingsPatch {
            selected_year: args.year,
            current_theme: args.theme,
            snow_intensity: args.snow_intensity,
            music_volume: args.music_volume,
            custom_music_url: args.music_url,
            notifications_enabled: args.notifications,
            notification_one_week: args.one_week_message,
            notification_three_days: args.three_days_message,
            notification_one_day: args.one_day_message,
            language: args.language,
        }
    }
}
