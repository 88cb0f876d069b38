use clap::Parser;
use std::ops::ControlFlow;
use std::sync::Arc;
use xmas_countdown::config::cli::{Command, ReminderCommand, SettingsCommand};
use xmas_countdown::config::toml_config::LogFormat;
use xmas_countdown::core::calendar::{resolve_target_year, CalendarSnapshot};
use xmas_countdown::core::countdown::{render_status_line, share_message};
use xmas_countdown::core::reminders::ScheduleReport;
use xmas_countdown::core::themes::{theme_by_id, THEMES};
use xmas_countdown::domain::ports::Clock;
use xmas_countdown::utils::error::{CountdownError, ErrorSeverity};
use xmas_countdown::utils::{logger, validation::Validate};
use xmas_countdown::{
    CliConfig, CountdownApp, CountdownTicker, FileKeyValueStore, FixedClock, LoggingAudioBackend,
    MusicPlayer, OutboxScheduler, SettingsPatch, SystemClock, TomlConfig,
};

type App = CountdownApp<FileKeyValueStore, OutboxScheduler, LoggingAudioBackend>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match TomlConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            eprintln!("💡 Make sure '{}' exists and is valid TOML", cli.config);
            exit_with(&e);
        }
    };

    // 初始化日誌
    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(cli, config).await {
        exit_with(&e);
    }
}

fn exit_with(e: &CountdownError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

async fn run(cli: CliConfig, config: TomlConfig) -> xmas_countdown::Result<()> {
    let clock: Arc<dyn Clock> = match cli.at.as_deref() {
        Some(at) => {
            let fixed = FixedClock::parse(at)?;
            tracing::info!("🕰️ Using fixed time {}", fixed.now());
            Arc::new(fixed)
        }
        None => Arc::new(SystemClock),
    };

    let mut app: App = CountdownApp::new(
        FileKeyValueStore::new(config.settings_path()),
        OutboxScheduler::new(
            config.outbox_path(),
            config.notifications.permission_granted,
        ),
        MusicPlayer::with_default_url(LoggingAudioBackend::new(), config.default_music_url()),
    );

    let command = cli.command.unwrap_or(Command::Status {
        year: None,
        json: false,
        share: false,
    });

    match command {
        Command::Status { year, json, share } => {
            let now = clock.now();
            app.reload().await;
            app.auto_advance(now).await;

            let selected = year.unwrap_or(app.settings().selected_year);
            let snapshot = CalendarSnapshot::evaluate(selected, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else if share {
                println!("{}", share_message(&snapshot));
            } else {
                println!("{}", render_status_line(&snapshot));
            }
        }
        Command::Watch { ticks, music } => watch(&mut app, clock, &config, ticks, music).await,
        Command::Reminders(command) => reminders(&mut app, clock.now(), command).await,
        Command::Settings(command) => settings(&mut app, clock.now(), command).await?,
        Command::Themes => {
            app.reload().await;
            let current = theme_by_id(&app.settings().current_theme).id;
            for theme in THEMES.iter() {
                let marker = if theme.id == current { "*" } else { " " };
                println!(
                    "{} {:<8} {:<8} {} → {}",
                    marker, theme.id, theme.name, theme.start_color, theme.end_color
                );
            }
        }
    }

    Ok(())
}

async fn watch(
    app: &mut App,
    clock: Arc<dyn Clock>,
    config: &TomlConfig,
    ticks: Option<u64>,
    music: bool,
) {
    app.start(clock.now()).await;
    if music {
        app.music_mut().play().await;
    }

    let selected = app.settings().selected_year;
    let ticker = CountdownTicker::with_interval(clock, config.tick_interval());
    tracing::info!("⏳ Watching countdown (every {:?})", ticker.tick_interval());

    tokio::select! {
        count = ticker.run(selected, ticks, |snapshot| {
            println!("{}", render_status_line(snapshot));
            ControlFlow::Continue(())
        }) => {
            tracing::info!("✅ Stopped after {} ticks", count);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("👋 Interrupted");
        }
    }

    app.music_mut().cleanup().await;
}

async fn reminders(app: &mut App, now: chrono::NaiveDateTime, command: ReminderCommand) {
    app.reload().await;
    app.auto_advance(now).await;

    match command {
        ReminderCommand::Schedule => match app.schedule_reminders(now).await {
            Some(report) => print_report(app.settings().selected_year, &report),
            None => println!("🔕 Notification permission denied; no reminders scheduled"),
        },
        ReminderCommand::Reset { year } => {
            let year = year.unwrap_or_else(|| resolve_target_year(app.settings().selected_year, now));
            app.reminders().reset(year).await;
            println!("🔄 Reminder flags cleared for {}", year);
        }
        ReminderCommand::Cancel => {
            app.reminders().cancel_all().await;
            println!("🧹 All reminders cancelled");
        }
    }
}

fn print_report(year: i32, report: &ScheduleReport) {
    if report.is_empty() {
        println!("📭 No upcoming reminders left for Christmas {}", year);
        return;
    }
    for kind in &report.scheduled {
        println!("🔔 scheduled   {}", kind);
    }
    for kind in &report.already_sent {
        println!("⏭️ already set {}", kind);
    }
    for kind in &report.failed {
        println!("❌ failed      {}", kind);
    }
}

async fn settings(
    app: &mut App,
    now: chrono::NaiveDateTime,
    command: SettingsCommand,
) -> xmas_countdown::Result<()> {
    app.reload().await;

    match command {
        SettingsCommand::Show => {
            print!("{}", toml::to_string_pretty(app.settings())?);
        }
        SettingsCommand::Set(args) => {
            let patch = SettingsPatch::from(args);
            if patch.is_empty() {
                println!("Nothing to change");
                return Ok(());
            }
            if let Some(report) = app.save_settings(&patch, now).await? {
                print_report(app.settings().selected_year, &report);
            }
            println!("✅ Settings saved");
        }
    }

    Ok(())
}
