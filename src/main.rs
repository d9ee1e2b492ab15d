//! devlog - developer log overlay
//!
//! Usage:
//!   devlog                          Run the terminal overlay
//!   devlog --headless               Emit the sample sequence, print entries
//!   devlog --headless --json        Same, as JSON lines
//!   devlog --env production         Simulate production (persisted)
//!   devlog --host app.example.com   Detect the environment from a host name

use clap::Parser;
use devlog::app::App;
use devlog::cli::Cli;
use devlog::logging::{self, capture};
use devlog::ui::view::export_line;
use devlog::{config, demo, ui, Log, LogEvent, Preferences, ProcessHost};
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_path);
    let mut cfg = config::load(&config_path);
    if let Some(host) = cli.host.clone() {
        cfg.logger.hostname = Some(host);
    }

    // The overlay owns the terminal, so console output goes to a file
    let console_file = (!cli.headless).then(|| cfg.logger.console_log_path.clone());
    logging::init_tracing(cli.verbose, console_file.as_deref());

    let prefs = Preferences::load(cfg.logger.prefs_path.clone());
    if let Some(env) = cli.env {
        prefs.set_simulated_env(Some(env.into()));
        if let Err(e) = prefs.save() {
            error!("{}", e);
        }
    }

    let log = Log::new(ProcessHost::new(prefs.clone(), cfg.logger.hostname.clone()));
    capture::install(&log);
    debug!(env = %log.env(), config = %config_path.display(), "Starting");

    let result = if cli.headless {
        run_headless(&log, cli.json);
        Ok(())
    } else {
        let mut app = App::new(cfg, prefs, log.clone());
        let result = ui::run(&mut app);
        if let Err(e) = &result {
            app.report_error(e);
        }
        result
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_headless(log: &Log, json: bool) {
    let subscription = log.subscribe(move |event| {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Cannot serialize event: {}", e),
            }
            return;
        }
        match event {
            LogEvent::Entry(entry) => println!("{}", export_line(entry)),
            LogEvent::Clear => println!("-- cleared --"),
        }
    });

    demo::run_sequence(log);
    capture::flush();

    subscription.unsubscribe();
}
