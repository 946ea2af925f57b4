// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use toastline::center::NotificationCenter;
use toastline::config;
use toastline::domain::notification::{AddOptions, Severity};
use toastline::scheduler::ManualClock;
use tracing::{info, warn};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toastline=debug".into()),
        )
        .init();
}

fn print_sets(step: &str, center: &NotificationCenter<ManualClock>) {
    println!("-- {step} (t = {:?})", center.clock().elapsed());
    for entry in center.visible() {
        println!(
            "   visible   {:>8} {:<14} {}",
            entry.item().severity(),
            format!("{:?}", entry.state().kind()),
            entry.item().message()
        );
    }
    for item in center.collapsed() {
        println!("   collapsed {:>8} {}", item.severity(), item.message());
    }
    if let Some(icon) = center.most_severe_collapsed() {
        println!("   icon      {}", icon.severity());
    }
}

fn run_frames(center: &mut NotificationCenter<ManualClock>, clock: &ManualClock) {
    while center.is_animating() {
        clock.advance(Duration::from_millis(16));
        center.tick();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    let config_path: Option<PathBuf> = match args.opt_value_from_str("--config") {
        Ok(path) => path,
        Err(err) => {
            eprintln!("invalid arguments: {err}");
            return ExitCode::FAILURE;
        }
    };
    let dump_events = args.contains("--dump-events");

    let settings = match config_path {
        Some(path) => match config::load_from_path(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %path.display(), %err, "using default settings");
                config::Config::default()
            }
        },
        None => {
            let (settings, warning) = config::load();
            if let Some(key) = warning {
                warn!(key = %key, "using default settings");
            }
            settings
        }
    };

    let clock = ManualClock::new();
    let mut center = NotificationCenter::from_config(&settings, clock.clone());
    let engine = *center.controller().config();
    info!(
        collapse_ms = engine.collapse_delay.as_millis(),
        hover_ms = engine.hover_suppression.as_millis(),
        "demo started"
    );

    center.error("Email address is invalid", "email");
    center.add(
        Severity::Warning,
        "Unsaved changes",
        "draft",
        AddOptions::default().persistent(),
    );
    center.success("Profile saved", "save");
    center.add_unique(Severity::Info, "Sync started", "sync", AddOptions::default());
    center.add_unique(Severity::Info, "Sync resumed", "sync", AddOptions::default());
    print_sets("added five notifications", &center);

    clock.advance(engine.dismiss_delay.as_duration());
    center.tick();
    print_sets("success dismissed", &center);

    clock.advance(
        engine
            .collapse_delay
            .as_duration()
            .saturating_sub(engine.dismiss_delay.as_duration()),
    );
    center.tick();
    run_frames(&mut center, &clock);
    print_sets("auto-collapsed", &center);

    center.on_expand_requested();
    run_frames(&mut center, &clock);
    print_sets("expanded from icon", &center);

    center.on_notification_hover_start();
    clock.advance(engine.hover_suppression.as_duration());
    center.tick();
    print_sets("hovering past the suppression window", &center);

    center.on_notification_hover_end();
    center.error("Email address is still invalid", "email");
    clock.advance(engine.collapse_delay.as_duration());
    center.tick();
    run_frames(&mut center, &clock);
    print_sets("replaced and collapsed again", &center);

    center.shutdown();

    if dump_events {
        match center.event_log().export_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to export events: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
