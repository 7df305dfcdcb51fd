//! Pet Arcade entry point
//!
//! On the web the page drives `platform::web::WebSession`; this binary is the
//! native headless demo. It plays each minigame (or the one named on the
//! command line) with the autopilot, stores finished runs in
//! `records.json`, and prints the leaderboard.
//!
//! Data directory: `$PET_ARCADE_DIR`, or the current directory.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use pet_arcade::persistence::JsonFileStore;
    use pet_arcade::records::format_duration;
    use pet_arcade::sim::autopilot;
    use pet_arcade::{GameKind, SessionRunner, Settings};

    /// Simulated time after which a demo run is abandoned (ms)
    const DEMO_LIMIT_MS: f32 = 120_000.0;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pet Arcade (native) starting...");

    let data_dir = std::env::var_os("PET_ARCADE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load_from(&data_dir.join("settings.json"));

    let kinds: Vec<GameKind> = match std::env::args().nth(1) {
        Some(name) => match GameKind::parse(&name) {
            Some(kind) => vec![kind],
            None => {
                eprintln!("unknown game {:?} (try ball_dodge or meteor_shower)", name);
                std::process::exit(2);
            }
        },
        None => GameKind::ALL.to_vec(),
    };

    for kind in kinds {
        let store = JsonFileStore::new(data_dir.join("records.json"));
        let mut runner = SessionRunner::new(kind, settings.clone(), store);

        while runner.is_running() {
            if runner.state().elapsed_ms >= DEMO_LIMIT_MS {
                log::info!("{} demo hit the time limit", kind.as_str());
                runner.exit();
                break;
            }
            let step = runner.settings().tick_ms;
            if let Some(command) = autopilot::suggest_for_step(runner.state(), step) {
                runner.send(command);
            }
            runner.advance(step);
        }

        match runner.summary() {
            Some(summary) => println!(
                "{}: {:?} with {} points in {}",
                kind.as_str(),
                summary.outcome,
                summary.final_score,
                format_duration(summary.duration_ms)
            ),
            None => println!("{}: no result", kind.as_str()),
        }
        for (i, record) in runner.records().iter().enumerate() {
            println!(
                "  {:>2}. {:>6}  {}  {}",
                i + 1,
                record.score,
                record.time,
                record.date
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `platform::web::init`
}
