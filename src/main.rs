//! Retro Breakout entry point
//!
//! Runs a headless autoplay session at a fixed frame rate and reports how it
//! went. Usage: `retro-breakout [settings.json] [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use retro_breakout::sim::GameEvent;
    use retro_breakout::{AutoplayController, Session, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const FRAMES_PER_SECOND: u32 = 60;

    env_logger::init();
    log::info!("Retro Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::load(Path::new(&path)),
        _ => Settings::default(),
    };
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut session = Session::new(settings);
    let mut controller = AutoplayController::new(seed);

    for _ in 0..seconds * FRAMES_PER_SECOND {
        let result = session.frame(FRAME_DT, &mut controller);
        for event in &result.events {
            match event {
                GameEvent::BrickDestroyed { row, column } => {
                    log::debug!("Brick ({row}, {column}) destroyed, score {}", session.score());
                }
                other => log::trace!("{other:?}"),
            }
        }
    }

    log::info!(
        "Finished {seconds}s: level {}, score {}, lives {}",
        session.level(),
        session.score(),
        session.lives()
    );
    match serde_json::to_string_pretty(session.stats()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not encode stats: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedders drive `Session` directly on the web
}
