//! Gap Runner entry point
//!
//! Runs the autopilot against a headless session and prints the last frame.
//!
//! ```text
//! gap-runner [--config <path>] [--seed <n>] [--ticks <n>] [--realtime]
//! ```

use std::io::Write;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use gap_runner::audio::{LogAudio, SoundEffect};
use gap_runner::platform::{App, Autopilot};
use gap_runner::renderer::TextRenderer;
use gap_runner::{GameSession, SessionConfig};

const DEFAULT_TICKS: u64 = 2000;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    seed: Option<u64>,
    ticks: Option<u64>,
    realtime: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().ok_or("--config needs a path")?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a number")?;
                args.seed = Some(value.parse().map_err(|e| format!("bad seed {value}: {e}"))?);
            }
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a number")?;
                args.ticks = Some(value.parse().map_err(|e| format!("bad tick count {value}: {e}"))?);
            }
            "--realtime" => args.realtime = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Gap Runner (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: gap-runner [--config <path>] [--seed <n>] [--ticks <n>] [--realtime]");
            return ExitCode::FAILURE;
        }
    };

    let config = match &args.config {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Rejected config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let session = match GameSession::new(config, seed) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Cannot start session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(session, Autopilot::new(), LogAudio::new(), TextRenderer::default())
        .with_auto_restart(true);

    let ticks = args.ticks.unwrap_or(DEFAULT_TICKS);
    let mut best = 0;
    if args.realtime {
        let tick_dt = Duration::from_secs_f32(app.session.config.tick_dt());
        let mut last = Instant::now();
        while app.frames() < ticks && !app.should_quit() {
            std::thread::sleep(tick_dt);
            let now = Instant::now();
            app.update((now - last).as_secs_f32());
            last = now;
            best = best.max(app.session.score);
            print!("\x1b[H{}", app.renderer.frame());
            let _ = std::io::stdout().flush();
        }
        println!();
    } else {
        while app.frames() < ticks && !app.should_quit() {
            app.frame();
            best = best.max(app.session.score);
        }
        println!("{}", app.renderer.frame());
    }

    log::info!(
        "Ran {} ticks (seed {}): {} runs, best score {}, {} crashes",
        app.frames(),
        seed,
        app.session.restarts + 1,
        best,
        app.audio.count(SoundEffect::Crash)
    );
    println!("seed {seed}  best score {best}  runs {}", app.session.restarts + 1);
    ExitCode::SUCCESS
}
