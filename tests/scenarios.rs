//! End-to-end session scenarios
//!
//! Each test drives a session (or the application driver) through a short
//! scripted run and checks the observable outcome:
//! - Free fall ends on the ground without scoring
//! - Obstacles scroll, get passed and retire on schedule
//! - A single impulse lifts the avatar
//! - Driver sounds line up with frame events
//! - Configuration loading and rejection

use gap_runner::audio::{LogAudio, SoundEffect};
use gap_runner::consts::*;
use gap_runner::platform::{App, Autopilot, ScriptedInput};
use gap_runner::renderer::{NullRenderer, TextRenderer};
use gap_runner::sim::{EndCause, ObstacleStream, ObstacleTuning};
use gap_runner::{ConfigError, GameSession, SessionConfig, SessionState};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn session(seed: u64) -> GameSession {
    GameSession::new(SessionConfig::default(), seed).unwrap()
}

#[test]
fn test_free_fall_ends_on_ground() {
    let mut session = session(2024);
    for _ in 0..60 {
        if session.step().ended {
            break;
        }
    }
    assert_eq!(session.state, SessionState::Terminal);
    assert_eq!(session.end_cause, Some(EndCause::Ground));
    assert_eq!(session.score, 0);
}

#[test]
fn test_obstacle_schedule() {
    let config = SessionConfig::default();
    let mut rng = Pcg32::seed_from_u64(11);
    let mut stream = ObstacleStream::new(ObstacleTuning::from(&config), &mut rng);
    let avatar_x = config.avatar_spawn.x;
    let first = stream.obstacles[0].id;

    let mut passes = 0;
    for _ in 0..120 {
        passes += stream.step(avatar_x, &mut rng);
    }
    // 600 - 120 * 5
    assert_eq!(stream.obstacles[0].id, first);
    assert_eq!(stream.obstacles[0].x, 0.0);
    // Passed at x = 225 (tick 75); the replacement spawned that same tick
    assert_eq!(passes, 1);
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.obstacles[1].x, OBSTACLE_SPAWN_X - 45.0 * OBSTACLE_VELOCITY);

    // Trailing edge clears x = 0 once x < -104, i.e. after 21 more ticks
    for _ in 0..20 {
        stream.step(avatar_x, &mut rng);
    }
    assert_eq!(stream.obstacles[0].id, first);
    stream.step(avatar_x, &mut rng);
    assert_eq!(stream.len(), 1);
    assert_ne!(stream.obstacles[0].id, first);
}

#[test]
fn test_single_impulse_lifts_avatar() {
    let mut session = session(3);
    session.queue_impulse();
    session.step();
    // -10.5 + 1.5 = -9, plus the rise bias
    assert_eq!(session.avatar.y(), AVATAR_SPAWN_Y - 11.0);
    assert_eq!(session.avatar.tilt, MAX_ROTATION);
}

#[test]
fn test_jumping_every_tick_hits_ceiling() {
    let mut app = App::new(session(8), ScriptedInput::every(1), LogAudio::new(), NullRenderer);
    let mut cause = None;
    for _ in 0..100 {
        let events = app.frame();
        if events.ended {
            cause = events.cause;
            break;
        }
    }
    // y + 48 < -10 first holds after 38 rises of 11
    assert_eq!(cause, Some(EndCause::Ceiling));
    assert_eq!(app.session.time_ticks, 38);
    assert_eq!(app.audio.count(SoundEffect::Crash), 1);
}

#[test]
fn test_driver_sounds_match_events() {
    let mut app = App::new(
        session(77),
        Autopilot::new(),
        LogAudio::new(),
        TextRenderer::default(),
    )
    .with_auto_restart(true);

    let mut passes = 0;
    let mut endings = 0;
    for _ in 0..1500 {
        let events = app.frame();
        passes += events.passes as usize;
        endings += usize::from(events.ended);
    }

    assert_eq!(app.frames(), 1500);
    assert_eq!(app.audio.count(SoundEffect::Score), passes);
    assert_eq!(app.audio.count(SoundEffect::Crash), endings);
    let still_down = usize::from(app.session.state == SessionState::Terminal);
    assert_eq!(app.session.restarts as usize + still_down, endings);
    assert_eq!(app.renderer.lines().len(), 40);
}

#[test]
fn test_restart_continues_random_stream() {
    let mut replayed = session(5);
    let fresh = session(5);
    assert_eq!(replayed.obstacles.obstacles, fresh.obstacles.obstacles);

    while !replayed.step().ended {}
    replayed.restart();
    assert_eq!(replayed.obstacles.len(), 1);
    assert_eq!(replayed.obstacles.obstacles[0].x, OBSTACLE_SPAWN_X);
    // The first gap after a restart is drawn further along the stream
    assert_ne!(
        replayed.obstacles.obstacles[0].gap_center_y,
        fresh.obstacles.obstacles[0].gap_center_y
    );
}

#[test]
fn test_json_config() {
    let config = SessionConfig::from_json_str(r#"{ "gap_height": 200.0, "tick_rate": 60 }"#)
        .unwrap();
    assert_eq!(config.gap_height, 200.0);
    assert_eq!(config.ground_y, GROUND_Y);
    let mut session = GameSession::new(config, 1).unwrap();
    let gap = session.snapshot().obstacles[0];
    assert!((gap.gap_bottom - gap.gap_top - 200.0).abs() < 1e-3);
    session.step();

    assert!(matches!(
        SessionConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        SessionConfig::from_json_str(r#"{ "gap_height": 900.0 }"#),
        Err(ConfigError::GapTooLarge { .. })
    ));
    assert!(matches!(
        SessionConfig::load("/nonexistent/gap-runner.json"),
        Err(ConfigError::Io(_))
    ));
}
