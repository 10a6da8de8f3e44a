//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one quantum deterministically.

use super::collision::{PlacedShape, avatar_vs_ceiling, avatar_vs_ground, shape_vs_obstacle};
use super::state::{EndCause, FrameEvents, GameSession, SessionState};

/// Advance the session by one fixed timestep
///
/// Order: queued impulses, avatar, ground, obstacles (and scoring), then
/// collisions. A Terminal session does not advance.
pub fn tick(session: &mut GameSession) -> FrameEvents {
    if session.state == SessionState::Terminal {
        return FrameEvents::default();
    }

    session.time_ticks += 1;

    // Several inputs in one tick restart the same impulse clock
    if session.pending_impulses > 0 {
        session.avatar.impulse();
        session.pending_impulses = 0;
    }

    session.avatar.step();
    session.ground.step();

    let passes = session
        .obstacles
        .step(session.avatar.x(), &mut session.rng);
    session.score += passes;

    let cause = detect_collision(session);
    let ended = cause.is_some();
    if let Some(cause) = cause {
        session.state = SessionState::Terminal;
        session.end_cause = Some(cause);
        log::info!(
            "Session ended after {} ticks: {:?}, score {}",
            session.time_ticks,
            cause,
            session.score
        );
    }

    FrameEvents {
        passes,
        ended,
        cause,
    }
}

/// First collision for the current tick, if any
fn detect_collision(session: &GameSession) -> Option<EndCause> {
    let placed = PlacedShape::of_avatar(&session.avatar, &session.sprites);
    let tuning = &session.obstacles.tuning;

    for obstacle in session.obstacles.iter() {
        if shape_vs_obstacle(&placed, obstacle, tuning, &session.sprites).is_some() {
            return Some(EndCause::Obstacle { id: obstacle.id });
        }
    }

    if avatar_vs_ground(&session.avatar, session.ground.y) {
        return Some(EndCause::Ground);
    }

    if avatar_vs_ceiling(&session.avatar, session.config.ceiling_margin) {
        return Some(EndCause::Ceiling);
    }

    None
}

impl GameSession {
    /// Advance one tick; see [`tick`]
    pub fn step(&mut self) -> FrameEvents {
        tick(self)
    }
}
