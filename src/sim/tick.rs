//! Per-frame simulation tick
//!
//! Advances the game one step: score timer, player, obstacles, Bigfoot,
//! collisions. Time only enters through `now_ms`, randomness only through the
//! state's seeded RNG.

use rand::Rng;

use super::collision::{Hazard, aabb_overlap};
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::tuning::ObstacleSizing;

/// Advance the game state by one tick at clock time `now_ms`
pub fn tick(state: &mut GameState, now_ms: u64) {
    // Nothing moves once the run has ended
    if state.phase == GamePhase::Over {
        return;
    }

    state.time_ticks += 1;

    update_score(state, now_ms);

    let bounds = state.bounds();
    state.player.step(bounds);

    update_obstacles(state);

    let player = state.player.rect;
    state.bigfoot.update(&player, &state.tuning);

    check_collisions(state);
}

/// Credit every whole score interval since the last update.
///
/// The timestamp advances by whole intervals rather than jumping to `now_ms`,
/// so leftover time carries over and the score does not depend on tick rate.
fn update_score(state: &mut GameState, now_ms: u64) {
    let interval = state.tuning.score_interval_ms.max(1);
    let intervals = now_ms.saturating_sub(state.last_score_ms) / interval;
    if intervals == 0 {
        return;
    }

    state.last_score_ms += intervals * interval;
    state.score += intervals * state.tuning.score_increment;
    state.events.push(GameEvent::ScoreIncreased { score: state.score });

    let speed = state.tuning.player_speed(state.score);
    if speed != state.player.speed {
        log::debug!("Speed {} -> {} at score {}", state.player.speed, speed, state.score);
        state.player.speed = speed;
        state.events.push(GameEvent::SpeedIncreased { speed });
    }
}

/// Raise, prune and maybe spawn obstacles
fn update_obstacles(state: &mut GameState) {
    let rise = state.tuning.obstacle_rise_rate;
    for obstacle in &mut state.obstacles {
        obstacle.rect.pos.y -= rise;
    }
    state.obstacles.retain(|o| !o.rect.is_above_top());

    let chance = state.tuning.obstacle_spawn_chance;
    if state.rng().random::<f64>() < chance {
        spawn_obstacle(state);
    }
}

/// Add one obstacle along the bottom edge
pub fn spawn_obstacle(state: &mut GameState) {
    let sizing = state.tuning.obstacle_sizing;
    let width = state.tuning.playfield_width;
    let height = state.tuning.playfield_height;

    let rng = state.rng();
    let size = match sizing {
        ObstacleSizing::TwoBands { small, large } => {
            let band = if rng.random::<f32>() < 0.5 { small } else { large };
            band.sample(rng.random())
        }
        ObstacleSizing::SingleBand { band } => band.sample(rng.random()),
    };
    let x = rng.random::<f32>() * (width - size).max(0.0);

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        rect: Rect::square(x, height, size),
    });
    state.events.push(GameEvent::ObstacleSpawned { id, size });
}

/// Test the player against every hazard; any hit ends the run
fn check_collisions(state: &mut GameState) {
    let player = state.player.rect;

    // Evaluate Bigfoot before an obstacle hit can arm it this tick
    let bigfoot_hit = state.bigfoot.is_active() && aabb_overlap(&player, &state.bigfoot.rect);
    let obstacle_hit = state
        .obstacles
        .iter()
        .find(|o| aabb_overlap(&player, &o.rect))
        .map(|o| o.id);

    if let Some(id) = obstacle_hit {
        state.events.push(GameEvent::Collision {
            hazard: Hazard::Obstacle { id },
        });
        state.bigfoot.arm(&player);
    }

    if bigfoot_hit {
        state.events.push(GameEvent::Collision {
            hazard: Hazard::Bigfoot,
        });
        // One recycle per collision event; the run is over so it will not repeat
        state.bigfoot.recycle(&state.tuning);
    }

    if obstacle_hit.is_some() || bigfoot_hit {
        state.phase = GamePhase::Over;
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BigfootBehavior, Direction};
    use crate::tuning::{SizeBand, Tuning};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Classic tuning with spawning disabled so runs are hazard-free
    fn quiet() -> Tuning {
        Tuning {
            obstacle_spawn_chance: 0.0,
            ..Tuning::classic()
        }
    }

    fn push_obstacle(state: &mut GameState, rect: Rect) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle { id, rect });
        id
    }

    #[test]
    fn test_score_after_1100ms_in_16ms_steps() {
        let mut state = GameState::new(12345, Tuning::classic(), 0);
        let start = state.player.rect;

        let mut now = 0;
        while now < 1100 {
            now += 16;
            tick(&mut state, now);
        }

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 1);
        assert_eq!(state.player.rect, start);
    }

    #[test]
    fn test_score_independent_of_tick_rate() {
        let mut fast = GameState::new(1, quiet(), 0);
        let mut slow = GameState::new(1, quiet(), 0);

        for t in (10..=10_550).step_by(10) {
            tick(&mut fast, t);
        }
        for t in (100..=10_500).step_by(100) {
            tick(&mut slow, t);
        }
        tick(&mut slow, 10_550);

        assert_eq!(fast.score, 10);
        assert_eq!(slow.score, 10);
        assert_eq!(fast.last_score_ms, 10_000);
        assert_eq!(slow.last_score_ms, 10_000);
    }

    #[test]
    fn test_score_catches_up_after_a_stall() {
        let mut state = GameState::new(1, quiet(), 0);
        tick(&mut state, 3_500);
        assert_eq!(state.score, 3);
        assert_eq!(state.last_score_ms, 3_000);
        tick(&mut state, 3_999);
        assert_eq!(state.score, 3);
        tick(&mut state, 4_000);
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_speed_steps_with_score() {
        let mut state = GameState::new(1, quiet(), 0);
        tick(&mut state, 49_000);
        assert_eq!(state.player.speed, 5.0);
        tick(&mut state, 50_000);
        assert_eq!(state.player.speed, 6.0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::SpeedIncreased { speed: 6.0 })
        );
    }

    #[test]
    fn test_chase_speed_is_fixed() {
        let tuning = Tuning {
            obstacle_spawn_chance: 0.0,
            ..Tuning::chase()
        };
        let mut state = GameState::new(1, tuning, 0);
        tick(&mut state, 120_000);
        assert_eq!(state.score, 120);
        assert_eq!(state.player.speed, 5.0);
    }

    #[test]
    fn test_diagonal_motion_unnormalized() {
        let mut state = GameState::new(1, quiet(), 0);
        state.player.intent.set(Direction::Down, true);
        state.player.intent.set(Direction::Right, true);
        tick(&mut state, 16);
        assert_eq!(state.player.rect.pos, Vec2::new(380.0, 55.0));
    }

    #[test]
    fn test_overlapping_obstacle_ends_game_and_arms_marker() {
        let mut state = GameState::new(1, quiet(), 0);
        // Placed so that after rising 5px it sits exactly on the player
        let id = push_obstacle(&mut state, Rect::new(375.0, 55.0, 50.0, 50.0));

        tick(&mut state, 16);

        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.bigfoot.behavior, BigfootBehavior::Marker { armed: true });
        assert_eq!(state.bigfoot.rect.pos, state.player.rect.pos);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Collision {
            hazard: Hazard::Obstacle { id }
        }));
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_edge_touching_obstacle_is_safe() {
        let mut state = GameState::new(1, quiet(), 0);
        state.player.rect.pos = Vec2::ZERO;
        push_obstacle(&mut state, Rect::new(50.0, 5.0, 50.0, 50.0));

        tick(&mut state, 16);

        assert_eq!(state.obstacles[0].rect, Rect::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_over_state_is_frozen() {
        let mut state = GameState::new(1, Tuning::classic(), 0);
        state.phase = GamePhase::Over;
        push_obstacle(&mut state, Rect::new(0.0, 300.0, 20.0, 20.0));
        state.player.intent.right = true;

        tick(&mut state, 5_000);

        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.obstacles[0].rect.y(), 300.0);
        assert_eq!(state.player.rect.x(), 375.0);
    }

    #[test]
    fn test_obstacle_removed_only_when_fully_above_top() {
        let mut state = GameState::new(1, quiet(), 0);
        push_obstacle(&mut state, Rect::new(0.0, -44.0, 50.0, 50.0));
        push_obstacle(&mut state, Rect::new(100.0, -45.0, 50.0, 50.0));

        tick(&mut state, 16);

        // -49 keeps 1px visible; -50 is gone
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].rect.y(), -49.0);
    }

    #[test]
    fn test_spawn_always_fits_playfield() {
        let mut state = GameState::new(42, Tuning::classic(), 0);
        for _ in 0..500 {
            spawn_obstacle(&mut state);
        }
        for o in &state.obstacles {
            assert_eq!(o.rect.y(), 600.0);
            assert_eq!(o.rect.width(), o.rect.height());
            assert!(o.rect.x() >= 0.0 && o.rect.right() <= 800.0 + 1e-3);
            assert!(o.rect.width() >= 10.0 && o.rect.width() <= 75.0);
        }
        // Both bands show up
        assert!(state.obstacles.iter().any(|o| o.rect.width() < 25.0));
        assert!(state.obstacles.iter().any(|o| o.rect.width() >= 35.0));
    }

    #[test]
    fn test_single_band_sizing() {
        let tuning = Tuning {
            obstacle_sizing: ObstacleSizing::SingleBand {
                band: SizeBand::new(30.0, 31.0),
            },
            ..Tuning::classic()
        };
        let mut state = GameState::new(3, tuning, 0);
        for _ in 0..50 {
            spawn_obstacle(&mut state);
        }
        assert!(
            state
                .obstacles
                .iter()
                .all(|o| o.rect.width() >= 30.0 && o.rect.width() <= 31.0)
        );
    }

    #[test]
    fn test_spawn_rate_roughly_matches_chance() {
        let tuning = Tuning {
            // Keep everything on screen so nothing is pruned
            obstacle_rise_rate: 0.001,
            ..Tuning::classic()
        };
        let mut state = GameState::new(2024, tuning, 0);
        // Park the player out of the spawn row
        state.player.rect.pos = Vec2::ZERO;
        for t in 0..10_000 {
            tick(&mut state, t);
        }
        let spawned = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        assert!((200..400).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn test_riser_collision_recycles_once() {
        let tuning = Tuning {
            obstacle_spawn_chance: 0.0,
            ..Tuning::chase()
        };
        let mut state = GameState::new(1, tuning, 0);
        // Riser will be at y = 50 after this tick's 3px climb
        state.bigfoot.rect.pos.y = 53.0;

        tick(&mut state, 16);

        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.bigfoot.behavior, BigfootBehavior::Riser { offset: 240.0 });
        assert_eq!(state.bigfoot.rect.y(), 840.0);

        let hits = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Collision { hazard: Hazard::Bigfoot }))
            .count();
        assert_eq!(hits, 1);

        tick(&mut state, 32);
        assert_eq!(state.bigfoot.rect.y(), 840.0);
    }

    #[test]
    fn test_riser_tracks_player_x() {
        let tuning = Tuning {
            obstacle_spawn_chance: 0.0,
            ..Tuning::chase()
        };
        let mut state = GameState::new(1, tuning, 0);
        state.player.intent.left = true;
        let start_y = state.bigfoot.rect.y();
        tick(&mut state, 16);
        assert_eq!(state.bigfoot.rect.x(), 370.0);
        assert_eq!(state.bigfoot.rect.y(), start_y - 3.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Tuning::classic(), 0);
        let mut b = GameState::new(99999, Tuning::classic(), 0);
        for t in 1..2_000u64 {
            if t % 100 == 0 {
                a.player.intent.left = !a.player.intent.left;
                b.player.intent.left = !b.player.intent.left;
            }
            tick(&mut a, t * 16);
            tick(&mut b, t * 16);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..16, 1..200),
        ) {
            let mut state = GameState::new(seed, quiet(), 0);
            for (i, bits) in moves.into_iter().enumerate() {
                state.player.intent.up = bits & 1 != 0;
                state.player.intent.down = bits & 2 != 0;
                state.player.intent.left = bits & 4 != 0;
                state.player.intent.right = bits & 8 != 0;
                // Big steps in time raise speed too
                tick(&mut state, i as u64 * 7_000);
                let r = state.player.rect;
                prop_assert!(r.x() >= 0.0 && r.x() <= 800.0 - r.width());
                prop_assert!(r.y() >= 0.0 && r.y() <= 600.0 - r.height());
            }
        }

        #[test]
        fn prop_pruning_keeps_visible_obstacles(ys in proptest::collection::vec(-120.0f32..700.0, 0..40)) {
            let mut state = GameState::new(0, quiet(), 0);
            // Keep the player far away from everything
            state.player.rect.pos = glam::Vec2::new(750.0, 550.0);
            for y in &ys {
                push_obstacle(&mut state, Rect::new(0.0, *y, 40.0, 40.0));
            }
            tick(&mut state, 1);
            let expected = ys.iter().filter(|y| *y - 5.0 + 40.0 > 0.0).count();
            prop_assert_eq!(state.obstacles.len(), expected);
            prop_assert!(state.obstacles.iter().all(|o| o.rect.bottom() > 0.0));
        }
    }
}
