//! Per-frame game logic: physics, obstacle scrolling and spawning, scoring,
//! collisions and restart.

use super::types::{Boundaries, FlappyGame, GameEvent, GameInput, ObstaclePair};
use crate::core::constants::MAX_FRAMES_PER_ADVANCE;
use rand::Rng;

/// Width-over-height of a terminal area drawn with half-block pixels.
///
/// Each cell holds two vertically stacked pixels, so `rows` cells are
/// `2 * rows` pixels tall.
pub fn pixel_aspect(cols: u16, rows: u16) -> Option<f64> {
    if cols == 0 || rows == 0 {
        return None;
    }
    Some(cols as f64 / (2.0 * rows as f64))
}

/// Process player input.
pub fn process_input(game: &mut FlappyGame, input: GameInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match input {
        GameInput::Flap => {
            // A press after a crash only restarts; it does not also flap.
            if game.game_over {
                restart(game);
                events.push(GameEvent::Restarted);
            } else {
                if game.paused {
                    game.paused = false;
                    events.push(GameEvent::Resumed);
                }
                game.bird.velocity = game.config.physics.flap_strength;
                events.push(GameEvent::Flapped);
            }
        }
        GameInput::TogglePause => {
            if !game.game_over {
                game.paused = !game.paused;
                events.push(if game.paused {
                    GameEvent::Paused
                } else {
                    GameEvent::Resumed
                });
            }
        }
        GameInput::Resize { cols, rows } => resize(game, cols, rows),
    }

    events
}

/// Updates the camera aspect and play boundaries for a new viewport size.
///
/// Zero-sized viewports are ignored.
pub fn resize(game: &mut FlappyGame, cols: u16, rows: u16) {
    let Some(aspect) = pixel_aspect(cols, rows) else {
        return;
    };
    game.camera.set_aspect(aspect);
    game.boundaries = Boundaries::from_camera(&game.camera);
    log::debug!(
        "resized to {}x{} cells, visible width {:.2}",
        cols,
        rows,
        game.boundaries.visible_width
    );
}

/// Advance the simulation by one fixed frame.
pub fn process_tick<R: Rng>(game: &mut FlappyGame, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if game.game_over || game.paused {
        return events;
    }

    game.frame_count += 1;

    // Gravity
    game.bird.velocity += game.config.physics.gravity;
    game.bird.position.y += game.bird.velocity;

    // Scroll and score
    let speed = game.config.obstacles.speed;
    let bird_x = game.bird.position.x;
    for pair in &mut game.obstacles {
        pair.x -= speed;
        if !pair.passed && pair.x < bird_x {
            pair.passed = true;
            game.score += 1;
            events.push(GameEvent::Scored(game.score));
        }
    }

    let despawn_x = game.config.obstacles.despawn_x;
    game.obstacles.retain(|pair| pair.x >= despawn_x);

    // Spawn timer
    game.obstacle_timer += 1;
    if game.obstacle_timer >= game.config.obstacles.spawn_interval {
        spawn_obstacle(game, rng);
        game.obstacle_timer = 0;
        events.push(GameEvent::ObstacleSpawned);
    }

    if check_collision(game) {
        log::info!("crashed with score {}", game.score);
        events.push(GameEvent::Died { score: game.score });
    }

    events
}

/// Push a new pair at the spawn line with a random gap that fits on screen.
pub fn spawn_obstacle<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    let half_gap = game.config.obstacles.gap / 2.0;
    let min_gap = game.boundaries.y_min + half_gap;
    let max_gap = game.boundaries.y_max - half_gap;
    let gap_position = if max_gap > min_gap {
        rng.gen_range(min_gap..max_gap)
    } else {
        (min_gap + max_gap) / 2.0
    };

    log::debug!(
        "spawned obstacle at x={:.1}, gap {:.2}",
        game.config.obstacles.spawn_x,
        gap_position
    );
    game.obstacles
        .push(ObstaclePair::new(game.config.obstacles.spawn_x, gap_position));
}

/// Ends the game if the bird touches the floor, ceiling or an obstacle.
///
/// Returns true only on the frame the game ends.
pub fn check_collision(game: &mut FlappyGame) -> bool {
    if game.game_over {
        return false;
    }

    let bird = &game.bird;
    let y = bird.position.y;
    let hit_boundary =
        y - bird.radius <= game.boundaries.y_min || y + bird.radius >= game.boundaries.y_max;

    let hit_obstacle = || {
        let bird_box = bird.bounds();
        let cfg = &game.config.obstacles;
        game.obstacles.iter().any(|pair| {
            bird_box.intersects(&pair.top_bounds(cfg)) || bird_box.intersects(&pair.bottom_bounds(cfg))
        })
    };

    if hit_boundary || hit_obstacle() {
        game.game_over = true;
        return true;
    }
    false
}

/// Put the bird back at the start and clear the course.
///
/// The spawn timer keeps counting across runs.
pub fn restart(game: &mut FlappyGame) {
    game.bird.position.y = 0.0;
    game.bird.velocity = 0.0;
    game.obstacles.clear();
    game.score = 0;
    game.game_over = false;
    game.paused = false;
    log::info!("restarted");
}

/// Run as many fixed frames as `elapsed_ms` of wall time covers.
///
/// Leftover time carries into the next call. After a long stall at most
/// `MAX_FRAMES_PER_ADVANCE` frames run and the backlog is dropped.
pub fn advance<R: Rng>(game: &mut FlappyGame, elapsed_ms: u64, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if game.game_over || game.paused {
        game.accumulated_time_ms = 0;
        return events;
    }

    let frame_ms = game.config.frame_ms.max(1);
    game.accumulated_time_ms += elapsed_ms;

    let mut frames = 0;
    while game.accumulated_time_ms >= frame_ms {
        if frames == MAX_FRAMES_PER_ADVANCE {
            game.accumulated_time_ms %= frame_ms;
            break;
        }
        game.accumulated_time_ms -= frame_ms;
        frames += 1;

        events.extend(process_tick(game, rng));
        if game.game_over {
            game.accumulated_time_ms = 0;
            break;
        }
    }

    events
}
