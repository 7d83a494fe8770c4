//! Integration test: full game runs
//!
//! Drives the game through ticks and wall-clock advances the way the main
//! loop does: spawning, scoring, crashing and restarting.

use flappy3d::game::{advance, process_input, process_tick};
use flappy3d::scene::Model;
use flappy3d::{FlappyGame, GameConfig, GameEvent, GameInput, FRAME_MS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn new_game(config: GameConfig) -> FlappyGame {
    FlappyGame::new(config, Model::builtin_bird(), 16.0 / 9.0)
}

/// No gravity, so the bird holds its starting height.
fn hover_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.physics.gravity = 0.0;
    config
}

fn run_ticks(game: &mut FlappyGame, rng: &mut ChaCha8Rng, count: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..count {
        events.extend(process_tick(game, rng));
    }
    events
}

fn count_died(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::Died { .. }))
        .count()
}

// =============================================================================
// Spawning and scoring
// =============================================================================

#[test]
fn test_hovering_bird_scores_through_centred_gaps() {
    let mut game = new_game(hover_config());
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut events = Vec::new();

    for _ in 0..800 {
        events.extend(process_tick(&mut game, &mut rng));
        for pair in &mut game.obstacles {
            pair.gap_position = 0.0;
        }
    }

    assert!(!game.game_over, "bird should fly through centred gaps");
    assert_eq!(count_died(&events), 0);

    let spawned = events
        .iter()
        .filter(|e| **e == GameEvent::ObstacleSpawned)
        .count();
    assert_eq!(spawned, 5, "one spawn every 150 frames");
    assert_eq!(game.obstacles.len(), 5, "nothing has reached the despawn line yet");

    // First pair spawned at frame 150 needs ~600 frames to pass x = -2
    assert_eq!(game.score, 1);
    assert!(events.contains(&GameEvent::Scored(1)));
    assert!(game.obstacles[0].passed);
    assert!(!game.obstacles[1].passed);
}

#[test]
fn test_pairs_despawn_past_the_left_edge() {
    let mut game = new_game(hover_config());
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..1290 {
        process_tick(&mut game, &mut rng);
        for pair in &mut game.obstacles {
            pair.gap_position = 0.0;
        }
    }

    assert!(!game.game_over);
    let despawn_x = game.config.obstacles.despawn_x;
    assert!(game.obstacles.iter().all(|p| p.x >= despawn_x));
    // Frames 150..=1200 spawned 8 pairs; only the first has scrolled 1000 frames
    assert_eq!(game.obstacles.len(), 7);
    assert!(game.score >= 4);
}

#[test]
fn test_same_seed_same_course() {
    let mut a = new_game(hover_config());
    let mut b = new_game(hover_config());
    let mut rng_a = ChaCha8Rng::seed_from_u64(1234);
    let mut rng_b = ChaCha8Rng::seed_from_u64(1234);

    run_ticks(&mut a, &mut rng_a, 460);
    run_ticks(&mut b, &mut rng_b, 460);

    let gaps_a: Vec<f64> = a.obstacles.iter().map(|p| p.gap_position).collect();
    let gaps_b: Vec<f64> = b.obstacles.iter().map(|p| p.gap_position).collect();
    assert_eq!(gaps_a.len(), 3);
    assert_eq!(gaps_a, gaps_b);
}

#[test]
fn test_spawned_gaps_stay_on_screen() {
    let mut game = new_game(hover_config());
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let half_gap = game.config.obstacles.gap / 2.0;

    // Obstacles may hit the bird here; only the gap range matters
    for _ in 0..50 {
        flappy3d::game::spawn_obstacle(&mut game, &mut rng);
    }
    for pair in &game.obstacles {
        assert!(pair.gap_position >= game.boundaries.y_min + half_gap);
        assert!(pair.gap_position < game.boundaries.y_max - half_gap);
    }
}

// =============================================================================
// Crashing and restarting
// =============================================================================

#[test]
fn test_free_fall_dies_once_on_the_ground() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let events = run_ticks(&mut game, &mut rng, 300);

    assert!(game.game_over);
    assert_eq!(count_died(&events), 1);
    assert_eq!(events.last(), Some(&GameEvent::Died { score: 0 }));
    assert!(game.bird.position.y - game.bird.radius <= game.boundaries.y_min);
    // Under 100 frames to fall ~3.3 units at 0.001 per frame squared
    assert!(game.frame_count < 100);
}

#[test]
fn test_frozen_after_death() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    run_ticks(&mut game, &mut rng, 300);
    assert!(game.game_over);

    let y = game.bird.position.y;
    let frames = game.frame_count;
    let events = advance(&mut game, 10_000, &mut rng);

    assert!(events.is_empty());
    assert_eq!(game.bird.position.y, y);
    assert_eq!(game.frame_count, frames);
}

#[test]
fn test_constant_flapping_hits_the_ceiling() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut events = Vec::new();

    for _ in 0..300 {
        events.extend(process_input(&mut game, GameInput::Flap));
        events.extend(process_tick(&mut game, &mut rng));
        if game.game_over {
            break;
        }
    }

    assert!(game.game_over);
    assert!(game.bird.position.y > 0.0);
    assert!(game.bird.position.y + game.bird.radius >= game.boundaries.y_max);
    assert_eq!(count_died(&events), 1);
}

#[test]
fn test_obstacle_collision_ends_run_with_score() {
    let mut game = new_game(hover_config());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    // Gap far above the bird: the bottom box fills the bird's height
    flappy3d::game::spawn_obstacle(&mut game, &mut rng);
    game.obstacles[0].gap_position = game.boundaries.y_max - game.config.obstacles.gap / 2.0;

    let events = run_ticks(&mut game, &mut rng, 700);

    assert!(game.game_over);
    assert_eq!(count_died(&events), 1);
    assert_eq!(game.score, 0);
    let pair = &game.obstacles[0];
    assert!(pair.x > game.bird.position.x - 1.0 && pair.x < game.bird.position.x + 1.5);
}

#[test]
fn test_restart_after_crash_starts_fresh() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    run_ticks(&mut game, &mut rng, 300);
    assert!(game.game_over);
    let timer_at_crash = game.obstacle_timer;
    assert!(timer_at_crash > 0);

    let events = process_input(&mut game, GameInput::Flap);
    assert_eq!(events, vec![GameEvent::Restarted]);
    assert!(!game.game_over);
    assert_eq!(game.score, 0);
    assert_eq!(game.bird.position.y, 0.0);
    assert_eq!(game.bird.velocity, 0.0, "restart press does not also flap");
    assert!(game.obstacles.is_empty());
    assert_eq!(game.obstacle_timer, timer_at_crash, "spawn cadence carries over");

    // The next run plays out like the first
    let events = run_ticks(&mut game, &mut rng, 300);
    assert_eq!(count_died(&events), 1);
}

// =============================================================================
// Wall-clock advancing, pause and resize
// =============================================================================

#[test]
fn test_advance_runs_whole_frames_and_carries_remainder() {
    let mut game = new_game(hover_config());
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    advance(&mut game, FRAME_MS / 2, &mut rng);
    assert_eq!(game.frame_count, 0);
    advance(&mut game, FRAME_MS / 2, &mut rng);
    assert_eq!(game.frame_count, 1);
    advance(&mut game, FRAME_MS * 3 + 1, &mut rng);
    assert_eq!(game.frame_count, 4);
    assert_eq!(game.accumulated_time_ms, 1);
}

#[test]
fn test_advance_drops_backlog_after_stall() {
    let mut game = new_game(hover_config());
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    advance(&mut game, 60_000, &mut rng);
    assert_eq!(game.frame_count, 5);
    assert!(game.accumulated_time_ms < FRAME_MS);
}

#[test]
fn test_pause_freezes_and_flap_resumes() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    run_ticks(&mut game, &mut rng, 10);

    assert_eq!(
        process_input(&mut game, GameInput::TogglePause),
        vec![GameEvent::Paused]
    );
    let y = game.bird.position.y;
    assert!(advance(&mut game, 5_000, &mut rng).is_empty());
    assert_eq!(game.bird.position.y, y);

    let events = process_input(&mut game, GameInput::Flap);
    assert_eq!(events, vec![GameEvent::Resumed, GameEvent::Flapped]);
    assert!(!game.paused);
    assert_eq!(game.bird.velocity, game.config.physics.flap_strength);
}

#[test]
fn test_resize_widens_view_but_keeps_height() {
    let mut game = new_game(GameConfig::default());
    let before = game.boundaries;

    process_input(&mut game, GameInput::Resize { cols: 200, rows: 25 });

    assert!((game.camera.aspect - 4.0).abs() < 1e-12);
    assert!(game.boundaries.visible_width > before.visible_width);
    assert!((game.boundaries.y_min - before.y_min).abs() < 1e-12);
    assert!((game.boundaries.y_max - before.y_max).abs() < 1e-12);

    // Zero-sized terminals are ignored
    process_input(&mut game, GameInput::Resize { cols: 0, rows: 25 });
    assert!((game.camera.aspect - 4.0).abs() < 1e-12);
}
