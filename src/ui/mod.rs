//! Terminal UI: the rendered scene plus score, status bar and overlays.

pub mod hud;
pub mod scene_view;

use crate::game::FlappyGame;
use crate::render::PixelBuffer;
use crate::scene::Lighting;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};
use scene_view::SceneView;

/// What the HUD shows besides the game itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    pub best: u32,
    /// The run that just ended set a new best.
    pub new_best: bool,
    pub muted: bool,
}

/// Splits the terminal into the scene and a one-line status bar.
pub fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Area the 3D scene occupies; the camera aspect follows its size.
pub fn scene_area(area: Rect) -> Rect {
    split(area).0
}

pub fn draw(
    frame: &mut Frame,
    game: &FlappyGame,
    hud_state: &HudState,
    pixels: &mut PixelBuffer,
    lighting: &Lighting,
) {
    let (scene, status) = split(frame.size());

    pixels.resize(scene.width as usize, scene.height as usize * 2);
    pixels.draw_scene(&game.camera, lighting, &game.scene_meshes());
    frame.render_widget(SceneView::new(pixels), scene);

    hud::render_score(frame, scene, game.score, hud_state.best.max(game.score));

    let sound = if hud_state.muted { "muted" } else { "sound on" };
    if game.game_over {
        hud::render_game_over(frame, scene, game.score, hud_state.best, hud_state.new_best);
        hud::render_status_bar(
            frame,
            status,
            "Crashed!",
            Color::Red,
            &[("[Space/Click]", "Restart"), ("[Q]", "Quit")],
        );
    } else if game.paused {
        hud::render_banner(frame, scene, "PAUSED", Color::Cyan);
        hud::render_status_bar(
            frame,
            status,
            "Paused",
            Color::Cyan,
            &[("[Space/Click]", "Resume"), ("[Q]", "Quit")],
        );
    } else {
        hud::render_status_bar(
            frame,
            status,
            &format!("Flying ({})", sound),
            Color::Green,
            &[("[Space/Click]", "Flap"), ("[P]", "Pause"), ("[Q]", "Quit")],
        );
    }
}
