use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy3d::audio::{self, AudioSink, Muting};
use flappy3d::build_info;
use flappy3d::cli::{self, Command, Options};
use flappy3d::core::{logging, GameConfig};
use flappy3d::game::{self, FlappyGame, GameEvent};
use flappy3d::input::{self, AppInput};
use flappy3d::render::PixelBuffer;
use flappy3d::scene::{Lighting, Model};
use flappy3d::scores::{ScoreBoard, ScoreStore};
use flappy3d::ui::{self, HudState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

fn main() {
    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'flappy3d --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Help => println!("{}", cli::HELP),
        Command::Version => println!("{}", build_info::version_string()),
        Command::ResetScores => {
            let store = ScoreStore::new().context("locating score file")?;
            store.reset().context("deleting score file")?;
            println!("Scores reset.");
        }
        Command::DumpConfig(options) => {
            let config = load_config(&options)?;
            println!("{}", config.to_json_pretty()?);
        }
        Command::Play(options) => play(options)?,
    }
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(options: &Options) -> Result<GameConfig> {
    let path = match &options.config_path {
        Some(path) => path.clone(),
        None => GameConfig::default_path().context("locating config file")?,
    };
    let mut config =
        GameConfig::load(&path).with_context(|| format!("loading config {}", path.display()))?;

    if let Some(model_path) = &options.model_path {
        config.model_path = Some(model_path.clone());
    }
    if options.mute {
        config.audio.enabled = false;
    }
    Ok(config)
}

/// Score bookkeeping and sound for one play session.
struct Session {
    store: ScoreStore,
    board: ScoreBoard,
    hud: HudState,
    sound: Muting<Box<dyn AudioSink>>,
}

impl Session {
    fn handle(&mut self, events: &[GameEvent]) {
        audio::play_events(&mut self.sound, events);

        for event in events {
            match *event {
                GameEvent::Died { score } => {
                    let now = chrono::Utc::now().timestamp();
                    self.hud.new_best = self.board.record_run(score, now);
                    self.hud.best = self.board.best;
                    if self.hud.new_best {
                        log::info!("new best score {}", score);
                    }
                    if let Err(e) = self.store.save(&self.board) {
                        log::error!("failed to save scores: {}", e);
                    }
                }
                GameEvent::Restarted => self.hud.new_best = false,
                _ => {}
            }
        }
    }
}

fn play(options: Options) -> Result<()> {
    match logging::default_log_path() {
        Ok(path) => {
            if let Err(e) = logging::init(&path) {
                eprintln!("Warning: could not open log file {}: {}", path.display(), e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    log::info!("{}", build_info::version_string());

    let config = load_config(&options)?;
    let model = Model::load_or_builtin(config.model_path.as_deref());

    let store = ScoreStore::new().context("locating score file")?;
    let board = store.load().unwrap_or_else(|e| {
        log::warn!("ignoring unreadable score file: {}", e);
        ScoreBoard::default()
    });

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = Session {
        store,
        hud: HudState {
            best: board.best,
            new_best: false,
            muted: !config.audio.enabled,
        },
        board,
        sound: Muting::new(audio::output_sink(), !config.audio.enabled),
    };

    enable_raw_mode()?;
    // Everything after raw mode, setup included, goes through the restore path
    let result = guarded(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            stdout.execute(EnableMouseCapture)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

            let scene = ui::scene_area(terminal.size()?);
            let aspect = game::pixel_aspect(scene.width, scene.height).unwrap_or(1.0);
            let mut game = FlappyGame::new(config, model, aspect);
            game_loop(&mut terminal, &mut game, &mut session, &mut rng)
        },
        restore_terminal,
    );

    log::info!("exiting with best score {}", session.board.best);
    result
}

/// Runs `body`, then `restore` whether or not `body` failed.
///
/// The body's error wins when both fail.
fn guarded<B, R>(body: B, restore: R) -> Result<()>
where
    B: FnOnce() -> Result<()>,
    R: FnOnce() -> io::Result<()>,
{
    let result = body();
    let restored = restore().context("restoring terminal");
    result.and(restored)
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(Show)?;
    raw
}

fn game_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut FlappyGame,
    session: &mut Session,
    rng: &mut StdRng,
) -> Result<()> {
    let lighting = Lighting::standard();
    let mut pixels = PixelBuffer::new(0, 0);
    let frame_time = Duration::from_millis(game.config.frame_ms);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &*game, &session.hud, &mut pixels, &lighting))?;

        // Wait for input until the next frame is due
        let timeout = frame_time.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match input::map_event(&event::read()?) {
                Some(AppInput::Quit) => break,
                Some(AppInput::ToggleMute) => session.hud.muted = session.sound.toggle(),
                Some(AppInput::Game(game_input)) => {
                    let events = game::process_input(game, game_input);
                    session.handle(&events);
                }
                None => {}
            }
        }

        // Whole milliseconds only; the fraction stays on the clock
        let elapsed_ms = last_frame.elapsed().as_millis() as u64;
        if elapsed_ms > 0 {
            last_frame += Duration::from_millis(elapsed_ms);
            let events = game::advance(game, elapsed_ms, rng);
            session.handle(&events);
        }
    }

    Ok(())
}
