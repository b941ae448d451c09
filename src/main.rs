use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::audio::{self, Cue, CueSink};
use grid_snake::config::{
    parse_dimension, GridSize, DEFAULT_SYMBOLS, DEFAULT_TICK_INTERVAL_MS, INPUT_POLL_INTERVAL_MS,
    MIN_TICK_INTERVAL_MS,
};
use grid_snake::game::{GameState, GameStatus, TickResult};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::symbols::SymbolTable;
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::ui::menu::outcome_text;
use tracing_subscriber::EnvFilter;

/// Idle poll used while a popup is waiting for a key.
const MENU_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells; prompted for when omitted.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells; prompted for when omitted.
    #[arg(long)]
    height: Option<u16>,

    /// Built-in symbol table (classic, blocks), a JSON file, or the name of a
    /// JSON file in the user config directory.
    #[arg(long, default_value = DEFAULT_SYMBOLS)]
    symbols: String,

    /// Milliseconds per tick.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for reproducible snake and fruit placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell cues.
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let symbols = SymbolTable::resolve(&cli.symbols)?;
    let size = resolve_grid_size(cli.width, cli.height)?;
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(size, symbols, seed)?,
        None => GameState::new(size, symbols)?,
    };
    let mut cues = audio::sink_for(cli.mute);

    let final_state = {
        let mut session = TerminalSession::enter()?;
        run(&mut session, state, cues.as_mut(), tick_interval(cli.tick_ms))?
    };

    print_summary(&final_state);
    Ok(())
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Uses the command-line size when valid, otherwise prompts until a valid
/// size is entered.
fn resolve_grid_size(width: Option<u16>, height: Option<u16>) -> io::Result<GridSize> {
    let mut width = width;
    let mut height = height;

    loop {
        let w = match width.take() {
            Some(w) => w,
            None => prompt_dimension("Width")?,
        };
        let h = match height.take() {
            Some(h) => h,
            None => prompt_dimension("Height")?,
        };

        match GridSize::validated(w, h) {
            Ok(size) => return Ok(size),
            Err(error) => eprintln!("{error}. Try again."),
        }
    }
}

fn prompt_dimension(label: &str) -> io::Result<u16> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "{label}: ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no grid size given",
            ));
        }

        match parse_dimension(&line) {
            Ok(value) => return Ok(value),
            Err(error) => eprintln!("{error}. Try again."),
        }
    }
}

fn run(
    session: &mut TerminalSession,
    mut state: GameState,
    cues: &mut dyn CueSink,
    tick_interval: Duration,
) -> io::Result<GameState> {
    let mut input = InputHandler::new();

    state.status = GameStatus::Ready;
    if !wait_for_start(session, &mut input, &state)? {
        return Ok(state);
    }
    state.status = GameStatus::Playing;
    cues.play(Cue::Start);

    loop {
        let outcome = state.begin_tick()?;
        if outcome.ate_fruit {
            cues.play(Cue::FruitEaten);
        }
        if outcome.result != TickResult::Continue {
            break;
        }

        session.draw(&state)?;
        if collect_input(session, &mut input, &mut state, tick_interval)? {
            return Ok(state);
        }
        state.finish_tick();
    }

    cues.play(Cue::GameOver);
    wait_for_exit(session, &mut input, &state)?;
    Ok(state)
}

/// Returns false when the player quits from the start screen.
fn wait_for_start(
    session: &mut TerminalSession,
    input: &mut InputHandler,
    state: &GameState,
) -> io::Result<bool> {
    loop {
        session.draw(state)?;
        match input.poll_input(MENU_POLL_INTERVAL)? {
            Some(GameInput::Confirm) => return Ok(true),
            Some(GameInput::Quit) => return Ok(false),
            _ => {}
        }
    }
}

/// Feeds input to the state until the tick window closes. Returns true on quit.
fn collect_input(
    session: &mut TerminalSession,
    input: &mut InputHandler,
    state: &mut GameState,
    window: Duration,
) -> io::Result<bool> {
    let deadline = Instant::now() + window;
    let poll_cap = Duration::from_millis(INPUT_POLL_INTERVAL_MS);

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }

        let Some(game_input) = input.poll_input(remaining.min(poll_cap))? else {
            continue;
        };

        match game_input {
            GameInput::Quit => return Ok(true),
            GameInput::Pause => {
                state.apply_input(GameInput::Pause);
                if wait_while_paused(session, input, state)? {
                    return Ok(true);
                }
            }
            other => state.apply_input(other),
        }
    }
}

/// Blocks until the pause is toggled off. Returns true on quit.
fn wait_while_paused(
    session: &mut TerminalSession,
    input: &mut InputHandler,
    state: &mut GameState,
) -> io::Result<bool> {
    loop {
        session.draw(state)?;
        match input.poll_input(MENU_POLL_INTERVAL)? {
            Some(GameInput::Quit) => return Ok(true),
            Some(GameInput::Pause) => {
                state.apply_input(GameInput::Pause);
                return Ok(false);
            }
            _ => {}
        }
    }
}

fn wait_for_exit(
    session: &mut TerminalSession,
    input: &mut InputHandler,
    state: &GameState,
) -> io::Result<()> {
    loop {
        session.draw(state)?;
        if matches!(
            input.poll_input(MENU_POLL_INTERVAL)?,
            Some(GameInput::Confirm | GameInput::Quit)
        ) {
            return Ok(());
        }
    }
}

fn print_summary(state: &GameState) {
    match state.status {
        GameStatus::GameOver | GameStatus::Victory => {
            println!("{}", outcome_text(state.status, state.death_reason));
        }
        GameStatus::Ready | GameStatus::Playing | GameStatus::Paused => {
            println!("Game abandoned.");
        }
    }
    println!("You have survived {} steps.", state.tick_count);
    println!("You have eaten {} fruits.", state.fruits_eaten);
}

fn tick_interval(requested_ms: u64) -> Duration {
    Duration::from_millis(requested_ms.max(MIN_TICK_INTERVAL_MS))
}
