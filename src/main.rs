mod ui;

use blazing_runner::audio::{CuePlayer, SilentCuePlayer};
use blazing_runner::build_info;
use blazing_runner::config::RunnerConfig;
use blazing_runner::constants::*;
use blazing_runner::high_score::JsonScoreStore;
use blazing_runner::input::{handle_input, map_event, InputResult};
use blazing_runner::runner::RunnerSession;
use blazing_runner::utils::logging::init_file_logger;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

type Session = RunnerSession<Box<dyn CuePlayer>, JsonScoreStore>;

/// Command line switches that survive past argument parsing.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    seed: Option<u64>,
    mute: bool,
    reset_high_score: bool,
}

fn print_help() {
    println!("Blazing Runner - Terminal Endless Runner\n");
    println!("Usage: blazing-runner [options]\n");
    println!("Options:");
    println!("  --seed <n>          Use a fixed obstacle seed");
    println!("  --mute              Disable sound cues");
    println!("  --reset-high-score  Clear the stored high score and exit");
    println!("  --version           Show version information");
    println!("  --help              Show this help message");
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--mute" => options.mute = true,
            "--reset-high-score" => options.reset_high_score = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(options)
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("--version") | Some("-v") => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Some("--help") | Some("-h") => {
            print_help();
            std::process::exit(0);
        }
        _ => {}
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'blazing-runner --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_file_logger() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    if options.reset_high_score {
        let mut store = JsonScoreStore::new()?;
        store.clear()?;
        println!("High score cleared ({}).", store.path().display());
        return Ok(());
    }

    let mut session = build_session(&options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, &options);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        log::error!("Game loop failed: {}", e);
    }
    log::info!("Goodbye (best {})", session.high_score);
    result
}

/// Main loop: draw, drain input, tick on the realtime cadence.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session,
    options: &CliOptions,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(REALTIME_FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            ui::runner_scene::render_runner_scene(frame, area, session);
        })?;

        let mut action = InputResult::Continue;
        while action == InputResult::Continue
            && event::poll(Duration::from_millis(INPUT_POLL_MS))?
        {
            if let Some(input) = map_event(&event::read()?) {
                action = handle_input(session, input);
            }
        }

        match action {
            InputResult::Quit => return Ok(()),
            InputResult::Reload => {
                // Full reload: config, store and audio are all rebuilt
                *session = build_session(options)?;
                last_tick = Instant::now();
                continue;
            }
            InputResult::Continue => {}
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame_interval {
            session.tick(elapsed);
            last_tick = Instant::now();
        }
    }
}

/// Build a fresh session from disk state and CLI overrides.
fn build_session(options: &CliOptions) -> io::Result<Session> {
    let mut config = RunnerConfig::load();
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    let scores = JsonScoreStore::new()?;
    let audio = build_audio(options.mute);
    Ok(RunnerSession::new(config, audio, scores))
}

/// Pick the cue player: rodio when compiled in and available, else silent.
fn build_audio(mute: bool) -> Box<dyn CuePlayer> {
    if mute {
        log::info!("Audio muted");
        return Box::new(SilentCuePlayer);
    }

    #[cfg(feature = "audio")]
    {
        let opened = blazing_runner::utils::persistence::save_path(ASSET_DIR)
            .map_err(|e| e.to_string())
            .and_then(|dir| {
                blazing_runner::audio::RodioCuePlayer::new(&dir).map_err(|e| e.to_string())
            });
        match opened {
            Ok(player) => return Box::new(player),
            Err(e) => log::warn!("Audio output unavailable, running silent: {}", e),
        }
    }

    #[cfg(not(feature = "audio"))]
    log::debug!("Built without audio support");

    Box::new(SilentCuePlayer)
}
