//! Terminal base-ten blocks (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `base-ten-term`
//! (no widget library). Logging goes to `BLOCKS_LOG_PATH` when set, since the
//! terminal itself is taken over by the board.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use base_ten_blocks::app::App;
use base_ten_blocks::config::AppConfig;
use base_ten_blocks::input::should_quit;
use base_ten_blocks::term::{FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use base_ten_blocks::types::FRAME_MS;

/// Poll interval while nothing moves.
const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config, Viewport::new(w, h));
    let mut fb = FrameBuffer::new(w, h);
    let mut throttle = RenderThrottle::new(IDLE_POLL_MS * 4);

    loop {
        let now = now_ms();
        app.tick(now);

        let fingerprint = app.render_into(now, &mut fb);
        if throttle.should_render(now, fingerprint, !app.is_animating()) {
            term.draw_swap(&mut fb)?;
            app.frame_drawn(now);
        }

        let timeout = if app.is_animating() {
            Duration::from_millis(FRAME_MS as u64)
        } else {
            Duration::from_millis(IDLE_POLL_MS)
        };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                app.handle_key(key, now_ms());
            }
            Event::Mouse(mouse) => {
                app.handle_mouse(mouse, now_ms());
            }
            Event::Resize(w, h) => {
                app.resize(Viewport::new(w, h));
                term.invalidate();
            }
            _ => {}
        }
    }
}
