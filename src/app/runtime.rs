//! TUI runtime for reply-pro
//!
//! The UI thread owns all state. Generation runs on tokio tasks that report
//! back through an `mpsc` channel drained once per frame.

use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::reply::ReplyGenerator;
use crate::ui;
use crate::ui::result::SystemClipboard;
use crate::ui::App;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI until the user quits
pub async fn run_tui(generator: Arc<dyn ReplyGenerator>, model: String) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    // Without this, Shift+Enter is indistinguishable from Enter
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(model, Box::new(SystemClipboard::new()));
    let (tx, rx) = mpsc::channel::<BackgroundMessage>();

    tracing::info!(model = %app.model, keyboard_enhanced, "session started");
    let result = run_loop(&mut terminal, &mut app, rx, tx, generator);

    // Restore terminal
    if keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    tracing::info!("session ended");
    result
}

/// Main event loop with background message handling
fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<BackgroundMessage>,
    tx: mpsc::Sender<BackgroundMessage>,
    generator: Arc<dyn ReplyGenerator>,
) -> Result<()> {
    let ctx = RuntimeContext {
        generator,
        tx: &tx,
    };

    loop {
        // Spinner, copy confirmations, toasts
        app.tick();

        // Check for background messages (non-blocking)
        background::drain_messages(app, &rx);

        terminal.draw(|f| ui::render(f, app))?;

        // Poll for events with fast timeout (snappy animations)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    input::handle_key_event(app, key, &ctx)?;
                }
                Event::Paste(text) => input::handle_paste_event(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
