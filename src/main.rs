use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;

mod api;
mod app;
mod config;
mod error;
mod layout;
mod quote;
mod suggest;
mod widgets;

use app::App;

/// Interactive stock ticker lookup
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Interactive stock ticker lookup with live symbol suggestions"
)]
struct Args {
    /// Ticker or company name to look up on startup
    ticker: Option<String>,
}

fn main() -> Result<()> {
    // Writes to /tmp/tiq-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/tiq-debug.log")
            .expect("Failed to open /tmp/tiq-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== TIQ DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let config_result = config::load_config();
    let args = Args::parse();

    let terminal = init_terminal()?;
    let result = run(terminal, &config_result, args.ticker);
    restore_terminal()?;
    result?;

    #[cfg(debug_assertions)]
    log::debug!("=== TIQ DEBUG SESSION ENDED ===");

    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, bracketed paste,
/// and mouse capture
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(
        stdout(),
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    ) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(
                stdout(),
                DisableMouseCapture,
                DisableBracketedPaste,
                LeaveAlternateScreen
            );
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(
        stdout(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    );
    disable_raw_mode()?;
    Ok(())
}

fn run(
    mut terminal: DefaultTerminal,
    config_result: &config::ConfigResult,
    initial_ticker: Option<String>,
) -> Result<()> {
    let mut app = App::new(&config_result.config);

    if let Some(warning) = &config_result.warning {
        app.status = Some(warning.clone());
    }

    // Spawn the API worker and wire up its channels
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    app.set_channels(request_tx, response_rx);
    api::spawn_worker(
        config_result.config.api.base_url.clone(),
        request_rx,
        response_tx,
    );

    if let Some(ticker) = initial_ticker {
        app.input.set_value(&ticker);
        app.run_quote_lookup();
    }

    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
