use crate::api::{fingerprint, SurveyApi};
use crate::config::Config;
use crate::document::survey;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{BufferLogger, LogBuffer};
use crate::session::Session;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<Session>>,
    config: Config,
    log_buffer: LogBuffer,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(mut config: Config) -> Result<()> {
        let log_buffer: LogBuffer = Arc::new(std::sync::Mutex::new(vec![]));
        log::set_boxed_logger(Box::new(BufferLogger::new(Arc::clone(&log_buffer))))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(LevelFilter::Info);

        info!("Starting application...");
        let raw_fingerprint = match config.fingerprint.clone() {
            Some(fingerprint) => fingerprint,
            None => {
                let fingerprint = fingerprint::generate();
                config.store_fingerprint(fingerprint.clone())?;
                info!("Generated a new fingerprint identifier.");
                fingerprint
            }
        };
        let session = Session::new(survey::default_survey(), fingerprint::hash(&raw_fingerprint))?;

        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let mut app = App {
            state: Arc::new(Mutex::new(session)),
            config,
            log_buffer,
        };
        app.start_network(rx);
        app.start_ui(tx).await?;

        // Save config on exit
        if let Err(e) = app.config.save() {
            error!("Failed to save config on exit: {}", e);
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let server_url = self.config.server_url.clone();
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let mut api = SurveyApi::new(&server_url);
                    let mut network_event_handler =
                        NetworkEventHandler::new(&cloned_state, &mut api);
                    while let Ok(network_event) = net_receiver.recv() {
                        match network_event_handler.handle(network_event).await {
                            Ok(_) => (),
                            Err(e) => error!("Failed to handle network event: {}", e),
                        }
                    }
                })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&mut self, net_sender: NetworkEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        net_sender.send(NetworkEvent::Initialize)?;

        let terminal_event_handler = TerminalEventHandler::new(net_sender);
        loop {
            let mut state = self.state.lock().await;
            let log_lines = match self.log_buffer.lock() {
                Ok(buffer) => buffer.clone(),
                Err(_) => vec![],
            };
            terminal.draw(|frame| crate::ui::render(frame, &state, &log_lines))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;

        Ok(())
    }
}
