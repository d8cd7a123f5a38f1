//! Terminal event handling.
//!
//! Polls keyboard input on a dedicated thread and translates key events
//! into form-session operations. Step transitions snapshot the current
//! card's answers synchronously before the submission event is sent to
//! the network thread.

use crate::app::NetworkEventSender;
use crate::document::{survey, ControlKind};
use crate::events::network::Event as NetworkEvent;
use crate::session::{FormEvent, Session};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
    net_sender: NetworkEventSender,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new(net_sender: NetworkEventSender) -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let CrosstermEvent::Key(key) = event::read().unwrap() {
                    tx_clone.send(Event::Input(key)).unwrap();
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler {
            rx,
            _tx: tx,
            net_sender,
        }
    }

    /// Receive next terminal event and handle it accordingly. Returns
    /// result with value true if should continue or false if exit was
    /// requested.
    ///
    pub fn handle_next(&self, state: &mut Session) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => match event {
                KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    debug!("Processing exit terminal event '{:?}'...", event);
                    return Ok(false);
                }
                KeyEvent {
                    code: KeyCode::Esc, ..
                } => {
                    debug!("Received escape; exiting.");
                    return Ok(false);
                }
                KeyEvent {
                    code: KeyCode::Down | KeyCode::Tab,
                    ..
                } => state.dispatch(FormEvent::FocusNext),
                KeyEvent {
                    code: KeyCode::Up | KeyCode::BackTab,
                    ..
                } => state.dispatch(FormEvent::FocusPrev),
                KeyEvent {
                    code: KeyCode::Right,
                    ..
                } => state.dispatch(FormEvent::OptionNext),
                KeyEvent {
                    code: KeyCode::Left,
                    ..
                } => state.dispatch(FormEvent::OptionPrev),
                KeyEvent {
                    code: KeyCode::Backspace,
                    ..
                } => state.dispatch(FormEvent::Backspace),
                KeyEvent {
                    code: KeyCode::PageUp,
                    ..
                } => self.retreat(state),
                KeyEvent {
                    code: KeyCode::Enter | KeyCode::PageDown,
                    ..
                } => self.advance_or_finish(state),
                KeyEvent {
                    code: KeyCode::Char(c),
                    ..
                } => self.character(state, c),
                _ => {}
            },
            Event::Tick => {}
        }
        Ok(true)
    }

    /// Characters edit the focused text or number input; the space bar
    /// toggles everything else.
    ///
    fn character(&self, state: &mut Session, c: char) {
        let editing = state
            .focused_control_id()
            .and_then(|id| state.document().control(&id).map(|c| c.kind.clone()))
            .map(|kind| matches!(kind, ControlKind::Text { .. } | ControlKind::Number { .. }))
            .unwrap_or(false);
        if editing {
            state.dispatch(FormEvent::Input(c));
        } else if c == ' ' {
            state.dispatch(FormEvent::Toggle);
        }
    }

    /// Move back one step, gated by the previous-control visibility.
    ///
    fn retreat(&self, state: &mut Session) {
        if state.nav_controls().prev_visible {
            state.dispatch(FormEvent::Retreat);
        }
    }

    /// Submit the current card's answers and move forward, gated by the
    /// next/finish-control visibility. Answers are collected before the
    /// submission event is sent.
    ///
    fn advance_or_finish(&self, state: &mut Session) {
        let controls = state.nav_controls();
        if !controls.next_visible && !(controls.finish_visible && !state.finished()) {
            return;
        }
        if let Some(event) = self.submission_for_current_card(state) {
            if let Err(e) = self.net_sender.send(event) {
                error!("Failed to queue submission: {}", e);
                return;
            }
        }
        if controls.next_visible {
            state.dispatch(FormEvent::Advance);
        } else {
            state.set_finished();
            info!("Formulari finalitzat. Gràcies per participar!");
        }
    }

    fn submission_for_current_card(&self, state: &Session) -> Option<NetworkEvent> {
        let card_id = state.current_card().map(|c| c.id.clone())?;
        match card_id.as_str() {
            survey::OVERVIEW_CARD => Some(NetworkEvent::SubmitOverview(state.overview_payload())),
            survey::SOCIOECONOMIC_CARD => match state.dimension_payload(&card_id) {
                Ok(payload) => Some(NetworkEvent::SubmitSocioeconomic(payload)),
                Err(e) => {
                    error!("Failed to collect socioeconomic answers: {}", e);
                    None
                }
            },
            survey::ENVIRONMENT_CARD => match state.dimension_payload(&card_id) {
                Ok(payload) => Some(NetworkEvent::SubmitEnvironment(payload)),
                Err(e) => {
                    error!("Failed to collect environment answers: {}", e);
                    None
                }
            },
            other => {
                warn!("No submission endpoint for card '{}'.", other);
                None
            }
        }
    }
}
