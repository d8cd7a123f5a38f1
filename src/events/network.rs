//! Network event handling.
//!
//! Submissions never block the UI thread: the terminal handler snapshots
//! the answers synchronously, sends an event over the channel, and the
//! handler running on the network thread performs the request. Failed
//! requests are logged by the API layer and leave the session untouched.

use crate::api::SurveyApi;
use crate::session::{DimensionPayload, OverviewPayload, Session};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    /// Fetch the CSRF token, register the fingerprint and restore any
    /// previously saved answers
    Initialize,
    SubmitOverview(OverviewPayload),
    SubmitSocioeconomic(DimensionPayload),
    SubmitEnvironment(DimensionPayload),
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<Session>>,
    api: &'a mut SurveyApi,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<Session>>, api: &'a mut SurveyApi) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Initialize => self.initialize().await,
            Event::SubmitOverview(payload) => self.submit_overview(payload).await,
            Event::SubmitSocioeconomic(payload) => self.submit_socioeconomic(payload).await,
            Event::SubmitEnvironment(payload) => self.submit_environment(payload).await,
        }
        Ok(())
    }

    /// Acquire the CSRF token, register the fingerprint and restore any
    /// answers the server kept for it.
    ///
    async fn initialize(&mut self) {
        info!("Preparing session with the survey server...");
        if !self.api.acquire_csrf_token().await {
            warn!("Continuing without a CSRF token; submissions will fail until the server is reachable.");
            return;
        }

        let fingerprint = {
            let state = self.state.lock().await;
            state.fingerprint().to_owned()
        };

        if let Some(outcome) = self.api.save_fingerprint(&fingerprint).await {
            if outcome.new {
                info!("Fingerprint registered for the first time.");
            } else {
                debug!("Fingerprint was already registered.");
            }
        }

        if let Some(status) = self.api.check_fingerprint(&fingerprint).await {
            let mut state = self.state.lock().await;
            state.set_registered(status.registered);
            if let Some(form) = status.form {
                info!("Restoring previously saved answers...");
                state.restore_form(&form);
                info!("Saved answers restored.");
            }
        }
    }

    /// Persist the overview answers.
    ///
    async fn submit_overview(&mut self, payload: OverviewPayload) {
        if let Some(response) = self.api.update_overview(&payload).await {
            info!("{}", response.message);
        }
    }

    /// Persist the socioeconomic dimension answers.
    ///
    async fn submit_socioeconomic(&mut self, payload: DimensionPayload) {
        if let Some(response) = self.api.update_socioeconomic_dimension(&payload).await {
            info!("{}", response.message);
        }
    }

    /// Persist the environment dimension answers.
    ///
    async fn submit_environment(&mut self, payload: DimensionPayload) {
        if let Some(response) = self.api.update_environment_dimension(&payload).await {
            info!("{}", response.message);
        }
    }
}
