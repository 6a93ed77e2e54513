// engine/src/report/http.rs
#![forbid(unsafe_code)]

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use thiserror::Error;

use crate::engine::{ReportConfig, SessionReport};

use super::base::{RewardOutcome, ScorePayload, ScoreReporter, ScoreResponse};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("score endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("score endpoint answered HTTP {0}")]
    Status(u16),
}

/// Posts reports to the score-saving endpoint.
///
/// Each submission runs on its own worker thread; the outcome comes back over a channel.
/// Any failure (connect, timeout, HTTP status, malformed body) is logged and turned into
/// `RewardOutcome::fallback()`.
pub struct HttpReporter {
    client: Client,
    endpoint: String,
    pending: Option<Receiver<RewardOutcome>>,
    last: Option<RewardOutcome>,
}

impl HttpReporter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ReportError> {
        let client = Client::builder()
            .user_agent(concat!("snake_engine/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Uses a caller-built client (proxy, TLS or timeout settings of its own).
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            pending: None,
            last: None,
        }
    }

    /// `Ok(None)` when the config has no endpoint.
    pub fn from_config(cfg: &ReportConfig) -> Result<Option<Self>, ReportError> {
        match &cfg.endpoint {
            Some(url) => Self::new(url.clone(), cfg.timeout()).map(Some),
            None => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn post(
        client: &Client,
        endpoint: &str,
        payload: &ScorePayload,
    ) -> Result<RewardOutcome, ReportError> {
        let resp = client
            .post(endpoint)
            .header("X-Requested-With", "XMLHttpRequest")
            .json(payload)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }

        let body: ScoreResponse = resp.json()?;
        Ok(body.into_outcome())
    }

    fn settle(&mut self, outcome: RewardOutcome) -> Option<RewardOutcome> {
        self.pending = None;
        self.last = Some(outcome);
        self.last
    }
}

impl ScoreReporter for HttpReporter {
    fn submit(&mut self, report: &SessionReport) {
        let payload = ScorePayload::from(report);
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let outcome = match Self::post(&client, &endpoint, &payload) {
                Ok(o) => {
                    info!(
                        "score saved: score={} items={} accepted={} coins={}",
                        payload.score, payload.items_collected, o.accepted, o.coins
                    );
                    o
                }
                Err(e) => {
                    warn!("score submission to {endpoint} failed: {e}");
                    RewardOutcome::fallback()
                }
            };
            // Receiver may be gone if the reporter was dropped; nothing to do then.
            let _ = tx.send(outcome);
        });

        self.pending = Some(rx);
        self.last = None;
    }

    fn outcome(&mut self) -> Option<RewardOutcome> {
        let polled = match &self.pending {
            None => return self.last,
            Some(rx) => rx.try_recv(),
        };
        match polled {
            Ok(o) => self.settle(o),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.settle(RewardOutcome::fallback()),
        }
    }

    fn wait_outcome(&mut self, timeout: Duration) -> Option<RewardOutcome> {
        let polled = match &self.pending {
            None => return self.last,
            Some(rx) => rx.recv_timeout(timeout),
        };
        match polled {
            Ok(o) => self.settle(o),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => self.settle(RewardOutcome::fallback()),
        }
    }
}
