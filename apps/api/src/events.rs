//! Live update fan-out.
//!
//! Every connected `/stream` client holds its own receiver on a broadcast channel.
//! Publishing is best-effort: no subscribers is fine, a client that disconnects
//! mid-publish is fine, and a client that falls behind skips the missed events.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::state::AppState;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEvent {
    ResumeUploaded {
        resume_id: i64,
        filename: String,
        saved_filename: String,
    },
    RoadmapUpdated {
        resume_id: i64,
    },
    InterviewUpdated {
        resume_id: i64,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SkillEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(CHANNEL_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Registers a new client channel. Dropping the receiver unregisters it.
    pub fn subscribe(&self) -> broadcast::Receiver<SkillEvent> {
        self.tx.subscribe()
    }

    /// Sends `event` to every currently registered client; returns how many there were.
    pub fn publish(&self, event: SkillEvent) -> usize {
        match self.tx.send(event) {
            Ok(delivered) => {
                debug!("Published event to {delivered} subscriber(s)");
                delivered
            }
            Err(_) => 0, // no subscribers
        }
    }
}

/// GET /api/v1/stream
/// Server-Sent Events: one `data:` line of JSON per published event.
pub async fn handle_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(event_stream(state.events.subscribe())).keep_alive(KeepAlive::default())
}

fn event_stream(
    rx: broadcast::Receiver<SkillEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(data) => return Some((Ok(Event::default().data(data)), rx)),
                    Err(e) => warn!("Dropping unserializable event: {e}"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Stream client lagged, skipped {skipped} event(s)");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}
