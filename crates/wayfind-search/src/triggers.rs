//! Turns user input events into search triggers.
//!
//! - one trigger on start, for the initial category;
//! - an immediate trigger on every category change;
//! - free-text changes are debounced: a trigger fires only once no further
//!   text change has arrived for `debounce`. A newer change restarts the
//!   timer and the superseded text is never searched.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreEvent {
    Category(String),
    Query(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrigger {
    pub category: String,
    pub query: String,
}

/// Run until `events` closes or the trigger receiver is dropped.
///
/// A query change still waiting out its debounce when `events` closes is
/// flushed as a final trigger.
pub async fn drive_triggers(
    category: String,
    mut events: mpsc::Receiver<ExploreEvent>,
    debounce: Duration,
    triggers: mpsc::Sender<SearchTrigger>,
) {
    let mut current = SearchTrigger {
        category,
        query: String::new(),
    };
    if triggers.send(current.clone()).await.is_err() {
        return;
    }

    let mut deadline: Option<Instant> = None;
    loop {
        let timer = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        let fire = tokio::select! {
            event = events.recv() => match event {
                Some(ExploreEvent::Category(category)) => {
                    if category == current.category {
                        false
                    } else {
                        current.category = category;
                        deadline = None;
                        true
                    }
                }
                Some(ExploreEvent::Query(query)) => {
                    if query != current.query {
                        current.query = query;
                        deadline = Some(Instant::now() + debounce);
                    }
                    false
                }
                None => {
                    if deadline.is_some() {
                        let _ = triggers.send(current).await;
                    }
                    return;
                }
            },
            () = timer => {
                deadline = None;
                true
            }
        };

        if fire {
            tracing::debug!(
                category = %current.category,
                query = %current.query,
                "search triggered"
            );
            if triggers.send(current.clone()).await.is_err() {
                return;
            }
        }
    }
}
