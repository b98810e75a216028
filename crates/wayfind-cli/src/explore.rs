//! Interactive explore loop.
//!
//! Each stdin line is either a command (`:c <id>` switches category, `:q`
//! quits) or the new free-text name filter. Input events feed the trigger
//! driver; every trigger becomes a search task, and a result is rendered
//! only if it is still the newest one published when its task completes.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use wayfind_core::{AppConfig, Coordinate};
use wayfind_search::{
    drive_triggers, ExploreEvent, SearchError, SearchOutcome, SearchSession, SearchTrigger,
};

use crate::render;
use crate::search::{build_session, resolve_location};

#[derive(Debug, PartialEq, Eq)]
enum InputLine {
    Event(ExploreEvent),
    Quit,
}

fn parse_line(line: &str) -> Option<InputLine> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix(':') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().unwrap_or_default().trim();
        return match command {
            "q" | "quit" => Some(InputLine::Quit),
            "c" | "category" if !arg.is_empty() => {
                Some(InputLine::Event(ExploreEvent::Category(arg.to_string())))
            }
            _ => None,
        };
    }
    Some(InputLine::Event(ExploreEvent::Query(line.to_string())))
}

async fn read_input(events: mpsc::Sender<ExploreEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                break;
            }
        };
        match parse_line(&line) {
            Some(InputLine::Event(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Some(InputLine::Quit) => break,
            None => eprintln!("commands: :c <category>  :q"),
        }
    }
}

type Finished = (SearchTrigger, Result<SearchOutcome, SearchError>);

fn report(session: &SearchSession, joined: Result<Finished, JoinError>) {
    let (trigger, result) = match joined {
        Ok(finished) => finished,
        Err(e) => {
            tracing::error!(error = %e, "search task failed");
            return;
        }
    };
    match result {
        Ok(SearchOutcome::Published { seq, count }) => {
            let snapshot = session.snapshot();
            if snapshot.published_seq != seq {
                return;
            }
            tracing::debug!(seq, count, "rendering results");
            println!("-- {} {:?}", trigger.category, trigger.query);
            println!("{}", render::places(&trigger.category, &snapshot.places));
        }
        Ok(SearchOutcome::Superseded { seq }) => {
            tracing::debug!(
                seq,
                category = %trigger.category,
                "discarded superseded response"
            );
        }
        Ok(SearchOutcome::NoLocation) => {
            tracing::warn!("no position available; search skipped");
        }
        Err(e) => eprintln!("{}", e.user_message()),
    }
}

/// Run the interactive loop until stdin closes or the user quits.
///
/// # Errors
///
/// Returns an error if the Overpass client or the geolocator cannot be
/// constructed.
pub(crate) async fn run_explore(
    config: &AppConfig,
    category: String,
    at: Option<Coordinate>,
) -> anyhow::Result<()> {
    let located = resolve_location(config, at).await?;
    eprintln!("{}", render::status_line(&located));

    let session = Arc::new(build_session(config)?);
    session.set_location(located);

    let (event_tx, event_rx) = mpsc::channel(32);
    let (trigger_tx, mut trigger_rx) = mpsc::channel(8);
    let debounce = Duration::from_millis(config.debounce_ms);
    tokio::spawn(drive_triggers(category, event_rx, debounce, trigger_tx));
    tokio::spawn(read_input(event_tx));

    let mut searches: JoinSet<Finished> = JoinSet::new();
    loop {
        tokio::select! {
            trigger = trigger_rx.recv() => {
                let Some(trigger) = trigger else { break };
                let session = Arc::clone(&session);
                searches.spawn(async move {
                    let result = session.search(&trigger.category, &trigger.query).await;
                    (trigger, result)
                });
            }
            Some(joined) = searches.join_next() => report(&session, joined),
        }
    }

    while let Some(joined) = searches.join_next().await {
        report(&session, joined);
    }
    Ok(())
}
