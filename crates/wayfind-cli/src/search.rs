//! One-shot command handlers: `categories`, `search`, `locate`.

use wayfind_core::{categories, AppConfig, CategoryGroup, Coordinate};
use wayfind_overpass::OverpassClient;
use wayfind_search::{acquire, FixedLocation, IpApiLocator, Located, SearchSession, SessionSettings};

use crate::render;

/// Resolve the search origin.
///
/// Precedence: `--at`, then `WAYFIND_LOCATION`, then the IP lookup when
/// `WAYFIND_GEOLOCATION_URL` is set. With none of those the position is
/// unavailable and the configured fallback is used.
pub(crate) async fn resolve_location(
    config: &AppConfig,
    at: Option<Coordinate>,
) -> anyhow::Result<Located> {
    let fallback = config.fallback_location;
    if let Some(fixed) = at.or(config.location) {
        return Ok(acquire(&FixedLocation(Some(fixed)), fallback).await);
    }
    match config.geolocation_url.as_deref() {
        Some(url) => {
            let locator = IpApiLocator::new(url, config.request_timeout_secs, &config.user_agent)?;
            Ok(acquire(&locator, fallback).await)
        }
        None => Ok(acquire(&FixedLocation(None), fallback).await),
    }
}

pub(crate) fn build_session(config: &AppConfig) -> anyhow::Result<SearchSession> {
    let client = OverpassClient::with_endpoint(
        &config.overpass_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Overpass client: {e}"))?;
    let settings = SessionSettings::from_config(config);
    Ok(SearchSession::new(client, settings))
}

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn run_categories(group: Option<CategoryGroup>) -> anyhow::Result<()> {
    let groups: Vec<CategoryGroup> = match group {
        Some(g) => vec![g],
        None => CategoryGroup::ALL.to_vec(),
    };
    for g in groups {
        println!("{g}");
        for category in categories::by_group(g) {
            println!("{}", render::category_line(category));
        }
    }
    Ok(())
}

/// Run a single search cycle and print the published places.
///
/// # Errors
///
/// Returns an error for an unknown category or a failed upstream request;
/// the user-facing message is printed to stderr first.
pub(crate) async fn run_search(
    config: &AppConfig,
    category: &str,
    query: &str,
    at: Option<Coordinate>,
    json: bool,
) -> anyhow::Result<()> {
    let located = resolve_location(config, at).await?;
    let session = build_session(config)?;
    session.set_location(located);

    if let Err(e) = session.search(category, query).await {
        eprintln!("{}", e.user_message());
        return Err(e.into());
    }

    let snapshot = session.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.places)?);
    } else {
        eprintln!("{}", render::status_line(&located));
        println!("{}", render::places(category, &snapshot.places));
    }
    Ok(())
}

pub(crate) async fn run_locate(config: &AppConfig, at: Option<Coordinate>) -> anyhow::Result<()> {
    let located = resolve_location(config, at).await?;
    println!("{}", render::status_line(&located));
    Ok(())
}
