//! Command-line driver for the record view engine.
//!
//! Loads a JSON array of records, applies the requested filter, sort, and page,
//! and prints the resulting view model as JSON.
//!
//! # Usage
//!
//! ```text
//! recordview <records.json> [key=value ...]
//! ```
//!
//! # Keys
//!
//! Configuration (see [`Config::from_map`]):
//! - `page_size`, `initial_page`, `id_field`, `trace_level`
//! - `config`: path to a TOML configuration file, used instead of the keys above
//!
//! Query:
//! - `filter.<field>=<value>`: equality constraint, repeatable
//! - `sort=<field>`: sort field
//! - `direction=asc|desc`: sort direction (default `asc`)
//! - `kind=default|chronological`: comparator kind (default: column kind)
//! - `page=<n>`: requested page
//!
//! # Example
//!
//! ```text
//! recordview events.json filter.event=birth sort=date kind=chronological page=1
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::process::ExitCode;

use recordview::{
    handle_event, Config, Event, FieldConstraint, RecordStore, RecordViewError, Result,
    SortDirection, SortKind, ViewController,
};

/// Parsed command line.
struct Invocation {
    records_path: String,
    options: BTreeMap<String, String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Invocation> {
    let mut records_path = None;
    let mut options = BTreeMap::new();

    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                options.insert(key.trim().to_string(), value.to_string());
            }
            None if records_path.is_none() => records_path = Some(arg),
            None => {
                return Err(RecordViewError::Config(format!(
                    "unexpected argument: {arg}"
                )))
            }
        }
    }

    let records_path = records_path.ok_or_else(|| {
        RecordViewError::Config("usage: recordview <records.json> [key=value ...]".to_string())
    })?;

    Ok(Invocation {
        records_path,
        options,
    })
}

fn parse_direction(text: &str) -> Result<SortDirection> {
    match text.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortDirection::Asc),
        "desc" | "descending" => Ok(SortDirection::Desc),
        other => Err(RecordViewError::Config(format!("unknown direction: {other}"))),
    }
}

fn parse_kind(text: &str) -> Result<SortKind> {
    match text.to_ascii_lowercase().as_str() {
        "default" => Ok(SortKind::Default),
        "chronological" | "date" => Ok(SortKind::Chronological),
        other => Err(RecordViewError::Config(format!("unknown sort kind: {other}"))),
    }
}

/// Translates query options into controller events, in filter → sort → page order.
fn query_events(options: &BTreeMap<String, String>) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = options
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix("filter.")
                .map(|field| Event::FilterChanged(FieldConstraint::new(field, value.as_str())))
        })
        .collect();

    if let Some(field) = options.get("sort") {
        let direction = options
            .get("direction")
            .map_or(Ok(SortDirection::Asc), |d| parse_direction(d))?;
        let kind = options.get("kind").map(|k| parse_kind(k)).transpose()?;
        events.push(Event::SortChanged {
            field: field.clone(),
            direction,
            kind,
        });
    }

    if let Some(page) = options.get("page") {
        let page = page
            .trim()
            .parse::<usize>()
            .map_err(|e| RecordViewError::Config(format!("invalid page {page:?}: {e}")))?;
        events.push(Event::PageChanged(page));
    }

    Ok(events)
}

fn run() -> Result<()> {
    let invocation = parse_args(std::env::args().skip(1))?;

    let config = match invocation.options.get("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::from_map(&invocation.options),
    };
    recordview::observability::init_tracing(&config);

    let _span = tracing::debug_span!("recordview", path = %invocation.records_path).entered();

    let store = RecordStore::from_json_file(&invocation.records_path)?;
    tracing::debug!(count = store.len(), "records loaded");

    let mut controller = ViewController::builder(store.into_records())
        .config(&config)
        .build()?;

    for event in query_events(&invocation.options)? {
        let (_, actions) = handle_event(&mut controller, &event);
        if !actions.is_empty() {
            tracing::debug!(?actions, "actions raised");
        }
    }

    let view = controller.compute_viewmodel();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("recordview: {e}");
            ExitCode::FAILURE
        }
    }
}
