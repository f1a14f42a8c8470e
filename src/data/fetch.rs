use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use super::error::IngestError;
use super::model::{DataSource, LoadOutcome};
use super::pipeline;

/// Build the HTTP client used for the CSV download.
pub fn build_client(timeout: Duration) -> Result<Client, IngestError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(IngestError::from)
}

/// GET `url` and return the body. Any non-2xx status is an error carrying
/// the status code.
pub fn fetch_csv(client: &Client, url: &str) -> Result<String, IngestError> {
    log::info!("Fetching hotspot CSV from {url}");
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::from_status(status));
    }
    Ok(response.text()?)
}

/// Run one remote load on a background thread.
///
/// The outcome (live or fallback) arrives on the returned channel; `notify`
/// is called right after it is sent so the UI can wake up.
pub fn spawn_load<F>(url: String, timeout: Duration, notify: F) -> Receiver<LoadOutcome>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let fetched = build_client(timeout).and_then(|client| fetch_csv(&client, &url));
        let outcome = pipeline::load_with_fallback(fetched, DataSource::Live);
        if tx.send(outcome).is_err() {
            log::warn!("Load finished after the viewer went away");
        }
        notify();
    });
    rx
}
