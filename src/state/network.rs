use crate::state::messages::{NetworkRequest, NetworkResponse};
use game2match_api::client::RecommendApi;
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Outcome of the most recently dispatched recommendation.
///
/// The spinner stops when the last in-flight request finishes, which may be a
/// stale one; its final glyph comes from here instead.
#[derive(Debug, Default)]
pub struct LatestOutcome {
    seq: AtomicU64,
    ok: AtomicBool,
}

impl LatestOutcome {
    pub fn dispatched(&self, seq: u64) {
        if self.seq.fetch_max(seq, Ordering::SeqCst) <= seq {
            self.ok.store(true, Ordering::SeqCst);
        }
    }

    /// Records `ok` only when `seq` is still the latest dispatch.
    pub fn finished(&self, seq: u64, ok: bool) {
        if self.seq.load(Ordering::SeqCst) == seq {
            self.ok.store(ok, Ordering::SeqCst);
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok.load(Ordering::SeqCst)
    }
}

/// Receives requests from the UI and answers on the response channel.
///
/// Every recommendation request runs on its own task, so a second submit never
/// waits behind the first. Ordering is sorted out by the receiver using `seq`.
pub struct NetworkWorker {
    client: RecommendApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    latest: Arc<LatestOutcome>,
}

impl NetworkWorker {
    pub fn new(
        client: RecommendApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
            latest: Arc::new(LatestOutcome::default()),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            match request {
                NetworkRequest::Recommend { seq, prompt, contract } => {
                    let client = self.client.clone();
                    let responses = self.responses.clone();
                    let in_flight = self.in_flight.clone();
                    let latest = self.latest.clone();
                    latest.dispatched(seq);
                    start_loading_animation(&responses, &in_flight).await;
                    tokio::spawn(async move {
                        debug!("dispatching recommendation #{seq}");
                        let response = match client.recommend(&prompt, contract).await {
                            Ok(recommendations) => {
                                debug!(
                                    "recommendation #{seq} returned {} games",
                                    recommendations.results.len()
                                );
                                NetworkResponse::RecommendationsLoaded { seq, recommendations }
                            }
                            Err(e) => {
                                error!("recommendation #{seq} failed: {e}");
                                NetworkResponse::RecommendationsFailed { seq, message: e.to_string() }
                            }
                        };
                        let is_ok = matches!(response, NetworkResponse::RecommendationsLoaded { .. });
                        latest.finished(seq, is_ok);
                        stop_loading_animation(&responses, &in_flight, latest.is_ok()).await;
                        if let Err(e) = responses.send(response).await {
                            error!("Failed to send network response: {e}");
                        }
                    });
                }
                NetworkRequest::CheckHealth => {
                    let client = self.client.clone();
                    let responses = self.responses.clone();
                    tokio::spawn(async move {
                        let health = match client.health().await {
                            Ok(health) => Some(health),
                            Err(e) => {
                                warn!("health check failed: {e}");
                                None
                            }
                        };
                        let _ = responses.send(NetworkResponse::HealthChecked { health }).await;
                    });
                }
            }
        }
    }
}

async fn start_loading_animation(responses: &mpsc::Sender<NetworkResponse>, in_flight: &Arc<AtomicUsize>) {
    // Only the first concurrent request starts a spinner task.
    if in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
        return;
    }

    let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state })
        .await;

    let responses = responses.clone();
    let in_flight = in_flight.clone();

    tokio::spawn(async move {
        let mut spinner_index = 1;
        let mut interval = tokio::time::interval(Duration::from_millis(33));
        loop {
            interval.tick().await;
            if in_flight.load(Ordering::SeqCst) == 0 {
                break;
            }
            loading_state.spinner_char = SPINNER_CHARS[spinner_index];
            spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
            let _ = responses
                .send(NetworkResponse::LoadingStateChanged { loading_state })
                .await;
        }
    });
}

async fn stop_loading_animation(
    responses: &mpsc::Sender<NetworkResponse>,
    in_flight: &Arc<AtomicUsize>,
    is_ok: bool,
) {
    if in_flight.fetch_sub(1, Ordering::SeqCst) > 1 {
        return;
    }
    tokio::time::sleep(Duration::from_millis(15)).await;

    let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged {
            loading_state: LoadingState { is_loading: false, spinner_char },
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_failure_does_not_override_latest_success() {
        let latest = LatestOutcome::default();
        latest.dispatched(1);
        latest.dispatched(2);
        latest.finished(2, true);
        latest.finished(1, false);
        assert!(latest.is_ok());
    }

    #[test]
    fn latest_failure_is_kept_after_stale_success() {
        let latest = LatestOutcome::default();
        latest.dispatched(1);
        latest.dispatched(2);
        latest.finished(2, false);
        latest.finished(1, true);
        assert!(!latest.is_ok());
    }

    #[test]
    fn new_dispatch_clears_previous_failure() {
        let latest = LatestOutcome::default();
        latest.dispatched(1);
        latest.finished(1, false);
        latest.dispatched(2);
        assert!(latest.is_ok());
    }

    #[tokio::test]
    async fn unreachable_backend_reports_failure_with_matching_seq() {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let client = RecommendApi::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let worker = tokio::spawn(NetworkWorker::new(client, req_rx, resp_tx).run());

        req_tx
            .send(NetworkRequest::Recommend {
                seq: 7,
                prompt: "cozy".into(),
                contract: Default::default(),
            })
            .await
            .unwrap();

        let mut saw_failure = false;
        let mut last_loading = None;
        while let Some(response) = resp_rx.recv().await {
            match response {
                NetworkResponse::RecommendationsFailed { seq, message } => {
                    assert_eq!(seq, 7);
                    assert!(!message.is_empty());
                    saw_failure = true;
                    break;
                }
                NetworkResponse::LoadingStateChanged { loading_state } => {
                    last_loading = Some(loading_state);
                }
                other => panic!("unexpected response {other:?}"),
            }
        }

        assert!(saw_failure);
        let last_loading = last_loading.expect("spinner state should have been reported");
        assert!(!last_loading.is_loading);
        assert_eq!(last_loading.spinner_char, ERROR_CHAR);
        worker.abort();
    }
}
