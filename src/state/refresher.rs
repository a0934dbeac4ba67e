use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic backend health probe, every 30 seconds.
/// The startup probe is sent by `AppStarted`, not from here.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests, period: Duration::from_secs(30) }
    }

    pub async fn run(self) {
        let mut health_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        health_interval.tick().await;

        loop {
            health_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::CheckHealth)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
