use crate::models::FloorplanRecord;
use crate::notify::MessageSink;
use chrono::Utc;
use std::time::Duration;
use tracing::{info, warn};

/// Delay before the first cycle, once the destination is known to be reachable
pub const INITIAL_DELAY: Duration = Duration::from_secs(5);

/// Re-announces a fixed shortlist to one destination on a fixed interval
pub struct Announcer<S> {
    sink: S,
    plans: Vec<FloorplanRecord>,
    interval: Duration,
    initial_delay: Duration,
}

impl<S: MessageSink> Announcer<S> {
    pub fn new(sink: S, plans: Vec<FloorplanRecord>, interval: Duration) -> Self {
        Self {
            sink,
            plans,
            interval,
            initial_delay: INITIAL_DELAY,
        }
    }

    /// Send every plan once, in order, as its own message. Returns how many were delivered.
    ///
    /// A failed send is logged and skipped; it is not retried.
    pub async fn announce(&self) -> usize {
        let mut delivered = 0;
        for plan in &self.plans {
            match self.sink.send(&plan.to_string()).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Failed to announce {:?}: {:#}", plan.title, e),
            }
        }
        delivered
    }

    /// Announce forever. Only ends when the process does.
    pub async fn run(self) {
        info!(
            "Starting announcements to {} every {}h",
            self.sink.destination(),
            self.interval.as_secs() / 3600
        );
        tokio::time::sleep(self.initial_delay).await;

        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            info!("sending: {}", cycle);
            let delivered = self.announce().await;
            info!("Cycle {}: delivered {}/{} plans", cycle, delivered, self.plans.len());

            if let Ok(step) = chrono::Duration::from_std(self.interval) {
                info!("Next announcement at {}", Utc::now() + step);
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
