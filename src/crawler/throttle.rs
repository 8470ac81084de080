//! Fixed pause between navigation requests
//!
//! The pause is measured from the moment the previous page or article probe
//! finished, image downloads included. Slow responses therefore never eat
//! into the delay and the upstream server sees the same request rate as a
//! plain sleep after every probe.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    last_finished: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_finished: None,
        }
    }

    /// Waits until the delay has elapsed since the last `mark`
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_finished {
            tokio::time::sleep_until(last + self.delay).await;
        }
    }

    /// Records that a probe has just finished
    pub fn mark(&mut self) {
        self.last_finished = Some(Instant::now());
    }
}
