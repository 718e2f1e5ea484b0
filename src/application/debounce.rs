// src/application/debounce.rs
use std::time::Duration;
use tokio::time::Instant;

/// Holds back a rapidly changing value until it has been stable for a quiet period.
///
/// Time is passed in explicitly, so the caller decides whether it comes from
/// the runtime clock or from a test.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record an edit, restarting the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Release the pending value immediately, e.g. when input ends.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_rapid_edits_when_polling_then_only_last_value_is_released_after_quiet_period() {
        // Arrange
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        // Act
        debouncer.push("a", start);
        debouncer.push("ab", start + Duration::from_millis(100));
        debouncer.push("abc", start + Duration::from_millis(150));

        // Assert
        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(449)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), Some("abc"));
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn given_pending_value_when_flushing_then_releases_without_waiting() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.push(String::from("milk"), start);

        assert_eq!(debouncer.flush(), Some(String::from("milk")));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn given_paused_clock_when_sleeping_until_deadline_then_value_is_released() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push(1, Instant::now());
        let deadline = debouncer.deadline().expect("Edit was recorded");

        tokio::time::sleep_until(deadline).await;

        assert_eq!(debouncer.poll(Instant::now()), Some(1));
    }
}
