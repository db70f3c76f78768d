//! Status rotation - cycles the displayed activity on a fixed interval

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::entities::Activity;
use crate::domain::traits::PresenceSink;

pub const ROTATION_INTERVAL: Duration = Duration::from_secs(30);

pub struct StatusRotator {
    activities: Vec<Activity>,
    index: AtomicUsize,
    interval: Duration,
}

impl StatusRotator {
    pub fn new(activities: Vec<Activity>, interval: Duration) -> Self {
        Self {
            activities,
            index: AtomicUsize::new(0),
            interval,
        }
    }

    /// Return the next activity, wrapping around the list
    pub fn advance(&self) -> Option<&Activity> {
        if self.activities.is_empty() {
            return None;
        }
        let index = self.index.fetch_add(1, Ordering::Relaxed) % self.activities.len();
        self.activities.get(index)
    }

    /// Apply the next activity immediately and then once per interval, forever
    pub async fn run<P: PresenceSink>(&self, sink: P) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            if let Some(activity) = self.advance() {
                tracing::debug!("Changing status to {}", activity.name);
                sink.set_activity(activity);
            }
        }
    }
}

impl Default for StatusRotator {
    fn default() -> Self {
        Self::new(Activity::defaults(), ROTATION_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl PresenceSink for Recorder {
        fn set_activity(&self, activity: &Activity) {
            self.0.lock().unwrap().push(activity.name.clone());
        }
    }

    #[test]
    fn test_advance_wraps() {
        let rotator = StatusRotator::default();
        let names: Vec<String> = (0..5)
            .map(|_| rotator.advance().unwrap().name.clone())
            .collect();
        assert_eq!(
            names,
            vec!["Krydder the game", "the sound of oregano", "Svømmer i Oregano", "You", "Krydder the game"]
        );
    }

    #[test]
    fn test_empty_rotation_is_none() {
        let rotator = StatusRotator::new(Vec::new(), ROTATION_INTERVAL);
        assert!(rotator.advance().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_changes_status_every_interval() {
        let rotator = Arc::new(StatusRotator::default());
        let recorder = Recorder::default();

        let task = {
            let rotator = Arc::clone(&rotator);
            let recorder = recorder.clone();
            tokio::spawn(async move { rotator.run(recorder).await })
        };

        tokio::time::sleep(Duration::from_secs(61)).await;
        task.abort();

        let seen = recorder.0.lock().unwrap().clone();
        assert_eq!(seen, vec!["Krydder the game", "the sound of oregano", "Svømmer i Oregano"]);
    }
}
