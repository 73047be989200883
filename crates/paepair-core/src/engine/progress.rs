use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total: u64 },
    PredictionFinish { id: String, succeeded: bool },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// The reporter is shared by reference across worker threads, so it also keeps the
/// running count of finished predictions.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
    finished: AtomicU64,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
            finished: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Reports one finished prediction and returns how many have finished so far.
    pub fn prediction_finished(&self, id: &str, succeeded: bool) -> u64 {
        let count = self.finished.fetch_add(1, Ordering::Relaxed) + 1;
        self.report(Progress::PredictionFinish {
            id: id.to_string(),
            succeeded,
        });
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_still_counts() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::Message("ignored".into()));
        assert_eq!(reporter.prediction_finished("a", true), 1);
        assert_eq!(reporter.prediction_finished("b", false), 2);
    }

    #[test]
    fn callback_receives_finish_events() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PredictionFinish { id, succeeded } = event {
                seen.lock().unwrap().push((id, succeeded));
            }
        }));
        reporter.prediction_finished("pred_1", true);
        reporter.prediction_finished("pred_2", false);
        drop(reporter);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![("pred_1".to_string(), true), ("pred_2".to_string(), false)]
        );
    }
}
