/// Progress events emitted while a workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback. A reporter without a callback
/// discards everything, so library callers that don't care can pass `ProgressReporter::new()`.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `step` between a `PhaseStart`/`PhaseFinish` pair. The finish event is only
    /// sent when the step succeeds.
    pub fn phase<T, E>(
        &self,
        name: &'static str,
        step: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        let value = step()?;
        self.report(Progress::PhaseFinish);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_reporter() -> (ProgressReporter<'static>, Arc<Mutex<Vec<Progress>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        (reporter, events)
    }

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskIncrement);
    }

    #[test]
    fn phase_wraps_successful_step() {
        let (reporter, events) = recording_reporter();
        let value: Result<i32, ()> = reporter.phase("Scan", || {
            reporter.report(Progress::TaskIncrement);
            Ok(7)
        });

        assert_eq!(value, Ok(7));
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::PhaseStart { name: "Scan" },
                Progress::TaskIncrement,
                Progress::PhaseFinish,
            ]
        );
    }

    #[test]
    fn phase_does_not_finish_on_error() {
        let (reporter, events) = recording_reporter();
        let value: Result<(), &str> = reporter.phase("Scan", || Err("boom"));

        assert_eq!(value, Err("boom"));
        assert_eq!(
            *events.lock().unwrap(),
            vec![Progress::PhaseStart { name: "Scan" }]
        );
    }
}
