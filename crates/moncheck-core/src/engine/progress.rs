use super::violation::CheckKind;

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    CheckFinished {
        check: CheckKind,
        errors: usize,
        warnings: usize,
    },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards session events to an optional callback; silent without one.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseStart { name: "Loading" });
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            let label = match event {
                Progress::PhaseStart { name } => name.to_string(),
                Progress::CheckFinished { check, .. } => check.name().to_string(),
                other => format!("{:?}", other),
            };
            sink.lock().unwrap().push(label);
        }));

        reporter.report(Progress::PhaseStart { name: "Loading" });
        reporter.report(Progress::CheckFinished {
            check: CheckKind::EnergyTypes,
            errors: 0,
            warnings: 0,
        });

        assert_eq!(*seen.lock().unwrap(), vec!["Loading", "energy-types"]);
    }
}
