use crate::estimators::MixtureEstimator;
use crate::evaluation::{DensityCurve, Estimator, MeanEstimator, Snapshot};
use crate::streams::Stream;
use std::io::{Error, ErrorKind};
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::info;

/// Test-then-train loop: every sample is scored under the current model
/// before the estimator sees it.
pub struct PrequentialDensityEvaluator {
    estimator: Box<dyn MixtureEstimator>,
    stream: Box<dyn Stream>,

    curve: DensityCurve,

    max_samples: Option<u64>,
    sample_frequency: u64,

    processed: u64,
    rejected: u64,
    overall: MeanEstimator,
    window: MeanEstimator,
    start_time: Instant,

    progress_tx: Option<Sender<Snapshot>>,
}

impl PrequentialDensityEvaluator {
    pub fn new(
        estimator: Box<dyn MixtureEstimator>,
        stream: Box<dyn Stream>,
        max_samples: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self, Error> {
        if sample_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sample_frequency must be > 0",
            ));
        }

        Ok(Self {
            estimator,
            stream,
            curve: DensityCurve::default(),
            max_samples,
            sample_frequency,
            processed: 0,
            rejected: 0,
            overall: MeanEstimator::default(),
            window: MeanEstimator::default(),
            start_time: Instant::now(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<(), Error> {
        self.start_time = Instant::now();
        info!(
            components = self.estimator.component_count(),
            batch_length = self.estimator.batch_length(),
            max_samples = ?self.max_samples,
            "prequential run started"
        );

        while self.stream.has_more_samples() {
            if let Some(n) = self.max_samples {
                if self.processed >= n {
                    break;
                }
            }
            let Some(x) = self.stream.next_sample() else {
                break;
            };
            self.processed += 1;

            let score = self.estimator.log_density(x);
            self.overall.add(score);
            self.window.add(score);

            if self.estimator.observe(x).is_rejected() {
                self.rejected += 1;
            }

            if self.processed % self.sample_frequency == 0 {
                self.push_snapshot();
            }
        }

        if self.curve.latest().map(|s| s.samples_seen) != Some(self.processed) {
            self.push_snapshot();
        }
        info!(
            samples = self.processed,
            updates = self.estimator.updates_performed(),
            rejected = self.rejected,
            mean_log_density = self.overall.estimation(),
            "prequential run finished"
        );
        Ok(())
    }

    pub fn curve(&self) -> &DensityCurve {
        &self.curve
    }

    pub fn estimator(&self) -> &dyn MixtureEstimator {
        self.estimator.as_ref()
    }

    fn push_snapshot(&mut self) {
        let mixture = self.estimator.mixture();
        let snapshot = Snapshot {
            samples_seen: self.processed,
            updates: self.estimator.updates_performed(),
            rejected: self.rejected,
            mean_log_density: self.overall.estimation(),
            window_log_density: self.window.estimation(),
            weights: mixture.weights().to_vec(),
            means: mixture.means().to_vec(),
            std_devs: mixture.std_devs().to_vec(),
            seconds: self.start_time.elapsed().as_secs_f64(),
        };
        self.window = MeanEstimator::default();

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot.clone());
        }

        self.curve.push(snapshot);
    }
}
