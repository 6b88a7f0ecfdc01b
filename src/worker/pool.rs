use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    analysis::{AnalyzerKind, ColorAnalyzer},
    error::{AppError, Result},
    worker::{AnalyzerWorker, WorkerHandle},
};

/// Exactly one long-lived worker per analyzer kind.
///
/// Owned by whoever builds it; dropping the pool closes both request
/// channels and the workers exit once their queues drain.
pub struct WorkerPool {
    average: WorkerHandle,
    dominant: WorkerHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns both workers. Must be called from within a tokio runtime.
    pub fn start(
        average: Arc<dyn ColorAnalyzer>,
        dominant: Arc<dyn ColorAnalyzer>,
        channel_capacity: usize,
    ) -> Result<Self> {
        if channel_capacity == 0 {
            return Err(AppError::InvalidInput(
                "worker channel capacity must be greater than 0".to_string(),
            ));
        }
        expect_kind(average.as_ref(), AnalyzerKind::Average)?;
        expect_kind(dominant.as_ref(), AnalyzerKind::Dominant)?;

        let (average, average_task) = AnalyzerWorker::spawn(average, channel_capacity);
        let (dominant, dominant_task) = AnalyzerWorker::spawn(dominant, channel_capacity);
        info!("Worker pool started (capacity {} per worker)", channel_capacity);
        Ok(Self {
            average,
            dominant,
            tasks: vec![average_task, dominant_task],
        })
    }

    pub fn average(&self) -> &WorkerHandle {
        &self.average
    }

    pub fn dominant(&self) -> &WorkerHandle {
        &self.dominant
    }

    /// Closes the request channels and waits for both workers to finish
    /// whatever they already accepted. Outstanding clones of the handles
    /// keep their worker alive until they are dropped too.
    pub async fn shutdown(self) {
        let Self {
            average,
            dominant,
            tasks,
        } = self;
        drop(average);
        drop(dominant);
        for task in tasks {
            if let Err(e) = task.await {
                error!("Worker task ended abnormally: {}", e);
            }
        }
        info!("Worker pool stopped");
    }
}

fn expect_kind(analyzer: &dyn ColorAnalyzer, expected: AnalyzerKind) -> Result<()> {
    if analyzer.kind() != expected {
        return Err(AppError::InvalidInput(format!(
            "{} slot was given a {} analyzer",
            expected,
            analyzer.kind()
        )));
    }
    Ok(())
}
