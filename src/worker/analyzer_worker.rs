use std::sync::Arc;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    analysis::{AnalyzerKind, ColorAnalyzer},
    color::ColorHex,
    error::{AppError, Result},
    pixels::PixelBuffer,
};

/// One request/response exchange with a worker: the pixels in, one color
/// out. The responder is used at most once; dropping it unanswered tells the
/// caller the worker failed.
pub struct AnalysisRequest {
    pub pixels: PixelBuffer,
    pub responder: oneshot::Sender<ColorHex>,
}

#[derive(Clone)]
pub struct WorkerHandle {
    kind: AnalyzerKind,
    request_tx: mpsc::Sender<AnalysisRequest>,
}

impl WorkerHandle {
    pub fn kind(&self) -> AnalyzerKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        !self.request_tx.is_closed()
    }

    /// Sends `pixels` to the worker and waits for its single reply.
    pub async fn submit(&self, pixels: PixelBuffer) -> Result<ColorHex> {
        let (responder, response_rx) = oneshot::channel();
        self.request_tx
            .send(AnalysisRequest { pixels, responder })
            .await
            .map_err(|_| AppError::execution_failure(self.kind, "worker is no longer running"))?;

        response_rx.await.map_err(|_| {
            AppError::execution_failure(self.kind, "worker terminated before responding")
        })
    }
}

/// Long-lived execution context for one analyzer.
///
/// Requests are served one at a time; the reduction itself runs on the
/// blocking pool so it never stalls the async runtime. A panicking analyzer
/// fails only the request it was serving.
pub struct AnalyzerWorker {
    analyzer: Arc<dyn ColorAnalyzer>,
    request_rx: mpsc::Receiver<AnalysisRequest>,
}

impl AnalyzerWorker {
    pub fn spawn(analyzer: Arc<dyn ColorAnalyzer>, capacity: usize) -> (WorkerHandle, JoinHandle<()>) {
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let kind = analyzer.kind();
        let worker = Self {
            analyzer,
            request_rx,
        };
        let task = tokio::spawn(worker.run());
        (WorkerHandle { kind, request_tx }, task)
    }

    async fn run(mut self) {
        let kind = self.analyzer.kind();
        info!("{} worker started", kind);
        while let Some(request) = self.request_rx.recv().await {
            Self::handle(Arc::clone(&self.analyzer), request).await;
        }
        info!("{} worker stopped", kind);
    }

    async fn handle(analyzer: Arc<dyn ColorAnalyzer>, request: AnalysisRequest) {
        let AnalysisRequest { pixels, responder } = request;
        let kind = analyzer.kind();
        debug!("{} worker analyzing {} pixels", kind, pixels.pixel_count());

        match tokio::task::spawn_blocking(move || analyzer.analyze(&pixels)).await {
            Ok(hex) => {
                if responder.send(hex).is_err() {
                    debug!("{} worker: caller went away before the reply", kind);
                }
            }
            Err(e) => {
                error!("{} worker failed: {}", kind, e);
                drop(responder);
            }
        }
    }
}
