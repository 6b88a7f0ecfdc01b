use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    analysis::{AverageColorAnalyzer, ColorAnalyzer, DominantColorAnalyzer},
    color::ColorHex,
    config::Configuration,
    error::Result,
    pixels::PixelBuffer,
    worker::WorkerPool,
};

/// The joined output of one analysis: both halves or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub average: ColorHex,
    pub dominant: ColorHex,
}

/// Dispatches each buffer to the average and dominant workers at once and
/// joins their replies.
///
/// Every call is an independent request with its own reply channels, so
/// overlapping calls never see each other's results.
pub struct Coordinator {
    configuration: Configuration,
    pool: WorkerPool,
}

impl Coordinator {
    pub fn builder(configuration: Configuration) -> CoordinatorBuilder {
        CoordinatorBuilder::new(configuration)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub async fn analyze(&self, pixels: PixelBuffer) -> Result<AnalysisResult> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("analyze", %request_id, pixels = pixels.pixel_count());
        async move {
            tracing::debug!("Dispatching to workers");
            let (average, dominant) = futures::future::try_join(
                self.pool.average().submit(pixels.clone()),
                self.pool.dominant().submit(pixels),
            )
            .await?;
            tracing::debug!("Joined average {} and dominant {}", average, dominant);
            Ok(AnalysisResult { average, dominant })
        }
        .instrument(span)
        .await
    }

    /// Validates raw RGBA bytes before anything is dispatched.
    pub async fn analyze_bytes(&self, data: &[u8]) -> Result<AnalysisResult> {
        let pixels = PixelBuffer::from_slice(data)?;
        self.analyze(pixels).await
    }

    pub async fn analyze_vec(&self, data: Vec<u8>) -> Result<AnalysisResult> {
        let pixels = PixelBuffer::new(data)?;
        self.analyze(pixels).await
    }

    pub async fn shutdown(self) {
        self.pool.shutdown().await;
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    average: Option<Arc<dyn ColorAnalyzer>>,
    dominant: Option<Arc<dyn ColorAnalyzer>>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            average: None,
            dominant: None,
        }
    }

    // Adjusts the per-worker queue size, this will override the configuration.
    pub fn channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.configuration.channel_capacity = channel_capacity;
        self
    }

    // Replaces the analyzer run by the average worker.
    pub fn average_analyzer(mut self, analyzer: Box<dyn ColorAnalyzer>) -> Self {
        self.average = Some(Arc::from(analyzer));
        self
    }

    // Replaces the analyzer run by the dominant worker.
    pub fn dominant_analyzer(mut self, analyzer: Box<dyn ColorAnalyzer>) -> Self {
        self.dominant = Some(Arc::from(analyzer));
        self
    }

    /// Starts the worker pool; must run inside a tokio runtime.
    pub fn build(self) -> Result<Coordinator> {
        let average = self
            .average
            .unwrap_or_else(|| Arc::new(AverageColorAnalyzer::new()));
        let dominant = self
            .dominant
            .unwrap_or_else(|| Arc::new(DominantColorAnalyzer::new()));
        let pool = WorkerPool::start(average, dominant, self.configuration.channel_capacity)?;
        Ok(Coordinator {
            configuration: self.configuration,
            pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::Rng;

    use super::*;
    use crate::analysis::{average_color, dominant_hex, AnalyzerKind};
    use crate::error::AppError;

    struct CountingAnalyzer {
        kind: AnalyzerKind,
        calls: Arc<AtomicUsize>,
    }

    impl ColorAnalyzer for CountingAnalyzer {
        fn kind(&self) -> AnalyzerKind {
            self.kind
        }

        fn analyze(&self, pixels: &PixelBuffer) -> ColorHex {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.kind {
                AnalyzerKind::Average => AverageColorAnalyzer.analyze(pixels),
                AnalyzerKind::Dominant => DominantColorAnalyzer.analyze(pixels),
            }
        }
    }

    struct CrashingAnalyzer(AnalyzerKind);

    impl ColorAnalyzer for CrashingAnalyzer {
        fn kind(&self) -> AnalyzerKind {
            self.0
        }

        fn analyze(&self, _pixels: &PixelBuffer) -> ColorHex {
            panic!("out of memory");
        }
    }

    fn coordinator() -> Coordinator {
        Coordinator::builder(Configuration::default())
            .build()
            .expect("Failed to build coordinator")
    }

    fn pixels(colors: &[[u8; 4]]) -> PixelBuffer {
        PixelBuffer::from_slice(&colors.concat()).unwrap()
    }

    #[tokio::test]
    async fn test_uniform_buffer() {
        let coordinator = coordinator();
        let result = coordinator.analyze(pixels(&[[40, 80, 120, 255]; 6])).await.unwrap();
        assert_eq!(result.average.as_str(), "#285078");
        assert_eq!(result.dominant.as_str(), "#285078");
        coordinator.shutdown().await;
    }

    #[tokio::test]
    async fn test_average_and_dominant_differ() {
        let coordinator = coordinator();
        let result = coordinator
            .analyze(pixels(&[
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [255, 0, 0, 255],
                [0, 255, 0, 255],
            ]))
            .await
            .unwrap();
        assert_eq!(
            result,
            AnalysisResult {
                average: "#7f7f00".parse().unwrap(),
                dominant: "#ff0000".parse().unwrap(),
            }
        );
    }

    #[tokio::test]
    async fn test_alpha_does_not_change_result() {
        let coordinator = coordinator();
        let opaque = coordinator
            .analyze_bytes(&[0, 0, 0, 255, 3, 3, 3, 255, 3, 3, 3, 255])
            .await
            .unwrap();
        let faded = coordinator
            .analyze_bytes(&[0, 0, 0, 0, 3, 3, 3, 90, 3, 3, 3, 1])
            .await
            .unwrap();
        assert_eq!(opaque, faded);
        assert_eq!(opaque.average.as_str(), "#020202");
        assert_eq!(opaque.dominant.as_str(), "#030303");
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_dispatched() {
        let average_calls = Arc::new(AtomicUsize::new(0));
        let dominant_calls = Arc::new(AtomicUsize::new(0));
        let coordinator = Coordinator::builder(Configuration::default())
            .average_analyzer(Box::new(CountingAnalyzer {
                kind: AnalyzerKind::Average,
                calls: average_calls.clone(),
            }))
            .dominant_analyzer(Box::new(CountingAnalyzer {
                kind: AnalyzerKind::Dominant,
                calls: dominant_calls.clone(),
            }))
            .build()
            .unwrap();

        let empty = coordinator.analyze_vec(Vec::new()).await.unwrap_err();
        assert!(empty.is_invalid_input());
        let ragged = coordinator.analyze_bytes(&[1, 2, 3, 4, 5, 6]).await.unwrap_err();
        assert!(ragged.is_invalid_input());

        coordinator.analyze_bytes(&[1, 2, 3, 4]).await.unwrap();
        coordinator.shutdown().await;

        assert_eq!(average_calls.load(Ordering::SeqCst), 1);
        assert_eq!(dominant_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_worker_crash_fails_whole_analysis() {
        let coordinator = Coordinator::builder(Configuration::default())
            .dominant_analyzer(Box::new(CrashingAnalyzer(AnalyzerKind::Dominant)))
            .build()
            .unwrap();

        let err = coordinator.analyze(pixels(&[[1, 2, 3, 4]])).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ExecutionFailure {
                analyzer: AnalyzerKind::Dominant,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_average_crash_fails_whole_analysis() {
        let coordinator = Coordinator::builder(Configuration::default())
            .average_analyzer(Box::new(CrashingAnalyzer(AnalyzerKind::Average)))
            .build()
            .unwrap();

        let err = coordinator.analyze(pixels(&[[1, 2, 3, 4]])).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ExecutionFailure {
                analyzer: AnalyzerKind::Average,
                ..
            }
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_stay_independent() {
        let coordinator = Arc::new(
            Coordinator::builder(Configuration::default())
                .channel_capacity(2)
                .build()
                .unwrap(),
        );

        let buffers: Vec<PixelBuffer> = {
            let mut rng = rand::rng();
            (0..64)
                .map(|_| {
                    let palette: Vec<[u8; 4]> = (0..4).map(|_| rng.random()).collect();
                    let len = rng.random_range(1..200);
                    let colors: Vec<[u8; 4]> = (0..len)
                        .map(|_| palette[rng.random_range(0..palette.len())])
                        .collect();
                    pixels(&colors)
                })
                .collect()
        };

        let tasks = buffers.iter().cloned().map(|buffer| {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.analyze(buffer).await })
        });
        let results = futures::future::join_all(tasks).await;

        for (buffer, result) in buffers.iter().zip(results) {
            let result = result.unwrap().unwrap();
            assert_eq!(result.average, average_color(buffer).to_hex());
            assert_eq!(result.dominant, dominant_hex(buffer));
        }
    }

    #[tokio::test]
    async fn test_zero_capacity_fails_to_build() {
        let result = Coordinator::builder(Configuration::default())
            .channel_capacity(0)
            .build();
        assert!(result.is_err());
    }
}
