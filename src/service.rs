use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower::Service;

use crate::{
    coordinator::{AnalysisResult, Coordinator},
    error::AppError,
    pixels::PixelBuffer,
};

/// `tower::Service` front for a shared [`Coordinator`], so callers can add
/// their own timeout or concurrency limit with `ServiceBuilder`.
#[derive(Clone)]
pub struct AnalysisService {
    coordinator: Arc<Coordinator>,
}

impl AnalysisService {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }
}

impl Service<PixelBuffer> for AnalysisService {
    type Response = AnalysisResult;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, pixels: PixelBuffer) -> Self::Future {
        let coordinator = Arc::clone(&self.coordinator);
        Box::pin(async move { coordinator.analyze(pixels).await })
    }
}
