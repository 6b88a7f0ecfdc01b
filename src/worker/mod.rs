pub mod analyzer_worker;
pub mod pool;

pub use analyzer_worker::{AnalysisRequest, AnalyzerWorker, WorkerHandle};
pub use pool::WorkerPool;
