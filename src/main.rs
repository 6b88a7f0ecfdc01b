use std::{path::PathBuf, process::ExitCode, sync::Arc};

use hue_workers::{intake, AppError, Configuration, Coordinator};
use tracing::{error, info, Level};

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn analyze_file(
    coordinator: Arc<Coordinator>,
    path: PathBuf,
) -> Result<serde_json::Value, AppError> {
    let configuration = coordinator.configuration().clone();
    let pixels = intake::load_pixels_async(path.clone(), configuration).await?;
    let result = coordinator.analyze(pixels).await?;
    Ok(serde_json::json!({
        "path": path.display().to_string(),
        "average": result.average,
        "dominant": result.dominant,
    }))
}

#[tokio::main]
async fn main() -> Result<ExitCode, AppError> {
    let configuration = Configuration::load(None)?;
    init_logging(configuration.level()?);

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: hue-workers <image>...");
        return Ok(ExitCode::from(2));
    }

    let coordinator = Arc::new(Coordinator::builder(configuration).build()?);
    info!("Analyzing {} image(s)", paths.len());

    let jobs = paths.into_iter().map(|path| {
        let coordinator = Arc::clone(&coordinator);
        async move {
            let outcome = analyze_file(coordinator, path.clone()).await;
            (path, outcome)
        }
    });
    let outcomes = futures::future::join_all(jobs).await;

    let mut failed = false;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(line) => println!("{line}"),
            Err(e) => {
                error!("Analysis of {} failed: {}", path.display(), e);
                failed = true;
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
