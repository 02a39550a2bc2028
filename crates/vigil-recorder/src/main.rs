//! Recording orchestrator binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vigil_media::stub::{NullDetector, RawFileSinkFactory, SyntheticSource};
use vigil_media::StreamProperties;
use vigil_recorder::{RecorderConfig, Scheduler, SessionOrchestrator};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vigil_recorder=info".parse().unwrap())
        .add_directive("vigil_media=info".parse().unwrap())
        .add_directive("vigil_zones=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vigil-recorder");

    // Load configuration
    let config = RecorderConfig::from_env();
    info!("Recorder config: {:?}", config);

    // Default wiring uses the stub collaborators; camera, detector and
    // encoder integrations plug in behind the vigil-media traits.
    let properties = StreamProperties::new(640, 480, config.target_fps);
    let orchestrator = SessionOrchestrator::new(
        config,
        Box::new(SyntheticSource::new(properties)),
        Box::new(NullDetector),
        Box::new(RawFileSinkFactory),
    );

    // Wire process interrupt into the shutdown signal
    let shutdown = orchestrator.shutdown_sender();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown.send(true);
    });

    let mut scheduler = Scheduler::new(orchestrator);
    if let Err(e) = scheduler.run().await {
        error!("Scheduler error: {}", e);
        std::process::exit(1);
    }

    info!("Recorder shutdown complete");
}
