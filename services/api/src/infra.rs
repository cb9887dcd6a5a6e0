use chrono::NaiveDate;
use jobmatch::config::AppConfig;
use jobmatch::error::AppError;
use jobmatch::matching::{InferenceClient, ScoreOrchestrator};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the orchestrator from loaded configuration, attaching the inference
/// client only when an API key is present.
pub(crate) fn build_orchestrator(config: &AppConfig) -> Result<ScoreOrchestrator, AppError> {
    let orchestrator = ScoreOrchestrator::new(config.matching);

    match &config.inference {
        Some(inference) if config.matching.ai_enabled => {
            let client = InferenceClient::new(inference.clone())?;
            info!(model = client.model(), "semantic evaluation enabled");
            Ok(orchestrator.with_evaluator(Arc::new(client)))
        }
        Some(_) => {
            info!("semantic evaluation disabled by configuration");
            Ok(orchestrator)
        }
        None => {
            if config.matching.ai_enabled {
                warn!("no inference API key configured; scoring algorithmically only");
            }
            Ok(orchestrator)
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
