//! Chatbot evaluation chart.

use std::path::PathBuf;

use brainbot_api::{EvaluationChart, EvaluationReports, Page};
use brainbot_common::BrainbotError;
use tracing::info;

use crate::context::AppContext;

pub(super) async fn run(ctx: &AppContext, output: Option<PathBuf>) -> Result<(), BrainbotError> {
    ctx.require_page(Page::Evaluations)?;
    let chart = ctx
        .backend
        .evaluation_chart()
        .await
        .map_err(|e| ctx.fail(e))?;

    let path = chart_path(output, &chart);
    tokio::fs::write(&path, &chart.bytes).await?;
    info!(path = %path.display(), size = chart.bytes.len(), "saved evaluation chart");
    println!("Saved evaluation chart to {}.", path.display());
    Ok(())
}

fn chart_path(output: Option<PathBuf>, chart: &EvaluationChart) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(format!("ragas-evaluation.{}", chart.extension())))
}
