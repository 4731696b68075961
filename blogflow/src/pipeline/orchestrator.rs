//! The four-stage article pipeline.
//!
//! A run validates the request, resolves the task id, then walks the
//! [`PipelineState`] machine: each state renders one prompt, performs one
//! model call and hands the resulting text (real or placeholder) to the next
//! state. Only request validation can stop a run.

use super::{DegradationSummary, PipelineConfig};
use crate::core::{GenerationRequest, GenerationResult, PipelineState, StageKind};
use crate::errors::RequestValidationError;
use crate::events::{EventSink, NoOpEventSink, PipelineEvent, PIPELINE_COMPLETED, PIPELINE_STARTED};
use crate::gateway::ModelGateway;
use crate::meta::MetaExtractor;
use crate::observability::SpanTimer;
use crate::prompts::PromptBuilder;
use crate::stages::{StageReport, StageRunner};
use crate::utils::{word_count, Clock, SystemClock};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// A completed run together with its per-stage bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    /// Unique id of this execution, distinct from the task id.
    pub run_id: Uuid,
    /// The assembled result.
    pub result: GenerationResult,
    /// One report per executed stage, in order.
    pub stages: Vec<StageReport>,
    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: f64,
}

impl PipelineRun {
    /// Summarizes which stages degraded.
    #[must_use]
    pub fn degradation_summary(&self) -> DegradationSummary {
        DegradationSummary::from_reports(&self.stages)
    }

    /// Returns true if any stage degraded.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.stages.iter().any(StageReport::is_degraded)
    }
}

/// Orchestrates research, draft, optimize and edit for one request at a time.
///
/// Holds no per-run state, so one instance can serve concurrent runs.
#[derive(Clone)]
pub struct BlogPipeline {
    gateway: Arc<dyn ModelGateway>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    config: PipelineConfig,
}

impl BlogPipeline {
    /// Creates a pipeline with default configuration.
    #[must_use]
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self::with_config(gateway, PipelineConfig::default())
    }

    /// Creates a pipeline with explicit configuration.
    #[must_use]
    pub fn with_config(gateway: Arc<dyn ModelGateway>, config: PipelineConfig) -> Self {
        Self {
            gateway,
            events: Arc::new(NoOpEventSink),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Sets the clock used for task ids and completion times.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the request's task id, or synthesizes one from the clock.
    #[must_use]
    pub fn resolve_task_id(&self, request: &GenerationRequest) -> String {
        request.resolve_task_id(self.clock.as_ref())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Produces an article for `request`.
    ///
    /// Fails only when the request is invalid, in which case no model call
    /// is made. Model failures surface as placeholder text in the result.
    pub async fn run_pipeline(&self, request: &GenerationRequest) -> Result<GenerationResult, RequestValidationError> {
        Ok(self.run_pipeline_with_report(request).await?.result)
    }

    /// Like [`run_pipeline`](Self::run_pipeline), also returning stage reports.
    pub async fn run_pipeline_with_report(
        &self,
        request: &GenerationRequest,
    ) -> Result<PipelineRun, RequestValidationError> {
        request.validate()?;

        let run_id = Uuid::new_v4();
        let task_id = self.resolve_task_id(request);
        let timer = SpanTimer::start();
        info!(%task_id, %run_id, topic = %request.topic, "Starting content pipeline");
        self.events
            .emit(PipelineEvent::pipeline(PIPELINE_STARTED, &task_id).with_data(serde_json::json!({
                "run_id": run_id.to_string(),
                "topic": request.topic,
            })))
            .await;

        let prompts = PromptBuilder::new(&self.config.brand);
        let runner = StageRunner::new(self.gateway.as_ref(), self.events.as_ref(), &task_id);

        let mut state = PipelineState::default();
        let mut reports = Vec::with_capacity(StageKind::ALL.len());
        let mut upstream = String::new();
        let mut research_summary = String::new();
        let mut optimized = String::new();

        while let Some(stage) = state.stage() {
            let prompt = prompts.render(stage, request, &upstream);
            let (outcome, report) = runner.run(&prompt, self.config.params_for(stage)).await;
            reports.push(report);

            upstream = outcome.into_text();
            match stage {
                StageKind::Research => research_summary.clone_from(&upstream),
                StageKind::Optimize => optimized.clone_from(&upstream),
                StageKind::Draft | StageKind::Edit => {}
            }
            state = state.advance();
        }

        let meta = MetaExtractor::extract(&optimized);
        if meta.missing_title() || meta.missing_description() {
            warn!(
                %task_id,
                missing_title = meta.missing_title(),
                missing_description = meta.missing_description(),
                "Optimize output lacks meta marker lines"
            );
        }
        let (title, description) = meta.into_pair();

        let blog_draft = upstream;
        let result = GenerationResult {
            task_id,
            topic: request.topic.clone(),
            target_audience: request.target_audience.clone(),
            primary_keywords: request.primary_keywords.clone(),
            completion_time: self.clock.now(),
            research_summary,
            word_count: word_count(&blog_draft),
            blog_draft,
            title,
            description,
        };

        let run = PipelineRun {
            run_id,
            result,
            stages: reports,
            duration_ms: timer.elapsed_ms(),
        };
        let degraded: Vec<StageKind> = run.degradation_summary().degraded.iter().map(|r| r.stage).collect();
        info!(
            task_id = %run.result.task_id,
            word_count = run.result.word_count,
            degraded_stages = degraded.len(),
            duration_ms = run.duration_ms,
            "Content pipeline complete"
        );
        self.events
            .emit(
                PipelineEvent::pipeline(PIPELINE_COMPLETED, &run.result.task_id).with_data(serde_json::json!({
                    "run_id": run.run_id.to_string(),
                    "word_count": run.result.word_count,
                    "degraded_stages": degraded,
                    "duration_ms": run.duration_ms,
                })),
            )
            .await;

        Ok(run)
    }

    /// Runs several requests concurrently. Results keep the input order.
    pub async fn run_batch(
        &self,
        requests: &[GenerationRequest],
    ) -> Vec<Result<GenerationResult, RequestValidationError>> {
        join_all(requests.iter().map(|r| self.run_pipeline(r))).await
    }
}

impl std::fmt::Debug for BlogPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogPipeline")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelCallError;
    use crate::events::CollectingEventSink;
    use crate::testing::{fixed_clock, sample_request, ScriptedGateway};
    use pretty_assertions::assert_eq;

    const OPTIMIZED: &str = "META TITLE: Best Dog Beaches\nMETA DESCRIPTION: Top beaches for pets\nOPTIMIZED CONTENT:\nBODY_X";

    fn happy_gateway() -> Arc<ScriptedGateway> {
        Arc::new(ScriptedGateway::new([
            Ok("RESEARCH_X".to_string()),
            Ok("DRAFT_X".to_string()),
            Ok(OPTIMIZED.to_string()),
            Ok("FINAL_X".to_string()),
        ]))
    }

    #[tokio::test]
    async fn test_happy_path() {
        let gateway = happy_gateway();
        let pipeline = BlogPipeline::new(gateway.clone()).with_clock(Arc::new(fixed_clock()));

        let result = pipeline.run_pipeline(&sample_request()).await.unwrap();

        assert_eq!(result.research_summary, "RESEARCH_X");
        assert_eq!(result.blog_draft, "FINAL_X");
        assert_eq!(result.title, "Best Dog Beaches");
        assert_eq!(result.description, "Top beaches for pets");
        assert_eq!(result.word_count, 1);
        assert_eq!(result.task_id, "BLOG-20240101120000");
        assert_eq!(result.completion_time, fixed_clock().now());
        assert_eq!(gateway.call_count(), 4);
    }

    #[tokio::test]
    async fn test_each_stage_consumes_previous_output() {
        let gateway = happy_gateway();
        let pipeline = BlogPipeline::new(gateway.clone());
        pipeline.run_pipeline(&sample_request()).await.unwrap();

        let calls = gateway.calls();
        assert!(calls[1].user.contains("RESEARCH_X"));
        assert!(calls[2].user.contains("DRAFT_X"));
        assert!(calls[3].user.contains("BODY_X"));
        assert_eq!(calls[0].params.max_output_tokens, 4000);
        assert!((calls[3].params.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_calls() {
        let gateway = happy_gateway();
        let events = Arc::new(CollectingEventSink::new());
        let pipeline = BlogPipeline::new(gateway.clone()).with_events(events.clone());

        let err = pipeline
            .run_pipeline(&GenerationRequest::new("   "))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Blog topic is required");
        assert_eq!(gateway.call_count(), 0);
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_all_stages_fail_still_completes() {
        let gateway = Arc::new(ScriptedGateway::failing(ModelCallError::network("down")));
        let pipeline = BlogPipeline::new(gateway.clone());

        let run = pipeline.run_pipeline_with_report(&sample_request()).await.unwrap();

        assert_eq!(run.result.research_summary, "Error generating research: down");
        assert_eq!(run.result.blog_draft, "Error editing and finalizing: down");
        assert_eq!(run.result.title, "");
        assert_eq!(run.result.description, "");
        assert_eq!(run.result.word_count, 5);
        assert_eq!(run.degradation_summary().degraded.len(), 4);
        assert_eq!(gateway.call_count(), 4);
    }

    #[tokio::test]
    async fn test_degraded_optimize_feeds_placeholder_to_edit() {
        let gateway = Arc::new(ScriptedGateway::new([
            Ok("R".to_string()),
            Ok("D".to_string()),
            Err(ModelCallError::api("quota")),
            Ok("FINAL".to_string()),
        ]));
        let pipeline = BlogPipeline::new(gateway.clone());

        let run = pipeline.run_pipeline_with_report(&sample_request()).await.unwrap();

        assert!(gateway.calls()[3].user.contains("Error optimizing for SEO: quota"));
        assert_eq!(run.result.blog_draft, "FINAL");
        assert_eq!(run.result.title, "");
        assert_eq!(run.degradation_summary().first_degraded(), Some(StageKind::Optimize));
    }

    #[tokio::test]
    async fn test_emits_lifecycle_events() {
        let events = Arc::new(CollectingEventSink::new());
        let pipeline = BlogPipeline::new(happy_gateway()).with_events(events.clone());
        pipeline.run_pipeline(&sample_request()).await.unwrap();

        let types = events.event_types();
        assert_eq!(types.first().map(String::as_str), Some(PIPELINE_STARTED));
        assert_eq!(types.last().map(String::as_str), Some(PIPELINE_COMPLETED));
        assert_eq!(events.events_of_type("stage.started").len(), 4);
        assert_eq!(events.events_of_type("stage.completed").len(), 4);
    }

    #[tokio::test]
    async fn test_run_batch_preserves_order() {
        let gateway = Arc::new(ScriptedGateway::repeating("TEXT"));
        let pipeline = BlogPipeline::new(gateway.clone());
        let requests = vec![
            sample_request().with_task_id("A"),
            GenerationRequest::new(""),
            sample_request().with_task_id("C"),
        ];

        let results = pipeline.run_batch(&requests).await;

        assert_eq!(results[0].as_ref().unwrap().task_id, "A");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().task_id, "C");
        assert_eq!(gateway.call_count(), 8);
    }
}
