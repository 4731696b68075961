//! Stage execution with failure containment.
//!
//! A [`StageRunner`] performs one model call for one stage. A failed call
//! never propagates: it is logged and replaced by the stage's placeholder
//! text, which the orchestrator then feeds downstream like any other output.

mod result;

pub use result::{StageReport, StageStatus};

use crate::core::{StageKind, StageOutcome};
use crate::events::{EventSink, PipelineEvent, STAGE_COMPLETED, STAGE_DEGRADED, STAGE_STARTED};
use crate::gateway::{GenerationParams, ModelGateway};
use crate::observability::{SpanTimer, StageSpanAttributes};
use crate::prompts::StagePrompt;
use chrono::Utc;
use tracing::{error, info};

/// Runs stages of a single task against a gateway.
#[derive(Clone, Copy)]
pub struct StageRunner<'a> {
    gateway: &'a dyn ModelGateway,
    events: &'a dyn EventSink,
    task_id: &'a str,
}

impl<'a> StageRunner<'a> {
    /// Creates a runner for `task_id`.
    #[must_use]
    pub fn new(gateway: &'a dyn ModelGateway, events: &'a dyn EventSink, task_id: &'a str) -> Self {
        Self {
            gateway,
            events,
            task_id,
        }
    }

    /// Executes one stage. Always yields text; never fails.
    pub async fn run(&self, prompt: &StagePrompt, params: GenerationParams) -> (StageOutcome, StageReport) {
        let stage = prompt.stage;
        self.events
            .emit(PipelineEvent::stage(STAGE_STARTED, self.task_id, stage))
            .await;
        info!(task_id = %self.task_id, stage = %stage, "Starting stage");

        let started_at = Utc::now();
        let timer = SpanTimer::start();
        let result = self
            .gateway
            .generate(&prompt.system, &prompt.user, params)
            .await;
        let duration_ms = timer.elapsed_ms();

        let outcome = match result {
            Ok(text) => {
                info!(task_id = %self.task_id, stage = %stage, duration_ms, "Stage complete");
                StageOutcome::ok(text)
            }
            Err(cause) => {
                error!(
                    task_id = %self.task_id,
                    stage = %stage,
                    kind = %cause.kind,
                    error = %cause,
                    "Error {}", stage.failure_label()
                );
                StageOutcome::degraded(stage, cause)
            }
        };

        let report = StageReport::from_outcome(stage, &outcome, started_at, duration_ms);
        let mut attrs = StageSpanAttributes::new(stage, self.task_id)
            .with_status(report.status.to_string())
            .with_duration_ms(duration_ms);
        let event_type = match &report.error {
            Some(err) => {
                attrs = attrs.with_error(err.clone());
                STAGE_DEGRADED
            }
            None => STAGE_COMPLETED,
        };
        self.events
            .emit(PipelineEvent::stage(event_type, self.task_id, stage).with_data(attrs.to_event_data()))
            .await;

        (outcome, report)
    }

    /// Convenience form of [`run`](Self::run) returning only the text.
    pub async fn run_text(&self, prompt: &StagePrompt, params: GenerationParams) -> String {
        self.run(prompt, params).await.0.into_text()
    }
}

impl std::fmt::Debug for StageRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRunner")
            .field("task_id", &self.task_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelCallError;
    use crate::events::{CollectingEventSink, NoOpEventSink};
    use crate::gateway::MockModelGateway;

    fn prompt(stage: StageKind) -> StagePrompt {
        StagePrompt {
            stage,
            system: "SYS".to_string(),
            user: "USER".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_passes_prompt_and_params() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_generate()
            .withf(|system, user, params| {
                system.to_string() == "SYS" && user.to_string() == "USER" && params.max_output_tokens == 4000
            })
            .times(1)
            .returning(|_, _, _| Ok("RESEARCH_X".to_string()));

        let sink = NoOpEventSink;
        let runner = StageRunner::new(&gateway, &sink, "BLOG-1");
        let (outcome, report) = runner
            .run(&prompt(StageKind::Research), GenerationParams::new(4000, 0.7))
            .await;

        assert_eq!(outcome, StageOutcome::ok("RESEARCH_X"));
        assert_eq!(report.status, StageStatus::Completed);
    }

    #[tokio::test]
    async fn test_failure_becomes_placeholder() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_generate()
            .times(1)
            .returning(|_, _, _| Err(ModelCallError::network("connection reset")));

        let sink = CollectingEventSink::new();
        let runner = StageRunner::new(&gateway, &sink, "BLOG-1");
        let text = runner
            .run_text(&prompt(StageKind::Draft), GenerationParams::new(8000, 0.7))
            .await;

        assert_eq!(text, "Error writing blog content: connection reset");
        assert_eq!(sink.event_types(), vec![STAGE_STARTED, STAGE_DEGRADED]);
        assert_eq!(sink.events()[1].data["error"], "connection reset");
    }

    #[tokio::test]
    async fn test_success_emits_completed_event() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_generate()
            .returning(|_, _, _| Ok("ok".to_string()));

        let sink = CollectingEventSink::new();
        StageRunner::new(&gateway, &sink, "BLOG-2")
            .run(&prompt(StageKind::Edit), GenerationParams::new(10, 0.5))
            .await;

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type, STAGE_COMPLETED);
        assert_eq!(events[1].stage, Some(StageKind::Edit));
        assert_eq!(events[1].task_id, "BLOG-2");
    }
}
