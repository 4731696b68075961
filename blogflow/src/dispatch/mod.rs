//! Fire-and-forget submission of generation requests.
//!
//! [`TaskDispatcher::submit`] validates synchronously, fixes the task id and
//! spawns the run. The caller gets a [`TaskHandle`] it may await or drop;
//! dropping the handle does not cancel the run.

mod sink;

pub use sink::{LoggingResultSink, ResultSink};

use crate::core::{GenerationRequest, GenerationResult};
use crate::errors::{BlogflowError, RequestValidationError};
use crate::pipeline::BlogPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Status reported in every receipt.
pub const STATUS_PROCESSING: &str = "processing";

/// Acknowledgement returned to the submitter before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Always `processing`.
    pub status: String,
    /// Human readable confirmation.
    pub message: String,
    /// The id the eventual result will carry.
    pub task_id: String,
}

/// Handle to one spawned run.
#[derive(Debug)]
pub struct TaskHandle {
    task_id: String,
    topic: String,
    handle: JoinHandle<Result<GenerationResult, RequestValidationError>>,
}

impl TaskHandle {
    /// The id the result will carry.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns true once the run has finished, successfully or not.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Acknowledgement for the submitter.
    #[must_use]
    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            status: STATUS_PROCESSING.to_string(),
            message: format!("Blog production started for topic: {}", self.topic),
            task_id: self.task_id.clone(),
        }
    }

    /// Waits for the run to finish.
    pub async fn join(self) -> Result<GenerationResult, BlogflowError> {
        let joined = self
            .handle
            .await
            .map_err(|e| BlogflowError::Dispatch(format!("Task {} join error: {e}", self.task_id)))?;
        Ok(joined?)
    }
}

/// Spawns pipeline runs on the tokio runtime.
#[derive(Clone)]
pub struct TaskDispatcher {
    pipeline: Arc<BlogPipeline>,
    sink: Option<Arc<dyn ResultSink>>,
}

impl TaskDispatcher {
    /// Creates a dispatcher without a delivery hook.
    #[must_use]
    pub fn new(pipeline: Arc<BlogPipeline>) -> Self {
        Self { pipeline, sink: None }
    }

    /// Sets the delivery hook.
    #[must_use]
    pub fn with_result_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validates `request` and starts its run in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, mut request: GenerationRequest) -> Result<TaskHandle, BlogflowError> {
        request.validate()?;

        let task_id = self.pipeline.resolve_task_id(&request);
        request.task_id = Some(task_id.clone());
        info!(%task_id, topic = %request.topic, "Accepted blog production request");

        let topic = request.topic.clone();
        let pipeline = Arc::clone(&self.pipeline);
        let sink = self.sink.clone();
        let handle = tokio::spawn(async move {
            let result = pipeline.run_pipeline(&request).await.inspect_err(|e| {
                error!(task_id = ?request.task_id, error = %e, "Dispatched run rejected");
            })?;
            if let Some(sink) = sink {
                sink.deliver(&result).await;
            }
            Ok(result)
        });

        Ok(TaskHandle {
            task_id,
            topic,
            handle,
        })
    }
}

impl std::fmt::Debug for TaskDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDispatcher")
            .field("pipeline", &self.pipeline)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
