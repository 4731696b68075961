//! Test assertions for pipeline results.

use crate::core::StageKind;
use crate::pipeline::PipelineRun;
use crate::stages::StageStatus;
use crate::utils::TASK_ID_PREFIX;

/// Asserts that `text` is the placeholder of `stage`.
pub fn assert_degraded_placeholder(text: &str, stage: StageKind) {
    let prefix = format!("Error {}: ", stage.failure_label());
    assert!(
        text.starts_with(&prefix),
        "Expected placeholder for {stage} starting with '{prefix}', got '{text}'"
    );
}

/// Asserts that `task_id` is a synthesized `BLOG-` id with 14 digits.
pub fn assert_synthesized_task_id(task_id: &str) {
    let digits = task_id.strip_prefix(TASK_ID_PREFIX);
    assert!(
        digits.is_some_and(|d| d.len() == 14 && d.bytes().all(|b| b.is_ascii_digit())),
        "Expected {TASK_ID_PREFIX}<14 digits>, got '{task_id}'"
    );
}

/// Asserts the status of every stage in execution order.
pub fn assert_stage_statuses(run: &PipelineRun, expected: &[StageStatus]) {
    let actual: Vec<StageStatus> = run.stages.iter().map(|r| r.status).collect();
    assert_eq!(actual, expected, "Stage statuses differ");
}
