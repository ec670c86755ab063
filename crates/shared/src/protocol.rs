use serde::{Deserialize, Serialize};

use crate::domain::{OptimizationLevel, TargetArch};

/// Snapshot of the editor contents and configuration taken when a compile
/// is invoked. Configuration changes made afterwards only affect the next
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub source: String,
    pub optimization_level: OptimizationLevel,
    pub target_arch: TargetArch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CompileArtifacts {
    Success {
        run_transcript: String,
        assembly_listing: String,
    },
    Failure {
        diagnostics: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOutcome {
    pub duration_ms: u64,
    pub artifacts: CompileArtifacts,
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.artifacts, CompileArtifacts::Success { .. })
    }
}
