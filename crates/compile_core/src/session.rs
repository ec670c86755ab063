//! Compilation-session state machine. Every UI event becomes one pure
//! transition through [`Session::apply`]; the single side-effecting step
//! (starting the delayed compile) is handed back as a [`SessionEffect`]
//! for the caller to execute.

use shared::{
    domain::{OptimizationLevel, OutputView, SessionId, TargetArch},
    protocol::{CompileArtifacts, CompileOutcome, CompileRequest},
};
use tracing::debug;

use crate::SAMPLE_PROGRAM;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Compiling,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    SetSourceText(String),
    BeginCompile,
    FinishCompile(CompileOutcome),
    SetActiveView(OutputView),
    SetConfiguration {
        optimization_level: Option<OptimizationLevel>,
        target_arch: Option<TargetArch>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    StartCompile(CompileRequest),
}

/// In-memory state of one editing/compiling interaction. Lives for the
/// process, never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    source_text: String,
    last_run_output: Option<String>,
    last_assembly: Option<String>,
    last_errors: Option<String>,
    active_view: OutputView,
    phase: SessionPhase,
    last_compilation_duration_ms: Option<u64>,
    optimization_level: OptimizationLevel,
    target_arch: TargetArch,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            source_text: SAMPLE_PROGRAM.to_string(),
            last_run_output: None,
            last_assembly: None,
            last_errors: None,
            active_view: OutputView::default(),
            phase: SessionPhase::default(),
            last_compilation_duration_ms: None,
            optimization_level: OptimizationLevel::default(),
            target_arch: TargetArch::default(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn last_run_output(&self) -> Option<&str> {
        self.last_run_output.as_deref()
    }

    pub fn last_assembly(&self) -> Option<&str> {
        self.last_assembly.as_deref()
    }

    pub fn last_errors(&self) -> Option<&str> {
        self.last_errors.as_deref()
    }

    pub fn active_view(&self) -> OutputView {
        self.active_view
    }

    pub fn is_compiling(&self) -> bool {
        self.phase == SessionPhase::Compiling
    }

    pub fn last_compilation_duration_ms(&self) -> Option<u64> {
        self.last_compilation_duration_ms
    }

    pub fn optimization_level(&self) -> OptimizationLevel {
        self.optimization_level
    }

    pub fn target_arch(&self) -> TargetArch {
        self.target_arch
    }

    /// Text the output pane should show for the current view selection.
    /// A failed run's diagnostics replace the execution transcript; the
    /// assembly view simply goes empty after a failure.
    pub fn displayed_text(&self) -> &str {
        match self.active_view {
            OutputView::Executed => self
                .last_errors
                .as_deref()
                .or(self.last_run_output.as_deref())
                .unwrap_or(""),
            OutputView::Assembly => self.last_assembly.as_deref().unwrap_or(""),
        }
    }

    pub fn apply(&mut self, action: SessionAction) -> Option<SessionEffect> {
        match action {
            SessionAction::SetSourceText(text) => {
                self.source_text = text;
                None
            }
            SessionAction::BeginCompile => {
                if self.phase == SessionPhase::Compiling {
                    debug!(session = %self.id.0, "compile requested while one is in flight; ignored");
                    return None;
                }
                self.phase = SessionPhase::Compiling;
                Some(SessionEffect::StartCompile(CompileRequest {
                    source: self.source_text.clone(),
                    optimization_level: self.optimization_level,
                    target_arch: self.target_arch,
                }))
            }
            SessionAction::FinishCompile(outcome) => {
                self.phase = SessionPhase::Idle;
                self.last_compilation_duration_ms = Some(outcome.duration_ms);
                // Overwrite-on-new-run: exactly one branch is populated
                // after any completed compile.
                match outcome.artifacts {
                    CompileArtifacts::Success {
                        run_transcript,
                        assembly_listing,
                    } => {
                        self.last_run_output = Some(run_transcript);
                        self.last_assembly = Some(assembly_listing);
                        self.last_errors = None;
                    }
                    CompileArtifacts::Failure { diagnostics } => {
                        self.last_errors = Some(diagnostics);
                        self.last_run_output = None;
                        self.last_assembly = None;
                    }
                }
                None
            }
            SessionAction::SetActiveView(view) => {
                self.active_view = view;
                None
            }
            SessionAction::SetConfiguration {
                optimization_level,
                target_arch,
            } => {
                if let Some(level) = optimization_level {
                    self.optimization_level = level;
                }
                if let Some(target) = target_arch {
                    self.target_arch = target;
                }
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
