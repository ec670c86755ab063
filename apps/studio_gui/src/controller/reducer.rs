//! Applies drained backend events to the session and the status chrome.
//! Pure with respect to the channels; the UI drains, this reduces.

use chrono::Local;
use compile_core::session::{Session, SessionAction};

use crate::controller::events::{
    describe_startup_failure, err_label, StatusBanner, StatusBannerSeverity, UiErrorContext,
    UiEvent,
};

pub fn apply_ui_event(
    session: &mut Session,
    status: &mut String,
    banner: &mut Option<StatusBanner>,
    event: UiEvent,
) {
    match event {
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::SourceFileLoaded { name, text } => {
            session.apply(SessionAction::SetSourceText(text));
            *status = format!("Loaded {name} into the editor");
        }
        UiEvent::CompileFinished(outcome) => {
            let succeeded = outcome.is_success();
            let duration_ms = outcome.duration_ms;
            session.apply(SessionAction::FinishCompile(outcome));
            let stamp = Local::now().format("%H:%M:%S");
            *status = if succeeded {
                format!("Compilation succeeded in {duration_ms} ms at {stamp}")
            } else {
                format!("Compilation finished with errors in {duration_ms} ms at {stamp}")
            };
        }
        UiEvent::Error(err) => {
            *status = if err.context() == UiErrorContext::BackendStartup {
                describe_startup_failure(err.message())
            } else {
                format!("{} error: {}", err_label(err.category()), err.message())
            };
            if matches!(
                err.context(),
                UiErrorContext::BackendStartup | UiErrorContext::Compile
            ) {
                *banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: status.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use compile_core::session::Session;
    use compile_core::{SimulatedCompiler, SIMULATED_COMPILE_LATENCY};
    use shared::domain::{OptimizationLevel, TargetArch};
    use shared::protocol::CompileRequest;

    use super::*;
    use crate::controller::events::{UiError, UiErrorContext, UiEvent};

    fn outcome_for(source: &str) -> shared::protocol::CompileOutcome {
        let request = CompileRequest {
            source: source.to_string(),
            optimization_level: OptimizationLevel::O0,
            target_arch: TargetArch::X86_64,
        };
        SimulatedCompiler::evaluate(&request, SIMULATED_COMPILE_LATENCY)
    }

    #[test]
    fn compile_finished_lands_in_the_session_and_status_line() {
        let mut session = Session::new();
        let mut status = String::new();
        let mut banner = None;

        apply_ui_event(
            &mut session,
            &mut status,
            &mut banner,
            UiEvent::CompileFinished(outcome_for("fn main() {}")),
        );

        assert!(session.last_run_output().is_some());
        assert!(status.contains("succeeded in 1500 ms"));
        assert!(banner.is_none());
    }

    #[test]
    fn simulated_failure_is_a_status_line_not_a_banner() {
        let mut session = Session::new();
        let mut status = String::new();
        let mut banner = None;

        apply_ui_event(
            &mut session,
            &mut status,
            &mut banner,
            UiEvent::CompileFinished(outcome_for("fn main() { error }")),
        );

        assert!(session.last_errors().is_some());
        assert!(status.contains("finished with errors"));
        assert!(banner.is_none());
    }

    #[test]
    fn startup_failure_raises_the_error_banner() {
        let mut session = Session::new();
        let mut status = String::new();
        let mut banner = None;

        apply_ui_event(
            &mut session,
            &mut status,
            &mut banner,
            UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "backend worker startup failure: failed to build runtime: boom",
            )),
        );

        assert!(banner.is_some());
        assert!(!session.is_compiling());
    }

    #[test]
    fn loaded_file_replaces_the_editor_text() {
        let mut session = Session::new();
        let mut status = String::new();
        let mut banner = None;

        apply_ui_event(
            &mut session,
            &mut status,
            &mut banner,
            UiEvent::SourceFileLoaded {
                name: "lib.rs".to_string(),
                text: "fn lib() {}".to_string(),
            },
        );

        assert_eq!(session.source_text(), "fn lib() {}");
        assert!(status.contains("lib.rs"));
    }
}
