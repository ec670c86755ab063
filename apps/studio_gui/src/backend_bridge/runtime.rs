//! Backend worker: owns the tokio runtime and executes queued commands
//! strictly in order, which serializes compiles behind the UI's
//! disabled-button guard.

use compile_core::SimulatedCompiler;
use crossbeam_channel::{Receiver, Sender};
use shared::error::TransferError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::transfer;

pub fn spawn_backend_thread(
    compiler: SimulatedCompiler,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Compile {
                        session_id,
                        request,
                    } => {
                        let task = compiler.spawn(session_id, request);
                        match task.join().await {
                            Ok(outcome) => {
                                let _ = ui_tx.try_send(UiEvent::CompileFinished(outcome));
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Compile,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::LoadSourceFile { path } => {
                        if let Err(err) = transfer::validate_source_path(&path) {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::LoadFile,
                                err.to_string(),
                            )));
                            continue;
                        }
                        match tokio::fs::read_to_string(&path).await {
                            Ok(text) => {
                                let _ = ui_tx.try_send(UiEvent::SourceFileLoaded {
                                    name: transfer::display_name(&path),
                                    text,
                                });
                            }
                            Err(source) => {
                                let err = TransferError::Read { path, source };
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::LoadFile,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::SaveSource { path, text } => {
                        match tokio::fs::write(&path, text).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::Info(format!(
                                    "Saved {}",
                                    path.display()
                                )));
                            }
                            Err(source) => {
                                let err = TransferError::Write { path, source };
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::SaveFile,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}
