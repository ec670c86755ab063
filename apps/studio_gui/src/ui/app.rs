//! Main studio window: editor panel, output panel, and the status strip.

use arboard::Clipboard;
use compile_core::session::{Session, SessionAction, SessionEffect};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{OptimizationLevel, OutputView, TargetArch};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{StatusBanner, StatusBannerSeverity, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::apply_ui_event;
use crate::transfer;

pub struct StudioApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: Session,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl StudioApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: Session::new(),
            status: "Ready".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(
                &mut self.session,
                &mut self.status,
                &mut self.status_banner,
                event,
            );
        }
    }

    fn start_compile(&mut self) {
        if let Some(SessionEffect::StartCompile(request)) =
            self.session.apply(SessionAction::BeginCompile)
        {
            let opt = request.optimization_level.label();
            let target = request.target_arch.label();
            self.status = format!("Compiling with {opt} for {target}...");
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Compile {
                    session_id: self.session.id(),
                    request,
                },
                &mut self.status,
            );
        }
    }

    fn pick_source_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Rust or text source", &transfer::SOURCE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match transfer::validate_source_path(&path) {
            Ok(()) => {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::LoadSourceFile { path },
                    &mut self.status,
                );
            }
            Err(err) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Warning)
                    .set_title("Unsupported file")
                    .set_description(err.to_string())
                    .show();
                self.status = err.to_string();
            }
        }
    }

    fn pick_save_target(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(transfer::DOWNLOAD_FILE_NAME)
            .save_file()
        else {
            return;
        };

        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SaveSource {
                path,
                text: self.session.source_text().to_string(),
            },
            &mut self.status,
        );
    }

    fn copy_to_clipboard(&mut self, text: &str, what: &str) {
        match Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
                Ok(()) => self.status = format!("Copied {what} to clipboard"),
                Err(err) => self.status = format!("Clipboard error: {err}"),
            },
            Err(err) => self.status = format!("Clipboard unavailable: {err}"),
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_editor_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Editor");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Copy").clicked() {
                    let text = self.session.source_text().to_string();
                    self.copy_to_clipboard(&text, "source");
                }
                if ui.button("Download").clicked() {
                    self.pick_save_target();
                }
                if ui.button("Upload").clicked() {
                    self.pick_source_file();
                }
            });
        });
        ui.separator();

        let editor_height = ui.available_height() - 40.0;
        let mut text = self.session.source_text().to_string();
        let response = ui.add_sized(
            [ui.available_width(), editor_height.max(120.0)],
            egui::TextEdit::multiline(&mut text)
                .id_salt("source_editor")
                .font(egui::TextStyle::Monospace)
                .code_editor(),
        );
        if response.changed() {
            self.session.apply(SessionAction::SetSourceText(text));
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let compiling = self.session.is_compiling();
            let compile_btn = egui::Button::new(egui::RichText::new("Compile").strong());
            if ui.add_enabled(!compiling, compile_btn).clicked() {
                self.start_compile();
            }
            if compiling {
                ui.spinner();
                ui.label("Compiling...");
            }
        });
    }

    fn show_output_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let active = self.session.active_view();
            for (view, label) in [
                (OutputView::Executed, "Executed"),
                (OutputView::Assembly, "Assembly"),
            ] {
                if ui.selectable_label(active == view, label).clicked() && active != view {
                    self.session.apply(SessionAction::SetActiveView(view));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Copy output").clicked() {
                    let text = self.session.displayed_text().to_string();
                    self.copy_to_clipboard(&text, "output");
                }
                self.show_configuration_controls(ui);
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let text = self.session.displayed_text();
                if text.is_empty() {
                    ui.weak("Run a compilation to see its output here.");
                } else {
                    ui.label(egui::RichText::new(text).monospace());
                }
            });
    }

    fn show_configuration_controls(&mut self, ui: &mut egui::Ui) {
        let mut target = self.session.target_arch();
        egui::ComboBox::from_id_salt("target_arch_combo")
            .selected_text(target.label())
            .show_ui(ui, |ui| {
                for candidate in TargetArch::ALL {
                    ui.selectable_value(&mut target, candidate, candidate.label());
                }
            });
        if target != self.session.target_arch() {
            self.session.apply(SessionAction::SetConfiguration {
                optimization_level: None,
                target_arch: Some(target),
            });
        }

        let mut opt = self.session.optimization_level();
        egui::ComboBox::from_id_salt("optimization_level_combo")
            .selected_text(opt.label())
            .show_ui(ui, |ui| {
                for candidate in OptimizationLevel::ALL {
                    ui.selectable_value(&mut opt, candidate, candidate.label());
                }
            });
        if opt != self.session.optimization_level() {
            self.session.apply(SessionAction::SetConfiguration {
                optimization_level: Some(opt),
                target_arch: None,
            });
        }
    }

    fn show_status_strip(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.small(egui::RichText::new(&self.status).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(ms) = self.session.last_compilation_duration_ms() {
                    ui.small(egui::RichText::new(format!("last compile: {ms} ms")).weak());
                }
            });
        });
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("studio_top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Rust Compiler Studio");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(egui::RichText::new("simulated toolchain").weak());
                    });
                });
                self.show_status_banner(ui);
            });

        egui::TopBottomPanel::bottom("studio_status_strip")
            .resizable(false)
            .show(ctx, |ui| {
                self.show_status_strip(ui);
            });

        egui::SidePanel::left("editor_panel")
            .resizable(true)
            .default_width(560.0)
            .min_width(360.0)
            .show(ctx, |ui| {
                self.show_editor_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_output_panel(ui);
        });

        if self.session.is_compiling() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use compile_core::SimulatedCompiler;
    use crossbeam_channel::bounded;
    use shared::protocol::CompileRequest;

    use super::*;

    fn test_app() -> (StudioApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(8);
        (StudioApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    #[test]
    fn start_compile_queues_a_backend_command_and_locks_the_session() {
        let (mut app, cmd_rx, _ui_tx) = test_app();

        app.start_compile();

        assert!(app.session.is_compiling());
        assert!(app.status.starts_with("Compiling"));
        match cmd_rx.try_recv() {
            Ok(BackendCommand::Compile { request, .. }) => {
                assert_eq!(request.source, app.session.source_text());
            }
            other => panic!("expected a compile command, got {other:?}"),
        }
    }

    #[test]
    fn start_compile_is_a_no_op_while_a_compile_is_in_flight() {
        let (mut app, cmd_rx, _ui_tx) = test_app();

        app.start_compile();
        let _ = cmd_rx.try_recv();
        app.start_compile();

        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn drained_compile_outcome_unlocks_the_session() {
        let (mut app, _cmd_rx, ui_tx) = test_app();

        app.start_compile();
        let request = CompileRequest {
            source: app.session.source_text().to_string(),
            optimization_level: app.session.optimization_level(),
            target_arch: app.session.target_arch(),
        };
        let outcome =
            SimulatedCompiler::evaluate(&request, compile_core::SIMULATED_COMPILE_LATENCY);
        ui_tx
            .send(UiEvent::CompileFinished(outcome))
            .expect("ui channel open");

        app.process_ui_events();

        assert!(!app.session.is_compiling());
        assert!(app.session.last_run_output().is_some());
    }
}
