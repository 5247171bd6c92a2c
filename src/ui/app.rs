//! Main application structure and lifecycle management

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use super::status::{StatusBanner, StatusKind};
use super::{buttons, chat};
use crate::ai::Responder;
use crate::config::Config;
use crate::core::{ChatSession, SessionState, TypingDelay};

const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(30, 60, 114);

pub struct AssistantApp {
    pub config: Config,
    pub session: ChatSession,
    pub status: StatusBanner,
    pub style_initialized: bool,
    pub focus_input: bool,
}

impl AssistantApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, responder: Arc<dyn Responder>) -> Self {
        Self::with_context(cc.egui_ctx.clone(), config, responder)
    }

    /// Must be called from within a tokio runtime, like [`ChatSession::submit`].
    fn with_context(ctx: egui::Context, config: Config, responder: Arc<dyn Responder>) -> Self {
        // Background replies wake the window up
        let session = ChatSession::new(
            responder,
            TypingDelay::new(config.typing_min, config.typing_max),
            config.delivery,
        )
        .with_notifier(move || ctx.request_repaint());

        // Start-up notice
        let status = StatusBanner::new(
            config.ready_message.clone(),
            StatusKind::Success,
            config.status_duration,
        );

        Self {
            config,
            session,
            status,
            style_initialized: false,
            focus_input: true,
        }
    }

    fn init_style(&mut self, ctx: &egui::Context) {
        if self.style_initialized {
            return;
        }
        ctx.set_visuals(egui::Visuals::light());
        self.style_initialized = true;
    }

    /// Drops every reply still being typed.
    fn stop_replies(&mut self) {
        if !self.session.is_typing() {
            return;
        }
        self.session.cancel();
        self.status = StatusBanner::new("Replies stopped", StatusKind::Success, self.config.status_duration);
    }

    fn copy_transcript(&mut self, ctx: &egui::Context) {
        let (message, kind) = match self.session.transcript_json() {
            Ok(json) => {
                ctx.copy_text(json);
                log::info!(
                    "session {}: transcript of {} messages copied",
                    self.session.id(),
                    self.session.messages().len()
                );
                ("Transcript copied", StatusKind::Success)
            }
            Err(e) => {
                log::error!("cannot serialize transcript: {}", e);
                ("Transcript unavailable", StatusKind::Error)
            }
        };
        self.status = StatusBanner::new(message, kind, self.config.status_duration);
    }

    fn draw_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(HEADER_FILL).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(format!("🎓 {}", self.config.assistant_name))
                                .size(24.0)
                                .color(egui::Color32::WHITE),
                        );
                        ui.label(
                            egui::RichText::new("Your intelligent guide to university information")
                                .size(14.0)
                                .color(egui::Color32::from_white_alpha(230)),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Right to left: copy ends up rightmost, stop next to it
                        let copy = ui.add_enabled(
                            !self.session.messages().is_empty(),
                            egui::Button::new("Copy transcript"),
                        );
                        if copy.clicked() {
                            self.copy_transcript(ui.ctx());
                        }
                        if self.session.is_typing() && ui.button("Stop").clicked() {
                            self.stop_replies();
                        }
                    });
                });
            });
    }

    fn draw_footer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("input")
            .frame(egui::Frame::new().fill(egui::Color32::WHITE).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                if let Some(action) = buttons::draw_quick_actions(ui) {
                    log::debug!("quick action {:?}", action.label);
                    self.session.submit(action.phrase);
                }
                ui.add_space(12.0);

                let placeholder = "Ask me anything about University of Malakand...";
                let focus = std::mem::take(&mut self.focus_input);
                if chat::draw_input_row(ui, &mut self.session.input, placeholder, focus) {
                    self.session.submit_input();
                }
            });
    }

    fn draw_log(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(242, 242, 250)).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        chat::draw_messages(ui, self.session.messages());
                        if self.session.is_typing() {
                            chat::draw_typing_indicator(ui);
                        }
                    });
            });
    }
}

impl eframe::App for AssistantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.init_style(ctx);

        // Pick up replies delivered since the last frame
        self.session.poll();

        self.draw_header(ctx);
        self.draw_footer(ctx);
        self.draw_log(ctx);
        self.status.show(ctx);

        if self.session.state() == SessionState::AwaitingResponse {
            // keeps the typing dots moving
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{KeywordResponder, ResponseTable};

    fn app() -> AssistantApp {
        let config = Config::from_lookup(|key| match key {
            "UOM_LOG_DIR" => Some("logs".to_string()),
            _ => None,
        });
        let responder = Arc::new(KeywordResponder::new(ResponseTable::builtin()));
        AssistantApp::with_context(egui::Context::default(), config, responder)
    }

    #[tokio::test(start_paused = true)]
    async fn stop_discards_pending_replies() {
        let mut app = app();
        app.session.submit("help");
        app.session.submit("admission");
        assert_eq!(app.session.state(), SessionState::AwaitingResponse);

        app.stop_replies();
        assert_eq!(app.session.state(), SessionState::Idle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(app.session.poll(), 0);
        assert_eq!(app.session.messages().len(), 2);

        // the session keeps working after a stop
        app.session.submit("hello");
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(app.session.poll(), 1);
        assert_eq!(app.session.messages().len(), 4);
        assert!(app.focus_input);
    }
}
