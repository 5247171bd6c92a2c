//! Transient status notice shown in the top-right corner.

use std::time::{Duration, Instant};

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    message: String,
    kind: StatusKind,
    shown_at: Instant,
    duration: Duration,
}

impl StatusBanner {
    pub fn new(message: impl Into<String>, kind: StatusKind, duration: Duration) -> Self {
        Self::shown_at(message, kind, duration, Instant::now())
    }

    pub fn shown_at(
        message: impl Into<String>,
        kind: StatusKind,
        duration: Duration,
        shown_at: Instant,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at,
            duration,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }

    /// Time left before the banner hides itself.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }

    /// Draws the banner if it is still visible; returns whether it was drawn.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let now = Instant::now();
        if !self.is_visible_at(now) {
            return false;
        }

        let fill = match self.kind {
            StatusKind::Success => egui::Color32::from_rgb(40, 167, 69),
            StatusKind::Error => egui::Color32::from_rgb(220, 53, 69),
        };

        egui::Area::new(egui::Id::new("status_banner"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(10.0)
                    .inner_margin(egui::Margin::symmetric(15, 10))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&self.message)
                                .size(14.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
            });

        ctx.request_repaint_after(self.remaining_at(now));
        true
    }
}
