//! Chat log rendering and input row

use eframe::egui;

use super::format;
use crate::core::Message;

/// Constants for chat styling
pub const BUBBLE_MAX_FRACTION: f32 = 0.8;
pub const BUBBLE_ROUNDING: f32 = 18.0;
pub const MESSAGE_SPACING: f32 = 15.0;
pub const INPUT_HEIGHT: f32 = 36.0;

const USER_FILL: egui::Color32 = egui::Color32::from_rgb(102, 126, 234);
const BOT_FILL: egui::Color32 = egui::Color32::from_rgb(248, 249, 250);
const BOT_STROKE: egui::Color32 = egui::Color32::from_rgb(233, 236, 239);
const BOT_TEXT: egui::Color32 = egui::Color32::from_rgb(51, 51, 51);
const BOT_STRONG: egui::Color32 = egui::Color32::from_rgb(30, 60, 114);

pub const WELCOME: &str = "**Welcome!** I'm your University of Malakand AI Assistant. \
I can help you with information about faculty, departments, admissions, notifications, and more. \
How can I assist you today?";

fn bubble(ui: &mut egui::Ui, text: &str, is_user: bool) {
    let max_width = ui.available_width() * BUBBLE_MAX_FRACTION;
    let (fill, stroke, color, strong) = if is_user {
        (USER_FILL, egui::Stroke::NONE, egui::Color32::WHITE, egui::Color32::WHITE)
    } else {
        (BOT_FILL, egui::Stroke::new(1.0, BOT_STROKE), BOT_TEXT, BOT_STRONG)
    };

    let job = format::layout_job(
        text,
        egui::FontId::proportional(15.0),
        color,
        strong,
        max_width - 36.0,
    );

    egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(egui::Margin::symmetric(18, 12))
        .show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.label(job);
        });
}

fn message_row(ui: &mut egui::Ui, message: &Message) {
    let layout = if message.is_user() {
        egui::Layout::right_to_left(egui::Align::Min)
    } else {
        egui::Layout::left_to_right(egui::Align::Min)
    };

    ui.with_layout(layout, |ui| {
        ui.vertical(|ui| {
            bubble(ui, &message.text, message.is_user());
            ui.label(
                egui::RichText::new(message.sent_at.format("%H:%M").to_string())
                    .size(10.0)
                    .color(egui::Color32::GRAY),
            );
        });
    });
}

/// Renders the welcome note followed by every message, oldest first.
pub fn draw_messages(ui: &mut egui::Ui, messages: &[Message]) {
    ui.spacing_mut().item_spacing.y = MESSAGE_SPACING;
    ui.with_layout(egui::Layout::left_to_right(egui::Align::Min), |ui| {
        bubble(ui, WELCOME, false);
    });
    for message in messages {
        message_row(ui, message);
    }
}

/// Renders the animated "typing" dots.
pub fn draw_typing_indicator(ui: &mut egui::Ui) {
    let time = ui.input(|i| i.time);
    egui::Frame::new()
        .fill(BOT_FILL)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(egui::Margin::symmetric(18, 12))
        .show(ui, |ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(36.0, 12.0), egui::Sense::hover());
            let painter = ui.painter_at(rect);
            for i in 0..3 {
                let phase = (time * 2.0 * std::f64::consts::PI / 1.4 - i as f64 * 0.9).sin();
                let lift = (phase.max(0.0) * 4.0) as f32;
                let center = egui::pos2(rect.min.x + 6.0 + i as f32 * 12.0, rect.center().y - lift);
                painter.circle_filled(center, 4.0, egui::Color32::from_gray(153));
            }
        });
}

/// Renders the input field and Send button.
///
/// Returns true if the user asked to send (Enter or button click). `focus` moves keyboard focus
/// into the text field.
pub fn draw_input_row(ui: &mut egui::Ui, input_text: &mut String, placeholder: &str, focus: bool) -> bool {
    let mut send = false;

    ui.horizontal(|ui| {
        let button_width = 80.0;
        let field_width = (ui.available_width() - button_width - 10.0).max(100.0);

        let response = ui.add_sized(
            [field_width, INPUT_HEIGHT],
            egui::TextEdit::singleline(input_text)
                .hint_text(placeholder)
                .margin(egui::Margin::symmetric(12, 8)),
        );
        if focus {
            response.request_focus();
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }

        let button = egui::Button::new(
            egui::RichText::new("Send").strong().color(egui::Color32::WHITE),
        )
        .fill(USER_FILL)
        .corner_radius(INPUT_HEIGHT / 2.0);
        if ui.add_sized([button_width, INPUT_HEIGHT], button).clicked() {
            send = true;
        }
    });

    send
}
