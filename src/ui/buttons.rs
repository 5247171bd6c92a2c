//! Quick-action buttons rendering and interaction module

use eframe::egui;

/// Button styling constants
pub const QUICK_BUTTON_HEIGHT: f32 = 24.0;
pub const QUICK_BUTTON_SPACING: f32 = 8.0;

/// A button that submits a fixed phrase through the normal send path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub phrase: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction { label: "Faculty Info", phrase: "Tell me about faculty" },
    QuickAction { label: "Admissions", phrase: "Admission requirements" },
    QuickAction { label: "Notifications", phrase: "Recent notifications" },
    QuickAction { label: "Departments", phrase: "Department information" },
    QuickAction { label: "Research", phrase: "Research information" },
    QuickAction { label: "Help", phrase: "help" },
];

/// Renders the quick-action row.
///
/// Returns the action that was clicked this frame, if any
pub fn draw_quick_actions(ui: &mut egui::Ui) -> Option<QuickAction> {
    let accent = egui::Color32::from_rgb(102, 126, 234);
    let mut clicked = None;

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = QUICK_BUTTON_SPACING;
        for action in QUICK_ACTIONS {
            let button = egui::Button::new(
                egui::RichText::new(action.label).size(12.0).color(accent),
            )
            .fill(egui::Color32::from_rgba_unmultiplied(102, 126, 234, 26))
            .stroke(egui::Stroke::new(1.0, accent.gamma_multiply(0.4)))
            .corner_radius(12.0)
            .min_size(egui::vec2(0.0, QUICK_BUTTON_HEIGHT));

            let response = ui.add(button).on_hover_text(action.phrase);
            if response.clicked() {
                clicked = Some(action);
            }
        }
    });

    clicked
}
