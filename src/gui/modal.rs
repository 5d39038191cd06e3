use eframe::egui;

/// Reusable confirm/cancel dialog shell. The caller owns the draft value
/// and decides what a confirmation means.
pub struct Modal<T> {
    open: bool,
    title: String,
    data: T,
    fixed_size: Option<egui::Vec2>,
}

#[derive(Debug)]
pub enum ModalResult<T> {
    Confirmed(T),
    Cancelled,
}

impl<T: Default> Modal<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self { open: false, title: title.into(), data: T::default(), fixed_size: None }
    }
}

impl<T> Modal<T> {
    pub fn with_fixed_size(mut self, size: egui::Vec2) -> Self {
        self.fixed_size = Some(size);
        self
    }

    /// Loads a fresh draft and opens the dialog.
    pub fn open_with(&mut self, data: T) {
        self.data = data;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draws the dialog when open. The content closure edits the draft and
    /// returns `Some` once a button settled it; a click on the dimmed
    /// backdrop counts as cancel. Any result closes the dialog.
    pub fn show<F>(&mut self, ctx: &egui::Context, content: F) -> Option<ModalResult<T>>
    where
        F: FnOnce(&mut egui::Ui, &mut T) -> Option<ModalResult<T>>,
    {
        if !self.open {
            return None;
        }

        let clicked_outside = self.show_overlay(ctx);

        let mut window = egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO);

        if let Some(size) = self.fixed_size {
            window = window.fixed_size(size);
        }

        let mut result = None;
        window.show(ctx, |ui| {
            result = content(ui, &mut self.data);
        });

        if result.is_none() && clicked_outside {
            result = Some(ModalResult::Cancelled);
        }

        if result.is_some() {
            self.open = false;
        }

        result
    }

    fn show_overlay(&self, ctx: &egui::Context) -> bool {
        let area_response = egui::Area::new(egui::Id::new("modal_overlay"))
            .order(egui::Order::Background)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                let (_rect, response) =
                    ui.allocate_exact_size(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));
                response.clicked()
            });

        area_response.inner
    }
}

pub fn action_buttons<T>(
    ui: &mut egui::Ui,
    data: &T,
    confirm_text: &str,
    cancel_text: &str,
) -> Option<ModalResult<T>>
where
    T: Clone,
{
    ui.horizontal(|ui| {
        if ui.button(confirm_text).clicked() {
            Some(ModalResult::Confirmed(data.clone()))
        } else if ui.button(cancel_text).clicked() {
            Some(ModalResult::Cancelled)
        } else {
            None
        }
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_closes_and_returns_payload() {
        let ctx = egui::Context::default();
        let mut modal: Modal<String> = Modal::new("Question");
        modal.open_with("really?".to_string());
        assert!(modal.is_open());

        let mut answer = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            answer = modal.show(ctx, |_ui, data| Some(ModalResult::Confirmed(data.clone())));
        });

        match answer {
            Some(ModalResult::Confirmed(text)) => assert_eq!(text, "really?"),
            other => panic!("Expected a confirmation, got {:?}", other),
        }
        assert!(!modal.is_open());
    }

    #[test]
    fn test_undecided_dialog_stays_open() {
        let ctx = egui::Context::default();
        let mut modal: Modal<String> = Modal::new("Question");
        modal.open_with("pending".to_string());

        let mut answer = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            answer = modal.show(ctx, |ui, message| {
                ui.label(message.as_str());
                None
            });
        });

        assert!(answer.is_none());
        assert!(modal.is_open());
    }

    #[test]
    fn test_closed_modal_never_runs_content() {
        let ctx = egui::Context::default();
        let mut modal: Modal<String> = Modal::new("Question");

        let mut ran = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let result = modal.show(ctx, |_ui, _data| {
                ran = true;
                None
            });
            assert!(result.is_none());
        });
        assert!(!ran);
    }
}
