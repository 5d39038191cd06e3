use crate::gui::{
    error_modal::ErrorModal,
    modal::Modal,
    notice_modal::NoticeModal,
    options_modal::OptionsModal,
};

/// What a confirmed delete dialog removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteTarget {
    #[default]
    Selected,
    Card(i64),
}

/// Prompt text plus target, loaded into the dialog when it opens.
#[derive(Clone, Default)]
pub struct DeleteRequest {
    pub message: String,
    pub target: DeleteTarget,
}

pub struct Modals {
    pub error: ErrorModal,
    pub notice: NoticeModal,
    pub options: OptionsModal,
    pub confirm_delete: Modal<DeleteRequest>,
}

impl Default for Modals {
    fn default() -> Self {
        Self {
            error: ErrorModal::new(),
            notice: NoticeModal::new(),
            options: OptionsModal::new(),
            confirm_delete: Modal::new("Confirm delete"),
        }
    }
}
