pub mod actions;
pub mod app;
pub mod entry_bar;
pub mod error_modal;
pub mod file_dialogs;
pub mod modal;
pub mod notice_modal;
pub mod options_modal;
pub mod table;
pub mod top_bar;

pub use actions::{
    ActionQueue,
    UiAction,
};
pub use app::KarteiApp;
