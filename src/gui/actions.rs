// A small ui action queue so table closures don't need mutable access to the app
#[derive(Debug, Clone)]
pub enum UiAction {
    // Cell edits, written through without a reload
    SetLesson { id: i64, value: String },
    SetFront { id: i64, value: String },
    SetBack { id: i64, value: String },
    SetCopies { id: i64, value: u32 },

    // Selection and membership
    SetSelected { id: i64, selected: bool },
    SelectVisible,
    UnselectAll,
    SelectUnprinted,
    DeleteCard(i64),
    ConfirmDeleteSelected,
    PrintSelected,

    // Filters
    SetSearch(String),
    SetShowSelectedOnly(bool),

    // Column layout
    SetColumnWidth { column: &'static str, width: f32 },
    SaveColumnWidths,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
