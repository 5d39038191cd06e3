use serde::{
    Deserialize,
    Serialize,
};

/// One row of the card table, as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub id: i64,
    pub lesson: String,
    pub front: String,
    pub back: String,
    pub selected: bool,
    pub copies: u32,
    pub printed_count: u32,
    pub last_printed: Option<String>,
}

/// Insert payload for rows that arrive outside the entry form (CSV import).
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub lesson: String,
    pub front: String,
    pub back: String,
    pub copies: u32,
    pub printed_count: u32,
    pub last_printed: Option<String>,
}

impl Default for NewCard {
    fn default() -> Self {
        NewCard {
            lesson: String::new(),
            front: String::new(),
            back: String::new(),
            copies: 1,
            printed_count: 0,
            last_printed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutofillLanguage {
    Disabled,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Chinese,
    Japanese,
}

impl AutofillLanguage {
    pub const ALL: [AutofillLanguage; 8] = [
        AutofillLanguage::Disabled,
        AutofillLanguage::Spanish,
        AutofillLanguage::French,
        AutofillLanguage::German,
        AutofillLanguage::Italian,
        AutofillLanguage::Portuguese,
        AutofillLanguage::Chinese,
        AutofillLanguage::Japanese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AutofillLanguage::Disabled => "Disabled",
            AutofillLanguage::Spanish => "Spanish",
            AutofillLanguage::French => "French",
            AutofillLanguage::German => "German",
            AutofillLanguage::Italian => "Italian",
            AutofillLanguage::Portuguese => "Portuguese",
            AutofillLanguage::Chinese => "Chinese",
            AutofillLanguage::Japanese => "Japanese",
        }
    }

    /// Target code for the lookup endpoint. `None` means no lookup.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AutofillLanguage::Disabled => None,
            AutofillLanguage::Spanish => Some("es"),
            AutofillLanguage::French => Some("fr"),
            AutofillLanguage::German => Some("de"),
            AutofillLanguage::Italian => Some("it"),
            AutofillLanguage::Portuguese => Some("pt"),
            AutofillLanguage::Chinese => Some("zh-CN"),
            AutofillLanguage::Japanese => Some("ja"),
        }
    }
}
