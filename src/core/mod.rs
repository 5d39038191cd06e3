pub mod errors;
pub mod models;

pub use errors::KarteiError;
pub use models::{
    AutofillLanguage,
    Flashcard,
    NewCard,
    Orientation,
};
