pub mod layout;
pub mod pdf;

pub use layout::{
    paginate,
    PrintCard,
    SheetPair,
};
pub use pdf::{
    export_pdf,
    PageStyle,
};
