pub mod core;
pub mod csv_io;
pub mod gui;
pub mod persistence;
pub mod print;
pub mod settings;
pub mod store;
pub mod translate;
