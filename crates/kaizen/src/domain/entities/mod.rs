pub mod chapter;
pub mod history;
pub mod library;
pub mod manga;
