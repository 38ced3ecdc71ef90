pub mod catalog;
pub mod navigation;
pub mod state;
