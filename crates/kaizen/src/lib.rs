#[macro_use]
extern crate log;

pub mod domain;
pub mod infrastructure;
