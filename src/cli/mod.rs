//! Command-line interface module.

mod args;
pub mod inspect;
pub mod process;

pub use args::{Cli, Commands, StoreArgs};
