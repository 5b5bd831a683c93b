pub mod config;
pub mod driver;
pub mod presentation;
pub mod scheduler;
pub mod terminal;

pub use driver::{RoundDriver, RoundHandle, RuntimeController};
