pub mod config;
pub mod nickname;
pub mod presentation;
pub mod reward;
pub mod round_controller;
pub mod round_events;
pub mod target;
pub mod timers;

// Re-export main components
pub use config::*;
pub use nickname::*;
pub use presentation::*;
pub use reward::*;
pub use round_controller::*;
pub use round_events::*;
pub use target::*;
pub use timers::*;
