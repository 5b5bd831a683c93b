pub mod errors;
pub mod messages;
pub mod player;
pub mod round;

// Re-export all types
pub use errors::*;
pub use messages::*;
pub use player::*;
pub use round::*;

pub type RoundId = uuid::Uuid;
