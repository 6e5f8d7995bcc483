//! Button-and-door escape room
//!
//! The agent must touch a button, which sinks the door blocking the exit,
//! then reach the goal behind it.

pub mod door;
pub mod escaper;
pub mod playground;

pub use door::{DoorAnimator, DoorState};
pub use escaper::{heuristic, ButtonEscaperAgent, EscaperConfig, HeuristicKeys};
pub use playground::{EscapeRoom, EscapeRoomBodies, EscapeRoomConfig};
