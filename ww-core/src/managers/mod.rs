mod state_manager;
mod tick_manager;

pub use state_manager::{ControllerState, StateManager, TickInput};
pub use tick_manager::TickSchedule;
