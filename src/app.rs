mod app_state;
mod events;
mod input_state;
mod mouse;
mod render;


// Re-export public types
pub use app_state::{App, Focus};
pub use input_state::InputState;
