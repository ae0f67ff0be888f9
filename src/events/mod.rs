pub mod keyboard;
pub mod motion;
pub mod pointer;

pub use keyboard::{toggle_language, wire_global_keydown};
pub use motion::MotionListener;
pub use pointer::{wire_input_handlers, InputWiring};
