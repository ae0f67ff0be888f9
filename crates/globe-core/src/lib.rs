pub mod constants;
pub mod options;
pub mod predictions;
pub mod quality;
pub mod shake;
pub mod snow;
pub mod sound;
pub mod state;

pub use options::*;
pub use predictions::*;
pub use quality::*;
pub use shake::*;
pub use snow::*;
pub use sound::*;
pub use state::*;
