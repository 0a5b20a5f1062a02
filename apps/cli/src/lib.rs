pub mod cli;
pub mod html;
pub mod input;
pub mod logging;
pub mod summary;

pub use cli::*;
pub use html::*;
pub use input::*;
pub use logging::*;
pub use summary::*;
