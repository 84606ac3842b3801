pub mod recommend_handlers;
pub mod system_handlers;

pub use recommend_handlers::*;
pub use system_handlers::*;
