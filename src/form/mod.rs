mod actions;
mod naming;
pub mod ops;
mod reducers;
mod session;

pub use actions::FormCommand;
pub use naming::{normalize_name, unique_name};
pub use ops::{Direction, Locator};
pub use reducers::FormEngine;
pub use session::FormSession;
