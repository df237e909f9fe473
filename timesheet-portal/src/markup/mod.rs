//! Reading the server-rendered table and re-deriving the visible widget from controller state.

mod body;
mod extract;
mod render;
mod selectors;

pub use body::*;
pub use extract::extract_table;
pub use render::*;
pub use selectors::*;
