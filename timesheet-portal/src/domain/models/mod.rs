mod edit_session;
mod ids;
mod row;
mod session;

pub use edit_session::*;
pub use ids::*;
pub use row::*;
pub use session::*;
