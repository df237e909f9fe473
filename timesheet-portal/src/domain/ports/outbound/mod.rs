mod page_renderer;
mod remote_data;
mod user_prompt;

pub use page_renderer::*;
pub use remote_data::*;
pub use user_prompt::*;
