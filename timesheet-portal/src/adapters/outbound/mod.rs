mod memory;
mod odoo;
mod prompt;
mod terminal;

pub use memory::*;
pub use odoo::OdooAdapter;
pub use prompt::ScriptedPrompt;
pub use terminal::TerminalPrompt;
