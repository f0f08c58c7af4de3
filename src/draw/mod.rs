//! Abstract drawing commands, the emitter that produces them, and the
//! AutoLISP script adapter that serializes them.

pub mod command;
pub mod emit;
pub mod lisp;

pub use command::{DrawCommand, Justify};
pub use emit::emit;
pub use lisp::render_script;
