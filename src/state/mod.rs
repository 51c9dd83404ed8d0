//! Form state module

mod forms;
mod options;

pub use forms::*;
pub use options::*;
