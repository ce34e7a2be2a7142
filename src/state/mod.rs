//! Question form state

mod catalog;
mod forms;
mod question;

pub use catalog::*;
pub use forms::*;
pub use question::*;
