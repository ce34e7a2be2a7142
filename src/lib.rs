//! Question Form - authoring engine for multiple-choice exam questions
//!
//! Keeps a question being authored consistent while subjects and their
//! dependent competencies load asynchronously, validates it, and composes
//! the multipart payload the question backend expects.

pub mod api;
pub mod compose;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod notify;
pub mod resolver;
pub mod state;
pub mod validate;

pub use controller::{FormController, FormMode};
pub use error::{ApiError, LoadError, SubmissionError};
pub use state::{FieldUpdate, FormState, OptionLetter, Question};
