//! Form domain layer
//!
//! Type-safe form state for creating and editing questions.

mod field;
mod form_state;

pub use field::{split_tags, Attachment, AttachmentState, FieldUpdate, OptionLetter, OptionTexts};
pub use form_state::{ErrorMap, FormState, DEFAULT_ESTIMATED_SECONDS};
