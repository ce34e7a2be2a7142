//! Backend collaborators: HTTP transport and authentication

mod auth;
mod client;
mod request;
mod traits;

pub use auth::{SharedToken, TokenProvider};
pub use client::{rejection, HttpApi};
pub use request::{Part, PartBody, SubmitRequest, SubmitTarget};
pub use traits::QuestionApi;

#[cfg(test)]
pub use traits::MockQuestionApi;
