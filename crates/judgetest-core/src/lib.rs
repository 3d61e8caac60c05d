//! judgetest-core — Question banks, sampling, and text normalization.
//!
//! This crate defines the data model, error kinds, and the loading and
//! composing logic that the renderer and CLI build on.

pub mod bank;
pub mod compose;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;

pub use error::GenerateError;
pub use model::{Category, ComposedQuestion, ComposedTest, Question, QuestionBank, TestRequest};
