//! Random test composition.
//!
//! Draws questions uniformly at random without replacement and numbers
//! them in draw order.

use rand::Rng;

use crate::error::GenerateError;
use crate::model::{ComposedQuestion, ComposedTest, QuestionBank};

/// Draw `count` distinct questions from `bank` using the thread RNG.
pub fn compose(bank: &QuestionBank, count: usize) -> Result<ComposedTest, GenerateError> {
    compose_with_rng(bank, count, &mut rand::rng())
}

/// Draw `count` distinct questions from `bank` using `rng`.
///
/// Every subset of size `count` is equally likely, and the questions come
/// back in random order numbered `1..=count`.
pub fn compose_with_rng<R: Rng + ?Sized>(
    bank: &QuestionBank,
    count: usize,
    rng: &mut R,
) -> Result<ComposedTest, GenerateError> {
    if count < 1 {
        return Err(GenerateError::InvalidRequest(
            "question count must be at least 1".into(),
        ));
    }
    if count > bank.len() {
        return Err(GenerateError::InsufficientBank {
            category: bank.category(),
            requested: count,
            available: bank.len(),
        });
    }

    let questions = rand::seq::index::sample(rng, bank.len(), count)
        .into_iter()
        .enumerate()
        .map(|(i, idx)| ComposedQuestion {
            number: i + 1,
            text: bank.questions()[idx].text.clone(),
        })
        .collect();

    tracing::debug!(
        "drew {count} of {} {} questions",
        bank.len(),
        bank.category()
    );

    Ok(ComposedTest::new(questions))
}
