//! Core data model types for judgetest.
//!
//! Question banks, test requests and composed tests are the values that
//! flow from the loader through the composer to the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenerateError;
use crate::normalize::normalize;

/// The judged discipline a question bank belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Kumite,
    Kata,
}

impl Category {
    /// Every category, in the order banks are listed.
    pub const ALL: [Category; 2] = [Category::Kumite, Category::Kata];

    /// Title printed in the page header when none is given.
    pub fn default_title(&self) -> String {
        format!("{self} Questions")
    }

    /// Filename offered for the finished document.
    pub fn suggested_filename(&self) -> String {
        format!("{self}_test.pdf")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Kumite => write!(f, "Kumite"),
            Category::Kata => write!(f, "Kata"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kumite" => Ok(Category::Kumite),
            "kata" => Ok(Category::Kata),
            other => Err(format!("unknown category: {other} (expected kumite or kata)")),
        }
    }
}

/// A single true/false assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Every question loaded for one category.
///
/// Banks are immutable once loaded. Callers must not rely on the order of
/// `questions()` matching the order on disk.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    category: Category,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(category: Category, questions: Vec<Question>) -> Self {
        Self {
            category,
            questions,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A request to generate one test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestRequest {
    pub category: Category,
    pub count: usize,
}

impl TestRequest {
    pub fn new(category: Category, count: usize) -> Self {
        Self { category, count }
    }

    /// Check the count against the configured upper bound.
    ///
    /// The bank-size bound is checked later by the composer, once the bank
    /// has been loaded.
    pub fn validate(&self, max_questions: usize) -> Result<(), GenerateError> {
        if self.count < 1 {
            return Err(GenerateError::InvalidRequest(
                "question count must be at least 1".into(),
            ));
        }
        if self.count > max_questions {
            return Err(GenerateError::InvalidRequest(format!(
                "question count {} exceeds the maximum of {max_questions}",
                self.count
            )));
        }
        Ok(())
    }
}

/// One numbered question in a composed test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedQuestion {
    /// 1-based position in the test.
    pub number: usize,
    pub text: String,
}

impl ComposedQuestion {
    /// The line printed for this question, e.g. `3. Kiai is required.`
    pub fn label(&self) -> String {
        format!("{}. {}", self.number, self.text)
    }
}

/// The ordered questions that make up a generated test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedTest {
    pub questions: Vec<ComposedQuestion>,
}

impl ComposedTest {
    pub fn new(questions: Vec<ComposedQuestion>) -> Self {
        Self { questions }
    }

    /// Number texts in the given order, starting at 1.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| ComposedQuestion {
                number: i + 1,
                text: text.into(),
            })
            .collect();
        Self { questions }
    }

    /// Apply [`normalize`] to every question text.
    pub fn normalized(self) -> Self {
        let questions = self
            .questions
            .into_iter()
            .map(|q| ComposedQuestion {
                number: q.number,
                text: normalize(&q.text),
            })
            .collect();
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComposedQuestion> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a ComposedTest {
    type Item = &'a ComposedQuestion;
    type IntoIter = std::slice::Iter<'a, ComposedQuestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
