//! CSV question bank loader.
//!
//! Loads one bank per category from a delimited table with a `question`
//! column, and validates banks for common issues.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GenerateError;
use crate::model::{Category, Question, QuestionBank};
use crate::normalize::{normalize, unencodable_chars};

/// One row of a bank table. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvQuestionRow {
    question: String,
}

/// Anything that can hand out a question bank per category.
pub trait BankSource {
    /// Load the full bank for `category`. No partial loads.
    fn load(&self, category: Category) -> Result<QuestionBank, GenerateError>;
}

/// Banks read from CSV files on every load.
#[derive(Debug, Clone)]
pub struct CsvBankSource {
    kumite: PathBuf,
    kata: PathBuf,
}

impl CsvBankSource {
    pub fn new(kumite: impl Into<PathBuf>, kata: impl Into<PathBuf>) -> Self {
        Self {
            kumite: kumite.into(),
            kata: kata.into(),
        }
    }

    /// The table backing `category`.
    pub fn path_for(&self, category: Category) -> &Path {
        match category {
            Category::Kumite => &self.kumite,
            Category::Kata => &self.kata,
        }
    }
}

impl BankSource for CsvBankSource {
    fn load(&self, category: Category) -> Result<QuestionBank, GenerateError> {
        load_bank(category, self.path_for(category))
    }
}

/// Banks held in memory, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBanks {
    banks: HashMap<Category, Vec<Question>>,
}

impl InMemoryBanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions<I, S>(mut self, category: Category, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banks
            .insert(category, texts.into_iter().map(Question::new).collect());
        self
    }
}

impl BankSource for InMemoryBanks {
    fn load(&self, category: Category) -> Result<QuestionBank, GenerateError> {
        let questions: Vec<Question> = self
            .banks
            .get(&category)
            .ok_or_else(|| GenerateError::BankUnavailable {
                category,
                path: PathBuf::from("<memory>"),
                reason: "no bank registered".into(),
            })?
            .iter()
            .filter(|q| !q.text.trim().is_empty())
            .cloned()
            .collect();
        if questions.is_empty() {
            return Err(GenerateError::BankEmpty { category });
        }
        Ok(QuestionBank::new(category, questions))
    }
}

/// Load a bank from a CSV file.
pub fn load_bank(category: Category, path: &Path) -> Result<QuestionBank, GenerateError> {
    let file = File::open(path).map_err(|e| GenerateError::BankUnavailable {
        category,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_bank(category, file, path)
}

/// Parse a bank from any reader (useful for testing).
///
/// Rows whose question is blank are skipped with a warning.
pub fn parse_bank<R: Read>(
    category: Category,
    reader: R,
    source_path: &Path,
) -> Result<QuestionBank, GenerateError> {
    let unavailable = |reason: String| GenerateError::BankUnavailable {
        category,
        path: source_path.to_path_buf(),
        reason,
    };

    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| unavailable(e.to_string()))?;
    if !headers.iter().any(|h| h.trim() == "question") {
        return Err(unavailable("missing `question` column".into()));
    }

    let mut questions = Vec::new();
    for (i, row) in csv_reader.deserialize::<CsvQuestionRow>().enumerate() {
        let row = row.map_err(|e| unavailable(e.to_string()))?;
        if row.question.trim().is_empty() {
            tracing::warn!(
                "skipping blank question in {} (row {})",
                source_path.display(),
                i + 2
            );
            continue;
        }
        questions.push(Question::new(row.question));
    }

    if questions.is_empty() {
        return Err(GenerateError::BankEmpty { category });
    }

    tracing::debug!(
        "loaded {} {} questions from {}",
        questions.len(),
        category,
        source_path.display()
    );

    Ok(QuestionBank::new(category, questions))
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// 1-based position of the question in the bank (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    // Duplicates compare the text as it will be printed
    let mut seen = HashSet::new();
    for (i, q) in bank.questions().iter().enumerate() {
        if !seen.insert(normalize(&q.text)) {
            warnings.push(BankWarning {
                question: Some(i + 1),
                message: "duplicate question".into(),
            });
        }
    }

    for (i, q) in bank.questions().iter().enumerate() {
        let missing = unencodable_chars(&normalize(&q.text));
        if !missing.is_empty() {
            let chars: String = missing.into_iter().collect();
            warnings.push(BankWarning {
                question: Some(i + 1),
                message: format!("characters will print as '?': {chars}"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUMITE_CSV: &str = "question\n\
\"Jodan includes the head, face and neck.\"\n\
\"A warning for Jogai is given when a competitor exits the area.\"\n\
\"Yuko is worth one point.\"\n";

    #[test]
    fn parse_valid_bank() {
        let bank = parse_bank(
            Category::Kumite,
            KUMITE_CSV.as_bytes(),
            Path::new("kumite.csv"),
        )
        .unwrap();
        assert_eq!(bank.category(), Category::Kumite);
        assert_eq!(bank.len(), 3);
        assert_eq!(
            bank.questions()[2].text,
            "Yuko is worth one point."
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "id,question,answer\n1,Kata is judged by flags.,true\n2,Bunkai is optional.,false\n";
        let bank = parse_bank(Category::Kata, csv.as_bytes(), Path::new("kata.csv")).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[0].text, "Kata is judged by flags.");
    }

    #[test]
    fn missing_question_column() {
        let csv = "prompt\nSomething\n";
        let err = parse_bank(Category::Kata, csv.as_bytes(), Path::new("kata.csv")).unwrap_err();
        assert!(matches!(err, GenerateError::BankUnavailable { .. }));
        assert!(err.to_string().contains("question"));
    }

    #[test]
    fn header_only_is_empty() {
        let err = parse_bank(Category::Kata, "question\n".as_bytes(), Path::new("kata.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::BankEmpty {
                category: Category::Kata
            }
        ));
    }

    #[test]
    fn blank_questions_are_skipped() {
        let csv = "question\n\"   \"\nRei is performed before and after.\n";
        let bank = parse_bank(Category::Kata, csv.as_bytes(), Path::new("kata.csv")).unwrap();
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn malformed_row_fails_whole_load() {
        let csv = "question,answer\nfirst,true\nsecond,true,extra\n";
        let err = parse_bank(Category::Kumite, csv.as_bytes(), Path::new("kumite.csv"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::BankUnavailable { .. }));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_bank(Category::Kumite, &path).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::BankUnavailable {
                category: Category::Kumite,
                ..
            }
        ));
    }

    #[test]
    fn csv_source_reads_per_category() {
        let dir = tempfile::tempdir().unwrap();
        let kumite = dir.path().join("kumite.csv");
        let kata = dir.path().join("kata.csv");
        std::fs::write(&kumite, KUMITE_CSV).unwrap();
        std::fs::write(&kata, "question\nShomen is the front.\n").unwrap();

        let source = CsvBankSource::new(&kumite, &kata);
        assert_eq!(source.load(Category::Kumite).unwrap().len(), 3);
        assert_eq!(source.load(Category::Kata).unwrap().len(), 1);
        assert_eq!(source.path_for(Category::Kata), kata.as_path());
    }

    #[test]
    fn in_memory_banks() {
        let banks = InMemoryBanks::new()
            .with_questions(Category::Kata, ["one", "two"])
            .with_questions(Category::Kumite, Vec::<String>::new());
        assert_eq!(banks.load(Category::Kata).unwrap().len(), 2);
        assert!(matches!(
            banks.load(Category::Kumite),
            Err(GenerateError::BankEmpty { .. })
        ));
    }

    #[test]
    fn in_memory_banks_skip_blank_questions() {
        let banks = InMemoryBanks::new()
            .with_questions(Category::Kumite, ["Yame means stop.", "   ", ""])
            .with_questions(Category::Kata, [" \t "]);
        let bank = banks.load(Category::Kumite).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.questions()[0].text, "Yame means stop.");
        assert!(matches!(
            banks.load(Category::Kata),
            Err(GenerateError::BankEmpty { .. })
        ));
    }

    #[test]
    fn validate_duplicates_and_encoding() {
        let bank = QuestionBank::new(
            Category::Kata,
            vec![
                Question::new("Heian Shodan has 21 moves."),
                Question::new("Heian  Shodan has 21 moves. "),
                Question::new("Jōdan is upper level."),
            ],
        );
        let warnings = validate_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(3) && w.message.contains('ō')));
    }

    #[test]
    fn validate_clean_bank() {
        let bank = parse_bank(
            Category::Kumite,
            KUMITE_CSV.as_bytes(),
            Path::new("kumite.csv"),
        )
        .unwrap();
        assert!(validate_bank(&bank).is_empty());
    }
}
