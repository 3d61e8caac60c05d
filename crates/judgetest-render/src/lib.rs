//! judgetest-render — Paginated PDF rendering for composed tests.
//!
//! Turns a title and a composed test into PDF bytes, and ties the bank
//! loader, composer and normalizer together into one generation pipeline.

pub mod layout;
pub mod metrics;
pub mod pdf;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use judgetest_core::bank::BankSource;
use judgetest_core::compose::compose;
use judgetest_core::config::JudgetestConfig;
use judgetest_core::{ComposedTest, GenerateError, TestRequest};

pub use layout::{layout, paginate, PageLayout, PageSize, RenderOptions};

/// A finished document ready to hand to the user.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    /// Suggested download name, e.g. `Kumite_test.pdf`.
    pub filename: String,
    pub page_count: usize,
}

impl RenderedDocument {
    /// Write the document into `dir` under its suggested filename.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("failed to write document to {}", path.display()))?;
        Ok(path)
    }
}

/// Render a composed test with the default options.
pub fn render(title: &str, test: &ComposedTest) -> Result<Vec<u8>, GenerateError> {
    render_with(title, test, &RenderOptions::default())
}

/// Render a composed test as PDF bytes.
///
/// The output depends only on the inputs. An empty test produces a single
/// page carrying just the header and footer.
pub fn render_with(
    title: &str,
    test: &ComposedTest,
    options: &RenderOptions,
) -> Result<Vec<u8>, GenerateError> {
    let pages = layout(title, test, options);
    pdf::encode_pdf(title, &pages, options.page_size)
}

/// Settings for one run of the generation pipeline.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Upper bound on the requested count.
    pub max_questions: usize,
    /// Header title; defaults to `"{Category} Questions"`.
    pub title: Option<String>,
    pub render: RenderOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_questions: 50,
            title: None,
            render: RenderOptions::default(),
        }
    }
}

impl GenerateOptions {
    pub fn from_config(config: &JudgetestConfig) -> Self {
        Self {
            max_questions: config.max_questions,
            title: None,
            render: RenderOptions::from_config(config),
        }
    }
}

/// Output of the generation pipeline.
#[derive(Debug, Clone)]
pub struct GeneratedTest {
    /// The normalized questions, in the order printed.
    pub test: ComposedTest,
    pub document: RenderedDocument,
}

/// Validate the request, load the bank, draw questions, normalize them and
/// render the document.
pub fn generate(
    source: &dyn BankSource,
    request: &TestRequest,
    options: &GenerateOptions,
) -> Result<GeneratedTest, GenerateError> {
    request.validate(options.max_questions)?;

    let bank = source.load(request.category)?;
    let test = compose(&bank, request.count)?.normalized();

    let title = options
        .title
        .clone()
        .unwrap_or_else(|| request.category.default_title());
    let pages = layout(&title, &test, &options.render);
    let bytes = pdf::encode_pdf(&title, &pages, options.render.page_size)?;

    tracing::info!(
        "generated {} test with {} questions on {} page(s)",
        request.category,
        test.len(),
        pages.len()
    );

    Ok(GeneratedTest {
        test,
        document: RenderedDocument {
            bytes,
            filename: request.category.suggested_filename(),
            page_count: pages.len(),
        },
    })
}
