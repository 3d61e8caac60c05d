//! The `judgetest generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use judgetest_core::config::load_config_from;
use judgetest_core::{Category, ComposedTest, TestRequest};
use judgetest_render::layout::ANSWER_LINE;
use judgetest_render::{generate, GenerateOptions};

fn print_preview(test: &ComposedTest) {
    for q in test {
        println!("Question {}: {}", q.number, q.text);
        println!(" {ANSWER_LINE}");
    }
    println!();
}

pub fn execute(
    category: Category,
    count: Option<usize>,
    title: Option<String>,
    output: Option<PathBuf>,
    format: String,
    preview: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let formats: Vec<&str> = format.split(',').map(|s| s.trim()).collect();
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "pdf" | "json"),
            "unknown format: '{fmt}' (expected pdf or json)"
        );
    }

    let request = TestRequest::new(category, count.unwrap_or(config.default_questions));
    let mut options = GenerateOptions::from_config(&config);
    options.title = title;

    let source = config.bank_source();
    tracing::debug!(
        "requesting {} {category} questions from {}",
        request.count,
        source.path_for(category).display()
    );
    let generated = match generate(&source, &request, &options) {
        Ok(generated) => generated,
        Err(e) if e.is_validation() => anyhow::bail!("{e}"),
        Err(e) => return Err(anyhow::Error::new(e).context("test generation failed")),
    };

    if preview {
        print_preview(&generated.test);
    }

    let output_dir = output.unwrap_or(config.output_dir);

    for fmt in &formats {
        match *fmt {
            "pdf" => {
                let path = generated.document.write_to_dir(&output_dir)?;
                tracing::debug!(
                    "wrote {} bytes to {}",
                    generated.document.bytes.len(),
                    path.display()
                );
                println!("PDF generated successfully!");
                println!(
                    "Saved {} ({} page(s)) to: {}",
                    generated.document.filename,
                    generated.document.page_count,
                    path.display()
                );
            }
            "json" => {
                let path = output_dir.join(format!("{category}_test.json"));
                let json = serde_json::to_string_pretty(&generated.test)
                    .context("failed to serialize test")?;
                std::fs::create_dir_all(&output_dir)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Questions saved to: {}", path.display());
            }
            other => anyhow::bail!("unknown format: '{other}'"),
        }
    }

    Ok(())
}
