//! The `judgetest init` command.

use std::path::Path;

use anyhow::Result;

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("judgetest.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("data/kumite_questions.csv"), KUMITE_BANK)?;
    write_if_missing(Path::new("data/kata_questions.csv"), KATA_BANK)?;

    println!("\nNext steps:");
    println!("  1. Replace the sample questions in data/ with your own");
    println!("  2. Run: judgetest validate");
    println!("  3. Run: judgetest generate --category kumite --count 10");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# judgetest configuration

max_questions = 50
default_questions = 10
output_dir = "."
page_size = "a4"
subheading = "True/False Questions"

[banks]
kumite = "data/kumite_questions.csv"
kata = "data/kata_questions.csv"
"#;

const KUMITE_BANK: &str = r#"question
"The referee starts the bout with the command “Shobu Hajime”."
"Jodan covers the head, face and neck."
"Chudan covers the abdomen, chest, back and side."
"A technique to the back of the head can score if it is controlled."
"Yuko is worth one point."
"Waza-ari is worth two points."
"Ippon is worth three points."
"Exiting the competition area is called Jogai."
"The referee calls “Yame” to stop the bout temporarily."
"Senshu is awarded to the competitor who scores the first unopposed point."
"A kick to the body scores Ippon."
"Judges signal a score with their flags."
"#;

const KATA_BANK: &str = r#"question
"A kata must be chosen from the official kata list."
"Competitors bow before and after performing their kata."
"Kiai is expected at the marked points of the kata."
"Judges evaluate both technical and athletic performance."
"Stances are part of the technical performance evaluation."
"A competitor may perform the same kata twice in consecutive rounds."
"Bunkai is only demonstrated in team finals."
"Balance and power are part of the athletic performance evaluation."
"A momentary loss of balance is a foul."
"The kata must be announced before it is performed."
"#;
