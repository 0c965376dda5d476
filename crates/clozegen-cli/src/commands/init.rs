//! The `clozegen init` command.

use std::path::Path;

use anyhow::Result;

use clozegen_core::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} with your Moodle category");
    println!("  2. Run: clozegen list");
    println!("  3. Run: clozegen generate --all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# clozegen configuration

# Moodle question category the quiz is imported into
category = "$course$/top/Default"

# Question text format: moodle_auto_format, html, plain_text or markdown
text_format = "markdown"

# Penalty factor applied per wrong try (0.0 to 1.0)
penalty = 0.0

# Suffix of the first question name (<base>_<n>)
first_index = 0

# Directory the <base>.xml files are written to
output_dir = "."

# Stop after this many questions per problem
# limit = 50
"#;
