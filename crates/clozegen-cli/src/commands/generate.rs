//! The `clozegen generate` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use clozegen_core::config::load_config_from;
use clozegen_core::{FnProblem, ProgressReporter, Question, QuizDocument, QuizGenerator};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_question(&self, index: usize, question: &Question) {
        tracing::debug!(index, name = %question.name, "question ready");
    }

    fn on_complete(&self, problem: &str, questions: usize, elapsed: Duration) {
        eprintln!(
            "  {problem}: {questions} questions ({:.1}ms)",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

pub struct GenerateArgs {
    pub problem: Option<String>,
    pub all: bool,
    pub output: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub category: Option<String>,
    pub first_index: Option<usize>,
    pub limit: Option<usize>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;

    // CLI flags override config values
    if let Some(category) = args.category {
        config.category = category;
    }
    if let Some(first_index) = args.first_index {
        config.first_index = first_index;
    }
    if args.limit.is_some() {
        config.limit = args.limit;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.validate()?;

    let problems: Vec<FnProblem> = if args.all {
        clozegen_problems::all_problems()?
    } else {
        let id = args
            .problem
            .as_deref()
            .context("either --problem or --all is required")?;
        vec![clozegen_problems::create_problem(id)?]
    };

    let generator = QuizGenerator::new(config.generator_config());
    let reporter = ConsoleReporter;

    eprintln!(
        "clozegen v{}: generating {} problem(s)",
        env!("CARGO_PKG_VERSION"),
        problems.len()
    );

    // Build every document before touching the filesystem.
    let documents = problems
        .iter()
        .map(|problem| {
            let doc = generator.generate(problem, &reporter)?;
            let path = match &args.output {
                Some(path) => path.clone(),
                None => config
                    .output_dir
                    .join(format!("{}.xml", problem.question_base)),
            };
            Ok((path, doc))
        })
        .collect::<Result<Vec<(PathBuf, QuizDocument)>>>()?;

    for (path, doc) in &documents {
        doc.save(path)?;
        eprintln!("Quiz saved to: {} ({} questions)", path.display(), doc.len());
    }

    Ok(())
}
