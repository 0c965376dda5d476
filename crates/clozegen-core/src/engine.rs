//! Quiz generation driver.
//!
//! For every combination of a problem's input space: evaluate the answers,
//! render the template, wrap the body in an envelope. The first failure
//! aborts the whole problem; no partial document is ever returned.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{ClozeError, ComputationError, GenerationError};
use crate::model::{Bindings, Combination, Outputs};
use crate::quiz::{Question, QuestionNamer, QuizDocument, QuizSettings};
use crate::space::InputSpace;
use crate::template::{Context, Template};

/// Computes the embedded answers for one combination of inputs.
///
/// Implementations must be pure: the same combination always yields the
/// same outputs. Closures of the right shape implement this trait.
pub trait Evaluator {
    fn evaluate(&self, combination: &Combination<'_>) -> Result<Outputs, ComputationError>;
}

impl<F> Evaluator for F
where
    F: Fn(&Combination<'_>) -> Result<Outputs, ComputationError>,
{
    fn evaluate(&self, combination: &Combination<'_>) -> Result<Outputs, ComputationError> {
        self(combination)
    }
}

/// Plain function evaluator, the form registered problems use.
pub type EvaluatorFn = fn(&Combination<'_>) -> Result<Outputs, ComputationError>;

/// Everything needed to generate one quiz: inputs, answers, text.
#[derive(Debug, Clone)]
pub struct Problem<E> {
    /// Short identifier, also used in error messages.
    pub id: String,
    /// One-line description.
    pub title: String,
    /// Question names are `{question_base}_{n}`.
    pub question_base: String,
    pub inputs: InputSpace,
    pub template: Template,
    pub evaluator: E,
}

/// A problem whose evaluator is a plain function.
pub type FnProblem = Problem<EvaluatorFn>;

impl<E: Evaluator> Problem<E> {
    pub fn new(
        id: impl Into<String>,
        question_base: impl Into<String>,
        inputs: InputSpace,
        template: Template,
        evaluator: E,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            question_base: question_base.into(),
            inputs,
            template,
            evaluator,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Configuration for the generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub quiz: QuizSettings,
    /// Suffix of the first question name.
    pub first_index: usize,
    /// Stop after this many questions.
    pub limit: Option<usize>,
}

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_question(&self, index: usize, question: &Question);
    fn on_complete(&self, problem: &str, questions: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_question(&self, _: usize, _: &Question) {}
    fn on_complete(&self, _: &str, _: usize, _: Duration) {}
}

/// Inputs and computed outputs of one combination, without rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub index: usize,
    pub inputs: Bindings,
    pub outputs: Outputs,
}

/// Drives enumeration, evaluation, rendering, and assembly.
pub struct QuizGenerator {
    config: GeneratorConfig,
}

impl QuizGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the complete quiz document for `problem`.
    pub fn generate<E: Evaluator>(
        &self,
        problem: &Problem<E>,
        progress: &dyn ProgressReporter,
    ) -> Result<QuizDocument, GenerationError> {
        let start = Instant::now();
        let mut namer = QuestionNamer::new(&problem.question_base, self.config.first_index);
        let mut questions = Vec::new();

        tracing::info!(
            problem = %problem.id,
            combinations = problem.inputs.combination_count(),
            "generating quiz"
        );

        for combination in self.combinations(&problem.inputs) {
            let index = combination.index();
            let body = render_combination(problem, &combination).map_err(|error| {
                tracing::debug!(problem = %problem.id, index, "generation aborted: {error}");
                GenerationError {
                    problem: problem.id.clone(),
                    index,
                    error,
                }
            })?;

            let question = Question::new(namer.next_name(), body);
            tracing::debug!(problem = %problem.id, index, name = %question.name, "question rendered");
            progress.on_question(index, &question);
            questions.push(question);
        }

        let elapsed = start.elapsed();
        progress.on_complete(&problem.id, questions.len(), elapsed);
        tracing::info!(
            problem = %problem.id,
            questions = questions.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "quiz assembled"
        );

        Ok(QuizDocument::assemble(self.config.quiz.clone(), questions))
    }

    /// Evaluate every combination and list inputs next to outputs.
    ///
    /// Uses the same abort-on-first-error policy as [`generate`](Self::generate).
    pub fn trace<E: Evaluator>(
        &self,
        problem: &Problem<E>,
    ) -> Result<Vec<TraceEntry>, GenerationError> {
        self.combinations(&problem.inputs)
            .map(|combination| {
                let index = combination.index();
                let outputs = problem
                    .evaluator
                    .evaluate(&combination)
                    .map_err(|e| GenerationError {
                        problem: problem.id.clone(),
                        index,
                        error: e.into(),
                    })?;
                Ok(TraceEntry {
                    index,
                    inputs: combination.to_bindings(),
                    outputs,
                })
            })
            .collect()
    }

    fn combinations<'a>(
        &self,
        inputs: &'a InputSpace,
    ) -> impl Iterator<Item = Combination<'a>> + 'a {
        inputs
            .combinations()
            .take(self.config.limit.unwrap_or(usize::MAX))
    }
}

fn render_combination<E: Evaluator>(
    problem: &Problem<E>,
    combination: &Combination<'_>,
) -> Result<String, ClozeError> {
    let outputs = problem.evaluator.evaluate(combination)?;
    let context = Context::merge(combination, &outputs)?;
    problem.template.render(&context)
}

/// Generate with default settings and no progress reporting.
pub fn generate_quiz<E: Evaluator>(problem: &Problem<E>) -> Result<QuizDocument, GenerationError> {
    QuizGenerator::new(GeneratorConfig::default()).generate(problem, &NoopReporter)
}
