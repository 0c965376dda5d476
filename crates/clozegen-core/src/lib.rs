//! clozegen-core: Parameterized Moodle cloze quiz generation.
//!
//! Enumerates the Cartesian product of a problem's input ranges, computes
//! the answers for each combination, substitutes inputs and answers into a
//! question template, and assembles everything into one Moodle XML document.

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod quiz;
pub mod space;
pub mod template;

pub use engine::{
    generate_quiz, Evaluator, EvaluatorFn, FnProblem, GeneratorConfig, NoopReporter, Problem,
    ProgressReporter, QuizGenerator, TraceEntry,
};
pub use error::{ClozeError, ComputationError, GenerationError};
pub use model::{Bindings, Combination, Outputs, Value};
pub use quiz::{Question, QuizDocument, QuizSettings, TextFormat};
pub use space::{arange, arange_int, InputSpace};
pub use template::{Context, Template};
