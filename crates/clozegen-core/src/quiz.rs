//! Moodle XML quiz documents.
//!
//! Wraps rendered question bodies in `cloze` question envelopes and
//! assembles them under a single category header. The tag layout follows
//! Moodle's XML import format.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default category path for imported questions.
pub const DEFAULT_CATEGORY: &str = "$course$/top/Default";

/// Matches the head of an embedded answer field, e.g. `{2:NUMERICAL:` or `{:MCV:`.
static ANSWER_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{(\d*):(?:NUMERICAL|NM|SHORTANSWER_C|SHORTANSWER|SAC|SA|MWC|MW|MULTICHOICE(?:_[HVS]{1,2})?|MC[HVS]{0,2}|MULTIRESPONSE(?:_[HS]{1,2})?|MR[HS]{0,2}):",
    )
    .expect("answer field pattern is valid")
});

/// Markup format of the question text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    #[default]
    Markdown,
    Html,
    MoodleAutoFormat,
    PlainText,
}

impl TextFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::Markdown => "markdown",
            TextFormat::Html => "html",
            TextFormat::MoodleAutoFormat => "moodle_auto_format",
            TextFormat::PlainText => "plain_text",
        }
    }
}

/// Document-wide settings shared by every envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    /// Category path written in the header block.
    pub category: String,
    pub text_format: TextFormat,
    /// Penalty factor for each wrong try in adaptive mode.
    pub penalty: f64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            text_format: TextFormat::default(),
            penalty: 0.0,
        }
    }
}

/// A rendered question ready for the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    pub body: String,
    /// Sum of the answer field weights in `body`.
    pub default_grade: u32,
}

impl Question {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let default_grade = answer_weight(&body);
        Self {
            name: name.into(),
            body,
            default_grade,
        }
    }
}

/// Total weight of the embedded answer fields in a cloze body.
///
/// A field without an explicit weight counts as 1. A body without any
/// field still gets a grade of 1. Weights saturate at `u32::MAX`.
pub fn answer_weight(body: &str) -> u32 {
    let total = ANSWER_FIELD
        .captures_iter(body)
        .map(|c| match &c[1] {
            "" => 1,
            digits => digits.parse::<u32>().unwrap_or(u32::MAX),
        })
        .fold(0u32, u32::saturating_add);
    total.max(1)
}

/// Hands out unique question names: `{base}_{n}` with increasing `n`.
#[derive(Debug, Clone)]
pub struct QuestionNamer {
    base: String,
    next: usize,
}

impl QuestionNamer {
    pub fn new(base: impl Into<String>, first_index: usize) -> Self {
        Self {
            base: base.into(),
            next: first_index,
        }
    }

    pub fn next_name(&mut self) -> String {
        let name = format!("{}_{}", self.base, self.next);
        self.next += 1;
        name
    }
}

/// A complete quiz: one category header followed by the questions in order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDocument {
    pub settings: QuizSettings,
    pub questions: Vec<Question>,
}

impl QuizDocument {
    /// Assemble a document from fully rendered questions.
    pub fn assemble(settings: QuizSettings, questions: Vec<Question>) -> Self {
        Self {
            settings,
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Serialize to Moodle XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<quiz>\n");
        xml.push_str("  <question type=\"category\">\n");
        xml.push_str("    <category>\n");
        let _ = writeln!(
            xml,
            "      <text>{}</text>",
            xml_escape(&self.settings.category)
        );
        xml.push_str("    </category>\n");
        xml.push_str("  </question>\n");

        for question in &self.questions {
            self.write_envelope(&mut xml, question);
        }

        xml.push_str("</quiz>\n");
        xml
    }

    fn write_envelope(&self, xml: &mut String, question: &Question) {
        let format = self.settings.text_format.as_str();
        xml.push_str("  <question type=\"cloze\">\n");
        xml.push_str("    <name>\n");
        let _ = writeln!(xml, "      <text>{}</text>", xml_escape(&question.name));
        xml.push_str("    </name>\n");
        let _ = writeln!(xml, "    <questiontext format=\"{format}\">");
        let _ = writeln!(xml, "      <text>{}</text>", cdata(&question.body));
        xml.push_str("    </questiontext>\n");
        let _ = writeln!(xml, "    <generalfeedback format=\"{format}\">");
        xml.push_str("      <text></text>\n");
        xml.push_str("    </generalfeedback>\n");
        let _ = writeln!(xml, "    <defaultgrade>{}</defaultgrade>", question.default_grade);
        let _ = writeln!(xml, "    <penalty>{:.7}</penalty>", self.settings.penalty);
        xml.push_str("    <hidden>0</hidden>\n");
        xml.push_str("    <idnumber></idnumber>\n");
        xml.push_str("  </question>\n");
    }

    /// Write the XML document to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, self.to_xml())
            .with_context(|| format!("failed to write quiz to {}", path.display()))?;
        Ok(())
    }
}

/// Escape a string for an XML text node.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in a CDATA section, splitting any `]]>` it contains.
fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}
