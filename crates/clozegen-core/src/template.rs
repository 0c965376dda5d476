//! Cloze question templates.
//!
//! Rendering happens in two phases. [`Template::parse`] splits the source
//! into literal text and placeholders once; [`Template::render`] resolves
//! the placeholders against a [`Context`] for every combination.
//!
//! Syntax:
//! - `{name}`, `{name:.2f}`, `{row[0]:3.1f}`: substitution markers.
//! - `{{` and `}}`: a literal `{` or `}`. Moodle's embedded answers use
//!   single braces, so `{{1:NUMERICAL:={U:.2f}:0.5}}` renders as
//!   `{1:NUMERICAL:=2.50:0.5}`.

use std::collections::HashMap;

use crate::error::ClozeError;
use crate::format::FormatSpec;
use crate::model::{is_identifier, Combination, Outputs, Value};

/// A substitution marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Context key.
    pub name: String,
    /// Row indices applied in order, e.g. `m[1][0]`.
    pub indices: Vec<usize>,
    pub spec: FormatSpec,
    /// The marker as written, without braces, for error messages.
    raw: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    id: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`. `id` names the template in error messages.
    pub fn parse(id: &str, source: &str) -> Result<Self, ClozeError> {
        let render_error = |message: String| ClozeError::Render {
            template: id.to_string(),
            message,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for (inner_pos, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(render_error(format!(
                                    "nested '{{' at {}",
                                    location(source, inner_pos)
                                )))
                            }
                            _ => field.push(inner),
                        }
                    }
                    if !closed {
                        return Err(render_error(format!(
                            "unclosed '{{' at {}",
                            location(source, pos)
                        )));
                    }
                    let placeholder = parse_placeholder(&field).map_err(|e| {
                        render_error(format!("{e} in '{{{field}}}' at {}", location(source, pos)))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' => {
                    return Err(render_error(format!(
                        "single '}}' at {} (use '}}}}' for a literal brace)",
                        location(source, pos)
                    )))
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            id: id.to_string(),
            segments,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }

    /// Distinct variable names referenced, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for p in self.placeholders() {
            if !names.contains(&p.name.as_str()) {
                names.push(&p.name);
            }
        }
        names
    }

    /// Substitute every placeholder. Either the whole body renders or an
    /// error is returned; nothing is left half-substituted.
    pub fn render(&self, context: &Context<'_>) -> Result<String, ClozeError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => out.push_str(&self.substitute(p, context)?),
            }
        }
        Ok(out)
    }

    fn substitute(&self, p: &Placeholder, context: &Context<'_>) -> Result<String, ClozeError> {
        let mut value = context
            .get(&p.name)
            .ok_or_else(|| ClozeError::MissingVariable {
                name: p.name.clone(),
                template: self.id.clone(),
            })?;

        for &index in &p.indices {
            value = value.get(index).ok_or_else(|| ClozeError::Render {
                template: self.id.clone(),
                message: match value.as_row() {
                    Some(items) => format!(
                        "index {index} out of range in '{{{}}}' (row has {} elements)",
                        p.raw,
                        items.len()
                    ),
                    None => format!("cannot index {} in '{{{}}}'", value.type_name(), p.raw),
                },
            })?;
        }

        p.spec.apply(value).map_err(|message| ClozeError::Render {
            template: self.id.clone(),
            message: format!("{message} in '{{{}}}'", p.raw),
        })
    }
}

/// `name`, `name[i]...`, optionally followed by `:spec`.
fn parse_placeholder(field: &str) -> Result<Placeholder, String> {
    let (target, spec) = match field.split_once(':') {
        Some((target, spec)) => (target, spec),
        None => (field, ""),
    };

    let name_end = target.find('[').unwrap_or(target.len());
    let name = &target[..name_end];
    if name.is_empty() {
        return Err("missing variable name".to_string());
    }
    if !is_identifier(name) {
        return Err(format!("invalid variable name '{name}'"));
    }

    let mut indices = Vec::new();
    let mut rest = &target[name_end..];
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.split_once(']'))
            .ok_or_else(|| format!("malformed index '{rest}'"))?;
        let index = inner
            .0
            .parse::<usize>()
            .map_err(|_| format!("index '{}' is not a non-negative integer", inner.0))?;
        indices.push(index);
        rest = inner.1;
    }

    Ok(Placeholder {
        name: name.to_string(),
        indices,
        spec: spec.parse()?,
        raw: field.to_string(),
    })
}

/// `line L, column C` (both 1-based) of a byte offset.
fn location(source: &str, offset: usize) -> String {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |l| l.chars().count())
        + 1;
    format!("line {line}, column {column}")
}

/// The variables visible to a template: one combination plus its outputs.
#[derive(Debug, Clone, Default)]
pub struct Context<'a> {
    values: HashMap<&'a str, &'a Value>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable; a name may only be bound once.
    pub fn insert(&mut self, name: &'a str, value: &'a Value) -> Result<(), ClozeError> {
        if self.values.insert(name, value).is_some() {
            return Err(ClozeError::AmbiguousVariable {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Union of a combination's inputs and the evaluator's outputs.
    pub fn merge(
        combination: &Combination<'a>,
        outputs: &'a Outputs,
    ) -> Result<Self, ClozeError> {
        let mut context = Self::new();
        for (name, value) in combination.iter() {
            context.insert(name, value)?;
        }
        for (name, value) in outputs.iter() {
            context.insert(name, value)?;
        }
        Ok(context)
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::InputSpace;

    fn render(source: &str, vars: &[(&str, Value)]) -> Result<String, ClozeError> {
        let template = Template::parse("test", source)?;
        let mut context = Context::new();
        for (name, value) in vars {
            context.insert(name, value)?;
        }
        template.render(&context)
    }

    #[test]
    fn substitutes_inputs_and_escapes_braces() {
        let out = render(
            "x={x}, sq={{1:NUMERICAL:={sq}:0}}",
            &[("x", Value::Int(2)), ("sq", Value::Int(4))],
        )
        .unwrap();
        assert_eq!(out, "x=2, sq={1:NUMERICAL:=4:0}");
    }

    #[test]
    fn doubled_delimiters_render_verbatim() {
        assert_eq!(render("{{", &[]).unwrap(), "{");
        assert_eq!(render("}}", &[]).unwrap(), "}");
        assert_eq!(
            render("$$\\theta_{{water}}$$ = {t:3.0f} K", &[("t", Value::Int(330))]).unwrap(),
            "$$\\theta_{water}$$ = 330 K"
        );
    }

    #[test]
    fn multichoice_alternatives_with_trailing_escape() {
        let source = "{{1:MULTICHOICE:{o[0]:s} {n[0]:s}\n~{o[1]:s} {n[1]:s}}}.";
        let out = render(
            source,
            &[
                ("o", Value::from(vec!["", "="])),
                ("n", Value::from(vec!["Antoinette", "Lawrence"])),
            ],
        )
        .unwrap();
        assert_eq!(out, "{1:MULTICHOICE: Antoinette\n~= Lawrence}.");
    }

    #[test]
    fn applies_format_specifiers() {
        let out = render(
            "{U:3.2f} {mu:.3e} {name:s}",
            &[
                ("U", Value::Float(2.5)),
                ("mu", Value::Float(489e-6)),
                ("name", Value::from("Quentin")),
            ],
        )
        .unwrap();
        assert_eq!(out, "2.50 4.890e-04 Quentin");
    }

    #[test]
    fn unicode_variable_names() {
        let out = render("{θ0:3.1f} °C", &[("θ0", Value::Int(-5))]).unwrap();
        assert_eq!(out, "-5.0 °C");
    }

    #[test]
    fn missing_variable_names_key_and_template() {
        let err = render("a={a} b={b}", &[("a", Value::Int(1))]).unwrap_err();
        assert_eq!(
            err,
            ClozeError::MissingVariable {
                name: "b".into(),
                template: "test".into()
            }
        );
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for bad in ["{x", "x}", "{}", "{x:zz}", "{x[a]}", "{x[0}", "{a{b}}", "{1x}"] {
            let err = Template::parse("bad", bad).unwrap_err();
            assert_eq!(err.kind(), "RenderError", "{bad}");
        }
    }

    #[test]
    fn parse_error_reports_location() {
        let err = Template::parse("t", "line one\nab}").unwrap_err();
        assert!(err.to_string().contains("line 2, column 3"), "{err}");
    }

    #[test]
    fn index_errors() {
        let err = render("{r[5]}", &[("r", Value::from(vec![1, 2]))]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        let err = render("{x[0]}", &[("x", Value::Int(1))]).unwrap_err();
        assert!(err.to_string().contains("cannot index integer"));
    }

    #[test]
    fn chained_indices() {
        let m = Value::from(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(render("{m[1][0]}", &[("m", m)]).unwrap(), "3");
    }

    #[test]
    fn rendering_is_idempotent() {
        let template = Template::parse("t", "{a:.3f} and {{{b}}}").unwrap();
        let a = Value::Float(1.0 / 3.0);
        let b = Value::from("x");
        let mut context = Context::new();
        context.insert("a", &a).unwrap();
        context.insert("b", &b).unwrap();
        let first = template.render(&context).unwrap();
        let second = template.render(&context).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "0.333 and {x}");
    }

    #[test]
    fn variables_in_first_appearance_order() {
        let template = Template::parse("t", "{b} {a:.1f} {b[0]} {{c}}").unwrap();
        assert_eq!(template.variables(), vec!["b", "a"]);
    }

    #[test]
    fn merge_rejects_ambiguous_names() {
        let space = InputSpace::new().with("x", [1]).unwrap();
        let combination = space.combinations().next().unwrap();
        let outputs = Outputs::new().with("x", 2);
        let err = Context::merge(&combination, &outputs).unwrap_err();
        assert_eq!(err, ClozeError::AmbiguousVariable { name: "x".into() });

        let outputs = Outputs::new().with("sq", 1);
        let context = Context::merge(&combination, &outputs).unwrap();
        assert_eq!(context.len(), 2);
    }
}
