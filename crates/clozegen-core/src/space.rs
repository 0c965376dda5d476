//! Input spaces and Cartesian enumeration.
//!
//! An [`InputSpace`] declares, in order, each input variable and its candidate
//! values. [`InputSpace::combinations`] walks the Cartesian product like nested
//! loops: the first declared variable varies slowest, the last fastest.

use std::iter::FusedIterator;

use crate::error::ClozeError;
use crate::model::{is_identifier, Combination, Value};

/// One declared input variable and its ordered candidate values.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub values: Vec<Value>,
}

/// Ordered mapping from variable name to candidate values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSpace {
    variables: Vec<Variable>,
}

impl InputSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. An empty `values` sequence is allowed and makes the
    /// whole space produce zero combinations.
    pub fn push<I, V>(&mut self, name: &str, values: I) -> Result<(), ClozeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if !is_identifier(name) {
            return Err(ClozeError::InputSpace(format!(
                "'{name}' is not a valid variable name"
            )));
        }
        if self.variables.iter().any(|v| v.name == name) {
            return Err(ClozeError::InputSpace(format!(
                "variable '{name}' is declared twice"
            )));
        }
        self.variables.push(Variable {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        Ok(())
    }

    /// Builder-style [`push`](Self::push).
    pub fn with<I, V>(mut self, name: &str, values: I) -> Result<Self, ClozeError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(name, values)?;
        Ok(self)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Number of combinations: the product of all candidate counts.
    ///
    /// A space without variables has exactly one (empty) combination.
    pub fn combination_count(&self) -> usize {
        self.variables
            .iter()
            .fold(1usize, |acc, v| acc.saturating_mul(v.values.len()))
    }

    /// Lazily enumerate every combination. Each call starts over.
    pub fn combinations(&self) -> Combinations<'_> {
        let empty = self.variables.iter().any(|v| v.values.is_empty());
        Combinations {
            space: self,
            cursor: (!empty).then(|| vec![0; self.variables.len()]),
            emitted: 0,
            total: self.combination_count(),
        }
    }
}

/// Iterator over the Cartesian product of an [`InputSpace`].
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    space: &'a InputSpace,
    /// Candidate index per variable; `None` once exhausted.
    cursor: Option<Vec<usize>>,
    emitted: usize,
    total: usize,
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Combination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let space: &'a InputSpace = self.space;
        let cursor = self.cursor.as_mut()?;

        let entries = space
            .variables
            .iter()
            .zip(cursor.iter())
            .map(|(var, &i)| (var.name.as_str(), &var.values[i]))
            .collect();
        let combination = Combination {
            index: self.emitted,
            entries,
        };
        self.emitted += 1;

        // Odometer step: the last variable advances first.
        let mut exhausted = true;
        for (slot, var) in cursor.iter_mut().zip(&space.variables).rev() {
            *slot += 1;
            if *slot < var.values.len() {
                exhausted = false;
                break;
            }
            *slot = 0;
        }
        if exhausted {
            self.cursor = None;
        }

        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.cursor.is_some() {
            self.total - self.emitted
        } else {
            0
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl FusedIterator for Combinations<'_> {}

/// Half-open numeric range `[start, stop)` with the given step.
///
/// Has `ceil((stop - start) / step)` elements, or none when `step` points
/// away from `stop`. Elements are computed as `start + i * step` to avoid
/// accumulating rounding error.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<Value>, ClozeError> {
    if step == 0.0 || !step.is_finite() || !start.is_finite() || !stop.is_finite() {
        return Err(ClozeError::InputSpace(format!(
            "invalid range {start}..{stop} step {step}"
        )));
    }
    let count = ((stop - start) / step).ceil().max(0.0) as usize;
    Ok((0..count)
        .map(|i| Value::Float(start + i as f64 * step))
        .collect())
}

/// Integer counterpart of [`arange`].
pub fn arange_int(start: i64, stop: i64, step: i64) -> Result<Vec<Value>, ClozeError> {
    if step == 0 {
        return Err(ClozeError::InputSpace(format!(
            "invalid range {start}..{stop} step 0"
        )));
    }
    let mut values = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        values.push(Value::Int(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(values)
}
