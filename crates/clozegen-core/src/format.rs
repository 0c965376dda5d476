//! Display-format specifiers for template placeholders.
//!
//! Grammar: `[0][width][.precision][type]` with type one of
//! `f F e E g G d s` or empty. Formatting only changes the text, never the
//! value, and does not depend on the locale.

use std::fmt;
use std::str::FromStr;

use crate::model::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// No type character: default display, or `g` when a precision is given.
    Default,
    /// `f` / `F`
    Fixed,
    /// `e` / `E`
    Exponent { upper: bool },
    /// `g` / `G`
    General { upper: bool },
    /// `d`
    Integer,
    /// `s`
    Text,
}

/// A parsed format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub kind: FormatKind,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            zero_pad: false,
            width: None,
            precision: None,
            kind: FormatKind::Default,
        }
    }
}

impl FromStr for FormatSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid format specifier '{s}'");
        let mut spec = FormatSpec::default();
        let mut rest = s;

        if let Some(stripped) = rest.strip_prefix('0') {
            spec.zero_pad = true;
            rest = stripped;
        }

        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 {
            spec.width = Some(rest[..digits].parse().map_err(|_| invalid())?);
            rest = &rest[digits..];
        }

        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits = after_dot.chars().take_while(char::is_ascii_digit).count();
            if digits == 0 {
                return Err(invalid());
            }
            spec.precision = Some(after_dot[..digits].parse().map_err(|_| invalid())?);
            rest = &after_dot[digits..];
        }

        let mut chars = rest.chars();
        spec.kind = match chars.next() {
            None => FormatKind::Default,
            Some('f' | 'F') => FormatKind::Fixed,
            Some('e') => FormatKind::Exponent { upper: false },
            Some('E') => FormatKind::Exponent { upper: true },
            Some('g') => FormatKind::General { upper: false },
            Some('G') => FormatKind::General { upper: true },
            Some('d') => FormatKind::Integer,
            Some('s') => FormatKind::Text,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }

        match spec.kind {
            FormatKind::Integer if spec.precision.is_some() => {
                Err(format!("precision not allowed with 'd' in '{s}'"))
            }
            _ => Ok(spec),
        }
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zero_pad {
            f.write_str("0")?;
        }
        if let Some(w) = self.width {
            write!(f, "{w}")?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        let kind = match self.kind {
            FormatKind::Default => "",
            FormatKind::Fixed => "f",
            FormatKind::Exponent { upper: false } => "e",
            FormatKind::Exponent { upper: true } => "E",
            FormatKind::General { upper: false } => "g",
            FormatKind::General { upper: true } => "G",
            FormatKind::Integer => "d",
            FormatKind::Text => "s",
        };
        f.write_str(kind)
    }
}

impl FormatSpec {
    /// Render `value` according to this specifier.
    ///
    /// Returns a description of the mismatch when the value's type does not
    /// fit the specifier (e.g. `f` on text).
    pub fn apply(&self, value: &Value) -> Result<String, String> {
        let mismatch = || format!("cannot format {} with '{self}'", value.type_name());

        let (body, numeric) = match (self.kind, value) {
            (FormatKind::Text, Value::Text(s)) => (s.clone(), false),
            (FormatKind::Text, _) => return Err(mismatch()),

            (FormatKind::Integer, Value::Int(i)) => (i.to_string(), true),
            (FormatKind::Integer, _) => return Err(mismatch()),

            (FormatKind::Default, Value::Text(s)) => (s.clone(), false),
            (FormatKind::Default, Value::Row(_)) if self.is_plain() => (value.to_string(), false),
            (FormatKind::Default, Value::Int(i)) if self.precision.is_none() => {
                (i.to_string(), true)
            }

            (_, Value::Int(_) | Value::Float(_)) => {
                let x = value.as_f64().ok_or_else(mismatch)?;
                (self.format_float(x), true)
            }
            _ => return Err(mismatch()),
        };

        Ok(self.pad(body, numeric))
    }

    fn is_plain(&self) -> bool {
        self.width.is_none() && self.precision.is_none() && !self.zero_pad
    }

    fn format_float(&self, x: f64) -> String {
        if !x.is_finite() {
            return Value::Float(x).to_string();
        }
        match self.kind {
            FormatKind::Fixed => format!("{:.*}", self.precision.unwrap_or(6), x),
            FormatKind::Exponent { upper } => {
                exponent_notation(x, self.precision.unwrap_or(6), upper)
            }
            FormatKind::General { upper } => general(x, self.precision.unwrap_or(6), upper),
            FormatKind::Default => match self.precision {
                Some(p) => shortest_with_precision(x, p),
                None => Value::Float(x).to_string(),
            },
            FormatKind::Integer | FormatKind::Text => Value::Float(x).to_string(),
        }
    }

    /// Numbers are right-aligned (zeros go after the sign), text left-aligned.
    fn pad(&self, body: String, numeric: bool) -> String {
        let Some(width) = self.width else {
            return body;
        };
        let len = body.chars().count();
        if len >= width {
            return body;
        }
        let fill = width - len;
        if !numeric {
            let pad = if self.zero_pad { "0" } else { " " };
            return format!("{body}{}", pad.repeat(fill));
        }
        if self.zero_pad {
            let (sign, digits) = match body.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", body.as_str()),
            };
            return format!("{sign}{}{digits}", "0".repeat(fill));
        }
        format!("{}{body}", " ".repeat(fill))
    }
}

/// `d.ddde±XX`: the exponent is signed and has at least two digits.
fn exponent_notation(x: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, x);
    let (mantissa, exponent) = split_exponent(&raw);
    let sign = if exponent < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{sign}{:02}", exponent.unsigned_abs())
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

/// `precision` significant digits, trailing zeros removed, scientific
/// notation when the exponent is below -4 or at least `precision`.
fn general(x: f64, precision: usize, upper: bool) -> String {
    significant(x, precision, upper, precision.max(1) as i32)
}

/// Precision without a type: like `g`, but scientific from an exponent of
/// `precision - 1` and fixed notation keeps at least one decimal (`12.0`).
fn shortest_with_precision(x: f64, precision: usize) -> String {
    let formatted = significant(x, precision, false, precision.max(1) as i32 - 1);
    if formatted.contains(['.', 'e']) {
        formatted
    } else {
        format!("{formatted}.0")
    }
}

fn significant(x: f64, precision: usize, upper: bool, scientific_from: i32) -> String {
    let precision = precision.max(1);
    let raw = format!("{:.*e}", precision - 1, x);
    let (_, exponent) = split_exponent(&raw);

    if exponent < -4 || exponent >= scientific_from {
        let formatted = exponent_notation(x, precision - 1, upper);
        let (mantissa, tail) = formatted
            .split_once(if upper { 'E' } else { 'e' })
            .unwrap_or((formatted.as_str(), ""));
        let e = if upper { 'E' } else { 'e' };
        format!("{}{e}{tail}", strip_trailing_zeros(mantissa))
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(spec: &str, value: impl Into<Value>) -> String {
        spec.parse::<FormatSpec>()
            .unwrap()
            .apply(&value.into())
            .unwrap()
    }

    #[test]
    fn parse_full_specifier() {
        let spec: FormatSpec = "08.3f".parse().unwrap();
        assert!(spec.zero_pad);
        assert_eq!(spec.width, Some(8));
        assert_eq!(spec.precision, Some(3));
        assert_eq!(spec.kind, FormatKind::Fixed);
        assert_eq!(spec.to_string(), "08.3f");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("3.x".parse::<FormatSpec>().is_err());
        assert!(".f".parse::<FormatSpec>().is_err());
        assert!("fz".parse::<FormatSpec>().is_err());
        assert!("<5".parse::<FormatSpec>().is_err());
        assert!(".2d".parse::<FormatSpec>().is_err());
    }

    #[test]
    fn fixed_decimals_and_width() {
        assert_eq!(fmt(".1f", 10.2), "10.2");
        assert_eq!(fmt("3.2f", 0.1), "0.10");
        assert_eq!(fmt("3.1f", -5), "-5.0");
        assert_eq!(fmt("7.6f", 0.0025), "0.002500");
        assert_eq!(fmt("8.2f", 3.14159), "    3.14");
        assert_eq!(fmt("08.2f", -3.14159), "-0003.14");
        assert_eq!(fmt("f", 1.5), "1.500000");
        assert_eq!(fmt("3.0f", 330), "330");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(fmt(".3e", 489e-6), "4.890e-04");
        assert_eq!(fmt(".4e", 4184), "4.1840e+03");
        assert_eq!(fmt(".2E", 1.5e12), "1.50E+12");
        assert_eq!(fmt(".1e", 0.0), "0.0e+00");
    }

    #[test]
    fn general_notation() {
        assert_eq!(fmt("g", 0.0001), "0.0001");
        assert_eq!(fmt("g", 0.00001), "1e-05");
        assert_eq!(fmt(".3g", 1234.5), "1.23e+03");
        assert_eq!(fmt(".3g", 12.0), "12");
        assert_eq!(fmt(".2", 0.123), "0.12");
    }

    #[test]
    fn bare_precision_keeps_a_decimal() {
        assert_eq!(fmt(".3", 12.0), "12.0");
        assert_eq!(fmt(".3", 0.5), "0.5");
        assert_eq!(fmt(".3", 123.0), "1.23e+02");
        assert_eq!(fmt(".2", 12.0), "1.2e+01");
        assert_eq!(fmt(".3", 0.00001), "1e-05");
        assert_eq!(fmt("8.3", -12.0), "   -12.0");
    }

    #[test]
    fn text_and_integer_types() {
        assert_eq!(fmt("s", "Quentin"), "Quentin");
        assert_eq!(fmt("10s", "Quentin"), "Quentin   ");
        assert_eq!(fmt("05", "ab"), "ab000");
        assert_eq!(fmt("d", 42), "42");
        assert_eq!(fmt("5d", 42), "   42");
        assert_eq!(fmt("05d", -42), "-0042");
        assert_eq!(fmt("", 1), "1");
        assert_eq!(fmt("", 1.0), "1.0");
        assert_eq!(fmt("", "="), "=");
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let f: FormatSpec = ".2f".parse().unwrap();
        assert!(f.apply(&Value::from("text")).is_err());
        let s: FormatSpec = "s".parse().unwrap();
        assert!(s.apply(&Value::Float(1.0)).is_err());
        let d: FormatSpec = "d".parse().unwrap();
        assert!(d.apply(&Value::Float(1.0)).is_err());
        assert!(f.apply(&Value::from(vec![1, 2])).is_err());
    }

    #[test]
    fn fixed_output_parses_back_within_precision() {
        for v in [0.123456, 12.9, -7.77777, 1234.5678] {
            let s = fmt(".3f", v);
            let back: f64 = s.parse().unwrap();
            assert!((back - v).abs() <= 0.0005 + f64::EPSILON, "{v} -> {s}");
        }
        let s = fmt(".4e", 6.0221e23);
        let back: f64 = s.parse().unwrap();
        assert!(((back - 6.0221e23) / 6.0221e23).abs() < 1e-4);
    }
}
