//! Acceptance criterion parsing and evaluation.
//!
//! Expected values are free text written by people: `"6.5-7.5"`, `"≤ 0.5"`,
//! `"NLT 80%"`, `"White to off-white powder"`. This module reads such a string
//! once into a small closed set of [`CriterionKind`]s and then judges measured
//! results against it.
//!
//! Rules, highest priority first:
//! - An empty measured value is [`Verdict::Inconclusive`].
//! - When both the expected and the measured text contain a digit the
//!   comparison is numeric: range, upper bound (`≤`, `<=`, `NMT`), lower bound
//!   (`≥`, `>=`, `NLT`), then exact match within an absolute tolerance.
//! - Otherwise the comparison is a case-insensitive substring match in either
//!   direction.
//!
//! Numeric text that cannot be read yields `Inconclusive`, never zero.
//!
//! # Example
//!
//! ```
//! use assay_core::{Criterion, Verdict};
//!
//! let ph = Criterion::parse("6.5-7.5");
//! assert_eq!(ph.evaluate("7.0"), Verdict::Pass);
//! assert_eq!(ph.evaluate("7.6"), Verdict::Fail);
//!
//! let appearance = Criterion::parse("White to off-white powder");
//! assert_eq!(appearance.evaluate("Off-white powder"), Verdict::Pass);
//! ```

use crate::error::CriterionError;
use crate::verdict::Verdict;
use tracing::debug;

/// Absolute tolerance for exact numeric criteria.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

const UPPER_MARKERS: [&str; 3] = ["≤", "<=", "nmt"];
const LOWER_MARKERS: [&str; 3] = ["≥", ">=", "nlt"];
const RANGE_SEPARATORS: [char; 2] = ['-', '–'];

/// Structured form of an expected-value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionKind {
    /// Inclusive window `min..=max`.
    Range {
        /// Lower limit
        min: f64,
        /// Upper limit
        max: f64,
    },
    /// Measured value must not exceed the bound.
    UpperBound(f64),
    /// Measured value must not fall below the bound.
    LowerBound(f64),
    /// Measured value must equal the target within the tolerance.
    ExactNumeric(f64),
    /// Case-insensitive substring match.
    Textual,
    /// Numeric text that could not be read.
    Malformed(CriterionError),
}

impl CriterionKind {
    /// Whether the kind compares numbers.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Range { .. } | Self::UpperBound(_) | Self::LowerBound(_) | Self::ExactNumeric(_)
        )
    }

    /// Short name for reports and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Range { .. } => "range",
            Self::UpperBound(_) => "upper-bound",
            Self::LowerBound(_) => "lower-bound",
            Self::ExactNumeric(_) => "exact-numeric",
            Self::Textual => "textual",
            Self::Malformed(_) => "malformed",
        }
    }
}

/// A parsed criterion, ready to judge any number of measured results.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    source: String,
    kind: CriterionKind,
    tolerance: f64,
}

impl Criterion {
    /// Parse an expected-value expression.
    #[must_use]
    pub fn parse(expected: &str) -> Self {
        let kind = classify(expected);
        if let CriterionKind::Malformed(err) = &kind {
            debug!(criterion = expected, error = %err, "criterion is not evaluable numerically");
        }
        Self {
            source: expected.trim().to_string(),
            kind,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Override the exact-numeric tolerance.
    ///
    /// Values that are not finite and positive are ignored and the current
    /// tolerance is kept.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_finite() && tolerance > 0.0 {
            self.tolerance = tolerance;
        } else {
            debug!(tolerance, "ignoring unusable tolerance");
        }
        self
    }

    /// The trimmed expression this criterion was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed kind.
    #[must_use]
    pub const fn kind(&self) -> &CriterionKind {
        &self.kind
    }

    /// Absolute tolerance used by exact-numeric comparisons.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Judge a measured result.
    #[must_use]
    pub fn evaluate(&self, measured: &str) -> Verdict {
        let measured = measured.trim();
        if measured.is_empty() {
            return Verdict::Inconclusive;
        }
        if self.kind == CriterionKind::Malformed(CriterionError::EmptyCriterion) {
            return Verdict::Inconclusive;
        }

        if matches!(self.kind, CriterionKind::Textual) || !has_digit(measured) {
            return Verdict::from_bool(textual_match(&self.source, measured));
        }

        let Some(value) = leading_number(measured) else {
            debug!(measured, "measured value has digits but no leading number");
            return Verdict::Inconclusive;
        };

        match &self.kind {
            CriterionKind::Range { min, max } => Verdict::from_bool(*min <= value && value <= *max),
            CriterionKind::UpperBound(bound) => Verdict::from_bool(value <= *bound),
            CriterionKind::LowerBound(bound) => Verdict::from_bool(value >= *bound),
            CriterionKind::ExactNumeric(target) => {
                Verdict::from_bool((value - target).abs() < self.tolerance)
            }
            CriterionKind::Textual | CriterionKind::Malformed(_) => Verdict::Inconclusive,
        }
    }
}

/// Classify an expected-value expression.
#[must_use]
pub fn classify(expected: &str) -> CriterionKind {
    let text = expected.trim();
    if text.is_empty() {
        return CriterionKind::Malformed(CriterionError::EmptyCriterion);
    }
    if !has_digit(text) {
        return CriterionKind::Textual;
    }

    // ASCII lowering keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let upper = find_marker(&lower, &UPPER_MARKERS);
    let lower_bound = find_marker(&lower, &LOWER_MARKERS);

    if let Some((min, max)) = split_range(text) {
        return CriterionKind::Range { min, max };
    }
    if upper.is_none() && lower_bound.is_none() && has_range_separator(text) {
        return CriterionKind::Malformed(CriterionError::MalformedRange(text.to_string()));
    }

    if let Some(operand_start) = upper {
        return match bound_value(text, operand_start) {
            Some(bound) => CriterionKind::UpperBound(bound),
            None => CriterionKind::Malformed(CriterionError::MalformedBound(text.to_string())),
        };
    }
    if let Some(operand_start) = lower_bound {
        return match bound_value(text, operand_start) {
            Some(bound) => CriterionKind::LowerBound(bound),
            None => CriterionKind::Malformed(CriterionError::MalformedBound(text.to_string())),
        };
    }

    match leading_number(text) {
        Some(target) => CriterionKind::ExactNumeric(target),
        None => CriterionKind::Malformed(CriterionError::MalformedNumber(text.to_string())),
    }
}

/// Parse `expected` and judge `measured` against it in one call.
#[must_use]
pub fn evaluate(expected: &str, measured: &str) -> Verdict {
    Criterion::parse(expected).evaluate(measured)
}

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Byte offset just past the first marker found.
fn find_marker(lower: &str, markers: &[&str]) -> Option<usize> {
    markers
        .iter()
        .filter_map(|m| lower.find(m).map(|idx| idx + m.len()))
        .min()
}

/// Read the operand after a bound marker.
///
/// Whitespace and punctuation such as `:` or `)` may sit between the marker
/// and the number; a letter may not. A marker with nothing after it, as in
/// `"0.5 NMT"`, takes the number in front of it.
fn bound_value(text: &str, operand_start: usize) -> Option<f64> {
    let operand = text[operand_start..].trim_start_matches(|c: char| {
        c.is_whitespace() || (c.is_ascii_punctuation() && !matches!(c, '+' | '-' | '.'))
    });
    if operand.is_empty() {
        leading_number(text)
    } else {
        leading_number(operand)
    }
}

fn is_exponent_sign(chars: &[(usize, char)], pos: usize) -> bool {
    pos >= 2 && matches!(chars[pos - 1].1, 'e' | 'E') && chars[pos - 2].1.is_ascii_digit()
}

/// First dash that is neither a leading sign nor an exponent sign.
fn range_separator(text: &str) -> Option<(usize, char)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    chars
        .iter()
        .enumerate()
        .skip(1)
        .find(|(pos, (_, c))| RANGE_SEPARATORS.contains(c) && !is_exponent_sign(&chars, *pos))
        .map(|(_, entry)| *entry)
}

fn has_range_separator(text: &str) -> bool {
    range_separator(text).is_some()
}

fn split_range(text: &str) -> Option<(f64, f64)> {
    let (idx, sep) = range_separator(text)?;
    let left = text[..idx].trim();
    let right = text[idx + sep.len_utf8()..].trim();
    Some((leading_number(left)?, leading_number(right)?))
}

/// Read a decimal literal at the start of `text`, allowing a unit suffix.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        has_digits |= end > frac_start;
    }
    if !has_digits {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Substring match either way; the measured text's first clause also counts.
fn textual_match(expected: &str, measured: &str) -> bool {
    let expected = normalize(expected);
    let measured = normalize(measured);
    if expected.is_empty() || measured.is_empty() {
        return false;
    }
    if measured.contains(&expected) || expected.contains(&measured) {
        return true;
    }

    let primary = measured
        .split(|c| c == ',' || c == ';')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    !primary.is_empty()
        && primary.len() < measured.len()
        && (primary.contains(&expected) || expected.contains(primary))
}
