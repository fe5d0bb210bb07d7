/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Comparison of predicted CDL lists against reference lists.
//!
//! Elements are compared after [`normalize_cdl_element`], which erases point
//! names so that `Triangle(ABC)` and `Triangle(XYZ)` count as the same fact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Placeholder substituted for point names.
pub const VARIABLE_PLACEHOLDER: &str = "_V_";

/// Normalises one CDL element for set comparison.
///
/// Spaces are dropped. Every innermost argument list (one without nested
/// parentheses) has its non-numeric arguments replaced by `_V_`, and a list
/// made only of variables collapses to `(_V_)`. Text with no parentheses at
/// all keeps numerals and replaces upper-case point tokens.
pub fn normalize_cdl_element(element: &str) -> String {
    let text: String = element.trim().chars().filter(|c| *c != ' ').collect();
    if !text.contains('(') {
        if is_numeral(&text) {
            return text;
        }
        return replace_point_tokens(&text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(['(', ')']) {
            Some(close) if close > 0 && after.as_bytes()[close] == b')' => {
                out.push_str(&rest[..open]);
                out.push_str(&normalize_group(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn normalize_group(content: &str) -> String {
    let parts: Vec<&str> = content
        .split(',')
        .map(|part| {
            let part = part.trim();
            if is_numeral(part) { part } else { VARIABLE_PLACEHOLDER }
        })
        .collect();
    if parts.iter().all(|part| *part == VARIABLE_PLACEHOLDER) {
        format!("({VARIABLE_PLACEHOLDER})")
    } else {
        format!("({})", parts.join(","))
    }
}

/// `\d+\.?\d*`
fn is_numeral(text: &str) -> bool {
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (text, ""),
    };
    !int.is_empty() && int.chars().all(|c| c.is_ascii_digit()) && frac.chars().all(|c| c.is_ascii_digit())
}

/// Replaces whole words shaped like `A`, `AB`, `P1` with the placeholder.
fn replace_point_tokens(text: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    let flush = |word: &mut String, out: &mut String| {
        let mut chars = word.chars();
        let is_point = chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if is_point {
            out.push_str(VARIABLE_PLACEHOLDER);
        } else {
            out.push_str(word);
        }
        word.clear();
    };
    for ch in text.chars() {
        if is_word(ch) {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push(ch);
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Strict set-overlap scores between predicted and reference CDL lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub jaccard: f64,
    pub exact_match: f64,
}

impl SetMetrics {
    const PERFECT: SetMetrics = SetMetrics {
        precision: 1.0,
        recall: 1.0,
        f1: 1.0,
        jaccard: 1.0,
        exact_match: 1.0,
    };

    /// Scores exact matches between the normalised element sets.
    ///
    /// Both empty is a perfect score. An empty reference scores recall 1 and
    /// nothing else; an empty prediction scores precision 1 and nothing else.
    pub fn strict<P, G>(predicted: P, reference: G) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let predicted: BTreeSet<String> = predicted
            .into_iter()
            .map(|e| normalize_cdl_element(e.as_ref()))
            .collect();
        let reference: BTreeSet<String> = reference
            .into_iter()
            .map(|e| normalize_cdl_element(e.as_ref()))
            .collect();

        match (predicted.is_empty(), reference.is_empty()) {
            (true, true) => return Self::PERFECT,
            (false, true) => return Self::partial(0.0, 1.0),
            (true, false) => return Self::partial(1.0, 0.0),
            (false, false) => {}
        }

        let common = predicted.intersection(&reference).count() as f64;
        let union = predicted.union(&reference).count() as f64;
        let precision = common / predicted.len() as f64;
        let recall = common / reference.len() as f64;
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        SetMetrics {
            precision,
            recall,
            f1,
            jaccard: common / union,
            exact_match: if predicted == reference { 1.0 } else { 0.0 },
        }
    }

    fn partial(precision: f64, recall: f64) -> Self {
        SetMetrics {
            precision,
            recall,
            f1: 0.0,
            jaccard: 0.0,
            exact_match: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_names_are_erased() {
        assert_eq!(normalize_cdl_element("Triangle(ABC)"), "Triangle(_V_)");
        assert_eq!(normalize_cdl_element("Parallel(AB, CD)"), "Parallel(_V_)");
        assert_eq!(
            normalize_cdl_element("Equal(LengthOfLine(AB),5)"),
            "Equal(LengthOfLine(_V_),5)"
        );
        assert_eq!(normalize_cdl_element("Equal(x+1,12.5)"), "Equal(_V_,12.5)");
    }

    #[test]
    fn bare_text_keeps_numerals() {
        assert_eq!(normalize_cdl_element("42"), "42");
        assert_eq!(normalize_cdl_element("AB+x"), "_V_+x");
    }

    #[test]
    fn strict_metrics() {
        let m = SetMetrics::strict(["Triangle(ABC)", "Parallel(AB,CD)"], ["Triangle(XYZ)"]);
        assert_eq!(m.precision, 0.5);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.jaccard, 0.5);
        assert_eq!(m.exact_match, 0.0);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_set_conventions() {
        let none: [&str; 0] = [];
        assert_eq!(SetMetrics::strict(none, none), SetMetrics::PERFECT);
        let m = SetMetrics::strict(["Triangle(ABC)"], none);
        assert_eq!((m.precision, m.recall), (0.0, 1.0));
        let m = SetMetrics::strict(none, ["Triangle(ABC)"]);
        assert_eq!((m.precision, m.recall), (1.0, 0.0));
    }
}
