use crate::alphabet::WmiChar;
use crate::error::{Error, Result};

/// Compact country-code range: a fixed first symbol plus an inclusive span
/// of second symbols.
///
/// Accepted encodings, as found in the country tables:
/// - `"J"`: every second symbol, `A` through `0`;
/// - `"JA"`: the single second symbol `A`;
/// - `"J-AE"`: second symbols `A` through `E`;
/// - `"JA-0E"`: four-symbol range form, spanning from the second symbol of
///   the left pair to the last symbol of the right pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub prefix: WmiChar,
    pub from: WmiChar,
    pub to: WmiChar,
}

impl CodeRange {
    pub fn parse(code: &str) -> Result<Self> {
        let (left, right) = match code.split_once('-') {
            Some((left, right)) => (left, Some(right)),
            None => (code, None),
        };

        let mut left_symbols = left.chars();
        let prefix = match left_symbols.next() {
            Some(ch) => WmiChar::from_char(ch)?,
            None => return Err(malformed(code, "missing first symbol")),
        };
        let pinned = left_symbols.next().map(WmiChar::from_char).transpose()?;

        let (from, to) = match (pinned, right) {
            // the right pair's first symbol repeats the prefix slot
            (Some(from), Some(span)) => (from, last_symbol(code, span)?),
            (None, Some(span)) => (first_symbol(code, span)?, last_symbol(code, span)?),
            (Some(pinned), None) => (pinned, pinned),
            (None, None) => (WmiChar::MIN, WmiChar::MAX),
        };

        if to < from {
            return Err(Error::InvertedSpan {
                code: code.to_string(),
                from: from.as_char(),
                to: to.as_char(),
            });
        }

        Ok(CodeRange { prefix, from, to })
    }

    /// Second symbols covered by this range, ascending in canonical order.
    /// Never empty: the parser rejects inverted spans.
    pub fn expand(&self) -> Vec<WmiChar> {
        (self.from.index()..=self.to.index())
            .filter_map(WmiChar::from_index)
            .collect()
    }
}

fn malformed(code: &str, reason: &str) -> Error {
    Error::MalformedCode {
        code: code.to_string(),
        reason: reason.to_string(),
    }
}

fn first_symbol(code: &str, span: &str) -> Result<WmiChar> {
    match span.chars().next() {
        Some(ch) => WmiChar::from_char(ch),
        None => Err(malformed(code, "empty span")),
    }
}

fn last_symbol(code: &str, span: &str) -> Result<WmiChar> {
    match span.chars().last() {
        Some(ch) => WmiChar::from_char(ch),
        None => Err(malformed(code, "empty span")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_chars(code: &str) -> Vec<char> {
        CodeRange::parse(code)
            .expect("valid code")
            .expand()
            .into_iter()
            .map(WmiChar::as_char)
            .collect()
    }

    #[test]
    fn bare_symbol_spans_whole_alphabet() {
        let chars = expand_chars("J");
        assert_eq!(chars.len(), 33);
        assert_eq!(chars.first(), Some(&'A'));
        assert_eq!(chars.last(), Some(&'0'));
    }

    #[test]
    fn two_symbol_code_pins_the_second_slot() {
        assert_eq!(expand_chars("JA"), vec!['A']);
        let range = CodeRange::parse("JA").expect("valid code");
        assert_eq!(range.prefix.as_char(), 'J');
    }

    #[test]
    fn dashed_span_is_inclusive() {
        assert_eq!(expand_chars("J-AE"), vec!['A', 'B', 'C', 'D', 'E']);
        assert_eq!(expand_chars("J-A0").len(), 33);
    }

    #[test]
    fn four_symbol_form_spans_from_the_left_pair() {
        assert_eq!(expand_chars("JA-0E"), vec!['A', 'B', 'C', 'D', 'E']);
    }

    #[test]
    fn spans_skip_the_excluded_letters() {
        let chars = expand_chars("S-AM");
        assert_eq!(chars.len(), 12);
        assert!(!chars.contains(&'I'));
        assert_eq!(chars.last(), Some(&'M'));
    }

    #[test]
    fn digit_spans_follow_canonical_order() {
        assert_eq!(expand_chars("5-12"), vec!['1', '2']);
        assert_eq!(expand_chars("5-90"), vec!['9', '0']);
    }

    #[test]
    fn inverted_span_is_rejected() {
        assert!(matches!(
            CodeRange::parse("J-EA"),
            Err(Error::InvertedSpan { .. })
        ));
        assert!(matches!(
            CodeRange::parse("5-09"),
            Err(Error::InvertedSpan { .. })
        ));
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert!(matches!(
            CodeRange::parse(""),
            Err(Error::MalformedCode { .. })
        ));
        assert!(matches!(
            CodeRange::parse("J-"),
            Err(Error::MalformedCode { .. })
        ));
        assert!(matches!(
            CodeRange::parse("-AE"),
            Err(Error::MalformedCode { .. })
        ));
        assert!(matches!(CodeRange::parse("JQ"), Err(Error::Symbol('Q'))));
        assert!(matches!(CodeRange::parse("J-A!"), Err(Error::Symbol('!'))));
    }
}
