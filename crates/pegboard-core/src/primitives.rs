//! Scanners behind the fixed-shape combinators.
//!
//! Each scanner looks at the front of a symbol slice and reports how many
//! symbols match. They never allocate and never look past the first
//! mismatch.

/// Symbols that can never appear inside an identifier.
///
/// `-` and `>` are reserved individually so that the `->` arrow always
/// terminates a rule name.
pub(crate) const RESERVED: &[char] = &[
    '"', '\'', '*', '+', '?', '|', '(', ')', ';', '-', '>', ':', ' ', '\t', '\n', '\r',
];

/// Quote characters that open and close quoted text.
pub(crate) const QUOTES: &[char] = &['"', '\''];

pub(crate) fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Length of the leading run of non-reserved symbols.
pub(crate) fn scan_identifier(input: &[char]) -> usize {
    input.iter().take_while(|&&c| !is_reserved(c)).count()
}

/// Length of the leading run of whitespace.
pub(crate) fn scan_whitespace(input: &[char]) -> usize {
    input.iter().take_while(|&&c| is_space(c)).count()
}

/// Length of `value` if the input starts with exactly those symbols.
pub(crate) fn scan_text(input: &[char], value: &str) -> Option<usize> {
    let mut len = 0;
    for expected in value.chars() {
        if input.get(len) != Some(&expected) {
            return None;
        }
        len += 1;
    }
    Some(len)
}

/// Why quoted text did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuoteError {
    /// The input does not begin with a quote.
    NotQuoted,
    /// The closing quote never appears.
    Unterminated,
}

/// Length of a quoted run including both delimiters.
///
/// The closing delimiter is the first later occurrence of the opening quote;
/// there is no escaping.
pub(crate) fn scan_quoted(input: &[char]) -> Result<usize, QuoteError> {
    let quote = match input.first() {
        Some(&c) if QUOTES.contains(&c) => c,
        _ => return Err(QuoteError::NotQuoted),
    };

    input[1..]
        .iter()
        .position(|&c| c == quote)
        .map(|closing| closing + 2)
        .ok_or(QuoteError::Unterminated)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn identifier_never_contains_reserved(s in "\\PC{0,30}") {
            let input: Vec<char> = s.chars().collect();
            let len = scan_identifier(&input);
            prop_assert!(input[..len].iter().all(|&c| !is_reserved(c)));
            if let Some(&next) = input.get(len) {
                prop_assert!(is_reserved(next));
            }
        }

        #[test]
        fn quoted_text_is_delimited_by_same_quote(body in "[a-z ]{0,10}", quote in prop::sample::select(vec!['"', '\''])) {
            let input: Vec<char> = std::iter::once(quote)
                .chain(body.chars())
                .chain(std::iter::once(quote))
                .chain("tail".chars())
                .collect();
            prop_assert_eq!(scan_quoted(&input), Ok(body.chars().count() + 2));
        }
    }
}
