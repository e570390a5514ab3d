//! Comparison rules for captured bodies and headers.
//!
//! Three families: byte-for-byte (or widened numeric) equality, contiguous
//! substring containment, and regular-expression matching. Patterns compile
//! with [`regex::bytes`] so non-UTF-8 bodies still match. Every comparison
//! yields a [`Verdict`] so the chain applies severity uniformly.

use regex::bytes::Regex;

use super::value::{Normalized, Value};
use crate::error::Error;

/// Outcome of a single comparison.
pub(crate) enum Verdict {
    Pass,
    /// Assertion mismatch; later assertions on the chain still run.
    Fail(Error),
    /// The comparison was structurally impossible; the chain halts.
    Fatal(Error),
}

/// Body equality. An absent/empty expectation equals an empty body, so
/// `()`, `""`, and `b""` are interchangeable ways to assert "no body".
/// A numeric expectation never equals a byte body.
pub(crate) fn body_equals(expected: Value, body: &[u8]) -> Verdict {
    match expected.normalize() {
        Err(err) => Verdict::Fatal(err),
        Ok(Normalized::Bytes(bytes)) => {
            if bytes == body {
                Verdict::Pass
            } else {
                Verdict::Fail(Error::Body {
                    expected: preview(&bytes),
                    actual: preview(body),
                })
            }
        }
        Ok(Normalized::Number(n)) => Verdict::Fail(Error::Body {
            expected: format_number(n),
            actual: preview(body),
        }),
    }
}

/// Substring containment on the body. Numeric needles have no byte
/// representation to search for.
pub(crate) fn body_contains(needle: Value, body: &[u8]) -> Verdict {
    let kind = needle.kind();
    match needle.normalize() {
        Err(err) => Verdict::Fatal(err),
        Ok(Normalized::Bytes(bytes)) => {
            if contains_slice(body, &bytes) {
                Verdict::Pass
            } else {
                Verdict::Fail(Error::Contains {
                    needle: preview(&bytes),
                    body: preview(body),
                })
            }
        }
        Ok(Normalized::Number(_)) => Verdict::Fatal(Error::ExpectationKind {
            kind,
            operation: "containment",
        }),
    }
}

/// Pattern match on the body. Succeeds if any substring matches.
pub(crate) fn body_matches(pattern: &str, body: &[u8]) -> Verdict {
    let re = match compile(pattern) {
        Ok(re) => re,
        Err(verdict) => return verdict,
    };
    if re.is_match(body) {
        Verdict::Pass
    } else {
        Verdict::Fail(Error::Match {
            pattern: pattern.to_string(),
            body: preview(body),
        })
    }
}

/// Header equality against every value of one header; any single matching
/// value passes. A numeric expectation parses each header value as `f64`:
/// if no value parses at all the parse failure is fatal, if values parse
/// but none is equal the mismatch is an ordinary failure.
pub(crate) fn header_equals(name: &str, expected: Value, values: &[Vec<u8>]) -> Verdict {
    match expected.normalize() {
        Err(err) => Verdict::Fatal(err),
        Ok(Normalized::Bytes(bytes)) => {
            if values.iter().any(|value| value[..] == bytes[..]) {
                Verdict::Pass
            } else {
                Verdict::Fail(Error::Header {
                    name: name.to_string(),
                    expected: preview(&bytes),
                    actual: preview_values(values),
                })
            }
        }
        Ok(Normalized::Number(n)) => {
            let mut unparseable = None;
            let mut any_parsed = false;
            for value in values {
                match parse_number(value) {
                    Some(parsed) => {
                        any_parsed = true;
                        if parsed == n {
                            return Verdict::Pass;
                        }
                    }
                    None => unparseable = Some(value),
                }
            }
            if any_parsed {
                Verdict::Fail(Error::Header {
                    name: name.to_string(),
                    expected: format_number(n),
                    actual: preview_values(values),
                })
            } else {
                // values is non-empty: the chain reports a missing header
                // before the comparator runs.
                let value = unparseable.expect("header with no values");
                Verdict::Fatal(Error::HeaderNumber {
                    name: name.to_string(),
                    value: String::from_utf8_lossy(value).into_owned(),
                })
            }
        }
    }
}

/// Containment against every value of one header.
pub(crate) fn header_contains(name: &str, needle: Value, values: &[Vec<u8>]) -> Verdict {
    let kind = needle.kind();
    match needle.normalize() {
        Err(err) => Verdict::Fatal(err),
        Ok(Normalized::Bytes(bytes)) => {
            if values.iter().any(|value| contains_slice(value, &bytes)) {
                Verdict::Pass
            } else {
                Verdict::Fail(Error::HeaderContains {
                    name: name.to_string(),
                    needle: preview(&bytes),
                })
            }
        }
        Ok(Normalized::Number(_)) => Verdict::Fatal(Error::ExpectationKind {
            kind,
            operation: "containment",
        }),
    }
}

/// Pattern match against every value of one header.
pub(crate) fn header_matches(name: &str, pattern: &str, values: &[Vec<u8>]) -> Verdict {
    let re = match compile(pattern) {
        Ok(re) => re,
        Err(verdict) => return verdict,
    };
    if values.iter().any(|value| re.is_match(value)) {
        Verdict::Pass
    } else {
        Verdict::Fail(Error::HeaderMatch {
            name: name.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

/// Structural JSON equality against the captured body. An unparseable body
/// is an ordinary mismatch: the handler produced the wrong content.
pub(crate) fn body_json_equals(expected: &serde_json::Value, body: &[u8]) -> Verdict {
    let actual: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            return Verdict::Fail(Error::JsonSyntax {
                body: preview(body),
                reason: err.to_string(),
            })
        }
    };
    if &actual == expected {
        Verdict::Pass
    } else {
        Verdict::Fail(Error::Json {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn compile(pattern: &str) -> Result<Regex, Verdict> {
    Regex::new(pattern).map_err(|source| {
        Verdict::Fatal(Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })
    })
}

fn contains_slice(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

fn parse_number(value: &[u8]) -> Option<f64> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.trim().parse::<f64>().ok())
}

/// Render bytes for an error message: quoted text when printable, a byte
/// listing otherwise, truncated past 64 bytes.
pub(crate) fn preview(bytes: &[u8]) -> String {
    const LIMIT: usize = 64;
    match std::str::from_utf8(bytes) {
        Ok(text) if text.len() <= LIMIT => format!("{text:?}"),
        Ok(text) => {
            let cut: String = text.chars().take(LIMIT).collect();
            format!("{cut:?}...")
        }
        Err(_) if bytes.len() <= LIMIT => format!("{bytes:?}"),
        Err(_) => format!("{:?}...", &bytes[..LIMIT]),
    }
}

fn preview_values(values: &[Vec<u8>]) -> String {
    values
        .iter()
        .map(|value| preview(value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_number(n: f64) -> String {
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pass(verdict: Verdict) {
        assert!(matches!(verdict, Verdict::Pass));
    }

    fn fail_of(verdict: Verdict) -> Error {
        match verdict {
            Verdict::Fail(err) => err,
            Verdict::Pass => panic!("expected failure, comparison passed"),
            Verdict::Fatal(err) => panic!("expected failure, got fatal: {err}"),
        }
    }

    fn fatal_of(verdict: Verdict) -> Error {
        match verdict {
            Verdict::Fatal(err) => err,
            Verdict::Pass => panic!("expected fatal, comparison passed"),
            Verdict::Fail(err) => panic!("expected fatal, got failure: {err}"),
        }
    }

    #[test]
    fn equal_bytes_pass() {
        assert_pass(body_equals(Value::from("hello"), b"hello"));
        assert_pass(body_equals(Value::from(vec![1u8, 2, 3]), &[1, 2, 3]));
    }

    #[test]
    fn absent_empty_text_and_empty_bytes_are_interchangeable() {
        assert_pass(body_equals(Value::from(()), b""));
        assert_pass(body_equals(Value::from(""), b""));
        assert_pass(body_equals(Value::from(Vec::new()), b""));
    }

    #[test]
    fn mismatched_bytes_fail() {
        let err = fail_of(body_equals(Value::from("hello"), b"goodbye"));
        assert!(matches!(err, Error::Body { .. }));
    }

    #[test]
    fn numeric_expectation_never_equals_a_byte_body() {
        let err = fail_of(body_equals(Value::from(0.0), b"hello"));
        assert!(err.to_string().contains("expecting body 0"));
    }

    #[test]
    fn containment_finds_contiguous_substrings() {
        assert_pass(body_contains(Value::from("lo wo"), b"hello world"));
        let err = fail_of(body_contains(Value::from("nothing"), b"hello world"));
        assert!(matches!(err, Error::Contains { .. }));
    }

    #[test]
    fn empty_needle_is_always_contained() {
        assert_pass(body_contains(Value::from(""), b""));
        assert_pass(body_contains(Value::from(""), b"anything"));
    }

    #[test]
    fn numeric_needle_is_fatal() {
        let err = fatal_of(body_contains(Value::from(42), b"42"));
        assert!(matches!(
            err,
            Error::ExpectationKind {
                kind: "integer",
                ..
            }
        ));
    }

    #[test]
    fn pattern_matches_any_substring() {
        assert_pass(body_matches(r"\w+ \w+", b"hello world"));
        let err = fail_of(body_matches(r"^\d+$", b"hello world"));
        assert!(matches!(err, Error::Match { .. }));
    }

    #[test]
    fn invalid_pattern_is_fatal_with_the_compiler_diagnostic() {
        let err = fatal_of(body_matches(r"\Ga+", b"hello"));
        assert!(err
            .to_string()
            .starts_with("error compiling regular expression"));
    }

    #[test]
    fn pattern_matching_works_on_non_utf8_bodies() {
        assert_pass(body_matches(r"\x01\x02", &[0xff, 0x01, 0x02, 0xfe]));
    }

    #[test]
    fn header_equality_accepts_any_matching_value() {
        let values = vec![b"gzip".to_vec(), b"br".to_vec()];
        assert_pass(header_equals("Accept-Encoding", Value::from("br"), &values));
        let err = fail_of(header_equals(
            "Accept-Encoding",
            Value::from("zstd"),
            &values,
        ));
        assert!(matches!(err, Error::Header { .. }));
    }

    #[test]
    fn numeric_header_expectation_parses_the_value() {
        let values = vec![b"42".to_vec()];
        assert_pass(header_equals("X-Number", Value::from(42), &values));

        let err = fail_of(header_equals("X-Number", Value::from(37), &values));
        assert!(err.to_string().contains("expecting header"));
    }

    #[test]
    fn unparseable_numeric_header_is_fatal() {
        let values = vec![b"World".to_vec()];
        let err = fatal_of(header_equals("X-Hello", Value::from(13), &values));
        assert!(matches!(err, Error::HeaderNumber { .. }));
        assert!(err.to_string().contains("World"));
    }

    #[test]
    fn numeric_header_equality_passes_if_any_value_parses_and_matches() {
        let values = vec![b"World".to_vec(), b"42".to_vec()];
        assert_pass(header_equals("X-Mixed", Value::from(42), &values));
    }

    #[test]
    fn header_containment_and_matching() {
        let values = vec![b"World".to_vec()];
        assert_pass(header_contains("X-Hello", Value::from("Wo"), &values));
        assert_pass(header_matches("X-Hello", "W.*d", &values));

        let err = fail_of(header_contains("X-Hello", Value::from("xyz"), &values));
        assert!(matches!(err, Error::HeaderContains { .. }));
        let err = fail_of(header_matches("X-Hello", "^\\d+$", &values));
        assert!(matches!(err, Error::HeaderMatch { .. }));
    }

    #[test]
    fn json_equality_ignores_key_order_and_whitespace() {
        let expected = serde_json::json!({"a": 1, "b": [true, null]});
        assert_pass(body_json_equals(
            &expected,
            br#"{ "b": [true, null], "a": 1 }"#,
        ));

        let err = fail_of(body_json_equals(&expected, br#"{"a": 2}"#));
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn non_json_body_is_an_ordinary_mismatch() {
        let expected = serde_json::json!({});
        let err = fail_of(body_json_equals(&expected, b"not json"));
        assert!(matches!(err, Error::JsonSyntax { .. }));
    }

    #[test]
    fn previews_quote_text_and_list_raw_bytes() {
        assert_eq!(preview(b"hello"), "\"hello\"");
        assert_eq!(preview(&[0xff, 0x00]), "[255, 0]");
    }
}
