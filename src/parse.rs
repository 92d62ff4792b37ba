//! Parsers for attribute values: numbers, point lists, path numbers and
//! transform lists.
//!
//! Everything here degrades instead of failing loudly: callers get `None`
//! (or an empty list) and decide their own fallback.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::log::debug;

#[derive(Parser)]
#[grammar = "svg_attrs.pest"]
pub struct SvgAttrParser;

/// One function of a `transform` attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformFn {
    Matrix([f64; 6]),
    Translate(f64, f64),
    Scale(f64, f64),
    /// Angle in degrees and optional rotation centre
    Rotate(f64, Option<(f64, f64)>),
    SkewX(f64),
    SkewY(f64),
}

fn number_value(pair: Pair<Rule>) -> Option<f64> {
    pair.as_str().parse::<f64>().ok()
}

/// Parse the leading number of `s`, ignoring trailing units or garbage
/// (`"10px"` is `10`, `"abc"` is `None`).
pub fn parse_number(s: &str) -> Option<f64> {
    let pairs = SvgAttrParser::parse(Rule::leading_number, s).ok()?;
    pairs
        .flatten()
        .find(|p| p.as_rule() == Rule::number)
        .and_then(number_value)
        .filter(|v| v.is_finite())
}

/// Every numeric token in `s`, in order of appearance
pub fn scan_numbers(s: &str) -> Vec<f64> {
    match SvgAttrParser::parse(Rule::number_scan, s) {
        Ok(pairs) => pairs
            .flatten()
            .filter(|p| p.as_rule() == Rule::number)
            .filter_map(number_value)
            .filter(|v| v.is_finite())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Parse a `points` attribute into coordinate pairs.
///
/// Returns `None` when the value contains anything besides numbers and
/// separators, or a number too large for `f64`. A dangling odd coordinate
/// is dropped.
pub fn parse_point_list(s: &str) -> Option<Vec<(f64, f64)>> {
    let pairs = match SvgAttrParser::parse(Rule::point_list, s) {
        Ok(pairs) => pairs,
        Err(_err) => {
            debug!(err = %_err, "unparseable points");
            return None;
        }
    };
    let values: Vec<f64> = pairs
        .flatten()
        .filter(|p| p.as_rule() == Rule::number)
        .map(number_value)
        .collect::<Option<_>>()?;
    if values.iter().any(|v| !v.is_finite()) {
        debug!(s, "points overflow f64");
        return None;
    }
    Some(pair_up(&values))
}

/// Group a flat number list into consecutive `(x, y)` samples
pub fn pair_up(values: &[f64]) -> Vec<(f64, f64)> {
    values.chunks_exact(2).map(|xy| (xy[0], xy[1])).collect()
}

/// Parse a `transform` attribute.
///
/// Returns `None` if any function is malformed or has the wrong number of
/// arguments, mirroring how browsers drop an invalid attribute as a whole.
pub fn parse_transform_list(s: &str) -> Option<Vec<TransformFn>> {
    let pairs = match SvgAttrParser::parse(Rule::transform_list, s) {
        Ok(pairs) => pairs,
        Err(_err) => {
            debug!(err = %_err, "unparseable transform attribute");
            return None;
        }
    };

    let mut out = Vec::new();
    for pair in pairs.flatten().filter(|p| p.as_rule() == Rule::transform_fn) {
        out.push(parse_transform_fn(pair)?);
    }
    Some(out)
}

fn parse_transform_fn(pair: Pair<Rule>) -> Option<TransformFn> {
    let mut inner = pair.into_inner();
    let name = inner.next()?.as_str();
    let args: Vec<f64> = inner.map(number_value).collect::<Option<_>>()?;
    if args.iter().any(|v| !v.is_finite()) {
        debug!(name, "transform argument overflows f64");
        return None;
    }

    let f = match (name, args.as_slice()) {
        ("matrix", &[a, b, c, d, e, f]) => TransformFn::Matrix([a, b, c, d, e, f]),
        ("translate", &[tx]) => TransformFn::Translate(tx, 0.0),
        ("translate", &[tx, ty]) => TransformFn::Translate(tx, ty),
        ("scale", &[s]) => TransformFn::Scale(s, s),
        ("scale", &[sx, sy]) => TransformFn::Scale(sx, sy),
        ("rotate", &[angle]) => TransformFn::Rotate(angle, None),
        ("rotate", &[angle, cx, cy]) => TransformFn::Rotate(angle, Some((cx, cy))),
        ("skewX", &[angle]) => TransformFn::SkewX(angle),
        ("skewY", &[angle]) => TransformFn::SkewY(angle),
        _ => {
            debug!(name, argc = args.len(), "transform function with bad arity");
            return None;
        }
    };
    Some(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_like_parse_float() {
        assert_eq!(parse_number("10"), Some(10.0));
        assert_eq!(parse_number("  -2.5px"), Some(-2.5));
        assert_eq!(parse_number(".5em"), Some(0.5));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn scan_numbers_ignores_commands() {
        assert_eq!(
            scan_numbers("M0 0 L10,10 L0 10 Z"),
            vec![0.0, 0.0, 10.0, 10.0, 0.0, 10.0]
        );
    }

    #[test]
    fn scan_numbers_splits_compact_forms() {
        assert_eq!(scan_numbers("M1-2l.5.5"), vec![1.0, -2.0, 0.5, 0.5]);
        assert_eq!(scan_numbers("c1e1,2E-1 3 4"), vec![10.0, 0.2, 3.0, 4.0]);
        assert!(scan_numbers("M Z").is_empty());
    }

    #[test]
    fn point_list_accepts_mixed_separators() {
        assert_eq!(
            parse_point_list("0,0 10,0\n10 , 10"),
            Some(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
        );
        assert_eq!(parse_point_list("1 2 3"), Some(vec![(1.0, 2.0)]));
        assert_eq!(parse_point_list(""), Some(vec![]));
    }

    #[test]
    fn point_list_rejects_garbage() {
        assert_eq!(parse_point_list("0,0 ten,10"), None);
    }

    #[test]
    fn transform_list_parses_each_function() {
        let fns = parse_transform_list(
            "translate(10) scale(2,3) rotate(45 5 5) skewX(10), matrix(1 0 0 1 4 5)",
        )
        .unwrap();
        assert_eq!(
            fns,
            vec![
                TransformFn::Translate(10.0, 0.0),
                TransformFn::Scale(2.0, 3.0),
                TransformFn::Rotate(45.0, Some((5.0, 5.0))),
                TransformFn::SkewX(10.0),
                TransformFn::Matrix([1.0, 0.0, 0.0, 1.0, 4.0, 5.0]),
            ]
        );
    }

    #[test]
    fn transform_list_empty_and_invalid() {
        assert_eq!(parse_transform_list(""), Some(vec![]));
        assert_eq!(parse_transform_list("  "), Some(vec![]));
        assert_eq!(parse_transform_list("rotate(1, 2)"), None);
        assert_eq!(parse_transform_list("wobble(3)"), None);
        assert_eq!(parse_transform_list("translate(1"), None);
    }

    #[test]
    fn overflowing_numbers_are_rejected() {
        assert_eq!(parse_point_list("1e999,1e999"), None);
        assert_eq!(parse_point_list("0,0 10,-1e400"), None);
        assert_eq!(parse_transform_list("translate(1e999)"), None);
        assert_eq!(parse_transform_list("scale(2) rotate(-1e309, 0, 0)"), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn pair_up_drops_odd_tail() {
        assert_eq!(pair_up(&[1.0, 2.0, 3.0]), vec![(1.0, 2.0)]);
    }
}
