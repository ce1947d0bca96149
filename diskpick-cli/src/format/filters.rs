// SPDX-License-Identifier: GPL-3.0-only

//! Tera filters available to line templates.

use std::collections::HashMap;
use std::sync::LazyLock;

use diskpick_types::{bytes_to_iec, bytes_to_si};
use regex::Regex;
use tera::{Error, Value};

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace runs"));
static DASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("Invalid regex: dash runs"));

const ELLIPSIS: &str = "...";

fn text(value: &Value, filter: &str) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::msg(format!(
            "Filter `{filter}` can only be used on strings, numbers or booleans"
        ))),
    }
}

fn bytes(value: &Value, filter: &str) -> Result<u64, Error> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| Error::msg(format!("Filter `{filter}` expects an unsigned integer"))),
        Value::Null => Ok(0),
        _ => Err(Error::msg(format!(
            "Filter `{filter}` can only be used on a number"
        ))),
    }
}

fn width_arg(args: &HashMap<String, Value>, filter: &str) -> Result<usize, Error> {
    args.get("width")
        .and_then(Value::as_u64)
        .map(|w| w as usize)
        .ok_or_else(|| {
            Error::msg(format!(
                "Filter `{filter}` expects an unsigned integer `width` argument"
            ))
        })
}

/// Collapse whitespace runs to one space and dash runs to one dash.
pub(super) fn condense_text(s: &str) -> String {
    let s = SPACE_RUNS.replace_all(s, " ");
    DASH_RUNS.replace_all(&s, "-").into_owned()
}

pub(super) fn condense(value: &Value, _: &HashMap<String, Value>) -> Result<Value, Error> {
    Ok(Value::String(condense_text(&text(value, "condense")?)))
}

/// Truncate to `width` characters, ending in "..." when shortened.
pub(super) fn abbrev(value: &Value, args: &HashMap<String, Value>) -> Result<Value, Error> {
    let s = text(value, "abbrev")?;
    let width = width_arg(args, "abbrev")?;

    if s.chars().count() <= width {
        return Ok(Value::String(s));
    }
    if width <= ELLIPSIS.len() {
        return Ok(Value::String(s.chars().take(width).collect()));
    }

    let mut out: String = s.chars().take(width - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    Ok(Value::String(out))
}

/// Replace an empty value with "-".
pub(super) fn dash(value: &Value, _: &HashMap<String, Value>) -> Result<Value, Error> {
    let s = text(value, "dash")?;
    Ok(Value::String(if s.is_empty() { "-".to_string() } else { s }))
}

/// Pad to `width` characters; `align` is "left" (default) or "right".
pub(super) fn pad(value: &Value, args: &HashMap<String, Value>) -> Result<Value, Error> {
    let s = text(value, "pad")?;
    let width = width_arg(args, "pad")?;

    let padded = match args.get("align").and_then(Value::as_str).unwrap_or("left") {
        "left" => format!("{s:<width$}"),
        "right" => format!("{s:>width$}"),
        other => {
            return Err(Error::msg(format!(
                "Filter `pad` expects `align` to be \"left\" or \"right\", got {other:?}"
            )));
        }
    };
    Ok(Value::String(padded))
}

pub(super) fn human_bytes(value: &Value, _: &HashMap<String, Value>) -> Result<Value, Error> {
    Ok(Value::String(bytes_to_si(bytes(value, "human_bytes")?)))
}

pub(super) fn human_bytes_iec(value: &Value, _: &HashMap<String, Value>) -> Result<Value, Error> {
    Ok(Value::String(bytes_to_iec(bytes(value, "human_bytes_iec")?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn condense_collapses_runs() {
        let out = condense(&json!("WDC   WD10EZEX--00\tBN5A0"), &HashMap::new()).unwrap();
        assert_eq!(out, json!("WDC WD10EZEX-00 BN5A0"));
    }

    #[test]
    fn abbrev_keeps_short_values_and_marks_truncation() {
        let width = args(&[("width", json!(10))]);
        assert_eq!(abbrev(&json!("ext4"), &width).unwrap(), json!("ext4"));
        assert_eq!(
            abbrev(&json!("crypto_LUKS_container"), &width).unwrap(),
            json!("crypto_...")
        );
        assert!(abbrev(&json!("x"), &HashMap::new()).is_err());
    }

    #[test]
    fn pad_aligns_both_ways() {
        assert_eq!(
            pad(&json!("ab"), &args(&[("width", json!(4))])).unwrap(),
            json!("ab  ")
        );
        assert_eq!(
            pad(
                &json!("ab"),
                &args(&[("width", json!(4)), ("align", json!("right"))])
            )
            .unwrap(),
            json!("  ab")
        );
        assert!(
            pad(
                &json!("ab"),
                &args(&[("width", json!(4)), ("align", json!("middle"))])
            )
            .is_err()
        );
    }

    #[test]
    fn dash_fills_empty_values() {
        assert_eq!(dash(&json!(""), &HashMap::new()).unwrap(), json!("-"));
        assert_eq!(dash(&Value::Null, &HashMap::new()).unwrap(), json!("-"));
        assert_eq!(dash(&json!("vfat"), &HashMap::new()).unwrap(), json!("vfat"));
    }

    #[test]
    fn byte_filters_reject_text() {
        assert_eq!(
            human_bytes_iec(&json!(1536), &HashMap::new()).unwrap(),
            json!("1.5 KiB")
        );
        assert_eq!(
            human_bytes(&json!(1_000_000), &HashMap::new()).unwrap(),
            json!("1.0 MB")
        );
        assert!(human_bytes(&json!("big"), &HashMap::new()).is_err());
    }
}
