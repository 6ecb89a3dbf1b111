// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tokenizer and value helpers for QoS policy strings.
//!
//! A policy string is a list of `policy.field=value` entries separated by
//! `;` or newlines:
//!
//! ```text
//! reliability.kind=RELIABLE_RELIABILITY_QOS; history.depth=25
//! deadline.period=250ms
//! ```

use super::QosParseError;
use std::time::Duration;

enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Secs,
}

/// One `policy.field=value` entry, with policy and field lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub policy: String,
    pub field: String,
    pub value: String,
}

impl Entry {
    pub(crate) fn invalid_value(&self) -> QosParseError {
        QosParseError::InvalidValue {
            policy: self.policy.clone(),
            field: self.field.clone(),
            value: self.value.clone(),
        }
    }

    pub(crate) fn unknown_field(&self) -> QosParseError {
        QosParseError::UnknownField {
            policy: self.policy.clone(),
            field: self.field.clone(),
        }
    }

    /// Parse the value as a duration.
    ///
    /// Accepts `infinite` / `DURATION_INFINITY`, or an integer with an
    /// optional `ns`, `us`, `ms` or `s` suffix (seconds when omitted).
    pub(crate) fn duration(&self) -> Result<Duration, QosParseError> {
        let v = self.value.as_str();
        if v.eq_ignore_ascii_case("infinite") || v.eq_ignore_ascii_case("DURATION_INFINITY") {
            return Ok(Duration::MAX);
        }

        let (digits, unit) = if let Some(n) = v.strip_suffix("ns") {
            (n, TimeUnit::Nanos)
        } else if let Some(n) = v.strip_suffix("us") {
            (n, TimeUnit::Micros)
        } else if let Some(n) = v.strip_suffix("ms") {
            (n, TimeUnit::Millis)
        } else if let Some(n) = v.strip_suffix('s') {
            (n, TimeUnit::Secs)
        } else {
            (v, TimeUnit::Secs)
        };

        let n = digits
            .trim()
            .parse::<u64>()
            .map_err(|_| self.invalid_value())?;

        Ok(match unit {
            TimeUnit::Nanos => Duration::from_nanos(n),
            TimeUnit::Micros => Duration::from_micros(n),
            TimeUnit::Millis => Duration::from_millis(n),
            TimeUnit::Secs => Duration::from_secs(n),
        })
    }

    pub(crate) fn u32(&self) -> Result<u32, QosParseError> {
        self.value.parse().map_err(|_| self.invalid_value())
    }

    pub(crate) fn i32(&self) -> Result<i32, QosParseError> {
        self.value.parse().map_err(|_| self.invalid_value())
    }

    /// Parse a resource limit. `None` means unlimited.
    pub(crate) fn limit(&self) -> Result<Option<usize>, QosParseError> {
        let v = self.value.as_str();
        if v == "-1" || v.eq_ignore_ascii_case("unlimited") || v.eq_ignore_ascii_case("LENGTH_UNLIMITED")
        {
            return Ok(None);
        }
        match v.parse::<usize>() {
            Ok(0) | Err(_) => Err(self.invalid_value()),
            Ok(n) => Ok(Some(n)),
        }
    }

    pub(crate) fn bool(&self) -> Result<bool, QosParseError> {
        if self.value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if self.value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.invalid_value())
        }
    }

    /// Match the value against `(short name, DDS constant, variant)` triples.
    pub(crate) fn keyword<T: Copy>(&self, table: &[(&str, &str, T)]) -> Result<T, QosParseError> {
        table
            .iter()
            .find(|(short, constant, _)| {
                self.value.eq_ignore_ascii_case(short) || self.value.eq_ignore_ascii_case(constant)
            })
            .map(|(_, _, v)| *v)
            .ok_or_else(|| self.invalid_value())
    }
}

/// Split a policy string into entries.
///
/// Blank input yields no entries.
pub fn entries(input: &str) -> Result<Vec<Entry>, QosParseError> {
    let mut out = Vec::new();

    for raw in input.split([';', '\n']) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| QosParseError::MalformedEntry(raw.to_string()))?;
        let (policy, field) = key
            .trim()
            .split_once('.')
            .ok_or_else(|| QosParseError::MalformedEntry(raw.to_string()))?;

        let policy = policy.trim();
        let field = field.trim();
        if policy.is_empty() || field.is_empty() {
            return Err(QosParseError::MalformedEntry(raw.to_string()));
        }

        out.push(Entry {
            policy: policy.to_ascii_lowercase(),
            field: field.to_ascii_lowercase(),
            value: value.trim().to_string(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str) -> Entry {
        Entry {
            policy: "deadline".into(),
            field: "period".into(),
            value: value.into(),
        }
    }

    #[test]
    fn test_entries_split_and_normalize() {
        let parsed = entries(" Reliability.Kind = reliable ;\nhistory.depth=5;; ").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].policy, "reliability");
        assert_eq!(parsed[0].field, "kind");
        assert_eq!(parsed[0].value, "reliable");
        assert_eq!(parsed[1].policy, "history");
        assert_eq!(parsed[1].value, "5");
    }

    #[test]
    fn test_entries_blank() {
        assert!(entries("").unwrap().is_empty());
        assert!(entries("  ;\n ").unwrap().is_empty());
    }

    #[test]
    fn test_entries_malformed() {
        assert!(matches!(
            entries("reliability=reliable"),
            Err(QosParseError::MalformedEntry(_))
        ));
        assert!(matches!(
            entries("reliability.kind"),
            Err(QosParseError::MalformedEntry(_))
        ));
        assert!(matches!(
            entries(".kind=reliable"),
            Err(QosParseError::MalformedEntry(_))
        ));
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(entry("250ms").duration().unwrap(), Duration::from_millis(250));
        assert_eq!(entry("3").duration().unwrap(), Duration::from_secs(3));
        assert_eq!(entry("3s").duration().unwrap(), Duration::from_secs(3));
        assert_eq!(entry("40us").duration().unwrap(), Duration::from_micros(40));
        assert_eq!(entry("7ns").duration().unwrap(), Duration::from_nanos(7));
        assert_eq!(entry("infinite").duration().unwrap(), Duration::MAX);
        assert_eq!(
            entry("DURATION_INFINITY").duration().unwrap(),
            Duration::MAX
        );
        assert!(entry("soon").duration().is_err());
        assert!(entry("-5ms").duration().is_err());
    }

    #[test]
    fn test_limit() {
        assert_eq!(entry("-1").limit().unwrap(), None);
        assert_eq!(entry("LENGTH_UNLIMITED").limit().unwrap(), None);
        assert_eq!(entry("64").limit().unwrap(), Some(64));
        assert!(entry("0").limit().is_err());
    }

    #[test]
    fn test_bool() {
        assert!(entry("TRUE").bool().unwrap());
        assert!(!entry("false").bool().unwrap());
        assert!(entry("yes").bool().is_err());
    }
}
