//! Path and method matching for policy rules

use super::table::PolicyError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `:name` or `{name}`, matches one non-empty segment
    Param,
    /// Trailing `*`, matches any remainder
    Wildcard,
}

/// Compiled path pattern
///
/// Supports literal segments, single-segment parameters written `:id` or
/// `{id}`, and a trailing `*`. `/v1/template/*` matches `/v1/template/` and
/// `/v1/template/7/history` but not `/v1/template`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, PolicyError> {
        let raw = raw.trim();
        if raw != "*" && !raw.starts_with('/') {
            return Err(PolicyError::invalid(format!(
                "path pattern must start with '/': {}",
                raw
            )));
        }

        let parts: Vec<&str> = raw.split('/').collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if i != last {
                    return Err(PolicyError::invalid(format!(
                        "'*' is only allowed as the last segment: {}",
                        raw
                    )));
                }
                Segment::Wildcard
            } else if part.starts_with(':') && part.len() > 1 {
                Segment::Param
            } else if part.starts_with('{') && part.ends_with('}') && part.len() > 2 {
                Segment::Param
            } else {
                Segment::Literal(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => return parts.len() > i,
                Segment::Param => match parts.get(i) {
                    Some(part) if !part.is_empty() => {}
                    _ => return false,
                },
                Segment::Literal(literal) => match parts.get(i) {
                    Some(part) if part == literal => {}
                    _ => return false,
                },
            }
        }
        parts.len() == self.segments.len()
    }
}

/// HTTP method side of a rule: `*`, a single method, or `(GET)|(POST)` alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatcher {
    Any,
    OneOf(Vec<String>),
}

impl MethodMatcher {
    pub fn parse(raw: &str) -> Result<Self, PolicyError> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(MethodMatcher::Any);
        }
        let methods: Vec<String> = raw
            .split('|')
            .map(|m| m.trim().trim_start_matches('(').trim_end_matches(')').trim())
            .map(|m| m.to_ascii_uppercase())
            .collect();
        if methods.iter().any(|m| m.is_empty() || !m.bytes().all(|b| b.is_ascii_alphabetic())) {
            return Err(PolicyError::invalid(format!("invalid method: {}", raw)));
        }
        Ok(MethodMatcher::OneOf(methods))
    }

    pub fn matches(&self, method: &str) -> bool {
        match self {
            MethodMatcher::Any => true,
            MethodMatcher::OneOf(methods) => methods.iter().any(|m| m.eq_ignore_ascii_case(method)),
        }
    }
}
