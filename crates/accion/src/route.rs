// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route patterns and the action placeholder.
//!
//! A route binds a name to a URL pattern. Patterns accept two parameter
//! syntaxes: the brace form (`/blog/{action}`) and the legacy colon form
//! (`/blog/:action`). The colon form is normalized to the brace form
//! before the pattern reaches the URL matcher, so both register
//! identically.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Matches an action placeholder in either syntax, anywhere in a pattern.
    static ref ACTION_PLACEHOLDER_RE: Regex =
        Regex::new(r"\{action\}|:action").unwrap();
}

/// Returns true if the pattern embeds an action placeholder.
///
/// Either recognized syntax counts: the named-capture form `{action}` or
/// the colon-prefixed short form `:action`.
pub fn has_action_placeholder(pattern: &str) -> bool {
    ACTION_PLACEHOLDER_RE.is_match(pattern)
}

/// Segment type in a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Static segment (e.g., "blog")
    Static(String),

    /// Dynamic parameter (e.g., "{action}" or legacy ":action")
    Param(String),
}

impl Segment {
    /// Parse one pattern segment into a Segment.
    pub fn parse(segment: &str) -> Self {
        if segment.starts_with('{') && segment.ends_with('}') {
            let name = segment[1..segment.len() - 1].to_string();
            Segment::Param(name)
        } else if let Some(name) = segment.strip_prefix(':') {
            // Legacy colon form
            Segment::Param(name.to_string())
        } else {
            Segment::Static(segment.to_string())
        }
    }

    /// Convert to the matcher's pattern segment.
    /// The matcher uses `{param}` for dynamic segments.
    pub fn to_pattern(&self) -> String {
        match self {
            Segment::Static(s) => s.clone(),
            Segment::Param(name) => format!("{{{}}}", name),
        }
    }
}

/// Rewrites a caller-supplied pattern into the matcher's brace form.
///
/// Static segments and empty segments (leading/trailing slashes) pass
/// through unchanged.
pub fn normalize_pattern(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| {
            if segment.is_empty() {
                String::new()
            } else {
                Segment::parse(segment).to_pattern()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// A named route.
///
/// The route keeps the pattern exactly as the caller supplied it; the
/// normalized form is what gets inserted into the URL matcher. Reusing a
/// route by name (registering with the pattern omitted) hands back the
/// stored pattern unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// The route name, used later in URL generation and view lookup.
    pub name: String,

    /// The URL pattern as supplied by the caller (e.g., "/blog/:action").
    pub pattern: String,

    /// The pattern in the matcher's brace form (e.g., "/blog/{action}").
    pub normalized: String,
}

impl Route {
    /// Creates a route, normalizing the pattern for the matcher.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let normalized = normalize_pattern(&pattern);
        Self {
            name: name.into(),
            pattern,
            normalized,
        }
    }

    /// Returns true if this route's pattern embeds an action placeholder.
    pub fn has_action_placeholder(&self) -> bool {
        has_action_placeholder(&self.pattern)
    }
}
