// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request-time predicates guarding registered views.
//!
//! An [`ActionPredicate`] compares the `action` value captured from the
//! URL against an expected action name. Two predicates built from the
//! same action string compare equal and hash identically, so the
//! configurator's conflict detection treats functionally identical
//! predicates as the same discriminator even when separately
//! instantiated.

use crate::error::{ConfigError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// URL-derived key/value mapping handed to predicates at request time.
pub type MatchParams = HashMap<String, String>;

/// Key in the match params that carries the captured action name.
pub const ACTION_KEY: &str = "action";

/// Matches a captured action value against an expected action name.
///
/// The expected name may itself be a regular expression; it is compiled
/// with an appended `$` anchor and must match the candidate value from
/// its start through its end (full-string semantics, not substring
/// search).
#[derive(Debug, Clone)]
pub struct ActionPredicate {
    action: String,
    pattern: Regex,
}

impl ActionPredicate {
    /// Compiles a predicate from an expected action name.
    ///
    /// Fails if the action is not a valid pattern source; the compiler's
    /// error text becomes the [`ConfigError`] payload.
    pub fn new(action: impl Into<String>) -> Result<Self> {
        let action = action.into();
        let pattern =
            Regex::new(&format!("{}$", action)).map_err(|e| ConfigError::InvalidActionPattern {
                action: action.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { action, pattern })
    }

    /// The action string this predicate was built from.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Tests a request's match params against the expected action.
    ///
    /// Returns false when the params are absent, when they carry no
    /// `action` key, and when the value does not match from position 0.
    pub fn matches(&self, params: Option<&MatchParams>) -> bool {
        let Some(params) = params else {
            return false;
        };
        let Some(action) = params.get(ACTION_KEY) else {
            return false;
        };
        // The appended "$" anchors the end; requiring the match to begin
        // at position 0 anchors the start.
        self.pattern
            .find(action)
            .is_some_and(|m| m.start() == 0)
    }
}

impl PartialEq for ActionPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action
    }
}

impl Eq for ActionPredicate {}

impl Hash for ActionPredicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.action.hash(state);
    }
}

/// A caller-supplied predicate carried through to the view registration.
///
/// The test closure is opaque to the configurator; the identity text is
/// what participates in conflict detection, so two custom predicates
/// with the same text count as the same discriminator.
#[derive(Clone)]
pub struct CustomPredicate {
    text: String,
    test: Arc<dyn Fn(Option<&MatchParams>) -> bool + Send + Sync>,
}

impl CustomPredicate {
    /// Creates a predicate from an identity text and a test closure.
    pub fn new(
        text: impl Into<String>,
        test: impl Fn(Option<&MatchParams>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            text: text.into(),
            test: Arc::new(test),
        }
    }

    /// The identity text used for conflict detection.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Runs the test closure.
    pub fn matches(&self, params: Option<&MatchParams>) -> bool {
        (self.test)(params)
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomPredicate").field(&self.text).finish()
    }
}

impl PartialEq for CustomPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CustomPredicate {}

impl Hash for CustomPredicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

/// A predicate attached to a view registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewPredicate {
    /// An action predicate generated by the registration engine.
    Action(ActionPredicate),

    /// A caller-supplied predicate from an exposure record.
    Custom(CustomPredicate),
}

impl ViewPredicate {
    /// Tests the predicate against a request's match params.
    pub fn matches(&self, params: Option<&MatchParams>) -> bool {
        match self {
            ViewPredicate::Action(p) => p.matches(params),
            ViewPredicate::Custom(p) => p.matches(params),
        }
    }

    /// Identity text used as the conflict-detection discriminator.
    pub fn text(&self) -> String {
        match self {
            ViewPredicate::Action(p) => format!("action = {}", p.action()),
            ViewPredicate::Custom(p) => format!("custom = {}", p.text()),
        }
    }
}
