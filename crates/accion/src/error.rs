// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for handler registration.
//!
//! All failures surface as a single [`ConfigError`] kind, raised
//! synchronously at registration time. A configuration error indicates a
//! programming or configuration defect, never a transient condition, so
//! there is no retry surface: callers are expected to abort startup.

use thiserror::Error;

/// The error type for all registration-time failures.
///
/// Each variant carries enough context to point at the offending route,
/// handler, or pattern in its message.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A pattern was omitted but no route of the given name exists yet.
    #[error("no route named '{0}' exists and no pattern was given")]
    RouteNotFound(String),

    /// An explicit action was combined with an action placeholder pattern.
    #[error("action '{action}' disallowed when an action placeholder is in the route pattern '{pattern}'")]
    ActionConflictsWithPattern {
        /// The explicit action that was requested.
        action: String,
        /// The route pattern containing the placeholder.
        pattern: String,
    },

    /// A handler was referenced by name but never registered.
    #[error("no handler named '{0}' is registered")]
    HandlerNotRegistered(String),

    /// A handler references a view decorator that is not registered.
    #[error("handler '{handler}' references unknown view decorator '{name}'")]
    DecoratorNotRegistered {
        /// The handler carrying the reference.
        handler: String,
        /// The unresolved decorator name.
        name: String,
    },

    /// The handler's auto-expose rule is not a valid regular expression.
    #[error("invalid auto-expose rule on handler '{handler}': {message}")]
    InvalidAutoExpose {
        /// The handler carrying the rule.
        handler: String,
        /// The regex compiler's error text.
        message: String,
    },

    /// An action name could not be compiled into a matching pattern.
    #[error("invalid action pattern '{action}': {message}")]
    InvalidActionPattern {
        /// The action string handed to the predicate.
        action: String,
        /// The regex compiler's error text.
        message: String,
    },

    /// A process-wide setting has the wrong shape for its key.
    #[error("invalid setting '{key}': {message}")]
    InvalidSetting {
        /// The settings key.
        key: String,
        /// What was expected under the key.
        message: String,
    },

    /// Two view registrations produced the same discriminator.
    #[error("conflicting view registrations for route '{route_name}': {discriminator}")]
    ViewConflict {
        /// The route both views were registered against.
        route_name: String,
        /// The shared discriminator.
        discriminator: String,
    },
}

/// Convenience type alias for Results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
