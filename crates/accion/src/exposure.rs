// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Per-method exposure metadata.
//!
//! An [`ExposureRecord`] marks one handler method as a candidate
//! endpoint, with optional configuration overrides. Records accumulate
//! on the handler manifest in application order (see
//! [`Handler::expose`](crate::Handler::expose)) and are never mutated
//! once stored: the registration engine works on copies.

use crate::predicate::ViewPredicate;
use serde_json::Value;
use std::collections::BTreeMap;

/// Configuration overrides explicitly associated with one handler method.
///
/// Every field is optional; an empty record simply exposes the method
/// under its own name with the handler-level defaults.
///
/// # Example
///
/// ```rust
/// use accion::ExposureRecord;
///
/// let record = ExposureRecord::new()
///     .with_name("index")
///     .with_permission("view")
///     .with_renderer("json");
/// assert_eq!(record.name.as_deref(), Some("index"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureRecord {
    /// Alternate action name. When absent, the method's own name is
    /// used (passed through the optional process-wide name transform in
    /// auto-expose mode). The value may itself be a regular expression.
    pub name: Option<String>,

    /// Permission required by views generated from this record.
    /// Overrides the handler-level default permission.
    pub permission: Option<String>,

    /// Renderer for views generated from this record.
    pub renderer: Option<String>,

    /// Caller-supplied predicates. The registration engine appends the
    /// generated action predicate after these.
    pub predicates: Vec<ViewPredicate>,

    /// Arbitrary passthrough configuration forwarded to the view
    /// registration.
    pub extras: BTreeMap<String, Value>,
}

impl ExposureRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an alternate action name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the permission override.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Sets the renderer.
    pub fn with_renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// Appends a caller-supplied predicate.
    pub fn with_predicate(mut self, predicate: ViewPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds a passthrough configuration value.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }
}
