// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Handler manifests.
//!
//! A [`Handler`] is an explicit registration manifest: the caller lists
//! the methods that are candidate endpoints, attaches exposure records
//! to them, and sets the handler-level conventions (auto-expose rule,
//! view decorator). The manifest replaces runtime reflection: what the
//! caller declares is exactly what the registration engine enumerates,
//! in declaration order.

use crate::error::{ConfigError, Result};
use crate::exposure::ExposureRecord;
use crate::view::ViewDecorator;
use regex::Regex;
use std::fmt;

/// Reserved method name used when no explicit action is requested.
pub const DEFAULT_ACTION: &str = "call";

/// Default auto-expose rule: one or more ASCII letters.
pub const DEFAULT_AUTOEXPOSE: &str = "[A-Za-z]+";

/// The auto-expose rule deciding which record-less methods are exposed
/// in placeholder mode.
///
/// The rule is matched against the method name anchored at its start.
/// Methods carrying exposure records are always considered, whatever
/// the rule says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AutoExpose {
    /// Expose methods matching [`DEFAULT_AUTOEXPOSE`].
    #[default]
    Default,

    /// Expose methods matching a custom pattern.
    Pattern(String),

    /// Never synthesize exposures; only methods with records register.
    Disabled,
}

impl AutoExpose {
    /// Compiles the rule into a start-anchored matcher.
    ///
    /// Returns `None` when the rule is disabled; fails with
    /// [`ConfigError::InvalidAutoExpose`] when the pattern does not
    /// compile.
    pub(crate) fn compile(&self, handler: &str) -> Result<Option<Regex>> {
        let source = match self {
            AutoExpose::Default => DEFAULT_AUTOEXPOSE,
            AutoExpose::Pattern(pattern) => pattern.as_str(),
            AutoExpose::Disabled => return Ok(None),
        };
        Regex::new(&format!("^(?:{})", source))
            .map(Some)
            .map_err(|e| ConfigError::InvalidAutoExpose {
                handler: handler.to_string(),
                message: e.to_string(),
            })
    }
}

/// Reference to the view decorator applied around every view generated
/// for a handler.
#[derive(Clone)]
pub enum DecoratorRef {
    /// A decorator hook supplied directly on the manifest.
    Hook(ViewDecorator),

    /// A decorator resolved by name from the configurator's decorator
    /// registry at registration time.
    Named(String),
}

impl fmt::Debug for DecoratorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoratorRef::Hook(_) => f.write_str("DecoratorRef::Hook(..)"),
            DecoratorRef::Named(name) => f.debug_tuple("DecoratorRef::Named").field(name).finish(),
        }
    }
}

/// One method entry in a handler manifest.
#[derive(Debug, Clone)]
pub struct Method {
    /// The method name; doubles as the default action name.
    pub name: String,

    /// Exposure records accumulated on this method, in application
    /// order.
    pub exposures: Vec<ExposureRecord>,
}

/// An explicit handler manifest.
///
/// # Example
///
/// ```rust
/// use accion::{ExposureRecord, Handler};
///
/// let handler = Handler::new("BlogHandler")
///     .method("index")
///     .method("create")
///     .expose("create", ExposureRecord::new().with_renderer("json"));
/// assert_eq!(handler.methods().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Handler {
    name: String,
    methods: Vec<Method>,
    autoexpose: AutoExpose,
    decorator: Option<DecoratorRef>,
}

impl Handler {
    /// Creates an empty manifest under the given handler name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            autoexpose: AutoExpose::Default,
            decorator: None,
        }
    }

    /// The handler name, used for registry lookup and view attribution.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a method with no exposure records.
    ///
    /// Declaring the same name twice is a no-op.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.find_method(&name).is_none() {
            self.methods.push(Method {
                name,
                exposures: Vec::new(),
            });
        }
        self
    }

    /// Appends an exposure record to a method, declaring the method on
    /// first use.
    ///
    /// Multiple applications accumulate in application order; prior
    /// records are never replaced.
    pub fn expose(mut self, method: impl Into<String>, record: ExposureRecord) -> Self {
        let name = method.into();
        match self.methods.iter().position(|m| m.name == name) {
            Some(index) => self.methods[index].exposures.push(record),
            None => self.methods.push(Method {
                name,
                exposures: vec![record],
            }),
        }
        self
    }

    /// Replaces the default auto-expose rule with a custom pattern.
    pub fn with_autoexpose(mut self, pattern: impl Into<String>) -> Self {
        self.autoexpose = AutoExpose::Pattern(pattern.into());
        self
    }

    /// Disables auto-expose entirely; only methods carrying exposure
    /// records register in placeholder mode.
    pub fn without_autoexpose(mut self) -> Self {
        self.autoexpose = AutoExpose::Disabled;
        self
    }

    /// Attaches a decorator hook applied around every generated view.
    pub fn with_decorator(mut self, hook: ViewDecorator) -> Self {
        self.decorator = Some(DecoratorRef::Hook(hook));
        self
    }

    /// References a decorator registered on the configurator by name.
    pub fn with_decorator_named(mut self, name: impl Into<String>) -> Self {
        self.decorator = Some(DecoratorRef::Named(name.into()));
        self
    }

    /// The declared methods, in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Looks up a declared method by name.
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// The handler's auto-expose rule.
    pub fn autoexpose(&self) -> &AutoExpose {
        &self.autoexpose
    }

    /// The handler's decorator reference, if any.
    pub fn decorator(&self) -> Option<&DecoratorRef> {
        self.decorator.as_ref()
    }
}

/// A handler argument to the registration engine: either a manifest
/// supplied directly, or a name resolved through the configurator's
/// handler registry.
#[derive(Debug, Clone)]
pub enum HandlerRef {
    /// A manifest supplied inline.
    Manifest(Handler),

    /// A registry lookup by handler name.
    Named(String),
}

impl From<Handler> for HandlerRef {
    fn from(handler: Handler) -> Self {
        HandlerRef::Manifest(handler)
    }
}

impl From<&str> for HandlerRef {
    fn from(name: &str) -> Self {
        HandlerRef::Named(name.to_string())
    }
}

impl From<String> for HandlerRef {
    fn from(name: String) -> Self {
        HandlerRef::Named(name)
    }
}
