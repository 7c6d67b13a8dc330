// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The configurator surface the registration engine writes into.
//!
//! [`Configurator`] models the host framework's configuration object in
//! miniature: a named route table backed by a URL matcher, a pending
//! list of view registrations, a process-wide settings map, and by-name
//! registries for handlers and decorators. It collects registrations;
//! it does not dispatch requests. Conflicts between registrations are
//! detected at [`Configurator::commit`], not at submission time.

use crate::error::{ConfigError, Result};
use crate::handler::Handler;
use crate::predicate::MatchParams;
use crate::route::Route;
use crate::view::{ViewDecorator, ViewRegistration};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Settings key under which the method-name transform is registered.
///
/// The transform is consulted only in auto-expose mode, turning a
/// resolved method name into the final URL action name (e.g.
/// upper-casing). Absent by default.
pub const METHOD_NAME_TRANSFORM: &str = "accion.method_name_transform";

/// Transforms a resolved method name into the final URL action name.
pub type NameTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A process-wide setting value.
#[derive(Clone)]
pub enum SettingValue {
    /// A plain text setting.
    Text(String),

    /// A callable name transform.
    Transform(NameTransform),
}

impl fmt::Debug for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(text) => f.debug_tuple("SettingValue::Text").field(text).finish(),
            SettingValue::Transform(_) => f.write_str("SettingValue::Transform(..)"),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(text: &str) -> Self {
        SettingValue::Text(text.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(text: String) -> Self {
        SettingValue::Text(text)
    }
}

/// String-keyed process-wide settings.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    entries: HashMap<String, SettingValue>,
}

impl Settings {
    /// Creates an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a setting, replacing any previous value under the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Looks up a setting by key.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    /// Registers the method-name transform under its fixed key.
    pub fn set_name_transform(
        &mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) {
        self.entries.insert(
            METHOD_NAME_TRANSFORM.to_string(),
            SettingValue::Transform(Arc::new(transform)),
        );
    }

    /// Resolves the method-name transform, if one is registered.
    ///
    /// A non-callable value under the transform key fails with
    /// [`ConfigError::InvalidSetting`].
    pub(crate) fn name_transform(&self) -> Result<Option<NameTransform>> {
        match self.entries.get(METHOD_NAME_TRANSFORM) {
            None => Ok(None),
            Some(SettingValue::Transform(transform)) => Ok(Some(transform.clone())),
            Some(SettingValue::Text(_)) => Err(ConfigError::InvalidSetting {
                key: METHOD_NAME_TRANSFORM.to_string(),
                message: "expected a callable name transform".to_string(),
            }),
        }
    }
}

/// Extra options forwarded verbatim to route creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Root factory for the route, referenced by name.
    pub factory: Option<String>,

    /// Arbitrary passthrough configuration (predicates, request
    /// methods, and whatever else the host framework understands).
    pub extras: BTreeMap<String, Value>,
}

impl RouteOptions {
    /// Creates empty route options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root factory reference.
    pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = Some(factory.into());
        self
    }

    /// Adds a passthrough value.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }
}

/// The host framework's configuration object in miniature.
///
/// # Example
///
/// ```rust
/// use accion::{AddHandler, Configurator, Handler, HandlerOptions};
///
/// let mut config = Configurator::new();
/// let handler = Handler::new("BlogHandler").method("index").method("archive");
/// config
///     .add_handler("blog", Some("/blog/{action}"), handler, HandlerOptions::default())
///     .unwrap();
/// assert_eq!(config.views().len(), 2);
/// config.commit().unwrap();
/// ```
pub struct Configurator {
    routes: HashMap<String, Route>,
    route_options: HashMap<String, RouteOptions>,
    matcher: matchit::Router<String>,
    views: Vec<ViewRegistration>,
    handlers: HashMap<String, Handler>,
    decorators: HashMap<String, ViewDecorator>,
    settings: Settings,
    directives: BTreeSet<String>,
}

impl Configurator {
    /// Creates an empty configurator.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            route_options: HashMap::new(),
            matcher: matchit::Router::new(),
            views: Vec::new(),
            handlers: HashMap::new(),
            decorators: HashMap::new(),
            settings: Settings::new(),
            directives: BTreeSet::new(),
        }
    }

    /// Creates a route and stores it under its name.
    ///
    /// The caller's pattern is kept verbatim on the route; the
    /// normalized form is inserted into the URL matcher. A pattern the
    /// matcher rejects is logged and skipped, not fatal; the route
    /// itself still registers.
    pub fn add_route(&mut self, name: &str, pattern: &str, options: RouteOptions) -> Route {
        let route = Route::new(name, pattern);
        if let Err(e) = self.matcher.insert(&route.normalized, name.to_string()) {
            tracing::warn!("Could not register route {}: {}", route.pattern, e);
        }
        self.routes.insert(name.to_string(), route.clone());
        self.route_options.insert(name.to_string(), options);
        route
    }

    /// Looks up a previously created route by name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// The options a route was created with.
    pub fn route_options(&self, name: &str) -> Option<&RouteOptions> {
        self.route_options.get(name)
    }

    /// Number of routes created so far.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Submits a view registration to the pending list.
    ///
    /// Submission always succeeds; duplicate discriminators surface at
    /// [`Configurator::commit`].
    pub fn add_view(&mut self, view: ViewRegistration) {
        tracing::debug!(
            route = %view.route_name,
            handler = %view.handler,
            attr = ?view.attr,
            "registering view"
        );
        self.views.push(view);
    }

    /// The pending view registrations, in submission order.
    pub fn views(&self) -> &[ViewRegistration] {
        &self.views
    }

    /// Matches a URL path against the registered routes.
    ///
    /// Returns the route name and the captured match params. This is a
    /// match simulation for predicate evaluation, not a dispatcher.
    pub fn match_path(&self, path: &str) -> Option<(String, MatchParams)> {
        let normalized_path = if path.is_empty() || path == "/" {
            "/"
        } else {
            path.trim_end_matches('/')
        };

        match self.matcher.at(normalized_path) {
            Ok(matched) => {
                let params: MatchParams = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                Some((matched.value.clone(), params))
            }
            Err(_) => None,
        }
    }

    /// Registers a handler manifest for by-name resolution.
    pub fn register_handler(&mut self, handler: Handler) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Looks up a registered handler manifest.
    pub fn handler(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    /// Registers a view decorator for by-name resolution.
    pub fn register_decorator(&mut self, name: impl Into<String>, hook: ViewDecorator) {
        self.decorators.insert(name.into(), hook);
    }

    /// Looks up a registered view decorator.
    pub fn decorator(&self, name: &str) -> Option<ViewDecorator> {
        self.decorators.get(name).cloned()
    }

    /// The process-wide settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the process-wide settings.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Records an installed directive.
    pub fn add_directive(&mut self, name: impl Into<String>) {
        self.directives.insert(name.into());
    }

    /// The installed directives.
    pub fn directives(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().map(String::as_str)
    }

    /// Validates the pending registrations.
    ///
    /// Two views with equal discriminators (same route, same predicate
    /// identities) are a configuration conflict; the first duplicate
    /// aborts the commit.
    pub fn commit(&self) -> Result<()> {
        let mut seen: HashSet<String> = HashSet::new();
        for view in &self.views {
            let discriminator = view.discriminator();
            if !seen.insert(discriminator.clone()) {
                return Err(ConfigError::ViewConflict {
                    route_name: view.route_name.clone(),
                    discriminator,
                });
            }
        }
        Ok(())
    }
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ACTION_KEY;
    use crate::view::ViewOptions;

    fn dummy_view(route_name: &str) -> ViewRegistration {
        ViewRegistration {
            handler: "H".to_string(),
            attr: None,
            route_name: route_name.to_string(),
            decorator: None,
            predicates: Vec::new(),
            options: ViewOptions::default(),
        }
    }

    #[test]
    fn test_add_route_stores_caller_pattern() {
        let mut config = Configurator::new();
        let route = config.add_route("blog", "/blog/:action", RouteOptions::new());
        assert_eq!(route.pattern, "/blog/:action");
        assert_eq!(config.route("blog").unwrap().pattern, "/blog/:action");
    }

    #[test]
    fn test_match_path_captures_params() {
        let mut config = Configurator::new();
        config.add_route("blog", "/blog/{action}", RouteOptions::new());
        let (name, params) = config.match_path("/blog/index").unwrap();
        assert_eq!(name, "blog");
        assert_eq!(params.get(ACTION_KEY).map(String::as_str), Some("index"));
    }

    #[test]
    fn test_match_path_normalizes_trailing_slash() {
        let mut config = Configurator::new();
        config.add_route("blog", "/blog/{action}", RouteOptions::new());
        assert!(config.match_path("/blog/index/").is_some());
        assert!(config.match_path("/nope").is_none());
    }

    #[test]
    fn test_commit_detects_duplicate_discriminators() {
        let mut config = Configurator::new();
        config.add_view(dummy_view("h1"));
        config.add_view(dummy_view("h1"));
        let err = config.commit().unwrap_err();
        assert!(matches!(err, ConfigError::ViewConflict { .. }));
    }

    #[test]
    fn test_commit_passes_distinct_routes() {
        let mut config = Configurator::new();
        config.add_view(dummy_view("h1"));
        config.add_view(dummy_view("h2"));
        config.commit().unwrap();
    }

    #[test]
    fn test_name_transform_requires_callable() {
        let mut settings = Settings::new();
        settings.insert(METHOD_NAME_TRANSFORM, "dotted.name");
        let err = match settings.name_transform() {
            Err(err) => err,
            Ok(_) => panic!("expected name_transform to fail"),
        };
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));
    }

    #[test]
    fn test_name_transform_roundtrip() {
        let mut settings = Settings::new();
        settings.set_name_transform(|name| name.to_uppercase());
        let transform = settings.name_transform().unwrap().unwrap();
        assert_eq!(transform("index"), "INDEX");
    }

    #[test]
    fn test_route_options_stored() {
        let mut config = Configurator::new();
        let options = RouteOptions::new().with_factory("app.root_factory");
        config.add_route("blog", "/blog", options.clone());
        assert_eq!(config.route_options("blog"), Some(&options));
    }
}
