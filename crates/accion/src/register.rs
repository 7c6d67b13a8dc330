// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Handler registration.
//!
//! [`AddHandler::add_handler`] adds a route and some number of views
//! based on a handler manifest. When the route pattern embeds an action
//! placeholder (`{action}` or the legacy `:action`), every exposable
//! method of the handler becomes a view guarded by an
//! [`ActionPredicate`] for its resolved action name. Without a
//! placeholder the route is already action-specific: a single named
//! action (or the reserved default) is resolved and registered without
//! a predicate.
//!
//! Bringing the [`AddHandler`] trait into scope is what installs the
//! directive on a [`Configurator`]; [`includeme`] additionally records
//! it for host tooling that introspects installed extensions.

use crate::config::{Configurator, RouteOptions};
use crate::error::{ConfigError, Result};
use crate::exposure::ExposureRecord;
use crate::handler::{DecoratorRef, Handler, HandlerRef, DEFAULT_ACTION};
use crate::predicate::{ActionPredicate, ViewPredicate};
use crate::route::Route;
use crate::view::{ViewDecorator, ViewOptions, ViewRegistration};

/// Directive name under which the engine is attached to a configurator.
pub const ADD_HANDLER_DIRECTIVE: &str = "add_handler";

/// Options for [`AddHandler::add_handler`].
#[derive(Debug, Clone, Default)]
pub struct HandlerOptions {
    /// The single action to register. Mutually exclusive with an action
    /// placeholder in the route pattern.
    pub action: Option<String>,

    /// Default permission applied to every generated view unless a
    /// record overrides it.
    pub permission: Option<String>,

    /// Legacy alias for `permission`; takes precedence when both are
    /// set.
    pub view_permission: Option<String>,

    /// Extra options forwarded verbatim to route creation.
    pub route: RouteOptions,
}

impl HandlerOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit action.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the default view permission.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Sets the legacy view permission alias.
    pub fn with_view_permission(mut self, permission: impl Into<String>) -> Self {
        self.view_permission = Some(permission.into());
        self
    }

    /// Sets the route-creation options.
    pub fn with_route_options(mut self, route: RouteOptions) -> Self {
        self.route = route;
        self
    }

    /// The normalized default permission: the legacy alias wins over
    /// the plain field.
    fn default_permission(&self) -> Option<String> {
        self.view_permission
            .clone()
            .or_else(|| self.permission.clone())
    }
}

/// The handler-registration directive.
pub trait AddHandler {
    /// Adds a route and some number of views based on a handler
    /// manifest.
    ///
    /// `route_name` is the name of the route (to be used later in URL
    /// generation). `pattern` is the matching pattern, e.g.
    /// `/blog/{action}`; passing `None` reuses a previously created
    /// route of the same name. `handler` is a manifest, or the name of
    /// a manifest registered on the configurator.
    ///
    /// If `{action}` or `:action` is in the pattern, the exposable
    /// methods of the handler are used as views. If an explicit action
    /// is passed in the options, it is the sole method name used as a
    /// view; combining it with an action placeholder is a
    /// configuration error.
    ///
    /// Returns the resolved route.
    fn add_handler(
        &mut self,
        route_name: &str,
        pattern: Option<&str>,
        handler: impl Into<HandlerRef>,
        options: HandlerOptions,
    ) -> Result<Route>;
}

impl AddHandler for Configurator {
    fn add_handler(
        &mut self,
        route_name: &str,
        pattern: Option<&str>,
        handler: impl Into<HandlerRef>,
        options: HandlerOptions,
    ) -> Result<Route> {
        let route = match pattern {
            Some(pattern) => self.add_route(route_name, pattern, options.route.clone()),
            None => self
                .route(route_name)
                .cloned()
                .ok_or_else(|| ConfigError::RouteNotFound(route_name.to_string()))?,
        };

        let handler = resolve_handler(self, handler.into())?;
        let decorator = resolve_decorator(self, &handler)?;

        let placeholder = route.has_action_placeholder();
        if let Some(action) = options.action.as_deref() {
            if placeholder {
                return Err(ConfigError::ActionConflictsWithPattern {
                    action: action.to_string(),
                    pattern: route.pattern.clone(),
                });
            }
        }

        let defaults = ViewOptions {
            permission: options.default_permission(),
            ..Default::default()
        };

        if placeholder {
            scan_handler(self, &handler, &route.name, decorator.as_ref(), &defaults)?;
        } else {
            locate_view_by_name(
                self,
                &handler,
                &route.name,
                decorator.as_ref(),
                options.action.as_deref(),
                &defaults,
            )?;
        }

        Ok(route)
    }
}

/// Installs the handler-registration directive on a configurator.
///
/// Bringing [`AddHandler`] into scope already makes the directive
/// callable; this hook records it so host tooling can introspect the
/// installed extensions.
pub fn includeme(config: &mut Configurator) {
    config.add_directive(ADD_HANDLER_DIRECTIVE);
}

fn resolve_handler(config: &Configurator, handler: HandlerRef) -> Result<Handler> {
    match handler {
        HandlerRef::Manifest(handler) => Ok(handler),
        HandlerRef::Named(name) => config
            .handler(&name)
            .cloned()
            .ok_or(ConfigError::HandlerNotRegistered(name)),
    }
}

fn resolve_decorator(config: &Configurator, handler: &Handler) -> Result<Option<ViewDecorator>> {
    match handler.decorator() {
        None => Ok(None),
        Some(DecoratorRef::Hook(hook)) => Ok(Some(hook.clone())),
        Some(DecoratorRef::Named(name)) => config
            .decorator(name)
            .ok_or_else(|| ConfigError::DecoratorNotRegistered {
                handler: handler.name().to_string(),
                name: name.clone(),
            })
            .map(Some),
    }
}

/// Scans a handler for exposable views to register (placeholder mode).
///
/// Each method's exposure records drive one registration apiece; a
/// record-less method gets a single synthesized empty record when the
/// auto-expose rule matches its name. Every registration is guarded by
/// an action predicate for its resolved action name.
fn scan_handler(
    config: &mut Configurator,
    handler: &Handler,
    route_name: &str,
    decorator: Option<&ViewDecorator>,
    defaults: &ViewOptions,
) -> Result<()> {
    let transform = config.settings().name_transform()?;
    let autoexpose = handler.autoexpose().compile(handler.name())?;

    let synthesized = [ExposureRecord::new()];
    for method in handler.methods() {
        let records: &[ExposureRecord] = if method.exposures.is_empty() {
            match &autoexpose {
                Some(rule) if rule.is_match(&method.name) => &synthesized,
                _ => continue,
            }
        } else {
            &method.exposures
        };

        for record in records {
            // Stored records may be shared and inspected elsewhere;
            // merge from a copy.
            let record = record.clone();
            let action = match record.name.clone() {
                Some(name) => name,
                None => match &transform {
                    Some(transform) => transform(&method.name),
                    None => method.name.clone(),
                },
            };
            let mut predicates = record.predicates.clone();
            predicates.push(ViewPredicate::Action(ActionPredicate::new(&action)?));
            config.add_view(ViewRegistration {
                handler: handler.name().to_string(),
                attr: Some(method.name.clone()),
                route_name: route_name.to_string(),
                decorator: decorator.cloned(),
                predicates,
                options: ViewOptions::merged(defaults, &record),
            });
        }
    }
    Ok(())
}

/// Registers the views for a single named action (non-placeholder mode).
///
/// The target method name is the explicit action, or the reserved
/// default when none was given. Other methods may claim the action
/// through a record naming it; the target method itself registers once
/// per matching record, or once unconditionally when no record matched.
/// No action predicate is attached, since the route is already
/// action-specific.
fn locate_view_by_name(
    config: &mut Configurator,
    handler: &Handler,
    route_name: &str,
    decorator: Option<&ViewDecorator>,
    action: Option<&str>,
    defaults: &ViewOptions,
) -> Result<()> {
    let method_name = action.unwrap_or(DEFAULT_ACTION);

    // First pass: any other method carrying a record naming this action
    // claims it.
    for method in handler.methods() {
        if method.name == method_name {
            continue;
        }
        for record in &method.exposures {
            if record.name.as_deref() != Some(method_name) {
                continue;
            }
            let mut record = record.clone();
            // The claimed name is implied by the route.
            record.name = None;
            config.add_view(ViewRegistration {
                handler: handler.name().to_string(),
                attr: Some(method.name.clone()),
                route_name: route_name.to_string(),
                decorator: decorator.cloned(),
                predicates: record.predicates.clone(),
                options: ViewOptions::merged(defaults, &record),
            });
        }
    }

    // Second pass: the target method itself.
    let Some(method) = handler.find_method(method_name) else {
        return Ok(());
    };
    let mut registered = false;
    for record in &method.exposures {
        if record.name.is_some() && record.name.as_deref() != action {
            continue;
        }
        registered = true;
        let record = record.clone();
        config.add_view(ViewRegistration {
            handler: handler.name().to_string(),
            attr: action.map(str::to_string),
            route_name: route_name.to_string(),
            decorator: decorator.cloned(),
            predicates: record.predicates.clone(),
            options: ViewOptions::merged(defaults, &record),
        });
    }
    if !registered {
        config.add_view(ViewRegistration {
            handler: handler.name().to_string(),
            attr: action.map(str::to_string),
            route_name: route_name.to_string(),
            decorator: decorator.cloned(),
            predicates: Vec::new(),
            options: defaults.clone(),
        });
    }
    Ok(())
}
