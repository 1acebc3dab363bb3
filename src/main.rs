//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the MetaStream library and the Zellij
//! plugin API: it maps host events to library events, runs the returned
//! actions against the host, and renders.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`, needed for `web_request`
//! 3. **Subscribe**: Key, Mouse, `WebRequestResult`, `PermissionRequestResult`
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Record the pane size and call the library renderer
//!
//! # Event Mapping
//!
//! - `Key(Enter)` → `Event::Submit`
//! - `Key(Char)` → `Event::Char`, `Ctrl+u` → `Event::ClearQuery`
//! - `Key(Up/Down/PageUp/PageDown)` and mouse wheel → scrolling
//! - `Key(Esc)` → `Event::CloseFocus`
//! - `Mouse(LeftClick)` → `Event::Click`
//! - `WebRequestResult` → `Event::SearchResponse`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use metastream::client::RequestContext;
use metastream::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: metastream::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: metastream::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        metastream::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            endpoint = %config.endpoint,
            ignore_stale_responses = config.ignore_stale_responses,
            "parsed configuration"
        );
        self.app = metastream::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // Responses continue the trace of the submit that issued them.
        let _parent = Self::attach_request_trace(&event);

        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => Self::map_key_event(key),
            zellij_tile::prelude::Event::Mouse(mouse) => Self::map_mouse_event(mouse),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_request_result(status, body, &context)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                if !granted {
                    tracing::warn!("web access denied - searches will fail");
                }
                Some(Event::PermissionsResult { granted })
            }
            _ => None,
        };

        let Some(our_event) = our_event else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = (rows, cols);
        metastream::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('u') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ClearQuery);
        }
        if !key.key_modifiers.is_empty() && !key.has_modifiers(&[KeyModifier::Shift]) {
            return None;
        }

        Some(match key.bare_key {
            BareKey::Enter => Event::Submit,
            BareKey::Backspace => Event::Backspace,
            BareKey::Esc => Event::CloseFocus,
            BareKey::Up => Event::ScrollUp,
            BareKey::Down => Event::ScrollDown,
            BareKey::PageUp => Event::PageUp,
            BareKey::PageDown => Event::PageDown,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => Some(Event::Click { line, col }),
            Mouse::ScrollUp(_) => Some(Event::ScrollUp),
            Mouse::ScrollDown(_) => Some(Event::ScrollDown),
            _ => None,
        }
    }

    fn map_web_request_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request) = RequestContext::from_map(context) else {
            tracing::debug!(status = status, "ignoring web request result without search context");
            return None;
        };

        tracing::debug!(
            status = status,
            body_len = body.len(),
            generation = request.generation,
            "search response received"
        );

        Some(Event::SearchResponse {
            status,
            body,
            generation: request.generation,
        })
    }

    /// Makes the issuing request's span the remote parent of spans opened
    /// while handling its response.
    fn attach_request_trace(event: &zellij_tile::prelude::Event) -> Option<opentelemetry::ContextGuard> {
        let zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) = event else {
            return None;
        };
        RequestContext::from_map(context)?.trace_context?.attach()
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => {
                tracing::debug!(url = %request.url, generation = request.generation(), "sending web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context.to_map(),
                );
            }
        }
    }
}
