//! Template engine wrapper and built-in helper functions.

use minijinja::{AutoEscape, Environment, ErrorKind, State, Value};

use crate::error::TemplateError;
use crate::link::relative_path;

/// Registry key for a component's view template.
///
/// View templates share the engine namespace with layouts and partials;
/// the prefix keeps a component id from shadowing a partial of the same name.
#[must_use]
pub fn view_key(component_id: &str) -> String {
    format!("view:{component_id}")
}

/// Template engine for a single styleguide build.
///
/// Wraps a `minijinja` environment holding every registered template:
/// built-in layouts, component views and user partials. The engine is
/// created once per build and passed down through the pipeline explicitly;
/// nothing in this crate keeps global state.
///
/// Auto-escaping is disabled because context values are pre-rendered HTML
/// fragments. Templates opt into escaping with the `escape` filter where
/// they interpolate raw text.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with the pb helper functions installed.
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_function("eq", eq);
        env.add_function("pp", pp);
        env.add_function("rellink", rellink);
        Self { env }
    }

    /// Register a template under `name`, replacing any previous registration.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] if the source fails to parse.
    pub fn register(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.env
            .add_template_owned(name.to_owned(), source.to_owned())
            .map_err(|source| TemplateError::Compile {
                name: name.to_owned(),
                source,
            })
    }

    /// Render the template registered under `name` with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownTemplate`] if nothing is registered
    /// under `name`, or [`TemplateError::Render`] if rendering fails.
    pub fn render(
        &self,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|err| {
            if matches!(err.kind(), ErrorKind::TemplateNotFound) {
                TemplateError::UnknownTemplate(name.to_owned())
            } else {
                TemplateError::Render {
                    name: name.to_owned(),
                    source: err,
                }
            }
        })?;
        template
            .render(context)
            .map_err(|source| TemplateError::Render {
                name: name.to_owned(),
                source,
            })
    }

    /// Whether a template is registered under `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// `eq(a, b)` helper. True when both values compare equal.
fn eq(a: &Value, b: &Value) -> bool {
    a == b
}

/// `pp(value)` helper. JSON-stringify of an arbitrary context value.
fn pp(value: &Value) -> Result<String, minijinja::Error> {
    serde_json::to_string(value)
        .map_err(|err| minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string()))
}

/// `rellink(link)` helper.
///
/// Resolves a site-rooted link against the current page's location, which
/// the page writer provides as `page_link` in the render context. Links
/// that are already relative, and renders without a usable `page_link`,
/// pass through unchanged.
fn rellink(state: &State, link: &str) -> String {
    if !link.starts_with('/') {
        return link.to_owned();
    }
    let page = state.lookup("page_link").filter(|v| !v.is_undefined());
    let Some(page) = page else {
        tracing::debug!(link, "rellink used without page_link in context");
        return link.to_owned();
    };
    match page.as_str() {
        Some(from) => relative_path(from, link),
        None => {
            tracing::debug!(link, "page_link in context is not a string");
            link.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_register_and_render() {
        let mut engine = TemplateEngine::new();
        engine.register("greeting", "Hello {{ name }}!").unwrap();

        let html = engine.render("greeting", &json!({ "name": "pb" })).unwrap();

        assert_eq!(html, "Hello pb!");
    }

    #[test]
    fn test_register_replaces_previous() {
        let mut engine = TemplateEngine::new();
        engine.register("t", "first").unwrap();
        engine.register("t", "second").unwrap();

        assert_eq!(engine.render("t", &json!({})).unwrap(), "second");
    }

    #[test]
    fn test_register_invalid_syntax_fails() {
        let mut engine = TemplateEngine::new();

        let err = engine.register("bad", "{% if %}").unwrap_err();

        assert!(matches!(err, TemplateError::Compile { .. }));
    }

    #[test]
    fn test_render_unknown_template() {
        let engine = TemplateEngine::new();

        let err = engine.render("missing", &json!({})).unwrap_err();

        assert!(matches!(err, TemplateError::UnknownTemplate(name) if name == "missing"));
    }

    #[test]
    fn test_has_reflects_registration() {
        let mut engine = TemplateEngine::new();

        assert!(!engine.has("view:acme.button"));
        engine.register("view:acme.button", "<button/>").unwrap();
        assert!(engine.has("view:acme.button"));
    }

    #[test]
    fn test_no_auto_escaping_of_fragments() {
        let mut engine = TemplateEngine::new();
        engine.register("t", "{{ content }}").unwrap();

        let html = engine
            .render("t", &json!({ "content": "<p>raw</p>" }))
            .unwrap();

        assert_eq!(html, "<p>raw</p>");
    }

    #[test]
    fn test_escape_filter_still_available() {
        let mut engine = TemplateEngine::new();
        engine.register("t", "{{ label | escape }}").unwrap();

        let html = engine.render("t", &json!({ "label": "<b>" })).unwrap();

        assert_eq!(html, "&lt;b&gt;");
    }

    #[test]
    fn test_include_renders_partial() {
        let mut engine = TemplateEngine::new();
        engine.register("icon", "<i></i>").unwrap();
        engine
            .register("view:btn", "<button>{% include \"icon\" %}</button>")
            .unwrap();

        let html = engine.render("view:btn", &json!({})).unwrap();

        assert_eq!(html, "<button><i></i></button>");
    }

    #[test]
    fn test_eq_helper() {
        let mut engine = TemplateEngine::new();
        engine
            .register("t", "{% if eq(a, b) %}same{% else %}different{% endif %}")
            .unwrap();

        assert_eq!(
            engine.render("t", &json!({ "a": 1, "b": 1 })).unwrap(),
            "same"
        );
        assert_eq!(
            engine.render("t", &json!({ "a": 1, "b": 2 })).unwrap(),
            "different"
        );
    }

    #[test]
    fn test_pp_helper_stringifies() {
        let mut engine = TemplateEngine::new();
        engine.register("t", "{{ pp(obj) }}").unwrap();

        let html = engine
            .render("t", &json!({ "obj": { "size": "large" } }))
            .unwrap();

        assert_eq!(html, r#"{"size":"large"}"#);
    }

    #[test]
    fn test_rellink_resolves_against_page_link() {
        let mut engine = TemplateEngine::new();
        engine
            .register("t", "{{ rellink(\"/pb-assets/styleguide.css\") }}")
            .unwrap();

        let html = engine
            .render("t", &json!({ "page_link": "/forms/buttons.html" }))
            .unwrap();

        assert_eq!(html, "../pb-assets/styleguide.css");
    }

    #[test]
    fn test_rellink_without_page_link_passes_through() {
        let mut engine = TemplateEngine::new();
        engine
            .register("t", "{{ rellink(\"/components.html\") }}")
            .unwrap();

        let html = engine.render("t", &json!({})).unwrap();

        assert_eq!(html, "/components.html");
    }

    #[test]
    fn test_rellink_leaves_relative_links_alone() {
        let mut engine = TemplateEngine::new();
        engine.register("t", "{{ rellink(\"img/logo.svg\") }}").unwrap();

        let html = engine
            .render("t", &json!({ "page_link": "/a/b.html" }))
            .unwrap();

        assert_eq!(html, "img/logo.svg");
    }

    #[test]
    fn test_view_key_prefix() {
        assert_eq!(view_key("acme.button"), "view:acme.button");
    }
}
