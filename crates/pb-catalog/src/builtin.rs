//! Built-in layout components.
//!
//! The generator ships four components that give every styleguide a working
//! skeleton out of the box: the outer HTML shell, the markdown page wrapper,
//! the single-component display and the plain listing layout. They live in
//! the reserved `pb` namespace so the namespace filter keeps them out of
//! user listings and exports.

use std::path::PathBuf;

use serde_json::Map;

use pb_template::{TemplateEngine, view_key};

use crate::component::{Component, View};
use crate::error::CatalogError;
use crate::registry::ComponentRegistry;

/// Namespace reserved for the built-in layout components.
pub const BUILTIN_NAMESPACE: &str = "pb";

/// Outer HTML shell wrapping every written page.
pub const LAYOUT_ID: &str = "pb.layout";
/// Wrapper around rendered markdown page bodies.
pub const PAGE_ID: &str = "pb.page";
/// Display template for a single component entry.
pub const COMPONENT_ID: &str = "pb.component";
/// Plain listing layout for component listings.
pub const COMPONENT_LIST_ID: &str = "pb.component-list";

const BUILTINS: [(&str, &str, &str); 4] = [
    (LAYOUT_ID, "layout.html", include_str!("../templates/layout.html")),
    (PAGE_ID, "page.html", include_str!("../templates/page.html")),
    (
        COMPONENT_ID,
        "component.html",
        include_str!("../templates/component.html"),
    ),
    (
        COMPONENT_LIST_ID,
        "component-list.html",
        include_str!("../templates/component-list.html"),
    ),
];

/// Register the built-in layout components.
///
/// Must run before user catalog paths load: the registry overwrites by id,
/// so a user component declaring e.g. `pb.layout` replaces the shipped one.
///
/// # Errors
///
/// Returns [`CatalogError::Template`] if a shipped template fails to
/// compile.
pub fn register_builtins(
    engine: &mut TemplateEngine,
    registry: &mut ComponentRegistry,
) -> Result<(), CatalogError> {
    for (id, file, source) in BUILTINS {
        let key = view_key(id);
        engine.register(&key, source)?;

        let mut component = Component::new(id);
        component.namespace = BUILTIN_NAMESPACE.to_owned();
        component.view = Some(View {
            template_key: key,
            source_path: PathBuf::from(file),
            config: Map::new(),
        });
        registry.set(component);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn registered() -> (TemplateEngine, ComponentRegistry) {
        let mut engine = TemplateEngine::new();
        let mut registry = ComponentRegistry::new();
        register_builtins(&mut engine, &mut registry).unwrap();
        (engine, registry)
    }

    #[test]
    fn test_registers_all_builtins() {
        let (engine, registry) = registered();

        for id in [LAYOUT_ID, PAGE_ID, COMPONENT_ID, COMPONENT_LIST_ID] {
            let component = registry.find(id).unwrap();
            assert_eq!(component.namespace, BUILTIN_NAMESPACE);
            assert!(component.view.is_some());
            assert!(engine.has(&view_key(id)));
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_layout_embeds_content_and_identity() {
        let (engine, _) = registered();
        let context = json!({
            "styleguide": { "name": "Demo Guide", "version": "1.2.0" },
            "page_link": "/components.html",
            "content": "<p>hello</p>",
        });

        let html = engine.render(&view_key(LAYOUT_ID), &context).unwrap();

        assert!(html.contains("<title>Demo Guide</title>"));
        assert!(html.contains("1.2.0"));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains("href=\"pb-assets/styleguide.css\""));
    }

    #[test]
    fn test_layout_links_climb_out_of_nested_pages() {
        let (engine, _) = registered();
        let context = json!({
            "styleguide": { "name": "Demo", "version": "0.0.1" },
            "page_link": "/patterns/forms/inputs.html",
            "content": "",
        });

        let html = engine.render(&view_key(LAYOUT_ID), &context).unwrap();

        assert!(html.contains("href=\"../../pb-assets/styleguide.css\""));
        assert!(html.contains("href=\"../../components.html\""));
    }

    #[test]
    fn test_page_wraps_content() {
        let (engine, _) = registered();
        let context = json!({ "content": "<h1>Intro</h1>" });

        let html = engine.render(&view_key(PAGE_ID), &context).unwrap();

        assert_eq!(html, "<article class=\"pb-page\">\n<h1>Intro</h1>\n</article>");
    }

    #[test]
    fn test_component_display_without_states() {
        let (engine, _) = registered();
        let context = json!({
            "id": "atoms-button",
            "headline": "Button",
            "docs": [{ "label": "Usage", "content": "<p>Click.</p>" }],
            "template": { "content": "<button>Buy</button>", "path": "/preview-files/atoms-button-view.html" },
            "page_link": "/components.html",
        });

        let html = engine.render(&view_key(COMPONENT_ID), &context).unwrap();

        assert!(html.contains("id=\"atoms-button\""));
        assert!(html.contains("Button"));
        assert!(html.contains("<p>Click.</p>"));
        assert!(html.contains("<button>Buy</button>"));
        assert!(html.contains("href=\"preview-files/atoms-button-view.html\""));
    }

    #[test]
    fn test_component_display_with_states() {
        let (engine, _) = registered();
        let context = json!({
            "id": "atoms-button",
            "headline": "Button",
            "docs": [],
            "states": [{
                "label": "Disabled",
                "slug": "atoms-button-disabled",
                "doc": "<p>Greyed out.</p>",
                "content": [{ "content": "<button disabled></button>", "path": "/preview-files/atoms-button-disabled.html" }],
            }],
            "page_link": "/components.html",
        });

        let html = engine.render(&view_key(COMPONENT_ID), &context).unwrap();

        assert!(html.contains("id=\"atoms-button-disabled\""));
        assert!(html.contains("<p>Greyed out.</p>"));
        assert!(html.contains("<button disabled></button>"));
    }

    #[test]
    fn test_component_list_renders_preflight_and_entries() {
        let (engine, _) = registered();
        let context = json!({
            "preflight": "<p>Pick a pattern.</p>",
            "components": [
                { "id": "a", "headline": "A", "compiled": "<section>A</section>" },
                { "id": "b", "headline": "B", "compiled": "<section>B</section>" },
            ],
        });

        let html = engine.render(&view_key(COMPONENT_LIST_ID), &context).unwrap();

        assert!(html.contains("<p>Pick a pattern.</p>"));
        let a = html.find("<section>A</section>").unwrap();
        let b = html.find("<section>B</section>").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_component_list_without_preflight() {
        let (engine, _) = registered();
        let context = json!({ "components": [] });

        let html = engine.render(&view_key(COMPONENT_LIST_ID), &context).unwrap();

        assert!(!html.contains("pb-preflight"));
    }
}
