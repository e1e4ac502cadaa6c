//! Template registry — a static, ordered mapping from template id to a pure
//! render function over the resume document.
//!
//! Adding a template means adding one entry to [`TEMPLATES`]; there is no
//! dispatch machinery beyond the function pointer. Render functions are
//! idempotent, side-effect free, and never fail — an all-empty document
//! renders a start-filling-the-form placeholder instead.

pub mod render;
pub mod theme;

use serde::Serialize;

use crate::models::ResumeDocument;

/// A rendered preview page: an SVG document with A4 proportions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub svg: String,
    pub width_px: u32,
    pub height_px: u32,
}

pub type RenderFn = fn(&ResumeDocument) -> RenderedPage;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing)]
    pub render: RenderFn,
}

/// The registry, in display order. The first entry is the default selection.
static TEMPLATES: &[Template] = &[
    Template {
        id: "avant-garde",
        name: "Avant-Garde Impact",
        description: "Bold typography, unconventional layout. For creatives.",
        render: render::avant_garde,
    },
    Template {
        id: "tech-savvy",
        name: "Tech Innovator",
        description: "Clean lines, modern icons. Ideal for tech roles.",
        render: render::tech_innovator,
    },
    Template {
        id: "elegant-script",
        name: "Elegant Storyteller",
        description: "Sophisticated fonts, spacious design. For writers or marketers.",
        render: render::elegant_storyteller,
    },
    Template {
        id: "dynamic-grid",
        name: "Dynamic Grid",
        description: "Structured yet visually engaging. Suits project managers.",
        render: render::dynamic_grid,
    },
    Template {
        id: "vibrant-ui",
        name: "Vibrant UI/UX",
        description: "Color accents, portfolio focus. Perfect for designers.",
        render: render::vibrant_ui,
    },
];

pub fn list_templates() -> &'static [Template] {
    TEMPLATES
}

/// Looks up a template by id. Unknown or stale ids (for example a persisted
/// selection referencing a removed template) fall back to the first registry
/// entry so the preview pane is never empty.
pub fn resolve(template_id: &str) -> &'static Template {
    TEMPLATES
        .iter()
        .find(|t| t.id == template_id)
        .unwrap_or(&TEMPLATES[0])
}

pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_fixed() {
        let ids: Vec<_> = list_templates().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["avant-garde", "tech-savvy", "elegant-script", "dynamic-grid", "vibrant-ui"]
        );
    }

    #[test]
    fn test_resolve_known_id() {
        assert_eq!(resolve("elegant-script").id, "elegant-script");
    }

    #[test]
    fn test_resolve_unknown_id_falls_back_to_first() {
        assert_eq!(resolve("no-such-template").id, list_templates()[0].id);
        assert_eq!(resolve("").id, default_template().id);
    }

    #[test]
    fn test_template_ids_are_unique() {
        let mut ids: Vec<_> = list_templates().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), list_templates().len());
    }

    #[test]
    fn test_every_template_renders_blank_document() {
        let doc = ResumeDocument::create_default();
        for template in list_templates() {
            let page = (template.render)(&doc);
            assert!(!page.svg.is_empty(), "{} rendered nothing", template.id);
        }
    }
}
