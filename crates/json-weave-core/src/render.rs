//! Template rendering passes.
//!
//! A render pass keeps no state between runs. Plain bindings are written
//! in place; repeated containers are fully regenerated — every non-template
//! child is destroyed and recreated from the template on each pass, so
//! there is never partially reconciled output. Per-container failures are
//! warnings: one malformed binding never blocks the rest of the page.

use serde_json::Value;
use tracing::warn;

use json_weave_dom::{Document, NodeId};
use json_weave_path::{indexed, join, resolve};

use crate::error::BindError;

/// Text binding: writes the resolved value as text content.
pub const ATTR_BIND: &str = "data-bind";
/// Read-only href binding.
pub const ATTR_BIND_HREF: &str = "data-bind-href";
/// Image-like src binding, editable.
pub const ATTR_BIND_SRC: &str = "data-bind-src";
/// Paragraph-list binding.
pub const ATTR_BIND_HTML: &str = "data-bind-html";
/// Identifier binding, written out as `data-item-id`.
pub const ATTR_ID_BIND: &str = "data-id-bind";
/// Repeated container; its value is the array path.
pub const ATTR_REPEAT: &str = "data-repeat";
/// Marks the template definition child of a repeated container.
pub const ATTR_TEMPLATE: &str = "data-template";
/// Absolute resolved path, written on every bound node after render.
pub const ATTR_PATH: &str = "data-path";
/// Marks nodes the edit tracker may make content-editable.
pub const ATTR_EDITABLE: &str = "data-editable";
/// Marks editable images.
pub const ATTR_EDITABLE_IMAGE: &str = "data-editable-image";
/// Identifier landing attribute.
pub const ATTR_ITEM_ID: &str = "data-item-id";

/// Convert a resolved value to binding text.
///
/// Strings render verbatim, numbers and booleans in JSON form; null,
/// sequences, and mappings are unrenderable as text.
fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// One render pass over a document.
pub struct Renderer<'a> {
    doc: &'a mut Document,
    stamp: u64,
}

impl<'a> Renderer<'a> {
    pub fn new(doc: &'a mut Document, stamp: u64) -> Self {
        Renderer { doc, stamp }
    }

    /// Full pass: plain bindings at the top level, then every repeated
    /// container. Container failures are warned and skipped.
    pub fn render(&mut self, data: &Value) {
        self.render_plain(data);
        for container in self.doc.find_all(ATTR_REPEAT) {
            if let Err(err) = self.render_container(container, data) {
                warn!(error = %err, "skipping repeated container");
            }
        }
    }

    fn render_plain(&mut self, data: &Value) {
        let repeats = self.doc.find_all(ATTR_REPEAT);

        for node in self.doc.find_all(ATTR_BIND) {
            if self.inside_any(&repeats, node) {
                continue;
            }
            let Some(path) = self.doc.attr(node, ATTR_BIND).map(str::to_string) else {
                continue;
            };
            match text_value(resolve(data, &path)) {
                Some(text) => {
                    self.doc.set_text(node, &text);
                    self.doc.set_attr(node, ATTR_PATH, &path);
                    self.doc.set_attr(node, ATTR_EDITABLE, "true");
                }
                None => warn!(%path, "unresolved text binding"),
            }
        }

        for node in self.doc.find_all(ATTR_BIND_HREF) {
            if self.inside_any(&repeats, node) {
                continue;
            }
            let Some(path) = self.doc.attr(node, ATTR_BIND_HREF).map(str::to_string) else {
                continue;
            };
            match text_value(resolve(data, &path)) {
                Some(url) => {
                    let stamped = self.stamped(&url);
                    self.doc.set_attr(node, "href", &stamped);
                    self.doc.set_attr(node, ATTR_PATH, &path);
                }
                None => warn!(%path, "unresolved href binding"),
            }
        }

        for node in self.doc.find_all(ATTR_BIND_SRC) {
            if self.inside_any(&repeats, node) {
                continue;
            }
            let Some(path) = self.doc.attr(node, ATTR_BIND_SRC).map(str::to_string) else {
                continue;
            };
            self.render_src(node, resolve(data, &path), &path);
        }
    }

    /// Re-render one repeated container from the current data.
    ///
    /// This is the entry point used after array mutation; the full pass
    /// calls it for every container it finds.
    pub fn render_container(&mut self, container: NodeId, data: &Value) -> Result<(), BindError> {
        let Some(path) = self.doc.attr(container, ATTR_REPEAT).map(str::to_string) else {
            return Ok(());
        };
        let items = match resolve(data, &path) {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(BindError::NotAnArray { path }),
        };

        let children = self.doc.children(container);
        let Some(template) = children
            .iter()
            .copied()
            .find(|c| self.doc.attr(*c, ATTR_TEMPLATE).is_some())
        else {
            return Err(BindError::MissingTemplate { path });
        };
        let Some(prototype) = self
            .doc
            .children(template)
            .into_iter()
            .find(|c| self.doc.is_element(*c))
        else {
            return Err(BindError::MissingTemplate { path });
        };

        for child in children {
            if child != template {
                self.doc.remove(child);
            }
        }

        for (i, item) in items.iter().enumerate() {
            let clone = self.doc.clone_subtree(prototype);
            self.render_item(clone, item, &indexed(&path, i));
            self.doc.insert_before(container, clone, template);
        }
        Ok(())
    }

    /// Apply the four item binding kinds within a fresh clone.
    fn render_item(&mut self, clone: NodeId, item: &Value, base: &str) {
        for node in self.doc.find_all_within(clone, ATTR_BIND) {
            let Some(rel) = self.doc.attr(node, ATTR_BIND).map(str::to_string) else {
                continue;
            };
            let path = join(base, &rel);
            match text_value(resolve(item, &rel)) {
                Some(text) => {
                    self.doc.set_text(node, &text);
                    self.doc.set_attr(node, ATTR_PATH, &path);
                    self.doc.set_attr(node, ATTR_EDITABLE, "true");
                }
                None => warn!(%path, "unresolved item text binding"),
            }
        }

        for node in self.doc.find_all_within(clone, ATTR_BIND_HTML) {
            let Some(rel) = self.doc.attr(node, ATTR_BIND_HTML).map(str::to_string) else {
                continue;
            };
            let path = join(base, &rel);
            self.render_paragraphs(node, resolve(item, &rel), &path);
        }

        for node in self.doc.find_all_within(clone, ATTR_BIND_SRC) {
            let Some(rel) = self.doc.attr(node, ATTR_BIND_SRC).map(str::to_string) else {
                continue;
            };
            let path = join(base, &rel);
            self.render_src(node, resolve(item, &rel), &path);
        }

        for node in self.doc.find_all_within(clone, ATTR_ID_BIND) {
            let Some(rel) = self.doc.attr(node, ATTR_ID_BIND).map(str::to_string) else {
                continue;
            };
            match text_value(resolve(item, &rel)) {
                Some(id) => self.doc.set_attr(node, ATTR_ITEM_ID, &id),
                None => warn!(path = %join(base, &rel), "unresolved identifier binding"),
            }
        }
    }

    fn render_src(&mut self, node: NodeId, value: Option<&Value>, path: &str) {
        match text_value(value) {
            Some(url) => {
                let stamped = self.stamped(&url);
                self.doc.set_attr(node, "src", &stamped);
                self.doc.set_attr(node, ATTR_PATH, path);
                self.doc.set_attr(node, ATTR_EDITABLE_IMAGE, "true");
            }
            None => warn!(%path, "unresolved src binding"),
        }
    }

    /// Render a paragraph list: one `<p>` per entry, every paragraph
    /// editable under the same composed path. A single string renders as
    /// one paragraph.
    fn render_paragraphs(&mut self, node: NodeId, value: Option<&Value>, path: &str) {
        let entries: Vec<String> = match value {
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for entry in items {
                    match entry.as_str() {
                        Some(s) => out.push(s.to_string()),
                        None => warn!(%path, "skipping non-string paragraph entry"),
                    }
                }
                out
            }
            Some(Value::String(s)) => vec![s.clone()],
            _ => {
                warn!(%path, "unresolved paragraph binding");
                return;
            }
        };

        for child in self.doc.children(node) {
            self.doc.remove(child);
        }
        for entry in entries {
            let p = self.doc.create_element("p");
            self.doc.set_text(p, &entry);
            self.doc.set_attr(p, ATTR_EDITABLE, "true");
            self.doc.set_attr(p, ATTR_PATH, path);
            self.doc.append_child(node, p);
        }
    }

    /// Append the cache-defeating suffix unless the value is an
    /// embedded-data URL.
    fn stamped(&self, url: &str) -> String {
        if url.starts_with("data:") {
            url.to_string()
        } else {
            format!("{url}?v={}", self.stamp)
        }
    }

    fn inside_any(&self, containers: &[NodeId], node: NodeId) -> bool {
        containers
            .iter()
            .any(|c| *c == node || self.doc.is_descendant(node, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_weave_dom::Document;
    use serde_json::json;

    fn page() -> Document {
        Document::from_jsonml(&json!([
            "body",
            ["h1", {"data-bind": "title"}, "placeholder"],
            ["a", {"data-bind-href": "link"}, "more"],
            ["img", {"data-bind-src": "hero"}],
            [
                "section",
                {"data-repeat": "articles"},
                [
                    "template",
                    {"data-template": ""},
                    [
                        "article",
                        ["h2", {"data-bind": "headline"}],
                        ["div", {"data-bind-html": "body"}],
                        ["img", {"data-bind-src": "image"}],
                        ["footer", {"data-id-bind": "id"}]
                    ]
                ]
            ]
        ]))
        .unwrap()
    }

    fn data() -> serde_json::Value {
        json!({
            "title": "The Title",
            "link": "https://example.test/page",
            "hero": "hero.png",
            "articles": [
                {
                    "id": "a-1",
                    "headline": "First",
                    "body": ["p one", "p two"],
                    "image": "one.png"
                },
                {
                    "id": "a-2",
                    "headline": "Second",
                    "body": "single",
                    "image": "data:image/png;base64,AAAA"
                },
                {
                    "id": "a-3",
                    "headline": "Third",
                    "body": [],
                    "image": "three.png"
                }
            ]
        })
    }

    fn rendered() -> Document {
        let mut doc = page();
        Renderer::new(&mut doc, 7).render(&data());
        doc
    }

    #[test]
    fn plain_text_binding_writes_and_tags() {
        let doc = rendered();
        let h1 = doc.find_all(ATTR_BIND)[0];
        assert_eq!(doc.text(h1), "The Title");
        assert_eq!(doc.attr(h1, ATTR_PATH), Some("title"));
        assert_eq!(doc.attr(h1, ATTR_EDITABLE), Some("true"));
    }

    #[test]
    fn href_binding_is_stamped_and_not_editable() {
        let doc = rendered();
        let a = doc.find_all(ATTR_BIND_HREF)[0];
        assert_eq!(doc.attr(a, "href"), Some("https://example.test/page?v=7"));
        assert_eq!(doc.attr(a, ATTR_EDITABLE), None);
        assert_eq!(doc.attr(a, ATTR_PATH), Some("link"));
    }

    #[test]
    fn src_binding_is_stamped_and_image_editable() {
        let doc = rendered();
        let img = doc.find_all(ATTR_BIND_SRC)[0];
        assert_eq!(doc.attr(img, "src"), Some("hero.png?v=7"));
        assert_eq!(doc.attr(img, ATTR_EDITABLE_IMAGE), Some("true"));
    }

    #[test]
    fn data_urls_are_not_stamped() {
        let doc = rendered();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let second = doc.children(container)[1];
        let img = doc.find_all_within(second, ATTR_BIND_SRC)[0];
        assert_eq!(doc.attr(img, "src"), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn repeated_container_expands_in_array_order() {
        let doc = rendered();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let children = doc.children(container);
        // Three clones followed by the template node itself.
        assert_eq!(children.len(), 4);
        assert_eq!(doc.attr(children[3], ATTR_TEMPLATE), Some(""));
        for (i, child) in children[..3].iter().enumerate() {
            let headline = doc.find_all_within(*child, ATTR_BIND)[0];
            assert_eq!(
                doc.attr(headline, ATTR_PATH),
                Some(format!("articles[{i}].headline").as_str())
            );
        }
        let first_headline = doc.find_all_within(children[0], ATTR_BIND)[0];
        assert_eq!(doc.text(first_headline), "First");
    }

    #[test]
    fn paragraph_list_renders_one_p_per_entry_with_shared_path() {
        let doc = rendered();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let first = doc.children(container)[0];
        let body = doc.find_all_within(first, ATTR_BIND_HTML)[0];
        let paragraphs = doc.children(body);
        assert_eq!(paragraphs.len(), 2);
        for p in &paragraphs {
            assert_eq!(doc.tag(*p), Some("p"));
            assert_eq!(doc.attr(*p, ATTR_PATH), Some("articles[0].body"));
            assert_eq!(doc.attr(*p, ATTR_EDITABLE), Some("true"));
        }
        assert_eq!(doc.text(paragraphs[0]), "p one");
        assert_eq!(doc.text(paragraphs[1]), "p two");
    }

    #[test]
    fn single_string_body_renders_one_paragraph() {
        let doc = rendered();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let second = doc.children(container)[1];
        let body = doc.find_all_within(second, ATTR_BIND_HTML)[0];
        assert_eq!(doc.children(body).len(), 1);
        assert_eq!(doc.text(body), "single");
    }

    #[test]
    fn identifier_binding_writes_item_id() {
        let doc = rendered();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let first = doc.children(container)[0];
        let footer = doc.find_all_within(first, ATTR_ID_BIND)[0];
        assert_eq!(doc.attr(footer, ATTR_ITEM_ID), Some("a-1"));
        assert_eq!(doc.attr(footer, ATTR_EDITABLE), None);
    }

    #[test]
    fn template_bindings_are_skipped_by_the_plain_pass() {
        let doc = rendered();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let template = *doc.children(container).last().unwrap();
        let headline = doc.find_all_within(template, ATTR_BIND)[0];
        // The template's own nodes were never painted or tagged.
        assert_eq!(doc.attr(headline, ATTR_PATH), None);
    }

    #[test]
    fn non_array_repeat_path_fails_that_container_only() {
        let mut doc = Document::from_jsonml(&json!([
            "body",
            ["div", {"data-repeat": "title"},
                ["template", {"data-template": ""}, ["p", {"data-bind": "x"}]]],
            ["h1", {"data-bind": "title"}, ""]
        ]))
        .unwrap();
        Renderer::new(&mut doc, 0).render(&json!({"title": "scalar"}));
        let h1 = doc.find_all(ATTR_BIND).pop().unwrap();
        assert_eq!(doc.text(h1), "scalar");
        let container = doc.find_all(ATTR_REPEAT)[0];
        let err = Renderer::new(&mut doc, 0)
            .render_container(container, &json!({"title": "scalar"}))
            .unwrap_err();
        assert_eq!(
            err,
            BindError::NotAnArray {
                path: "title".to_string()
            }
        );
    }

    #[test]
    fn missing_template_is_reported() {
        let mut doc = Document::from_jsonml(&json!([
            "body",
            ["div", {"data-repeat": "items"}]
        ]))
        .unwrap();
        let container = doc.find_all(ATTR_REPEAT)[0];
        let err = Renderer::new(&mut doc, 0)
            .render_container(container, &json!({"items": [1]}))
            .unwrap_err();
        assert_eq!(
            err,
            BindError::MissingTemplate {
                path: "items".to_string()
            }
        );
    }

    #[test]
    fn rerender_regenerates_children_from_scratch() {
        let mut doc = page();
        let mut data = data();
        Renderer::new(&mut doc, 7).render(&data);
        let container = doc.find_all(ATTR_REPEAT)[0];
        assert_eq!(doc.children(container).len(), 4);

        data["articles"].as_array_mut().unwrap().truncate(1);
        Renderer::new(&mut doc, 7)
            .render_container(container, &data)
            .unwrap();
        let children = doc.children(container);
        assert_eq!(children.len(), 2);
        let headline = doc.find_all_within(children[0], ATTR_BIND)[0];
        assert_eq!(doc.attr(headline, ATTR_PATH), Some("articles[0].headline"));
    }

    #[test]
    fn unresolved_plain_binding_leaves_placeholder() {
        let mut doc = Document::from_jsonml(&json!([
            "body", ["h1", {"data-bind": "missing"}, "placeholder"]
        ]))
        .unwrap();
        Renderer::new(&mut doc, 0).render(&json!({}));
        let h1 = doc.find_all(ATTR_BIND)[0];
        assert_eq!(doc.text(h1), "placeholder");
        assert_eq!(doc.attr(h1, ATTR_EDITABLE), None);
    }

    #[test]
    fn numbers_and_booleans_render_as_text() {
        let mut doc = Document::from_jsonml(&json!([
            "body",
            ["span", {"data-bind": "count"}],
            ["span", {"data-bind": "flag"}]
        ]))
        .unwrap();
        Renderer::new(&mut doc, 0).render(&json!({"count": 42, "flag": true}));
        let spans = doc.find_all(ATTR_BIND);
        assert_eq!(doc.text(spans[0]), "42");
        assert_eq!(doc.text(spans[1]), "true");
    }
}
