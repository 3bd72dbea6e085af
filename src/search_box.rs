use crate::models::SearchOptions;
use crate::node_utils::{new_html_element, new_html_element_with_attrs};
use crate::parser::{NodeExt, NodeRef};
use crate::utils::search_root;

/// The search control installed into a page: a fixed-position container
/// holding a text input, plus the `<style>` element that makes highlight
/// marks visible.
///
/// The input's typed value is mirrored into its `value` attribute so the
/// document always reflects what the user searched for.
pub struct SearchBox {
    container: NodeRef,
    input: NodeRef,
    style: Option<NodeRef>,
}

impl SearchBox {
    /// Append the control to `<body>` (or `document` itself when there is no
    /// body) and, when [`SearchOptions::inject_style`] is set, the highlight
    /// style to `<head>`.
    pub fn install(document: &NodeRef, options: &SearchOptions) -> SearchBox {
        let container = new_html_element_with_attrs(
            "div",
            &[
                ("class", options.container_class.as_str()),
                ("style", "position: fixed; top: 20px; right: 20px; z-index: 1000;"),
            ],
        );
        let input = new_html_element_with_attrs(
            "input",
            &[
                ("type", "text"),
                ("class", options.input_class.as_str()),
                ("placeholder", options.placeholder.as_str()),
            ],
        );
        container.append(input.clone());
        search_root(document).append(container.clone());

        let style = if options.inject_style {
            let style = new_html_element("style");
            style.append(NodeRef::new_text(highlight_css(options)));
            match document.select_first("head") {
                Ok(head) => head.as_node().append(style.clone()),
                Err(_) => document.append(style.clone()),
            }
            Some(style)
        } else {
            None
        };

        SearchBox {
            container,
            input,
            style,
        }
    }

    pub fn container(&self) -> &NodeRef {
        &self.container
    }

    pub fn input(&self) -> &NodeRef {
        &self.input
    }

    pub fn value(&self) -> String {
        self.input.attr_value("value").unwrap_or_default()
    }

    pub fn set_value(&self, value: &str) {
        self.input.set_attr_value("value", value);
    }

    /// Detach the control and the injected style from the document.
    pub fn remove(self) {
        self.container.detach();
        if let Some(style) = self.style {
            style.detach();
        }
    }
}

fn highlight_css(options: &SearchOptions) -> String {
    format!(
        r#"
.{highlight} {{
    background-color: var(--accent-color, #f59e0b);
    color: black;
    padding: 0.1rem;
    border-radius: 0.2rem;
}}
.{input} {{
    padding: 0.5rem;
    border: 1px solid var(--border-color);
    border-radius: 0.25rem;
    font-size: 0.875rem;
    width: 200px;
}}
@media (max-width: 768px) {{
    .{container} {{ top: 10px; right: 10px; }}
    .{input} {{ width: 150px; }}
}}
"#,
        highlight = options.highlight_class,
        input = options.input_class,
        container = options.container_class,
    )
}
