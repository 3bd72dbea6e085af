use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::SearchOptions;
use crate::parser::{NodeExt, NodeRef};

/// Derive a stable key for a [`NodeRef`] by taking the address of the
/// inner `Node` value.  Two `NodeRef`s that point to the same tree node
/// produce the same key.
pub(crate) fn node_key(node: &NodeRef) -> usize {
    let ptr: *const _ = &**node;
    ptr as usize
}

/// The subtree a search walks: `<body>` when the document has one, the
/// given node otherwise.
pub fn search_root(document: &NodeRef) -> NodeRef {
    match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        Err(_) => document.clone(),
    }
}

/// Whether a text node must be left out of the search: it sits inside one of
/// the skipped containers (`script`, `style`, ...), or inside the search
/// control itself.
pub fn is_excluded_text_node(node: &NodeRef, options: &SearchOptions) -> bool {
    node.ancestors().any(|ancestor| {
        if let Some(tag) = ancestor.element_name() {
            if options
                .skip_tags
                .iter()
                .any(|skipped| skipped.eq_ignore_ascii_case(tag))
            {
                return true;
            }
        }
        ancestor.has_class(&options.input_class) || ancestor.has_class(&options.container_class)
    })
}

/// All text nodes under `root` (inclusive) in document order.
pub fn text_nodes_in_order(root: &NodeRef) -> Vec<NodeRef> {
    root.inclusive_descendants()
        .filter(|n| n.as_text().is_some())
        .collect()
}

/// Concatenation of every text node under `root`, in document order.
pub fn document_text(root: &NodeRef) -> String {
    text_nodes_in_order(root)
        .iter()
        .filter_map(|n| n.text_value())
        .collect()
}

/// Merge runs of adjacent text children of `parent` into the first node of
/// each run, and drop empty text children.  Only direct children are
/// touched.
pub fn merge_adjacent_text_nodes(parent: &NodeRef) {
    let children: Vec<_> = parent.children().collect();
    let mut run_head: Option<NodeRef> = None;
    for child in children {
        let Some(text) = child.as_text() else {
            run_head = None;
            continue;
        };
        if text.borrow().is_empty() {
            child.detach();
            continue;
        }
        match &run_head {
            Some(head) => {
                if let Some(head_text) = head.as_text() {
                    head_text.borrow_mut().push_str(text.borrow().as_str());
                }
                child.detach();
            }
            None => run_head = Some(child.clone()),
        }
    }
}

/// Like [`merge_adjacent_text_nodes`], timed under the `MERGE_TEXT_NODES` span.
pub(crate) fn merge_adjacent_text_nodes_logged(parent: &NodeRef, logger: &PerfLogger) {
    start_span!(logger, MERGE_TEXT_NODES);
    merge_adjacent_text_nodes(parent);
    end_span!(logger, MERGE_TEXT_NODES);
}
