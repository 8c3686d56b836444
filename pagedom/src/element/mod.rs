mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.children() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// IDs from `root` down to (and including) the element with `id`.
/// Returns None if the element is not in the tree.
pub fn path_to(root: &Element, id: &str) -> Option<Vec<String>> {
    let mut path = Vec::new();
    if path_to_recursive(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn path_to_recursive(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
    path.push(element.id.clone());
    if element.id == id {
        return true;
    }
    for child in element.children() {
        if path_to_recursive(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Collect every ID in the subtree (pre-order).
pub fn collect_ids(root: &Element) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids_recursive(root, &mut ids);
    ids
}

fn collect_ids_recursive(element: &Element, ids: &mut Vec<String>) {
    ids.push(element.id.clone());
    for child in element.children() {
        collect_ids_recursive(child, ids);
    }
}
