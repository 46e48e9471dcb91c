//!
//! Element creation, insertion and removal helpers, and `class`
//! attribute manipulation.
//!

use crate::result::Result;
use web_sys::{Document, Element};

/// Create an element with the given `(name, value)` attribute pairs and
/// optional text content. A `style` attribute is applied verbatim as the
/// element's inline CSS text.
pub fn create_element(
    doc: &Document,
    tag: &str,
    attributes: &[(&str, &str)],
    text: Option<&str>,
) -> Result<Element> {
    let element = doc.create_element(tag)?;
    for (name, value) in attributes.iter() {
        element.set_attribute(name, value)?;
    }
    if let Some(text) = text {
        element.append_child(&doc.create_text_node(text))?;
    }
    Ok(element)
}

/// Insert `element` before the last child of the first `section` element
/// (typically `head`), falling back to the document element when no such
/// section exists.
pub fn append_to_section(doc: &Document, section: &str, element: &Element) -> Result<()> {
    let parent = doc
        .get_elements_by_tag_name(section)
        .item(0)
        .or_else(|| doc.document_element())
        .ok_or("unable to locate an insertion parent element")?;
    parent.insert_before(element, parent.last_child().as_ref())?;
    Ok(())
}

/// Detach an element from its parent node, if it has one.
pub fn remove(element: &Element) {
    if let Some(parent) = element.parent_node() {
        parent.remove_child(element).ok();
    }
}

/// Add and remove classes on an element's `class` attribute. Existing
/// classes are deduplicated; removal wins over addition.
pub fn update_classes(element: &Element, add: &[&str], remove: &[&str]) -> Result<()> {
    let current = element.get_attribute("class").unwrap_or_default();
    element.set_attribute("class", &merge_classes(&current, add, remove))?;
    Ok(())
}

/// Check whether the element's `class` attribute contains `name`.
pub fn has_class(element: &Element, name: &str) -> bool {
    element
        .get_attribute("class")
        .unwrap_or_default()
        .split_whitespace()
        .any(|class| class == name)
}

fn merge_classes(current: &str, add: &[&str], remove: &[&str]) -> String {
    let mut classes: Vec<&str> = Vec::new();
    for class in current.split_whitespace().chain(add.iter().copied()) {
        if !remove.contains(&class) && !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes.join(" ")
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg(test)]
mod test {
    use super::merge_classes;

    #[test]
    fn merge_classes_add_and_remove() {
        assert_eq!(
            merge_classes("wf-loading wf-inactive", &["wf-active"], &["wf-loading"]),
            "wf-inactive wf-active"
        );
    }

    #[test]
    fn merge_classes_deduplicates() {
        assert_eq!(
            merge_classes("a  b a", &["b", "c"], &[]),
            "a b c"
        );
    }

    #[test]
    fn merge_classes_removal_wins_over_addition() {
        assert_eq!(merge_classes("a", &["b"], &["b"]), "a");
    }

    #[test]
    fn merge_classes_empty_input() {
        assert_eq!(merge_classes("", &[], &[]), "");
        assert_eq!(merge_classes("", &["x"], &[]), "x");
    }
}
