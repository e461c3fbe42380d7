//! Resolve a selected id to its structural role and node value.
//!
//! Selection is just an id held by the UI; it can go stale the moment a
//! delete lands. Both resolvers return `None` for unknown ids so callers
//! route "nothing selected" and "selection no longer exists" the same way.

use pagecraft_document::locator::NodeRef;
use pagecraft_document::model::{PageSection, Stack, StackChild};
use serde::{Deserialize, Serialize};

/// Structural role of a node, used to route property forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Section,
    Container,
    Stack,
    Grid,
    Content,
}

/// Structural role of the node with the given id
pub fn resolve_type(id: &str, sections: &[PageSection]) -> Option<ElementType> {
    resolve_node(id, sections).map(|node| match node {
        NodeRef::Section(_) => ElementType::Section,
        NodeRef::Container(_) => ElementType::Container,
        NodeRef::Stack(_) => ElementType::Stack,
        NodeRef::Grid(_) => ElementType::Grid,
        NodeRef::Content(_) => ElementType::Content,
    })
}

/// The node with the given id, borrowed from the document
pub fn resolve_node<'a>(id: &str, sections: &'a [PageSection]) -> Option<NodeRef<'a>> {
    for ps in sections {
        if ps.section.id == id {
            return Some(NodeRef::Section(&ps.section));
        }
        if ps.container.id == id {
            return Some(NodeRef::Container(&ps.container));
        }
        for stack in &ps.stacks {
            if let Some(found) = resolve_in_stack(id, stack) {
                return Some(found);
            }
        }
        for grid in &ps.grids {
            if grid.id == id {
                return Some(NodeRef::Grid(grid));
            }
            if let Some(content) = grid.children.iter().find(|c| c.id() == id) {
                return Some(NodeRef::Content(content));
            }
        }
    }
    None
}

fn resolve_in_stack<'a>(id: &str, stack: &'a Stack) -> Option<NodeRef<'a>> {
    if stack.id == id {
        return Some(NodeRef::Stack(stack));
    }
    for child in &stack.children {
        match child {
            StackChild::Stack(nested) => {
                if let Some(found) = resolve_in_stack(id, nested) {
                    return Some(found);
                }
            }
            StackChild::Content(content) => {
                if content.id() == id {
                    return Some(NodeRef::Content(content));
                }
            }
        }
    }
    None
}
