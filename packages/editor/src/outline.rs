//! Layer-view projection of the document.
//!
//! The outline is a parallel read-only tree derived from the document on
//! every change; it never feeds back into the document. Expand/collapse
//! state lives outside the projection in an [`ExpansionState`], keyed by
//! node id, so rebuilding the outline keeps the user's open branches.

use crate::selection::ElementType;
use pagecraft_document::locator;
use pagecraft_document::model::{Axis, ContentComponent, Grid, PageSection, Stack, StackChild};
use serde::Serialize;
use std::collections::HashSet;

const LABEL_SNIPPET_LEN: usize = 24;

/// One entry in the layer view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub id: String,
    pub element_type: ElementType,
    pub label: String,
    pub depth: usize,
    pub parent_id: Option<String>,
    pub children: Vec<OutlineNode>,
}

/// Build the display tree for the whole document
pub fn build_outline(sections: &[PageSection]) -> Vec<OutlineNode> {
    sections.iter().map(section_outline).collect()
}

fn section_outline(ps: &PageSection) -> OutlineNode {
    let mut children = vec![OutlineNode {
        id: ps.container.id.clone(),
        element_type: ElementType::Container,
        label: "Container".to_string(),
        depth: 1,
        parent_id: Some(ps.section.id.clone()),
        children: Vec::new(),
    }];
    children.extend(ps.stacks.iter().map(|s| stack_outline(s, 1, &ps.section.id)));
    children.extend(ps.grids.iter().map(|g| grid_outline(g, 1, &ps.section.id)));

    OutlineNode {
        id: ps.section.id.clone(),
        element_type: ElementType::Section,
        label: "Section".to_string(),
        depth: 0,
        parent_id: None,
        children,
    }
}

fn stack_outline(stack: &Stack, depth: usize, parent_id: &str) -> OutlineNode {
    let children = stack
        .children
        .iter()
        .map(|child| match child {
            StackChild::Stack(nested) => stack_outline(nested, depth + 1, &stack.id),
            StackChild::Content(content) => content_outline(content, depth + 1, &stack.id),
        })
        .collect();

    OutlineNode {
        id: stack.id.clone(),
        element_type: ElementType::Stack,
        label: match stack.axis {
            Axis::Vertical => "Vertical stack".to_string(),
            Axis::Horizontal => "Horizontal stack".to_string(),
        },
        depth,
        parent_id: Some(parent_id.to_string()),
        children,
    }
}

fn grid_outline(grid: &Grid, depth: usize, parent_id: &str) -> OutlineNode {
    OutlineNode {
        id: grid.id.clone(),
        element_type: ElementType::Grid,
        label: format!("Grid ({} col)", grid.columns),
        depth,
        parent_id: Some(parent_id.to_string()),
        children: grid
            .children
            .iter()
            .map(|c| content_outline(c, depth + 1, &grid.id))
            .collect(),
    }
}

fn content_outline(content: &ContentComponent, depth: usize, parent_id: &str) -> OutlineNode {
    OutlineNode {
        id: content.id().to_string(),
        element_type: ElementType::Content,
        label: content_label(content),
        depth,
        parent_id: Some(parent_id.to_string()),
        children: Vec::new(),
    }
}

fn content_label(content: &ContentComponent) -> String {
    match content {
        ContentComponent::Heading { text, .. } => format!("Heading: {}", snippet(text)),
        ContentComponent::Text { text, .. } => format!("Text: {}", snippet(text)),
        ContentComponent::Button { text, .. } => format!("Button: {}", snippet(text)),
        ContentComponent::Image { alt, .. } => format!("Image: {}", snippet(alt)),
        ContentComponent::Spacer { height, .. } => format!("Spacer ({}px)", height),
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= LABEL_SNIPPET_LEN {
        text.to_string()
    } else {
        let cut: String = text.chars().take(LABEL_SNIPPET_LEN).collect();
        format!("{}…", cut.trim_end())
    }
}

/// Expand/collapse state for the layer view, external to the projection
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Expand every ancestor of the given node so it is visible in the
    /// layer view. The node itself keeps its own state.
    pub fn reveal(&mut self, id: &str, sections: &[PageSection]) {
        let path = locator::find_path(id, sections);
        for ancestor in path.iter().take(path.len().saturating_sub(1)) {
            self.expanded.insert(ancestor.clone());
        }
    }
}
