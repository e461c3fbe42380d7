//! Fresh identity for cloned subtrees.
//!
//! Duplicating a node deep-clones it, and the clone must not share a
//! single id with the original: ids are unique for the document's
//! lifetime. The rewrite is a typed visitor over the node union, so a new
//! node kind that is added to the model without a visit arm fails to
//! compile rather than silently keeping stale ids.

use pagecraft_common::{walk_grid_mut, walk_stack_mut, VisitorMut};
use pagecraft_document::id::new_id;
use pagecraft_document::model::{
    Container, ContentComponent, Grid, PageSection, SectionNode, Stack, StackChild,
};

struct RegenerateIds;

impl VisitorMut for RegenerateIds {
    fn visit_section_mut(&mut self, section: &mut SectionNode) {
        section.id = new_id("section");
    }

    fn visit_container_mut(&mut self, container: &mut Container) {
        container.id = new_id("container");
    }

    fn visit_stack_mut(&mut self, stack: &mut Stack) {
        stack.id = new_id("stack");
        walk_stack_mut(self, stack);
    }

    fn visit_grid_mut(&mut self, grid: &mut Grid) {
        grid.id = new_id("grid");
        walk_grid_mut(self, grid);
    }

    fn visit_content_mut(&mut self, content: &mut ContentComponent) {
        *content.id_mut() = new_id(content.type_tag());
    }
}

/// Replace every id in a cloned page section: section, container, all
/// stacks at any depth, all grids, all content leaves.
pub fn regenerate_section_ids(page_section: &mut PageSection) {
    RegenerateIds.visit_page_section_mut(page_section);
}

/// Replace every id in a cloned stack subtree.
pub fn regenerate_stack_ids(stack: &mut Stack) {
    RegenerateIds.visit_stack_mut(stack);
}

/// Replace every id in a cloned grid, children included.
pub fn regenerate_grid_ids(grid: &mut Grid) {
    RegenerateIds.visit_grid_mut(grid);
}

/// Replace a cloned content leaf's id.
pub fn regenerate_content_ids(content: &mut ContentComponent) {
    RegenerateIds.visit_content_mut(content);
}

/// Replace every id in a cloned stack child.
pub fn regenerate_child_ids(child: &mut StackChild) {
    match child {
        StackChild::Stack(stack) => regenerate_stack_ids(stack),
        StackChild::Content(content) => regenerate_content_ids(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::{walk_stack, Visitor};

    #[derive(Default)]
    struct CollectIds(Vec<String>);

    impl Visitor for CollectIds {
        fn visit_section(&mut self, section: &SectionNode) {
            self.0.push(section.id.clone());
        }

        fn visit_container(&mut self, container: &Container) {
            self.0.push(container.id.clone());
        }

        fn visit_stack(&mut self, stack: &Stack) {
            self.0.push(stack.id.clone());
            walk_stack(self, stack);
        }

        fn visit_grid(&mut self, grid: &Grid) {
            self.0.push(grid.id.clone());
            pagecraft_common::walk_grid(self, grid);
        }

        fn visit_content(&mut self, content: &ContentComponent) {
            self.0.push(content.id().to_string());
        }
    }

    fn all_ids(page_section: &PageSection) -> Vec<String> {
        let mut collector = CollectIds::default();
        collector.visit_page_section(page_section);
        collector.0
    }

    #[test]
    fn test_regenerated_section_shares_no_ids_with_original() {
        let mut original = PageSection::new(SectionNode::new());
        let mut nested = Stack::new();
        nested
            .children
            .push(StackChild::Content(ContentComponent::placeholder_text()));
        original.stacks[0].children.push(StackChild::Stack(nested));
        let mut grid = Grid::new(2);
        grid.children.push(ContentComponent::placeholder_text());
        original.grids.push(grid);

        let mut clone = original.clone();
        regenerate_section_ids(&mut clone);

        let before = all_ids(&original);
        let after = all_ids(&clone);
        assert_eq!(before.len(), after.len());
        for id in &after {
            assert!(!before.contains(id), "id {} survived regeneration", id);
        }
    }

    #[test]
    fn test_regenerated_ids_keep_type_tags() {
        let mut stack = Stack::seeded();
        regenerate_stack_ids(&mut stack);

        assert!(stack.id.starts_with("stack-"));
        match &stack.children[0] {
            StackChild::Content(content) => assert!(content.id().starts_with("heading-")),
            other => panic!("unexpected child {:?}", other),
        }
    }
}
