//! Comprehensive mutation tests

use pagecraft_document::model::{
    ContentComponent, Grid, PageSection, SectionNode, Stack, StackChild,
};
use pagecraft_document::new_id;
use pagecraft_editor::{MoveDirection, Mutation, MutationError, NodeUpdate};

fn one_section() -> Vec<PageSection> {
    vec![PageSection::new(SectionNode::new())]
}

/// Total node count: sections + containers + stacks at any depth + grids +
/// content leaves.
fn node_count(sections: &[PageSection]) -> usize {
    fn stack_nodes(stack: &Stack) -> usize {
        1 + stack
            .children
            .iter()
            .map(|c| match c {
                StackChild::Stack(nested) => stack_nodes(nested),
                StackChild::Content(_) => 1,
            })
            .sum::<usize>()
    }
    sections
        .iter()
        .map(|ps| {
            2 + ps.stacks.iter().map(stack_nodes).sum::<usize>()
                + ps.grids.iter().map(|g| 1 + g.children.len()).sum::<usize>()
        })
        .sum()
}

#[test]
fn test_add_section_appends_scaffolded_section() {
    let sections = one_section();
    let first_id = sections[0].section.id.clone();

    let next = Mutation::AddSection {
        section: SectionNode::new(),
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next.len(), 2);
    assert_eq!(next[0].section.id, first_id);
    // New sections always land at the end, fully scaffolded
    assert_eq!(next[1].stacks.len(), 1);
    assert_eq!(next[1].stacks[0].children.len(), 2);
}

#[test]
fn test_add_stack_targets_section_and_container() {
    let sections = one_section();

    let by_section = Mutation::AddStack {
        target_id: sections[0].section.id.clone(),
        stack: Stack::new(),
    }
    .apply(&sections)
    .unwrap();
    assert_eq!(by_section[0].stacks.len(), 2);

    let by_container = Mutation::AddStack {
        target_id: sections[0].container.id.clone(),
        stack: Stack::new(),
    }
    .apply(&sections)
    .unwrap();
    assert_eq!(by_container[0].stacks.len(), 2);
}

#[test]
fn test_add_stack_nests_into_selected_stack() {
    let sections = one_section();
    let outer_id = sections[0].stacks[0].id.clone();

    let next = Mutation::AddStack {
        target_id: outer_id,
        stack: Stack::new(),
    }
    .apply(&sections)
    .unwrap();

    let outer = &next[0].stacks[0];
    // seeded heading + text, plus the nested stack
    assert_eq!(outer.children.len(), 3);
    match outer.children.last() {
        Some(StackChild::Stack(nested)) => {
            // New stacks are seeded with one placeholder text node
            assert_eq!(nested.children.len(), 1);
            assert!(matches!(
                nested.children[0],
                StackChild::Content(ContentComponent::Text { .. })
            ));
        }
        other => panic!("expected nested stack, got {:?}", other),
    }
}

#[test]
fn test_add_grid_seeds_one_placeholder_per_column() {
    let sections = one_section();

    let next = Mutation::AddGrid {
        target_id: sections[0].section.id.clone(),
        grid: Grid::new(3),
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next[0].grids.len(), 1);
    assert_eq!(next[0].grids[0].children.len(), 3);
}

#[test]
fn test_add_grid_rejects_stack_target() {
    let sections = one_section();
    let stack_id = sections[0].stacks[0].id.clone();

    let result = Mutation::AddGrid {
        target_id: stack_id.clone(),
        grid: Grid::new(2),
    }
    .apply(&sections);

    assert_eq!(result, Err(MutationError::InvalidTarget(stack_id)));
}

#[test]
fn test_add_content_to_stack_by_id() {
    let sections = one_section();
    let stack_id = sections[0].stacks[0].id.clone();

    let next = Mutation::AddContent {
        target_id: stack_id,
        content: ContentComponent::placeholder_text(),
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next[0].stacks[0].children.len(), 3);
}

#[test]
fn test_add_content_with_content_target_inserts_into_parent_stack() {
    let sections = one_section();
    // Select the seeded heading, not the stack
    let heading_id = sections[0].stacks[0].children[0].id().to_string();

    let next = Mutation::AddContent {
        target_id: heading_id,
        content: ContentComponent::placeholder_text(),
    }
    .apply(&sections)
    .unwrap();

    // Sibling insertion at the stack level, appended at the end
    assert_eq!(next[0].stacks[0].children.len(), 3);
}

#[test]
fn test_add_content_to_grid_by_grid_or_child_id() {
    let mut sections = one_section();
    let mut grid = Grid::new(2);
    grid.children.push(ContentComponent::placeholder_text());
    grid.children.push(ContentComponent::placeholder_text());
    let grid_id = grid.id.clone();
    let child_id = grid.children[0].id().to_string();
    sections[0].grids.push(grid);

    let by_grid = Mutation::AddContent {
        target_id: grid_id,
        content: ContentComponent::placeholder_text(),
    }
    .apply(&sections)
    .unwrap();
    assert_eq!(by_grid[0].grids[0].children.len(), 3);

    let by_child = Mutation::AddContent {
        target_id: child_id,
        content: ContentComponent::placeholder_text(),
    }
    .apply(&sections)
    .unwrap();
    assert_eq!(by_child[0].grids[0].children.len(), 3);
}

#[test]
fn test_delete_section_removes_whole_page_section() {
    let mut sections = one_section();
    sections.push(PageSection::new(SectionNode::new()));
    let doomed = sections[0].section.id.clone();

    let next = Mutation::Delete { node_id: doomed }.apply(&sections).unwrap();

    assert_eq!(next.len(), 1);
    assert_eq!(next[0].section.id, sections[1].section.id);
}

#[test]
fn test_delete_stack_removes_entire_subtree() {
    let mut sections = one_section();
    // stack A (2 seeded leaves) gains stack B with content C + D
    let mut inner = Stack::new();
    inner
        .children
        .push(StackChild::Content(ContentComponent::placeholder_text()));
    inner
        .children
        .push(StackChild::Content(ContentComponent::placeholder_text()));
    let inner_id = inner.id.clone();
    sections[0].stacks[0].children.push(StackChild::Stack(inner));

    let before = node_count(&sections);
    let next = Mutation::Delete { node_id: inner_id }.apply(&sections).unwrap();

    // Stack + its 2 descendants gone in one step
    assert_eq!(node_count(&next), before - 3);
    assert_eq!(next[0].stacks[0].children.len(), 2);
}

#[test]
fn test_delete_nested_stack_unreaches_its_content() {
    // Stack A contains Stack B contains content C
    let mut sections = one_section();
    sections[0].stacks[0].children.clear();
    let mut b = Stack::new();
    let c = ContentComponent::placeholder_text();
    let b_id = b.id.clone();
    let c_id = c.id().to_string();
    b.children.push(StackChild::Content(c));
    sections[0].stacks[0].children.push(StackChild::Stack(b));

    let next = Mutation::Delete { node_id: b_id.clone() }
        .apply(&sections)
        .unwrap();

    assert!(next[0].stacks[0].children.iter().all(|ch| ch.id() != b_id));
    assert!(pagecraft_document::locator::find_section(&c_id, &next).is_none());
}

#[test]
fn test_delete_grid_and_grid_child() {
    let mut sections = one_section();
    let mut grid = Grid::new(2);
    grid.children.push(ContentComponent::placeholder_text());
    grid.children.push(ContentComponent::placeholder_text());
    let grid_id = grid.id.clone();
    let child_id = grid.children[0].id().to_string();
    sections[0].grids.push(grid);

    let without_child = Mutation::Delete { node_id: child_id }.apply(&sections).unwrap();
    assert_eq!(without_child[0].grids[0].children.len(), 1);

    let without_grid = Mutation::Delete { node_id: grid_id }.apply(&sections).unwrap();
    assert!(without_grid[0].grids.is_empty());
}

#[test]
fn test_duplicate_grows_collection_by_exactly_one() {
    let sections = one_section();
    let stack_id = sections[0].stacks[0].id.clone();

    let next = Mutation::Duplicate { node_id: stack_id.clone() }
        .apply(&sections)
        .unwrap();

    assert_eq!(next[0].stacks.len(), 2);
    // Clone sits immediately after the source
    assert_eq!(next[0].stacks[0].id, stack_id);
    assert_ne!(next[0].stacks[1].id, stack_id);
}

#[test]
fn test_duplicate_regenerates_descendant_ids() {
    let sections = one_section();
    let stack_id = sections[0].stacks[0].id.clone();
    let original_leaf_ids: Vec<String> = sections[0].stacks[0]
        .children
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    let next = Mutation::Duplicate { node_id: stack_id }.apply(&sections).unwrap();

    let clone = &next[0].stacks[1];
    for child in &clone.children {
        assert!(
            !original_leaf_ids.contains(&child.id().to_string()),
            "descendant id {} was not regenerated",
            child.id()
        );
    }
}

#[test]
fn test_duplicate_grid_child_inserts_after_source() {
    let mut sections = one_section();
    let mut grid = Grid::new(3);
    for _ in 0..3 {
        grid.children.push(ContentComponent::placeholder_text());
    }
    let middle_id = grid.children[1].id().to_string();
    sections[0].grids.push(grid);

    let next = Mutation::Duplicate { node_id: middle_id.clone() }
        .apply(&sections)
        .unwrap();

    let children = &next[0].grids[0].children;
    assert_eq!(children.len(), 4);
    assert_eq!(children[1].id(), middle_id);
    assert_ne!(children[2].id(), middle_id);
}

#[test]
fn test_move_swaps_with_neighbor() {
    let mut sections = one_section();
    sections.push(PageSection::new(SectionNode::new()));
    let first = sections[0].section.id.clone();
    let second = sections[1].section.id.clone();

    let next = Mutation::Move {
        node_id: second.clone(),
        direction: MoveDirection::Up,
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next[0].section.id, second);
    assert_eq!(next[1].section.id, first);
}

#[test]
fn test_move_at_boundary_is_a_silent_no_op() {
    let mut sections = one_section();
    sections.push(PageSection::new(SectionNode::new()));
    let first = sections[0].section.id.clone();
    let last = sections[1].section.id.clone();

    let up = Mutation::Move {
        node_id: first,
        direction: MoveDirection::Up,
    }
    .apply(&sections)
    .unwrap();
    assert_eq!(up, sections);

    let down = Mutation::Move {
        node_id: last,
        direction: MoveDirection::Down,
    }
    .apply(&sections)
    .unwrap();
    assert_eq!(down, sections);
}

#[test]
fn test_move_inside_stack_children() {
    let sections = one_section();
    let ids: Vec<String> = sections[0].stacks[0]
        .children
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    let next = Mutation::Move {
        node_id: ids[1].clone(),
        direction: MoveDirection::Up,
    }
    .apply(&sections)
    .unwrap();

    let moved: Vec<&str> = next[0].stacks[0].children.iter().map(|c| c.id()).collect();
    assert_eq!(moved, vec![ids[1].as_str(), ids[0].as_str()]);
}

#[test]
fn test_update_replaces_value_in_place() {
    let sections = one_section();
    let mut section = sections[0].section.clone();
    section.background = "#101828".to_string();
    section.padding_y = 96;

    let next = Mutation::Update {
        node: NodeUpdate::Section(section.clone()),
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next[0].section, section);
    // Everything else untouched
    assert_eq!(next[0].container, sections[0].container);
}

#[test]
fn test_update_content_at_depth() {
    let sections = one_section();
    let heading_id = sections[0].stacks[0].children[0].id().to_string();

    let next = Mutation::Update {
        node: NodeUpdate::Content(ContentComponent::Heading {
            id: heading_id.clone(),
            text: "Launch week".to_string(),
            level: 1,
        }),
    }
    .apply(&sections)
    .unwrap();

    match &next[0].stacks[0].children[0] {
        StackChild::Content(ContentComponent::Heading { id, text, level }) => {
            assert_eq!(id, &heading_id);
            assert_eq!(text, "Launch week");
            assert_eq!(*level, 1);
        }
        other => panic!("expected heading, got {:?}", other),
    }
}

#[test]
fn test_update_with_stale_id_keeps_document_unchanged() {
    let sections = one_section();

    let next = Mutation::Update {
        node: NodeUpdate::Content(ContentComponent::Text {
            id: new_id("text"),
            text: "orphan".to_string(),
        }),
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next, sections);
}

#[test]
fn test_update_with_mismatched_kind_keeps_document_unchanged() {
    let sections = one_section();
    let stack_id = sections[0].stacks[0].id.clone();

    // A content-typed update aimed at a stack slot cannot match anything
    let next = Mutation::Update {
        node: NodeUpdate::Content(ContentComponent::Text {
            id: stack_id,
            text: "wrong shape".to_string(),
        }),
    }
    .apply(&sections)
    .unwrap();

    assert_eq!(next, sections);
}

#[test]
fn test_grid_column_update_grows_with_placeholders() {
    let mut sections = one_section();
    let mut grid = Grid::new(3);
    for _ in 0..3 {
        grid.children.push(ContentComponent::placeholder_text());
    }
    sections[0].grids.push(grid);
    let kept: Vec<String> = sections[0].grids[0]
        .children
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    let mut updated = sections[0].grids[0].clone();
    updated.columns = 5;
    let next = Mutation::Update {
        node: NodeUpdate::Grid(updated),
    }
    .apply(&sections)
    .unwrap();

    let children = &next[0].grids[0].children;
    assert_eq!(children.len(), 5);
    // First three preserved by position, last two fresh placeholders
    for (i, id) in kept.iter().enumerate() {
        assert_eq!(children[i].id(), id);
    }
    assert!(!kept.contains(&children[3].id().to_string()));
    assert!(!kept.contains(&children[4].id().to_string()));
}

#[test]
fn test_grid_column_update_shrinks_from_the_tail() {
    let mut sections = one_section();
    let mut grid = Grid::new(4);
    for _ in 0..4 {
        grid.children.push(ContentComponent::placeholder_text());
    }
    sections[0].grids.push(grid);
    let kept: Vec<String> = sections[0].grids[0]
        .children
        .iter()
        .take(2)
        .map(|c| c.id().to_string())
        .collect();

    let mut updated = sections[0].grids[0].clone();
    updated.columns = 2;
    let next = Mutation::Update {
        node: NodeUpdate::Grid(updated),
    }
    .apply(&sections)
    .unwrap();

    let children = &next[0].grids[0].children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id(), kept[0]);
    assert_eq!(children[1].id(), kept[1]);
}
