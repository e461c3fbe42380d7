//! # Document Mutations
//!
//! High-level semantic operations on page documents.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents a semantic operation
//! 2. **Validated**: Preconditions are checked before any work
//! 3. **Pure**: `apply` takes the current snapshot and returns a brand-new
//!    `Vec<PageSection>`; the input is never touched
//!
//! ## Mutation Semantics
//!
//! ### Delete
//! - A section id removes the whole page section
//! - Any other id is filtered out of every stack (before recursing, so a
//!   stack takes its entire subtree with it), the grids array, and every
//!   grid's children
//!
//! ### Duplicate
//! - The clone lands immediately after the source in the same collection
//! - Every id in the cloned subtree is regenerated
//!
//! ### Move
//! - Swaps the node with its neighbor in the containing ordered collection
//! - Out-of-bounds moves (already first/last) are silent no-ops
//!
//! ### Update
//! - Full value replacement at the slot with the matching id, preserving
//!   position; a payload whose kind cannot occupy the slot matches nothing
//!   and the document is returned unchanged
//! - A grid update resizes `children` to the new `columns` count

use crate::regenerate::{
    regenerate_child_ids, regenerate_content_ids, regenerate_grid_ids, regenerate_section_ids,
    regenerate_stack_ids,
};
use crate::selection::{resolve_type, ElementType};
use pagecraft_document::model::{
    Container, ContentComponent, Grid, PageSection, SectionNode, Stack, StackChild,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction for [`Mutation::Move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    fn delta(self) -> isize {
        match self {
            MoveDirection::Up => -1,
            MoveDirection::Down => 1,
        }
    }
}

/// Typed payload for [`Mutation::Update`]. The variant names the slot kind
/// the value may occupy; an id that lives in a different kind of slot can
/// never match, which is what shields the tree from a stale editor panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeUpdate {
    Section(SectionNode),
    Container(Container),
    Stack(Stack),
    Grid(Grid),
    Content(ContentComponent),
}

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new page section built from the given band
    AddSection { section: SectionNode },

    /// Append a stack to a section (by section/container id) or to another
    /// stack at any depth
    AddStack { target_id: String, stack: Stack },

    /// Append a grid to a section (by section/container id)
    AddGrid { target_id: String, grid: Grid },

    /// Append a content leaf to a stack or grid; a content target means
    /// "insert next to it, into its parent"
    AddContent {
        target_id: String,
        content: ContentComponent,
    },

    /// Remove a node and its entire subtree
    Delete { node_id: String },

    /// Insert a fresh-id clone immediately after the node
    Duplicate { node_id: String },

    /// Swap the node with its neighbor in the containing collection
    Move {
        node_id: String,
        direction: MoveDirection,
    },

    /// Replace a node wholesale, preserving its position
    Update { node: NodeUpdate },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("No element matches id: {0}")]
    TargetNotFound(String),

    #[error("Element {0} cannot receive this child")]
    InvalidTarget(String),
}

/// Result of applying a mutation through a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// Whether the document actually changed (boundary moves and guarded
    /// updates leave it as-is)
    pub changed: bool,
}

impl Mutation {
    fn name(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "add_section",
            Mutation::AddStack { .. } => "add_stack",
            Mutation::AddGrid { .. } => "add_grid",
            Mutation::AddContent { .. } => "add_content",
            Mutation::Delete { .. } => "delete",
            Mutation::Duplicate { .. } => "duplicate",
            Mutation::Move { .. } => "move",
            Mutation::Update { .. } => "update",
        }
    }

    /// Apply the mutation to a snapshot, returning the next snapshot
    pub fn apply(&self, sections: &[PageSection]) -> Result<Vec<PageSection>, MutationError> {
        self.validate(sections)?;
        tracing::debug!("applying {}", self.name());

        let next = match self {
            Mutation::AddSection { section } => apply_add_section(sections, section),
            Mutation::AddStack { target_id, stack } => apply_add_stack(sections, target_id, stack),
            Mutation::AddGrid { target_id, grid } => apply_add_grid(sections, target_id, grid),
            Mutation::AddContent { target_id, content } => {
                apply_add_content(sections, target_id, content)
            }
            Mutation::Delete { node_id } => apply_delete(sections, node_id),
            Mutation::Duplicate { node_id } => apply_duplicate(sections, node_id),
            Mutation::Move { node_id, direction } => apply_move(sections, node_id, *direction),
            Mutation::Update { node } => apply_update(sections, node),
        };
        Ok(next)
    }

    /// Validate preconditions without applying
    pub fn validate(&self, sections: &[PageSection]) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection { .. } => Ok(()),

            Mutation::AddStack { target_id, .. } => match resolve_type(target_id, sections) {
                Some(ElementType::Section | ElementType::Container | ElementType::Stack) => Ok(()),
                Some(_) => Err(MutationError::InvalidTarget(target_id.clone())),
                None => Err(MutationError::TargetNotFound(target_id.clone())),
            },

            Mutation::AddGrid { target_id, .. } => match resolve_type(target_id, sections) {
                Some(ElementType::Section | ElementType::Container) => Ok(()),
                Some(_) => Err(MutationError::InvalidTarget(target_id.clone())),
                None => Err(MutationError::TargetNotFound(target_id.clone())),
            },

            Mutation::AddContent { target_id, .. } => match resolve_type(target_id, sections) {
                Some(ElementType::Stack | ElementType::Grid | ElementType::Content) => Ok(()),
                Some(_) => Err(MutationError::InvalidTarget(target_id.clone())),
                None => Err(MutationError::TargetNotFound(target_id.clone())),
            },

            Mutation::Delete { node_id }
            | Mutation::Duplicate { node_id }
            | Mutation::Move { node_id, .. } => {
                if resolve_type(node_id, sections).is_some() {
                    Ok(())
                } else {
                    Err(MutationError::TargetNotFound(node_id.clone()))
                }
            }

            // A stale update is a silent keep-original, not an error
            Mutation::Update { .. } => Ok(()),
        }
    }
}

fn apply_add_section(sections: &[PageSection], section: &SectionNode) -> Vec<PageSection> {
    let mut next = sections.to_vec();
    next.push(PageSection::new(section.clone()));
    next
}

fn apply_add_stack(sections: &[PageSection], target_id: &str, stack: &Stack) -> Vec<PageSection> {
    let mut seeded = stack.clone();
    seeded
        .children
        .push(StackChild::Content(ContentComponent::placeholder_text()));

    let mut next = sections.to_vec();
    if let Some(idx) = next
        .iter()
        .position(|ps| ps.section.id == target_id || ps.container.id == target_id)
    {
        next[idx].stacks.push(seeded);
        return next;
    }
    'sections: for ps in next.iter_mut() {
        for stack in ps.stacks.iter_mut() {
            if insert_stack_in(stack, target_id, &seeded) {
                break 'sections;
            }
        }
    }
    next
}

fn insert_stack_in(stack: &mut Stack, target_id: &str, new_stack: &Stack) -> bool {
    if stack.id == target_id {
        stack.children.push(StackChild::Stack(new_stack.clone()));
        return true;
    }
    for child in stack.children.iter_mut() {
        if let StackChild::Stack(nested) = child {
            if insert_stack_in(nested, target_id, new_stack) {
                return true;
            }
        }
    }
    false
}

fn apply_add_grid(sections: &[PageSection], target_id: &str, grid: &Grid) -> Vec<PageSection> {
    // One placeholder per column, so the grid never renders empty
    let mut seeded = grid.clone();
    resize_grid_children(&mut seeded);

    let mut next = sections.to_vec();
    if let Some(idx) = next
        .iter()
        .position(|ps| ps.section.id == target_id || ps.container.id == target_id)
    {
        next[idx].grids.push(seeded);
    }
    next
}

fn apply_add_content(
    sections: &[PageSection],
    target_id: &str,
    content: &ContentComponent,
) -> Vec<PageSection> {
    let mut next = sections.to_vec();

    // Stacks first: a stack id appends into it, a content id appends next
    // to it in its parent stack
    let mut placed = false;
    'stacks: for ps in next.iter_mut() {
        for stack in ps.stacks.iter_mut() {
            if insert_content_in(stack, target_id, content) {
                placed = true;
                break 'stacks;
            }
        }
    }
    if !placed {
        // Then grids, by grid id or by one of the grid's children
        'grids: for ps in next.iter_mut() {
            for grid in ps.grids.iter_mut() {
                if grid.id == target_id || grid.children.iter().any(|c| c.id() == target_id) {
                    grid.children.push(content.clone());
                    break 'grids;
                }
            }
        }
    }
    next
}

fn insert_content_in(stack: &mut Stack, target_id: &str, content: &ContentComponent) -> bool {
    if stack.id == target_id {
        stack.children.push(StackChild::Content(content.clone()));
        return true;
    }
    if stack
        .children
        .iter()
        .any(|c| matches!(c, StackChild::Content(existing) if existing.id() == target_id))
    {
        stack.children.push(StackChild::Content(content.clone()));
        return true;
    }
    for child in stack.children.iter_mut() {
        if let StackChild::Stack(nested) = child {
            if insert_content_in(nested, target_id, content) {
                return true;
            }
        }
    }
    false
}

fn apply_delete(sections: &[PageSection], node_id: &str) -> Vec<PageSection> {
    if sections.iter().any(|ps| ps.section.id == node_id) {
        return sections
            .iter()
            .filter(|ps| ps.section.id != node_id)
            .cloned()
            .collect();
    }

    let mut next = sections.to_vec();
    for ps in next.iter_mut() {
        ps.stacks.retain(|s| s.id != node_id);
        for stack in ps.stacks.iter_mut() {
            delete_in_stack(stack, node_id);
        }
        ps.grids.retain(|g| g.id != node_id);
        for grid in ps.grids.iter_mut() {
            grid.children.retain(|c| c.id() != node_id);
        }
    }
    next
}

fn delete_in_stack(stack: &mut Stack, node_id: &str) {
    // Filter before recursing: removing a stack takes its subtree with it
    stack.children.retain(|c| c.id() != node_id);
    for child in stack.children.iter_mut() {
        if let StackChild::Stack(nested) = child {
            delete_in_stack(nested, node_id);
        }
    }
}

fn apply_duplicate(sections: &[PageSection], node_id: &str) -> Vec<PageSection> {
    let mut next = sections.to_vec();

    if let Some(idx) = next.iter().position(|ps| ps.section.id == node_id) {
        let mut clone = next[idx].clone();
        regenerate_section_ids(&mut clone);
        next.insert(idx + 1, clone);
        return next;
    }
    for ps in next.iter_mut() {
        if duplicate_in_section(ps, node_id) {
            break;
        }
    }
    next
}

fn duplicate_in_section(ps: &mut PageSection, node_id: &str) -> bool {
    if let Some(idx) = ps.stacks.iter().position(|s| s.id == node_id) {
        let mut clone = ps.stacks[idx].clone();
        regenerate_stack_ids(&mut clone);
        ps.stacks.insert(idx + 1, clone);
        return true;
    }
    for stack in ps.stacks.iter_mut() {
        if duplicate_in_children(&mut stack.children, node_id) {
            return true;
        }
    }
    if let Some(idx) = ps.grids.iter().position(|g| g.id == node_id) {
        let mut clone = ps.grids[idx].clone();
        regenerate_grid_ids(&mut clone);
        ps.grids.insert(idx + 1, clone);
        return true;
    }
    for grid in ps.grids.iter_mut() {
        if let Some(idx) = grid.children.iter().position(|c| c.id() == node_id) {
            let mut clone = grid.children[idx].clone();
            regenerate_content_ids(&mut clone);
            grid.children.insert(idx + 1, clone);
            return true;
        }
    }
    false
}

fn duplicate_in_children(children: &mut Vec<StackChild>, node_id: &str) -> bool {
    if let Some(idx) = children.iter().position(|c| c.id() == node_id) {
        let mut clone = children[idx].clone();
        regenerate_child_ids(&mut clone);
        children.insert(idx + 1, clone);
        return true;
    }
    for child in children.iter_mut() {
        if let StackChild::Stack(nested) = child {
            if duplicate_in_children(&mut nested.children, node_id) {
                return true;
            }
        }
    }
    false
}

fn apply_move(
    sections: &[PageSection],
    node_id: &str,
    direction: MoveDirection,
) -> Vec<PageSection> {
    let delta = direction.delta();
    let mut next = sections.to_vec();

    if let Some(idx) = next.iter().position(|ps| ps.section.id == node_id) {
        swap_by_delta(&mut next, idx, delta);
        return next;
    }
    for ps in next.iter_mut() {
        if move_in_section(ps, node_id, delta) {
            break;
        }
    }
    next
}

fn move_in_section(ps: &mut PageSection, node_id: &str, delta: isize) -> bool {
    if let Some(idx) = ps.stacks.iter().position(|s| s.id == node_id) {
        swap_by_delta(&mut ps.stacks, idx, delta);
        return true;
    }
    for stack in ps.stacks.iter_mut() {
        if move_in_children(&mut stack.children, node_id, delta) {
            return true;
        }
    }
    if let Some(idx) = ps.grids.iter().position(|g| g.id == node_id) {
        swap_by_delta(&mut ps.grids, idx, delta);
        return true;
    }
    for grid in ps.grids.iter_mut() {
        if let Some(idx) = grid.children.iter().position(|c| c.id() == node_id) {
            swap_by_delta(&mut grid.children, idx, delta);
            return true;
        }
    }
    false
}

fn move_in_children(children: &mut Vec<StackChild>, node_id: &str, delta: isize) -> bool {
    if let Some(idx) = children.iter().position(|c| c.id() == node_id) {
        swap_by_delta(children, idx, delta);
        return true;
    }
    for child in children.iter_mut() {
        if let StackChild::Stack(nested) = child {
            if move_in_children(&mut nested.children, node_id, delta) {
                return true;
            }
        }
    }
    false
}

/// Swap `items[idx]` with its neighbor at `idx + delta`. Out-of-bounds is
/// a no-op.
fn swap_by_delta<T>(items: &mut [T], idx: usize, delta: isize) {
    let target = idx as isize + delta;
    if target < 0 || target >= items.len() as isize {
        return;
    }
    items.swap(idx, target as usize);
}

fn apply_update(sections: &[PageSection], node: &NodeUpdate) -> Vec<PageSection> {
    let mut next = sections.to_vec();
    match node {
        NodeUpdate::Section(section) => {
            if let Some(idx) = next.iter().position(|ps| ps.section.id == section.id) {
                next[idx].section = section.clone();
            }
        }
        NodeUpdate::Container(container) => {
            if let Some(idx) = next.iter().position(|ps| ps.container.id == container.id) {
                next[idx].container = container.clone();
            }
        }
        NodeUpdate::Stack(updated) => {
            'outer: for ps in next.iter_mut() {
                if let Some(idx) = ps.stacks.iter().position(|s| s.id == updated.id) {
                    ps.stacks[idx] = updated.clone();
                    break;
                }
                for stack in ps.stacks.iter_mut() {
                    if replace_stack_in(stack, updated) {
                        break 'outer;
                    }
                }
            }
        }
        NodeUpdate::Grid(updated) => {
            'outer: for ps in next.iter_mut() {
                for grid in ps.grids.iter_mut() {
                    if grid.id == updated.id {
                        *grid = updated.clone();
                        // Column count drives the children: pad new slots
                        // with placeholders, shrink drops the tail
                        resize_grid_children(grid);
                        break 'outer;
                    }
                }
            }
        }
        NodeUpdate::Content(updated) => {
            'outer: for ps in next.iter_mut() {
                for stack in ps.stacks.iter_mut() {
                    if replace_content_in(stack, updated) {
                        break 'outer;
                    }
                }
                for grid in ps.grids.iter_mut() {
                    if let Some(idx) = grid.children.iter().position(|c| c.id() == updated.id()) {
                        grid.children[idx] = updated.clone();
                        break 'outer;
                    }
                }
            }
        }
    }
    next
}

fn replace_stack_in(stack: &mut Stack, updated: &Stack) -> bool {
    for child in stack.children.iter_mut() {
        if let StackChild::Stack(nested) = child {
            if nested.id == updated.id {
                *nested = updated.clone();
                return true;
            }
            if replace_stack_in(nested, updated) {
                return true;
            }
        }
    }
    false
}

fn replace_content_in(stack: &mut Stack, updated: &ContentComponent) -> bool {
    for child in stack.children.iter_mut() {
        match child {
            StackChild::Content(existing) if existing.id() == updated.id() => {
                *existing = updated.clone();
                return true;
            }
            StackChild::Stack(nested) => {
                if replace_content_in(nested, updated) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

fn resize_grid_children(grid: &mut Grid) {
    if grid.children.len() > grid.columns {
        grid.children.truncate(grid.columns);
    }
    while grid.children.len() < grid.columns {
        grid.children.push(ContentComponent::placeholder_text());
    }
}
