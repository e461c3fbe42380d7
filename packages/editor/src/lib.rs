//! # Pagecraft Editor
//!
//! Core document editing engine for Pagecraft landing pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: node types + locator queries      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: snapshots + mutations               │
//! │  - Apply mutations with validation          │
//! │  - Bounded snapshot undo/redo history       │
//! │  - Selection + outline projection           │
//! │  - Load/save/import/export boundary         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer (external): snapshot → visuals     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are immutable**: every mutation takes the current
//!    document slice and returns a brand-new `Vec<PageSection>`.
//! 2. **History is linear**: a fresh edit discards the redo branch; the
//!    stack is bounded and evicts its oldest entries.
//! 3. **Not-found is not an error**: stale selection ids resolve to
//!    `None` and operations against them change nothing.
//! 4. **UI concerns are injected**: confirmation dialogs and advisory
//!    messages go through the [`EditorPrompt`] capability, never inline.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditSession, Mutation};
//! use pagecraft_document::model::SectionNode;
//!
//! let mut session = EditSession::new();
//! session.add_section(SectionNode::new());
//!
//! let stack_id = session.document()[0].stacks[0].id.clone();
//! session.set_selection(Some(stack_id));
//! session.duplicate_selected();
//!
//! session.undo();
//! session.redo();
//! ```

mod errors;
mod history;
mod mutations;
mod outline;
mod regenerate;
mod selection;
mod session;
mod store;

pub use errors::EditorError;
pub use history::History;
pub use mutations::{MoveDirection, Mutation, MutationError, MutationResult, NodeUpdate};
pub use outline::{build_outline, ExpansionState, OutlineNode};
pub use regenerate::{
    regenerate_content_ids, regenerate_grid_ids, regenerate_section_ids, regenerate_stack_ids,
};
pub use selection::{resolve_node, resolve_type, ElementType};
pub use session::{EditSession, EditorPrompt, SilentPrompt};
pub use store::{export_json, import_json, DocumentStore, FileStore, MemoryStore};

// Re-export the model for convenience
pub use pagecraft_document::model::PageSection;
