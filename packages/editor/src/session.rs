//! # Edit Session
//!
//! The session is the explicit state container for one editing context:
//! the document history, the current selection, and the injected UI
//! capability for confirmations and advisory messages.
//!
//! Named operations mirror the editor's command surface (undo, redo,
//! save, delete-selected, duplicate-selected, move-selected) so keyboard
//! bindings stay a thin external concern. Selection-driven operations
//! never error: a missing or stale selection is reported through the
//! prompt and leaves the document untouched.

use crate::errors::EditorError;
use crate::history::History;
use crate::mutations::{MoveDirection, Mutation, MutationResult};
use crate::selection::{resolve_node, resolve_type, ElementType};
use crate::store::{self, DocumentStore};
use pagecraft_document::locator::NodeRef;
use pagecraft_document::model::{ContentComponent, Grid, PageSection, SectionNode, Stack};

/// UI capability the session requests from its caller. Keeps dialogs out
/// of the core and makes every operation testable.
pub trait EditorPrompt {
    /// Ask the user to confirm a destructive action
    fn confirm(&self, message: &str) -> bool;

    /// Show a non-blocking advisory message
    fn notify(&self, message: &str);
}

/// Default prompt: confirms everything, drops advisories
#[derive(Debug, Default)]
pub struct SilentPrompt;

impl EditorPrompt for SilentPrompt {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn notify(&self, message: &str) {
        tracing::debug!("advisory: {}", message);
    }
}

/// Single editing session over one document
pub struct EditSession {
    history: History<Vec<PageSection>>,

    /// Currently selected node id, if any. May go stale after deletes;
    /// resolvers treat stale ids as "nothing selected".
    selection: Option<String>,

    /// Increments on every recorded edit
    version: u64,

    prompt: Box<dyn EditorPrompt>,
}

impl EditSession {
    /// Create a session over an empty document
    pub fn new() -> Self {
        Self::with_prompt(Box::new(SilentPrompt))
    }

    /// Create a session with a custom prompt capability
    pub fn with_prompt(prompt: Box<dyn EditorPrompt>) -> Self {
        Self {
            history: History::new(Vec::new()),
            selection: None,
            version: 0,
            prompt,
        }
    }

    /// Create a session over an existing document
    pub fn with_document(sections: Vec<PageSection>) -> Self {
        let mut session = Self::new();
        session.history = History::new(sections);
        session
    }

    pub fn document(&self) -> &[PageSection] {
        self.history.current()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn set_selection(&mut self, id: Option<String>) {
        self.selection = id;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a mutation and record the new snapshot. No-change
    /// applications (boundary moves, guarded updates) record nothing.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let next = mutation.apply(self.history.current())?;
        let changed = next != *self.history.current();
        if changed {
            self.version += 1;
            self.history.set_state(next);
        }
        Ok(MutationResult {
            version: self.version,
            changed,
        })
    }

    /// Step back one snapshot. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.echo_replay();
        true
    }

    /// Step forward one snapshot. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.echo_replay();
        true
    }

    // The UI layer re-renders after a replay and funnels the restored
    // snapshot back through set_state; the history's in-flight flag
    // swallows exactly that call. Issuing the echo here keeps the flag
    // from leaking into the next real edit.
    fn echo_replay(&mut self) {
        let restored = self.history.current().clone();
        self.history.set_state(restored);
    }

    // --- Command surface ---------------------------------------------

    /// Append a new section to the end of the document
    pub fn add_section(&mut self, section: SectionNode) -> MutationResult {
        self.apply_reported(Mutation::AddSection { section })
    }

    /// Append a stack to the selected section or stack
    pub fn add_stack_to_selection(&mut self, stack: Stack) -> MutationResult {
        let Some(target_id) = self.selection.clone() else {
            self.prompt.notify("Select a section or stack first");
            return self.unchanged();
        };
        self.apply_reported(Mutation::AddStack { target_id, stack })
    }

    /// Append a grid to the selected section
    pub fn add_grid_to_selection(&mut self, grid: Grid) -> MutationResult {
        let Some(target_id) = self.selection.clone() else {
            self.prompt.notify("Select a section first");
            return self.unchanged();
        };
        self.apply_reported(Mutation::AddGrid { target_id, grid })
    }

    /// Append a content leaf to the selected stack or grid
    pub fn add_content_to_selection(&mut self, content: ContentComponent) -> MutationResult {
        let Some(target_id) = self.selection.clone() else {
            self.prompt.notify("Select a stack or grid first");
            return self.unchanged();
        };
        self.apply_reported(Mutation::AddContent { target_id, content })
    }

    /// Delete the selected node after confirmation
    pub fn delete_selected(&mut self) -> MutationResult {
        let Some(node_id) = self.selection.clone() else {
            self.prompt.notify("Select an element to delete");
            return self.unchanged();
        };
        if !self.prompt.confirm("Delete the selected element?") {
            return self.unchanged();
        }
        let result = self.apply_reported(Mutation::Delete { node_id });
        if result.changed {
            self.selection = None;
        }
        result
    }

    /// Duplicate the selected node in place
    pub fn duplicate_selected(&mut self) -> MutationResult {
        let Some(node_id) = self.selection.clone() else {
            self.prompt.notify("Select an element to duplicate");
            return self.unchanged();
        };
        self.apply_reported(Mutation::Duplicate { node_id })
    }

    /// Move the selected node within its collection
    pub fn move_selected(&mut self, direction: MoveDirection) -> MutationResult {
        let Some(node_id) = self.selection.clone() else {
            self.prompt.notify("Select an element to move");
            return self.unchanged();
        };
        self.apply_reported(Mutation::Move { node_id, direction })
    }

    fn apply_reported(&mut self, mutation: Mutation) -> MutationResult {
        match self.apply(mutation) {
            Ok(result) => result,
            Err(err) => {
                self.prompt.notify(&err.to_string());
                self.unchanged()
            }
        }
    }

    fn unchanged(&self) -> MutationResult {
        MutationResult {
            version: self.version,
            changed: false,
        }
    }

    // --- Rendering surface -------------------------------------------

    /// Structural role of the selected node, for routing property forms
    pub fn selected_element_type(&self) -> Option<ElementType> {
        let id = self.selection.as_deref()?;
        resolve_type(id, self.document())
    }

    /// The selected node itself, for the active property form
    pub fn selected_element(&self) -> Option<NodeRef<'_>> {
        let id = self.selection.as_deref()?;
        resolve_node(id, self.document())
    }

    // --- Persistence boundary ----------------------------------------

    /// Seed the session from a persisted document. Ignored once the user
    /// has edited, so a slow load cannot wipe their work. Returns whether
    /// a document was found.
    pub fn load_initial(&mut self, store: &dyn DocumentStore) -> Result<bool, EditorError> {
        match store.load()? {
            Some(sections) => {
                tracing::debug!("loaded {} sections", sections.len());
                self.history.initialize(sections);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist the current snapshot, fire-and-forget
    pub fn save(&self, store: &dyn DocumentStore) -> Result<(), EditorError> {
        store.save(self.document())?;
        Ok(())
    }

    /// Serialize the current document verbatim
    pub fn export_json(&self) -> Result<String, EditorError> {
        Ok(store::export_json(self.document())?)
    }

    /// Replace the whole document from an exported file and start a fresh
    /// history context
    pub fn import_json(&mut self, json: &str) -> Result<(), EditorError> {
        let sections = store::import_json(json)?;
        self.history.set_state(sections);
        self.history.clear();
        self.selection = None;
        self.version += 1;
        Ok(())
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
