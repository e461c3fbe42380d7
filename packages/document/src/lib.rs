//! # Pagecraft Document
//!
//! Data model for landing-page documents: the node types, id generation,
//! and read-only tree queries.
//!
//! A page is a flat list of [`PageSection`]s. Each section owns one
//! [`Container`] plus ordered collections of [`Stack`]s (which nest) and
//! [`Grid`]s (which hold content leaves only). Editing lives in the
//! `pagecraft-editor` crate; this crate knows nothing about mutations or
//! history.

pub mod id;
pub mod locator;
pub mod model;

pub use id::new_id;
pub use locator::{NodeRef, ParentRef};
pub use model::{
    Alignment, Axis, Container, ContainerWidth, ContentComponent, Grid, PageSection, SectionNode,
    Stack, StackChild,
};
