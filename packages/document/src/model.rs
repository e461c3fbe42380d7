use crate::id::new_id;
use serde::{Deserialize, Serialize};

/// Root-level full-width band. Every page section starts with one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub id: String,
    pub background: String,
    /// Vertical padding in pixels, applied top and bottom.
    pub padding_y: u32,
}

impl SectionNode {
    pub fn new() -> Self {
        Self {
            id: new_id("section"),
            background: "#ffffff".to_string(),
            padding_y: 64,
        }
    }
}

impl Default for SectionNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Max-width variants for [`Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerWidth {
    Narrow,
    Normal,
    Wide,
    Full,
}

/// Max-width centering wrapper inside a section. The style descriptors are
/// CSS shorthand strings, kept verbatim from the property forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub width: ContainerWidth,
    pub padding: String,
    pub margin: String,
    pub border: String,
    pub shadow: String,
    pub background: String,
}

impl Container {
    /// The container built for a freshly added section.
    pub fn section_default() -> Self {
        Self {
            id: new_id("container"),
            width: ContainerWidth::Normal,
            padding: "0".to_string(),
            margin: "0 auto".to_string(),
            border: "none".to_string(),
            shadow: "none".to_string(),
            background: "transparent".to_string(),
        }
    }
}

/// Flex axis for [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Cross-axis alignment for stacks and grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
    Stretch,
}

/// Flex layout node. Children are further stacks (arbitrary nesting) or
/// content leaves, in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub id: String,
    pub axis: Axis,
    /// Gap between children in pixels.
    pub gap: u32,
    pub align: Alignment,
    pub children: Vec<StackChild>,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            id: new_id("stack"),
            axis: Axis::Vertical,
            gap: 16,
            align: Alignment::Stretch,
            children: Vec::new(),
        }
    }

    /// The stack built for a freshly added section: a heading + text pair,
    /// so a new section never renders empty.
    pub fn seeded() -> Self {
        let mut stack = Self::new();
        stack.children.push(StackChild::Content(ContentComponent::Heading {
            id: new_id("heading"),
            text: "New section".to_string(),
            level: 2,
        }));
        stack
            .children
            .push(StackChild::Content(ContentComponent::placeholder_text()));
        stack
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/// A stack child: either a nested stack or a content leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackChild {
    Stack(Stack),
    Content(ContentComponent),
}

impl StackChild {
    pub fn id(&self) -> &str {
        match self {
            StackChild::Stack(stack) => &stack.id,
            StackChild::Content(content) => content.id(),
        }
    }
}

/// CSS-grid layout node. Children are always content leaves; grids never
/// nest stacks or other grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub id: String,
    pub columns: usize,
    pub gap_x: u32,
    pub gap_y: u32,
    pub align: Alignment,
    pub children: Vec<ContentComponent>,
}

impl Grid {
    pub fn new(columns: usize) -> Self {
        Self {
            id: new_id("grid"),
            columns,
            gap_x: 16,
            gap_y: 16,
            align: Alignment::Stretch,
            children: Vec::new(),
        }
    }
}

/// Content leaf. Each variant carries its required payload (`text` or
/// `src`) plus the attributes its property form edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentComponent {
    Heading {
        id: String,
        text: String,
        level: u8,
    },
    Text {
        id: String,
        text: String,
    },
    Button {
        id: String,
        text: String,
        href: Option<String>,
    },
    Image {
        id: String,
        src: String,
        alt: String,
    },
    Spacer {
        id: String,
        /// Height in pixels.
        height: u32,
    },
}

impl ContentComponent {
    /// The placeholder leaf used to seed new stacks and pad grid columns.
    pub fn placeholder_text() -> Self {
        ContentComponent::Text {
            id: new_id("text"),
            text: "New text block".to_string(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ContentComponent::Heading { id, .. }
            | ContentComponent::Text { id, .. }
            | ContentComponent::Button { id, .. }
            | ContentComponent::Image { id, .. }
            | ContentComponent::Spacer { id, .. } => id,
        }
    }

    pub fn id_mut(&mut self) -> &mut String {
        match self {
            ContentComponent::Heading { id, .. }
            | ContentComponent::Text { id, .. }
            | ContentComponent::Button { id, .. }
            | ContentComponent::Image { id, .. }
            | ContentComponent::Spacer { id, .. } => id,
        }
    }

    /// Type tag used as the id prefix for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ContentComponent::Heading { .. } => "heading",
            ContentComponent::Text { .. } => "text",
            ContentComponent::Button { .. } => "button",
            ContentComponent::Image { .. } => "image",
            ContentComponent::Spacer { .. } => "spacer",
        }
    }
}

/// The unit of top-level document structure. A document is a
/// `Vec<PageSection>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub section: SectionNode,
    pub container: Container,
    pub stacks: Vec<Stack>,
    pub grids: Vec<Grid>,
}

impl PageSection {
    /// Assemble a full section around the given band: default container and
    /// one seeded stack.
    pub fn new(section: SectionNode) -> Self {
        Self {
            section,
            container: Container::section_default(),
            stacks: vec![Stack::seeded()],
            grids: Vec::new(),
        }
    }
}
