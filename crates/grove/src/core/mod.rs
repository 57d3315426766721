//! The node tree: storage, layout, event routing and focus.

/// Widget-facing context.
pub mod context;
/// Debug dump utilities.
pub mod dump;
/// Focus arbitration.
pub mod focus;
/// Node ID types.
pub mod id;
/// Position and size rules.
pub mod layout;
/// Node names.
pub mod name;
/// Node data.
pub mod node;
/// The node arena and its passes.
pub mod tree;

pub use context::Context;
pub use dump::dump;
pub use focus::FocusManager;
pub use id::NodeId;
pub use layout::Layout;
pub use node::{Node, NodeKind};
pub use name::NodeName;
pub use tree::Tree;
