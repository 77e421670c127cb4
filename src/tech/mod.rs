//! Tech trees and research progress

pub mod state;
pub mod tree;

pub use state::{TechNode, TechState, TechStatus};
pub use tree::{find_tech, tree_for, Branch, TechDef};
