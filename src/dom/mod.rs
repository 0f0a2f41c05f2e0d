pub mod html;
pub mod node;
pub mod tree;
