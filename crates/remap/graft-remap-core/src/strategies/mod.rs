//! Built-in remap strategies.

mod animator;
mod generic;
mod material;
mod menu;
mod override_table;

pub use animator::AnimatorGraphStrategy;
pub use generic::GenericStrategy;
pub use material::MaterialStrategy;
pub use menu::MenuStrategy;
pub use override_table::OverrideTableStrategy;
