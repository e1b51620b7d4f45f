// Gameplay: the player core, the scene root and the arena hosting them

pub mod arena;
pub mod player;
pub mod scene;

pub use arena::Arena;
