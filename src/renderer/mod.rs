//! Rendering module
//!
//! The game draws into an abstract `Surface`. `SpriteBatch` converts a
//! recorded frame into vertex buffers for a GPU host.

pub mod batch;
pub mod draw;
pub mod vertex;

pub use batch::{Segment, SpriteBatch};
pub use draw::{DrawCommand, DrawList, GAME_OVER_TEXT, Surface, layout};
pub use vertex::{LineVertex, SpriteVertex};
