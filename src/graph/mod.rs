pub mod edge;
pub mod handle;
pub mod node;
pub mod state;

pub use edge::*;
pub use handle::*;
pub use node::*;
pub use state::*;
