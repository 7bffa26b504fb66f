pub mod traits;
pub mod engine;
pub mod result;

pub use engine::ShortestPathEngine;
pub use result::{ShortestPaths, VertexReport};
pub use traits::ShortestPathAlgorithm;
