// ============================================
// Section Module - Данные секции меша
// ============================================

mod bounds;
mod section;
mod vertex;

pub use bounds::BoundingBox;
pub use section::MeshSection;
pub use vertex::{ProcMeshTangent, Vertex, VERTEX_SIZE};
