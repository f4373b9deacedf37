// ============================================
// Proc Mesh - Секции процедурного меша
// ============================================
// Секция = вершины + индексы + bounding box для одного материала.
// Два кодека: безопасный (поле за полем) и быстрый (bulk copy, unsafe).

pub mod section;
pub mod codec;
pub mod mesh;

// Re-exports
pub use section::{BoundingBox, MeshSection, ProcMeshTangent, Vertex};
pub use codec::{
    encoded_len, CodecConfig, FastCodec, FastUnsafeDeserializer, MeshCodecError, Result, SafeCodec,
};
pub use mesh::ProcMesh;
