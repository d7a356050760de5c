#![forbid(unsafe_code)]

use crate::error::Error;
use crate::vertex::Vertex;

/// One renderable frame: a bounded vertex list plus the sequence number of
/// the commit that produced it.
///
/// The vertex count is the length of the list, so count and contents can
/// never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    vertices: Vec<Vertex>,
    capacity: usize,
    sequence: u64,
}

impl GeometryBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
            sequence: 0,
        }
    }

    /// Append a vertex. The capacity is a hard ceiling.
    pub fn push(&mut self, vertex: Vertex) -> Result<(), Error> {
        if self.vertices.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.vertices.push(vertex);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Commit sequence number, `0` for a buffer that never held a frame.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data as raw bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertices written since `start`, for post-transforms over a group.
    pub(crate) fn tail_mut(&mut self, start: usize) -> &mut [Vertex] {
        &mut self.vertices[start..]
    }

    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.sequence = 0;
    }

    pub(crate) fn seal(&mut self, sequence: u64) {
        self.sequence = sequence;
    }
}
