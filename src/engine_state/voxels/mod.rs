//! # Voxel Engine Core
//!
//! This module contains the voxel world itself: block definitions, the chunks
//! that store them, and the world that ties chunks, terrain and buildings
//! together.
//!
//! ## Architecture
//!
//! * **Block**: block ids, the static catalog of their properties, face sides
//! * **Chunk**: fixed 16³ block grids with neighbour links and cached meshes
//! * **World**: the chunk arena, terrain generation, edits, buildings, picking
//! * **Noise oracle**: the 2D scalar field terrain generation samples
//!
//! ## Data Flow
//!
//! 1. Generation or gameplay writes block ids through the world
//! 2. The world flags the chunks whose meshes can see the change
//! 3. The next draw remeshes flagged chunks and submits every pass

pub mod block;
pub mod chunk;
pub mod noise_oracle;
pub mod world;
