//! CPU-side preprocessing for bump-mapped rendering.
//!
//! A bump-map shader needs the light direction expressed in each vertex's
//! tangent space, so that normal-map perturbations are interpreted
//! consistently with the texture orientation. This crate derives that
//! per-vertex frame from the mesh's texture parametrization and stores the
//! encoded light vector back into the vertex data, ready for upload.
//!
//! It also provides the canonical edge keys used by mesh-topology maps
//! (adjacency, edge sharing).

pub mod core;
pub mod pipeline;
pub mod scene;
