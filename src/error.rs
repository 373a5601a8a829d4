//! Error types for strata.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mesh, field, or segment operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A face references a vertex index outside the vertex list.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A vertex has no incident faces, so its normal is undefined.
    #[error("vertex {vertex} has no incident faces; vertex normal is undefined")]
    IsolatedVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// The bounding box has no strictly largest axis extent, so the
    /// normalization scale factor is undefined.
    #[error("bounding box extents are tied ({x}, {y}, {z}); normalization scale is undefined")]
    DegenerateExtent {
        /// Extent along the x axis.
        x: f64,
        /// Extent along the y axis.
        y: f64,
        /// Extent along the z axis.
        z: f64,
    },

    /// A scalar field and a mesh that must be index-aligned have different sizes.
    #[error("scalar field has {field} values but mesh has {mesh} vertices")]
    FieldSizeMismatch {
        /// Number of values in the field.
        field: usize,
        /// Number of vertices in the mesh.
        mesh: usize,
    },

    /// A vertex id is outside the mesh's vertex arena.
    #[error("vertex index {vertex} is out of range (mesh has {len} vertices)")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        len: usize,
    },

    /// A range remap was requested with an inverted target range.
    #[error("invalid target range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Requested minimum.
        min: f64,
        /// Requested maximum.
        max: f64,
    },

    /// The field's value range has collapsed to a single value, so an
    /// affine remap or discretization would divide by zero.
    #[error("scalar field range is degenerate (all values equal {value})")]
    DegenerateRange {
        /// The single value every entry holds.
        value: f64,
    },

    /// A scalar field source contained no values.
    #[error("scalar field source contains no values")]
    EmptyField,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a mesh or field from a file.
    #[error("failed to load {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving a mesh or field to a file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl Error {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
