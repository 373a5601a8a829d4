//! File I/O.
//!
//! Meshes travel as a minimal polygon OBJ subset (see [`obj`]); scalar
//! fields travel as plain value-per-line files handled directly by
//! [`ScalarField::load`] and [`ScalarField::save`]. Other polygon formats
//! are out of scope.
//!
//! [`ScalarField::load`]: crate::field::ScalarField::load
//! [`ScalarField::save`]: crate::field::ScalarField::save

pub mod obj;
