//! Per-vertex scalar fields.
//!
//! A [`ScalarField`] is a dense array of `f64` values, one per mesh vertex,
//! with a tracked value range. It knows nothing about mesh topology; pairing
//! with a specific mesh is a length check performed where the two meet (see
//! [`Segment::from_seed`]).
//!
//! Loading a field rescales it to the default range (-50..50) so that raw
//! data and discretized class labels are numerically comparable.
//!
//! [`Segment::from_seed`]: crate::region::Segment::from_seed

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default lower bound of the range fields are expanded to on load.
pub const DEFAULT_MIN: f64 = -50.0;

/// Default upper bound of the range fields are expanded to on load.
pub const DEFAULT_MAX: f64 = 50.0;

/// A dense per-vertex scalar attribute array with a tracked value range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarField {
    min: f64,
    max: f64,
    data: Vec<f64>,
}

impl ScalarField {
    /// Create a new empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field from raw values, tracking their extremes.
    pub fn from_values(values: Vec<f64>) -> Self {
        let mut field = Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            data: values,
        };

        for &v in &field.data {
            field.min = field.min.min(v);
            field.max = field.max.max(v);
        }

        if field.data.is_empty() {
            field.min = 0.0;
            field.max = 0.0;
        }

        field
    }

    /// Get the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the field holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The tracked minimum value.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The tracked maximum value.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Get the value at an index (the vertex id it is aligned with).
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        self.data[i]
    }

    /// All values, in index order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Load a field from a file of whitespace/newline-delimited values.
    ///
    /// Values are appended in reading order and the running range tracked;
    /// on completion the field is expanded to the default range
    /// (-50..50).
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened, [`Error::LoadError`] for
    /// a token that does not parse as a float, [`Error::EmptyField`] for a
    /// source with no values, and [`Error::DegenerateRange`] when every
    /// value is identical (the default expansion is undefined).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;

        let mut values = Vec::new();
        for token in text.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| Error::LoadError {
                path: path.to_path_buf(),
                message: format!("invalid scalar value '{}'", token),
            })?;
            values.push(value);
        }

        if values.is_empty() {
            return Err(Error::EmptyField);
        }

        let mut field = Self::from_values(values);
        field.expand(DEFAULT_MIN, DEFAULT_MAX)?;

        debug!(values = field.len(), min = field.min, max = field.max, "loaded scalar field");

        Ok(field)
    }

    /// Save the field to a file, one value per line in index order.
    ///
    /// # Errors
    ///
    /// [`Error::SaveError`] if the destination cannot be created, and
    /// [`Error::Io`] if writing to it fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::SaveError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut writer = BufWriter::new(file);

        for v in &self.data {
            writeln!(writer, "{}", v)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Affinely remap every value from the current range to `[new_min, new_max]`.
    ///
    /// Computes `a = (new_max - new_min) / (max - min)` and
    /// `b = new_min - a * min`, maps each value through `v * a + b`, and
    /// updates
    /// the tracked range.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] when `new_min > new_max` and
    /// [`Error::DegenerateRange`] when the current range has collapsed to a
    /// single value. The data is left untouched in both cases.
    pub fn expand(&mut self, new_min: f64, new_max: f64) -> Result<()> {
        if new_min > new_max {
            warn!(new_min, new_max, "expand called with inverted range; aborting");
            return Err(Error::InvalidRange { min: new_min, max: new_max });
        }

        if self.max == self.min {
            return Err(Error::DegenerateRange { value: self.min });
        }

        let a = (new_max - new_min) / (self.max - self.min);
        let b = new_min - a * self.min;

        for v in &mut self.data {
            *v = *v * a + b;
        }

        self.min = new_min;
        self.max = new_max;

        Ok(())
    }

    /// Discretize the field into `n` classes, then re-expand to the default
    /// range.
    ///
    /// Each value becomes its class index
    /// `floor((v - min) * n / (max - min))`, so a value equal to `max`
    /// lands in class `n`, and the tracked range becomes `[0, n]`. The
    /// default expansion is then re-applied so that class labels stay
    /// numerically comparable to freshly loaded data.
    ///
    /// # Errors
    ///
    /// An invalid-parameter error when `n == 0`, and
    /// [`Error::DegenerateRange`] when the current range has collapsed.
    pub fn segment(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(Error::invalid_param("n", n, "must be at least 1"));
        }

        if self.max == self.min {
            return Err(Error::DegenerateRange { value: self.min });
        }

        let (min, max) = (self.min, self.max);
        let a = n as f64 / (max - min);

        for v in &mut self.data {
            *v = ((*v - min) * a).floor();
        }

        self.min = 0.0;
        self.max = n as f64;

        // Cannot fail: the range [0, n] is non-degenerate for n >= 1.
        self.expand(DEFAULT_MIN, DEFAULT_MAX)
    }
}
