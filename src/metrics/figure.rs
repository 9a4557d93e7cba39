use serde::{Serialize, Serializer};

/// A reported number that may be reserved but not computed yet
///
/// Only the output encoding collapses [`Figure::NotImplemented`] into `-1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Figure {
    Computed(f64),
    NotImplemented,
}

impl Figure {
    /// The value written to the output record.
    #[must_use]
    pub const fn to_output(self) -> f64 {
        match self {
            Self::Computed(value) => value,
            Self::NotImplemented => -1.0,
        }
    }
}

impl Serialize for Figure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Computed(value) => serializer.serialize_f64(value),
            Self::NotImplemented => serializer.serialize_i64(-1),
        }
    }
}
