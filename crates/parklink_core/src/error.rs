use thiserror::Error;

/// Malformed input that aborts a whole linking or proximity run.
///
/// "No match found" and empty collections are not errors: an unmatched
/// source entity is simply absent from the output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("entity is missing an identifier")]
    MissingId,

    #[error("entity `{id}` is missing a name")]
    MissingName { id: String },

    #[error("entity `{id}` has only one of latitude/longitude")]
    PartialCoordinates { id: String },

    #[error("entity `{id}` has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("entity `{id}` has out-of-range coordinates ({latitude}, {longitude})")]
    CoordinateOutOfRange {
        id: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("identifier `{id}` appears more than once")]
    DuplicateId { id: String },

    #[error("match threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("{name} weight {value} is outside [0, 1]")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("weights sum to {0}, more than 1")]
    InvalidWeightSum(f64),

    #[error("max location distance {0} m must be finite and positive")]
    InvalidDistance(f64),

    #[error("search radius {0} m must be finite and non-negative")]
    InvalidRadius(f64),
}
