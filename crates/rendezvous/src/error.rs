//! Error types.
//!
//! Only caller mistakes are errors. Non-overlapping or degenerate geometry is a
//! normal outcome and is reported as an empty result instead.

use thiserror::Error;

/// Invalid scalar input to a geometry helper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A coordinate, distance, bearing, or radius was NaN or infinite.
    #[error("{what} must be finite")]
    NonFinite {
        /// Name of the offending argument.
        what: &'static str,
    },

    #[error("distance must be >= 0, got {0}")]
    NegativeDistance(f64),

    #[error("radius must be > 0, got {0}")]
    NonPositiveRadius(f64),

    #[error("a circle needs at least 3 segments, got {0}")]
    TooFewSegments(usize),
}

/// Failure reported by a routing or venue backend.
///
/// Adapters map transport failures into this type so that orchestration code
/// can special-case status codes without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The backend answered with a non-success HTTP status.
    #[error("{service} returned HTTP {status}: {body}")]
    Http {
        service: String,
        status: u16,
        body: String,
    },

    /// The backend cannot perform this operation at all (e.g. OSRM isochrones).
    #[error("{service} does not support {operation}")]
    Unsupported {
        service: String,
        operation: &'static str,
    },

    /// The response could not be interpreted.
    #[error("{service} returned a malformed response: {message}")]
    Malformed { service: String, message: String },

    /// Connection-level failure (timeout, DNS, reset, ...).
    #[error("{service} unreachable: {message}")]
    Transport { service: String, message: String },
}

/// Errors from [`crate::rendezvous::find_rendezvous`].
#[derive(Debug, Error)]
pub enum RendezvousError {
    #[error("rendezvous requires at least 2 participants, got {0}")]
    TooFewParticipants(usize),

    #[error("time budget must be a positive finite number of minutes, got {0}")]
    InvalidBudget(f64),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Geo(#[from] GeoError),
}
