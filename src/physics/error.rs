//! Error kinds surfaced by mesh generation and deformation.

/// Why an intersection could not be resolved during deformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Both balloon centers coincide, so there is no push direction.
    CoincidentCenters,
    /// The push ray never reaches the other balloon's surface.
    NegativeDiscriminant,
    /// The surface is only reachable behind the vertex.
    NoForwardIntersection,
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateReason::CoincidentCenters => write!(f, "balloon centers coincide"),
            DegenerateReason::NegativeDiscriminant => {
                write!(f, "push ray does not intersect the other balloon")
            }
            DegenerateReason::NoForwardIntersection => {
                write!(f, "no intersection in front of the vertex")
            }
        }
    }
}

/// Errors reported by [`SphereMeshBuilder`](super::SphereMeshBuilder),
/// [`Balloon`](super::Balloon) and [`PairwiseDeformer`](super::PairwiseDeformer).
#[derive(Debug, Clone, PartialEq)]
pub enum BalloonError {
    /// A parameter is out of range (zero resolution, non-positive radius, ...)
    InvalidArgument(String),
    /// The balloon mesh has not been built yet
    NotReady,
    /// The intersection used to push a vertex cannot be computed
    DegenerateGeometry {
        /// Triangle being processed, if the failure is local to one
        triangle: Option<usize>,
        reason: DegenerateReason,
    },
}

impl BalloonError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BalloonError::InvalidArgument(msg.into())
    }
}

impl std::fmt::Display for BalloonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalloonError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BalloonError::NotReady => write!(f, "Balloon mesh has not been set up"),
            BalloonError::DegenerateGeometry {
                triangle: Some(index),
                reason,
            } => write!(f, "Degenerate geometry at triangle {}: {}", index, reason),
            BalloonError::DegenerateGeometry {
                triangle: None,
                reason,
            } => write!(f, "Degenerate geometry: {}", reason),
        }
    }
}

impl std::error::Error for BalloonError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_triangle() {
        let err = BalloonError::DegenerateGeometry {
            triangle: Some(7),
            reason: DegenerateReason::NegativeDiscriminant,
        };
        let text = err.to_string();
        assert!(text.contains("triangle 7"), "unexpected message: {}", text);
    }

    #[test]
    fn test_invalid_helper() {
        let err = BalloonError::invalid("radius must be positive");
        assert_eq!(
            err,
            BalloonError::InvalidArgument("radius must be positive".to_string())
        );
    }
}
