// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// A ring set could not be used as an operand of a boolean operation.
///
/// Interactions recover from these locally: the offending candidate feature
/// is skipped and the rest of the merge pass continues.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// The exterior ring has fewer than three distinct vertices.
    #[error("ring has {count} distinct vertices, at least 3 are required")]
    TooFewPoints {
        /// Number of distinct vertices found.
        count: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("ring contains a non-finite coordinate")]
    NonFinite,

    /// The exterior ring encloses no area.
    #[error("ring encloses zero area")]
    ZeroArea,

    /// Two non-adjacent edges of the exterior ring cross.
    #[error("ring edges {first_edge} and {second_edge} intersect")]
    SelfIntersection {
        /// Index of the first crossing edge.
        first_edge: usize,
        /// Index of the second crossing edge.
        second_edge: usize,
    },

    /// A union produced no polygon at all.
    #[error("boolean operation produced an empty result")]
    EmptyResult,
}
