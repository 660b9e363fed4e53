//! Error types for the ABCD core library.
//!
//! Defines the error enum exposed by the public API, its stable codes and a
//! convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring, generating or inspecting an ABCD
/// graph.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AbcdError {
    /// A lower bound exceeded its upper bound.
    #[error("{parameter} range is empty: min {min} exceeds max {max}")]
    InvalidRange {
        /// Name of the bounded quantity.
        parameter: &'static str,
        /// The supplied lower bound.
        min: usize,
        /// The supplied upper bound.
        max: usize,
    },
    /// A parameter fell outside its admissible domain.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable explanation.
        reason: Arc<str>,
    },
    /// Sampling cannot satisfy the requested constraints exactly.
    #[error("constraints cannot be satisfied: {reason}")]
    Infeasible {
        /// Human-readable explanation.
        reason: Arc<str>,
    },
    /// The operation is undefined for this graph or parameter set.
    #[error("operation undefined: {reason}")]
    Domain {
        /// Human-readable explanation.
        reason: Arc<str>,
    },
    /// A simple graph was required but self-loops or multi-edges remain.
    #[error("graph is not a proper ABCD graph: {bad_edges} bad edges remain")]
    MalformedGraph {
        /// Number of distinct edges that are self-loops or repeated.
        bad_edges: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`AbcdError`] variants.
    enum AbcdErrorCode for AbcdError {
        /// A lower bound exceeded its upper bound.
        InvalidRange => InvalidRange { .. } => "ABCD_INVALID_RANGE",
        /// A parameter fell outside its admissible domain.
        InvalidParameter => InvalidParameter { .. } => "ABCD_INVALID_PARAMETER",
        /// Sampling cannot satisfy the requested constraints exactly.
        Infeasible => Infeasible { .. } => "ABCD_INFEASIBLE",
        /// The operation is undefined for this graph or parameter set.
        Domain => Domain { .. } => "ABCD_DOMAIN_ERROR",
        /// A simple graph was required but self-loops or multi-edges remain.
        MalformedGraph => MalformedGraph { .. } => "ABCD_MALFORMED_GRAPH",
    }
}

impl AbcdError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<Arc<str>>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(reason: impl Into<Arc<str>>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    pub(crate) fn infeasible(reason: impl Into<Arc<str>>) -> Self {
        Self::Infeasible {
            reason: reason.into(),
        }
    }

    /// Returns `true` when a caller may recover by retrying with different
    /// parameters or a different seed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedGraph { .. })
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, AbcdError>;
