//! The matching engine: candidate search, hidden-Markov decoding, and
//! completion of the decoded route into a connected path.

#[doc(hidden)]
pub mod candidate;
#[doc(hidden)]
pub mod costing;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod primitives;
#[doc(hidden)]
pub mod result;
#[doc(hidden)]
pub mod solver;
#[doc(hidden)]
pub mod transition;
#[doc(hidden)]
pub mod ubodt;

#[doc(inline)]
pub use error::EngineError;
#[doc(inline)]
pub use result::MatchResult;
#[doc(inline)]
pub use transition::Transition;
#[doc(inline)]
pub use ubodt::Ubodt;
