//! Probabilities of the hidden-Markov model, expressed in log-space.
//!
//! Each strategy is evaluated against its own context:
//!
//! - [`EmissionContext`]
//!     How far an observed position lies from the candidate
//!     it may be matched onto.
//!
//! - [`TransitionContext`]
//!     How the straight-line distance between two consecutive
//!     observations compares to the network distance between
//!     their candidates.
//!
//! ### Default Strategies:
//! - [`DefaultEmission`]: `exp(-0.5 * (d / e)^2)`
//! - [`DefaultTransition`]: `1` when `eu >= sp`, else `eu / sp`
//!
//! ```rust
//! use snapline::route::costing::{Costing, DefaultEmission, DefaultTransition};
//!
//! let costing = Costing::new(DefaultEmission::new(50.0), DefaultTransition);
//! assert_eq!(costing.emission(0.0), 0.0);
//! ```

#[doc(hidden)]
pub mod emission;
#[doc(hidden)]
pub mod transition;

#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;

pub trait Strategy<Ctx> {
    /// The natural logarithm of the probability in the given context.
    ///
    /// Impossible outcomes are [`f64::NEG_INFINITY`].
    fn calculate(&self, context: Ctx) -> f64;
}

/// The pair of strategies driving a match.
#[derive(Clone, Copy, Debug)]
pub struct Costing<E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub emission: E,
    pub transition: T,
}

impl<E, T> Costing<E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(emission: E, transition: T) -> Self {
        Self {
            emission,
            transition,
        }
    }

    #[inline]
    pub fn emission(&self, distance: f64) -> f64 {
        self.emission.calculate(EmissionContext { distance })
    }

    #[inline]
    pub fn transition(&self, euclidean: f64, shortest: f64) -> f64 {
        self.transition.calculate(TransitionContext {
            euclidean,
            shortest,
        })
    }
}

impl Costing<DefaultEmission, DefaultTransition> {
    pub fn with_gps_error(gps_error: f64) -> Self {
        Costing::new(DefaultEmission::new(gps_error), DefaultTransition)
    }
}
