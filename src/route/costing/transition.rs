use crate::route::costing::Strategy;

pub trait TransitionStrategy: Strategy<TransitionContext> {}
impl<T> TransitionStrategy for T where T: Strategy<TransitionContext> {}

#[derive(Clone, Copy, Debug)]
pub struct TransitionContext {
    /// Straight-line distance between the two observations.
    pub euclidean: f64,

    /// Network distance between the two candidates.
    pub shortest: f64,
}

/// Penalises detours: the ratio of the straight-line distance to the
/// network distance, capped at `1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTransition;

impl Strategy<TransitionContext> for DefaultTransition {
    #[inline]
    fn calculate(&self, context: TransitionContext) -> f64 {
        if context.euclidean >= context.shortest {
            0.0
        } else {
            (context.euclidean / context.shortest).ln()
        }
    }
}
