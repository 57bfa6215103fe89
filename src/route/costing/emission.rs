use crate::route::costing::Strategy;

pub trait EmissionStrategy: Strategy<EmissionContext> {}
impl<T> EmissionStrategy for T where T: Strategy<EmissionContext> {}

#[derive(Clone, Copy, Debug)]
pub struct EmissionContext {
    /// Distance between the observed position and the candidate.
    pub distance: f64,
}

/// Gaussian emission, with the GPS error as its standard deviation.
#[derive(Clone, Copy, Debug)]
pub struct DefaultEmission {
    pub gps_error: f64,
}

impl DefaultEmission {
    pub fn new(gps_error: f64) -> Self {
        Self { gps_error }
    }
}

impl Strategy<EmissionContext> for DefaultEmission {
    #[inline]
    fn calculate(&self, context: EmissionContext) -> f64 {
        // ln(exp(-0.5 * a^2)), which does not underflow for distant candidates
        let alpha = context.distance / self.gps_error;
        -0.5 * alpha * alpha
    }
}
