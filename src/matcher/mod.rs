//! The long-lived matcher: a loaded network bound to one algorithm.

#[cfg(test)]
mod test;

use crate::config::{MatchConfig, ModelConfig};
use crate::coord::Normalization;
use crate::network::Network;
use crate::route::costing::{Costing, DefaultEmission, DefaultTransition};
use crate::route::solver::{FmmSolver, StmatchSolver};
use crate::route::{EngineError, MatchResult, Transition, Ubodt};
use crate::trajectory::Trajectory;

use log::info;
use measure_time::info_time;
use std::path::Path;

/// The algorithm a [`Matcher`] is bound to, with its state.
pub enum Algorithm {
    Stmatch(StmatchSolver),
    Fmm(FmmSolver),
}

/// Binds a road network to one matching algorithm for the lifetime of
/// the process.
///
/// Matching never mutates the matcher, so a single instance may be
/// shared across threads.
///
/// ```rust,no_run
/// use snapline::{Matcher, Trajectory};
///
/// let matcher = Matcher::from_config_file("fmm_config.json").unwrap();
/// let trajectory = Trajectory::from_wkt("LINESTRING (126.60 45.74, 126.61 45.74)").unwrap();
///
/// let result = matcher.match_trajectory(&trajectory);
/// println!("Matched onto {:?}", result.cpath);
/// ```
pub struct Matcher {
    config: MatchConfig,
    network: Network,
    algorithm: Algorithm,
    costing: Costing<DefaultEmission, DefaultTransition>,
}

impl Matcher {
    /// Loads the network named by `config`, then constructs its algorithm.
    pub fn build(config: MatchConfig) -> crate::Result<Self> {
        info_time!("Built {} matcher", config.model.model());

        let network = Network::load(&config.network)?;
        Self::with_network(config, network)
    }

    /// Constructs the algorithm named by `config` over an already loaded
    /// `network`.
    pub fn with_network(config: MatchConfig, network: Network) -> crate::Result<Self> {
        let algorithm = match &config.model {
            ModelConfig::Stmatch(stmatch) => Algorithm::Stmatch(StmatchSolver::new(stmatch)),
            ModelConfig::Fmm(fmm) => {
                let ubodt = Ubodt::read(&fmm.ubodt, &network).map_err(EngineError::from)?;
                Algorithm::Fmm(FmmSolver::new(ubodt))
            }
        };

        let costing = Costing::with_gps_error(config.model.candidates().gps_error);
        info!(
            "Matcher ready (model={}, k={}, r={}, e={})",
            config.model.model(),
            config.model.candidates().k,
            config.model.candidates().radius,
            config.model.candidates().gps_error
        );

        Ok(Self {
            config,
            network,
            algorithm,
            costing,
        })
    }

    /// Loads the configuration document at `path`, and builds its matcher.
    pub fn from_config_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::build(MatchConfig::load(path)?)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn normalization(&self) -> &Normalization {
        &self.config.normalization
    }

    /// Matches `trajectory` onto the network.
    ///
    /// Never fails: when no plausible path exists the result is empty,
    /// see [`MatchResult::is_empty`]. Geometries are reported in the
    /// trajectory's coordinate system.
    pub fn match_trajectory(&self, trajectory: &Trajectory) -> MatchResult {
        let normalization = self.normalization();
        let candidates = self.config.model.candidates();

        let ingested;
        let trajectory = if normalization.is_identity() {
            trajectory
        } else {
            ingested = Trajectory {
                geometry: normalization.ingest(&trajectory.geometry),
                timestamps: trajectory.timestamps.clone(),
            };
            &ingested
        };

        let mut result = match &self.algorithm {
            Algorithm::Stmatch(solver) => Transition::new(&self.network, solver, &self.costing)
                .match_trajectory(trajectory, candidates),
            Algorithm::Fmm(solver) => Transition::new(&self.network, solver, &self.costing)
                .match_trajectory(trajectory, candidates),
        };

        if !normalization.is_identity() {
            result.mgeom = normalization.export(&result.mgeom);
            result.pgeom = normalization.export(&result.pgeom);
        }

        result
    }

    /// Decodes a WKT trajectory, then matches it.
    pub fn match_wkt(&self, text: &str) -> crate::Result<MatchResult> {
        let trajectory = Trajectory::from_wkt(text)?;
        Ok(self.match_trajectory(&trajectory))
    }
}
