use crate::route::ubodt::UbodtError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cost table is unusable: {0}")]
    Ubodt(#[from] UbodtError),
}
