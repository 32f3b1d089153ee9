use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::irradiance::ClearSkyError;
use crate::output::OutputError;
use crate::solar::GeometryError;

/// One variant per pipeline stage, so a failed run says where it stopped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("time grid for year {0} is empty")]
    EmptyGrid(i32),

    #[error("geometry computation failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("clear-sky irradiance computation failed: {0}")]
    ClearSky(#[from] ClearSkyError),

    #[error("monthly aggregation failed: {0}")]
    Aggregation(#[from] AggregateError),

    #[error("writing output failed: {0}")]
    Output(#[from] OutputError),
}
