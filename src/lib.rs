pub mod aggregate;
pub mod config;
pub mod date_gen;
pub mod error;
pub mod irradiance;
pub mod location;
pub mod output;
pub mod pipeline;
pub mod solar;
pub mod telemetry;

pub use config::Config;
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineOutput};
