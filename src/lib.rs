pub mod chart;
pub mod dataset;
pub mod error;
pub mod indicators;
pub mod output;
pub mod pipeline;
pub mod render;
