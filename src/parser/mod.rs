//! Block graph parsing module.

mod assembler;
mod graph;
mod options;
pub mod orientation;
mod processor;
mod title;

pub use assembler::{TableAssembler, MAX_GRID_CELLS};
pub use graph::BlockGraph;
pub use options::ProcessOptions;
pub use orientation::{is_measurement_label, is_size_label, OrientationReport};
pub use processor::BlockProcessor;
pub use title::TitleResolver;
