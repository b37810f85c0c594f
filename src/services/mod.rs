pub mod pipeline;
pub mod preview;

pub use pipeline::{EdgePipeline, PipelineSettings, RunReport};
pub use preview::{encode_png, write_preview};
