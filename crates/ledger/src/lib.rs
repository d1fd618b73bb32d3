pub mod generate;
pub mod pipeline;
pub mod writer;

pub use generate::generate;
pub use pipeline::{convert, run, PipelineError, PipelinePaths, RunSummary};
pub use writer::{render_entry, LedgerWriter};
