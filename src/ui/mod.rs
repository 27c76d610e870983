pub mod output;

pub use output::{progress_line, OutputFormatter, OutputMode};
