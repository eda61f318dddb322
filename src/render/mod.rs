// Output exports
pub mod chart;
pub mod summary;

pub use chart::{render_svg_file, render_svg_string, ChartError, ChartInput};
pub use summary::{write_json, write_summary};
