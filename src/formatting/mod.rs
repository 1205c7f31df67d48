pub mod output;
pub mod projection;
pub mod table;
pub mod utils;

pub use output::{render, render_csv, render_json, render_yaml, OutputFormat};
pub use projection::{parse_field_list, project_fields};
pub use table::render_table;
pub use utils::{cell_text, duration_from_millis, format_duration, format_millis};
