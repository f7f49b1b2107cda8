//! Report persistence: the delimited component report, the JSON fact
//! report and the combined library-wide snapshot.

pub mod combined;
pub mod facts;
pub mod nested;
pub mod rows;

pub use combined::{
    build_combined_report, load_combined_report, write_combined_report, CombinedReport,
};
pub use facts::{load_fact_report, write_fact_report};
pub use nested::{
    find_report_file, find_report_files, load_component_report, write_component_report,
    LoadedReport,
};
