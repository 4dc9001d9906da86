//! File-facing helpers: trial record parsing, results-directory discovery and
//! table/report writers.

pub mod discovery;
pub mod output;
pub mod records;

pub use discovery::{
    discover_fovs, discover_trial_files, ingest, FovFilter, IngestSummary, TRIAL_FILE_SUFFIX,
};
pub use output::{table_to_csv_string, write_json_file, write_table_csv};
pub use records::{fov_from_file_name, load_trial_record, parse_trial_record, TrialRecord};
