pub mod synthetic_records;
