//! Flat-file persistence for the payroll datasets.
//!
//! Four comma-separated files back the engine: employees, hourly
//! supplements, the append-only payslip history and the read-only salary
//! scale. Each file starts with a header line. Employee and supplement
//! files are rewritten whole on update; payslips are only ever appended.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::store::RecordStore;
//!
//! let store = RecordStore::in_dir("./data");
//! let next_id = store.allocate_id().unwrap();
//! println!("Next employee ID: {}", next_id);
//! ```

mod codec;
mod record_store;
mod salary_scale;

pub use record_store::RecordStore;
pub use salary_scale::SalaryScaleEntry;
