pub mod reagent;

pub use reagent::{Grade, PackageControl, ReagentRecord, Unit};
