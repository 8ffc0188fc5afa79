// Common types shared across the kernel and domain layers

pub mod raw_record;

pub use raw_record::{cell_text, RawRecord};
