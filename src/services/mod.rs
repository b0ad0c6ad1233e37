pub mod extractor;
pub mod json_writer;
pub mod order_store;

pub use extractor::{child_text_or_default, extract_order};
pub use json_writer::JsonWriter;
pub use order_store::{OrderStore, ProcessedRecord, RawRecord};
