pub mod order;

pub use order::{Customer, OrderRecord, Product, DEFAULT_FIELD_VALUE};
