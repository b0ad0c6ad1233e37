pub mod file_ctx;
pub mod order_flow;

pub use file_ctx::FileCtx;
pub use order_flow::OrderFlow;
