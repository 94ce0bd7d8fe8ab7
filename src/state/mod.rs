pub mod watermark;

pub use watermark::WatermarkStore;
