pub mod dashboard;
pub mod export;

pub use dashboard::dashboard;
pub use export::export;
