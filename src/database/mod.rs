pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryLeadRepository;
pub use models::Lead;
pub use repository::{LeadRepository, PgLeadRepository};
