// dashboard/mod.rs - Lead dashboard view logic
//
// Pagination, date filtering and export shaping work on the full in-memory
// lead list and are recomputed from scratch for every render. Both the
// server-rendered page and the `leads` CLI drive this module.

pub mod client;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod session;

pub use client::{
    DashboardClient, FetchError, HttpLeadSource, LeadSource, Navigation, RepositoryLeadSource, ViewState,
};
pub use export::{build_export, save_workbook, write_workbook, ExportError, ExportRow, EXPORT_HEADERS};
pub use filter::DateRange;
pub use pagination::{Pagination, PAGE_SIZE};
pub use session::Session;
