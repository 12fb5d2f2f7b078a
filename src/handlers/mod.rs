// handlers/mod.rs - Handlers grouped by access tier
//
// public    - no session needed (/health, /login, /logout)
// api       - JSON endpoints under /api, exempt from the route guard
// protected - dashboard pages behind the route guard (/dashboard*)

pub mod api;
pub mod protected;
pub mod public;
pub mod session;
