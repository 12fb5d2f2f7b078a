pub mod guard;

pub use guard::{route_guard, GuardDecision, RouteGuard, RouteMatcher, LOGIN_PATH};
