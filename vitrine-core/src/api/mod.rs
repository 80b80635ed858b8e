//! API-facing facade (route templates).

pub mod routes;
