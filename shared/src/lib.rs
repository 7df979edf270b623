//! Types shared between the Beacon login frontend and the remote services it
//! talks to: the magic-link issuer and the dashboard user/role service.

pub mod api;
pub mod models;
