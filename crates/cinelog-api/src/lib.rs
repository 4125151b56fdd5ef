//! HTTP clients for cinelog.
//!
//! `backend` talks to the cinelog REST API (auth + watchlist CRUD) and
//! owns the cross-cutting 401 session teardown. `tmdb` is a read-only
//! client for the TMDB metadata provider.

pub mod backend;
pub mod envelope;
pub mod tmdb;
