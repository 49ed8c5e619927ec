//! Key-value persistence for the study dashboard.
//!
//! Every entity is a JSON blob under a string key. [`kv::KeyValueStore`] is
//! the raw seam; [`repository`] layers typed access on top of it.

pub mod keys;
pub mod kv;
pub mod repository;
pub mod sqlite;
