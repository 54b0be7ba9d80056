//! Client-side machinery: backend API access, the local cache and the
//! load-edit-save sync controller.

pub mod api;
pub mod cache;
pub mod controller;
