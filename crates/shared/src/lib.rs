//! Types shared between the language service client and its hosts.

pub mod domain;
pub mod protocol;
