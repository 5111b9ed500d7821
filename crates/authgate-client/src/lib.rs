#![doc = include_str!("../README.md")]

pub mod guard;
pub mod nav;

pub use guard::{GuardOutcome, RouteGuard};
pub use nav::{enabled_sections, AdminSection};
