//! Mappers and identity maps
//!
//! A `Session` owns the connection plus one identity map per entity type.
//! Mappers borrow the session and keep the maps in step with every
//! statement they run.

pub mod employee_mapper;
pub mod identity_map;
pub mod review_mapper;
pub mod session;

pub use employee_mapper::{EmployeeMapper, EmployeeRow};
pub use identity_map::IdentityMap;
pub use review_mapper::{ReviewMapper, ReviewRow};
pub use session::Session;
