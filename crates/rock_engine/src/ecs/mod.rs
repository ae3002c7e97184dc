//! Entity-Component-System implementation
//!
//! Entities are generational arena keys; fragments live in per-type secondary
//! maps owned by the [`World`]. Queries return an owned snapshot of matching
//! entities, so systems may create, attach, detach or destroy while walking it.

pub mod world;
pub mod entity;
pub mod component;
pub mod query;
mod storage;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
pub use query::{Query, QueryIter};
