//! # Rock Engine
//!
//! The small engine layer under the rockface shooter.
//!
//! ## Features
//!
//! - **ECS Architecture**: generational entity store with typed fragment storage
//!   and snapshot queries that tolerate structural mutation mid-iteration
//! - **Collision Geometry**: oriented bounding boxes with a separating-axis test
//! - **Configuration**: hierarchical `(section, key)` lookup over TOML or RON
//! - **Collaborator Contracts**: mesh, audio and input surfaces the game talks to
//!
//! ## Quick Start
//!
//! ```rust
//! use rock_engine::prelude::*;
//!
//! struct Hitpoints(i32);
//! impl Component for Hitpoints {}
//!
//! let mut world = World::new();
//! let entity = world.create();
//! world.attach(entity, Hitpoints(3));
//!
//! for entity in world.query(&Query::new().with::<Hitpoints>()) {
//!     if let Some(hp) = world.get_mut::<Hitpoints>(entity) {
//!         hp.0 -= 1;
//!     }
//! }
//! assert_eq!(world.get::<Hitpoints>(entity).map(|hp| hp.0), Some(2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod ecs;
pub mod physics;
pub mod config;
pub mod input;
pub mod audio;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec3, Mat3, Mat4, Quat, Point3, Mat4Ext},
            time::FrameClock,
        },
        ecs::{World, Entity, Component, Query, QueryIter},
        physics::Obb,
        config::{Config, ConfigError, Settings},
        input::{InputState, InputEvent, KeyCode},
        audio::{AudioSink, AudioError, SilentAudio},
        render::{MeshProvider, MeshError, ModelInstance, ModelLibrary, ModelTemplate, RenderHandle},
    };
}
