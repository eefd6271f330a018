//! Engine error type.

use thiserror::Error;
use crate::api::types::EntityId;

/// Errors surfaced by the engine's fallible operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Config values the engine cannot run with.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A config overlay failed to parse or did not match `GameConfig`.
    #[error("config overlay rejected: {0}")]
    ConfigSource(#[from] figment::Error),

    /// Re-parenting would make an entity its own ancestor.
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle {
        child: EntityId,
        parent: EntityId,
    },

    /// An entity with this id already exists.
    #[error("entity {0:?} already exists")]
    DuplicateEntity(EntityId),

    /// The entity is not registered where it was looked up.
    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityId),

    /// Viewport dimensions must be positive and finite.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        width: f32,
        height: f32,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
