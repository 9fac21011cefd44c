#![forbid(unsafe_code)]
//! hidden_objects: placement sampling, scene composition and the round state
//! machine of a "find the hidden objects" game.
//!
//! Modules:
//! - sampling: minimum-separation scatter of candidate positions
//! - theme: static theme configuration and the built-in themes
//! - scene: target/decoy composition into an id-indexed arena
//! - session: countdown, discovery, hint pulses and end of round
//!
//! Rendering and input stay outside the crate: the host feeds clicks and time
//! into a [`session::SessionController`] and receives
//! [`session::SessionCommand`]s back.
pub mod error;
pub mod sampling;
pub mod scene;
pub mod session;
pub mod theme;

/// Convenient re-exports for common types. Import with `use hidden_objects::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{
        sample, sample_with_report, PositionSampling, RejectionSampling, SamplingReport,
    };
    pub use crate::scene::{compose, compose_round, ObjectId, PlacedObject, Scene, SceneComposer};
    pub use crate::session::{
        CommandSink, FnSink, MultiSink, RoundOutcome, RoundTiming, SessionCommand,
        SessionCommandKind, SessionController, SessionState, VecSink,
    };
    pub use crate::theme::{
        builtin_themes, random_theme, resolve_theme, theme_by_key, Color, ObjectSpec, Shape,
        TargetRange, ThemeConfig,
    };
}
