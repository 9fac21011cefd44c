//! Composed scenes: the placed targets and decoys of one round.
//!
//! A [`Scene`] is an arena of [`PlacedObject`]s indexed by [`ObjectId`]. Targets
//! occupy the first ids, decoys follow. The renderer keeps its own visuals and
//! looks them up by id; all logic state lives here.
use std::fmt;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod composer;
pub mod selection;

pub use composer::{compose, compose_round, SceneComposer};

/// Stable identity of a placed object within one scene.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An object instance placed in the world.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    /// World position of the object's center.
    pub position: Vec2,
    /// Index into the theme's object list.
    pub spec_index: usize,
    /// Whether the player has to find this object. Decided at composition time.
    pub is_target: bool,
    /// Set once the player finds this target; never reset.
    pub found: bool,
}

/// Arena of placed objects for one round.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    theme_key: String,
    objects: Vec<PlacedObject>,
    target_count: usize,
}

impl Scene {
    /// Build a scene from targets and decoys, renumbering ids so targets come first.
    pub(crate) fn from_parts(
        theme_key: impl Into<String>,
        targets: Vec<PlacedObject>,
        decoys: Vec<PlacedObject>,
    ) -> Self {
        let target_count = targets.len();
        let objects = targets
            .into_iter()
            .map(|o| PlacedObject { is_target: true, ..o })
            .chain(decoys.into_iter().map(|o| PlacedObject { is_target: false, ..o }))
            .enumerate()
            .map(|(i, o)| PlacedObject {
                id: ObjectId(i as u32),
                found: false,
                ..o
            })
            .collect();

        Self {
            theme_key: theme_key.into(),
            objects,
            target_count,
        }
    }

    pub fn theme_key(&self) -> &str {
        &self.theme_key
    }

    pub fn targets(&self) -> &[PlacedObject] {
        &self.objects[..self.target_count]
    }

    pub fn decoys(&self) -> &[PlacedObject] {
        &self.objects[self.target_count..]
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn total_targets(&self) -> usize {
        self.target_count
    }

    pub fn found_count(&self) -> usize {
        self.targets().iter().filter(|o| o.found).count()
    }

    pub fn unfound_targets(&self) -> impl Iterator<Item = &PlacedObject> {
        self.targets().iter().filter(|o| !o.found)
    }

    /// Mark a target as found. Returns `true` only if it was an unfound target.
    pub fn mark_found(&mut self, id: ObjectId) -> bool {
        match self.objects.get_mut(id.index()) {
            Some(obj) if obj.is_target && !obj.found => {
                obj.found = true;
                true
            }
            _ => false,
        }
    }
}
