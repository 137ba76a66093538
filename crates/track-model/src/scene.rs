//! Host scene snapshot.
//!
//! A snapshot is the JSON form of what the animation host exposes to the
//! exporter: scene frame rate, objects and their assigned actions, the
//! selection, and actions pinned in action editors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clip::{ClipReference, FrameRate, MarkerRecord};
use crate::track::ModelError;

/// Top-level scene snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Path of the host document, empty when unsaved.
    #[serde(default)]
    pub filepath: String,

    /// Scene playback rate.
    pub render: FrameRate,

    /// Name of the active object, if any.
    #[serde(default)]
    pub active_object: Option<String>,

    /// Names of selected objects, in selection order.
    #[serde(default)]
    pub selected_objects: Vec<String>,

    /// Objects in the scene.
    #[serde(default)]
    pub objects: Vec<SceneObject>,

    /// Action data blocks.
    #[serde(default)]
    pub actions: Vec<ActionData>,

    /// Actions pinned in action editors, in screen-area order.
    #[serde(default)]
    pub dopesheet_actions: Vec<String>,
}

/// A scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,

    pub kind: ObjectKind,

    /// Name of the action assigned through the object's animation data.
    #[serde(default)]
    pub action: Option<String>,
}

/// Object type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Armature,
    Mesh,
    Empty,
    Camera,
    Light,
    #[serde(other)]
    Other,
}

/// An action (animation clip) with its pose markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,

    /// `[frame_start, frame_end]`.
    pub frame_range: [f64; 2],

    /// Pose markers. `None` when the host could not provide a marker list.
    #[serde(default)]
    pub pose_markers: Option<Vec<MarkerRecord>>,
}

impl ActionData {
    /// Clip reference for this action at the given playback rate.
    pub fn clip_reference(&self, rate: FrameRate) -> ClipReference {
        let [frame_start, frame_end] = self.frame_range;
        ClipReference::new(self.name.clone(), frame_start, frame_end, rate)
    }
}

impl SceneObject {
    /// Whether this object can be exported from directly: an armature with
    /// an assigned action.
    pub fn is_animated_armature(&self) -> bool {
        self.kind == ObjectKind::Armature && self.action.is_some()
    }
}

impl SceneSnapshot {
    /// Find an object by name.
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Find an action by name.
    pub fn action(&self, name: &str) -> Option<&ActionData> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// The active object, if it exists in the scene.
    pub fn active(&self) -> Option<&SceneObject> {
        self.active_object.as_deref().and_then(|name| self.object(name))
    }

    /// Selected objects that exist in the scene, in selection order.
    pub fn selected(&self) -> impl Iterator<Item = &SceneObject> {
        self.selected_objects
            .iter()
            .filter_map(|name| self.object(name))
    }

    /// Final path component of the host document, empty when unsaved.
    pub fn source_file_name(&self) -> &str {
        self.filepath.rsplit('/').next().unwrap_or_default()
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ModelError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
