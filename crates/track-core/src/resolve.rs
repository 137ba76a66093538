//! Export target resolution.
//!
//! The builder does not know how a host finds "the clip the user means".
//! A resolver answers that question; [`SceneResolver`] answers it from a
//! [`SceneSnapshot`].

use evtt_model::clip::{ClipReference, MarkerRecord};
use evtt_model::scene::{ActionData, ObjectKind, SceneObject, SceneSnapshot};

/// Everything the builder needs for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    /// Name of the object that owns the clip, when known.
    pub owner_name: Option<String>,

    /// The clip being exported.
    pub clip: ClipReference,

    /// Marker list, or `None` when the host cannot provide one.
    pub markers: Option<Vec<MarkerRecord>>,

    /// Originating host file name, empty when unknown.
    pub source_file: String,
}

/// Capability supplied by the host: locate the clip to export.
pub trait ExportTargetResolver {
    /// Resolve the current export target, or `None` when there is no clip.
    fn resolve_export_target(&self) -> Option<ExportTarget>;

    /// Whether the host context offers export at all. A resolver may still
    /// find a target when this is `false`.
    fn can_export(&self) -> bool {
        self.resolve_export_target().is_some()
    }
}

/// Resolves the export target from a scene snapshot.
///
/// Lookup order:
/// 1. The active object, if it is an armature with an assigned action.
/// 2. The first selected armature with an assigned action.
/// 3. The first action pinned in an action editor. Its owner is the active
///    object when that is an armature.
#[derive(Debug, Clone, Copy)]
pub struct SceneResolver<'a> {
    scene: &'a SceneSnapshot,
}

impl<'a> SceneResolver<'a> {
    pub fn new(scene: &'a SceneSnapshot) -> Self {
        Self { scene }
    }

    fn animated_armature(&self) -> Option<(&'a SceneObject, &'a ActionData)> {
        let scene = self.scene;
        scene
            .active()
            .into_iter()
            .chain(scene.selected())
            .filter(|object| object.is_animated_armature())
            .find_map(|object| {
                let action = scene.action(object.action.as_deref()?)?;
                Some((object, action))
            })
    }

    fn pinned_action(&self) -> Option<(Option<&'a SceneObject>, &'a ActionData)> {
        let scene = self.scene;
        let action = scene
            .dopesheet_actions
            .iter()
            .find_map(|name| scene.action(name))?;
        let owner = scene
            .active()
            .filter(|object| object.kind == ObjectKind::Armature);
        Some((owner, action))
    }

    fn target(&self, owner: Option<&SceneObject>, action: &ActionData) -> ExportTarget {
        ExportTarget {
            owner_name: owner.map(|o| o.name.clone()),
            clip: action.clip_reference(self.scene.render),
            markers: action.pose_markers.clone(),
            source_file: self.scene.source_file_name().to_string(),
        }
    }
}

impl ExportTargetResolver for SceneResolver<'_> {
    fn resolve_export_target(&self) -> Option<ExportTarget> {
        if let Some((owner, action)) = self.animated_armature() {
            tracing::debug!(owner = %owner.name, action = %action.name, "Resolved action from armature");
            return Some(self.target(Some(owner), action));
        }

        let (owner, action) = self.pinned_action()?;
        tracing::debug!(action = %action.name, "Resolved pinned action");
        Some(self.target(owner, action))
    }

    /// Only an animated armature in context offers export. Pinned actions
    /// alone resolve, but do not count.
    fn can_export(&self) -> bool {
        self.animated_armature().is_some()
    }
}

impl ExportTargetResolver for ExportTarget {
    fn resolve_export_target(&self) -> Option<ExportTarget> {
        Some(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evtt_model::clip::FrameRate;

    fn object(name: &str, kind: ObjectKind, action: Option<&str>) -> SceneObject {
        SceneObject {
            name: name.to_string(),
            kind,
            action: action.map(str::to_string),
        }
    }

    fn action(name: &str) -> ActionData {
        ActionData {
            name: name.to_string(),
            frame_range: [0.0, 24.0],
            pose_markers: Some(vec![MarkerRecord::new("hit", 6.0)]),
        }
    }

    fn scene() -> SceneSnapshot {
        SceneSnapshot {
            filepath: "/work/rigs/knight.blend".to_string(),
            render: FrameRate::new(24.0),
            active_object: None,
            selected_objects: vec![],
            objects: vec![
                object("Knight", ObjectKind::Armature, Some("Slash")),
                object("Squire", ObjectKind::Armature, Some("Bow")),
                object("Bare", ObjectKind::Armature, None),
                object("Sword", ObjectKind::Mesh, Some("Spin")),
            ],
            actions: vec![action("Slash"), action("Bow"), action("Spin"), action("Pinned")],
            dopesheet_actions: vec![],
        }
    }

    fn resolved(scene: &SceneSnapshot) -> Option<(Option<String>, String)> {
        SceneResolver::new(scene)
            .resolve_export_target()
            .map(|t| (t.owner_name, t.clip.name))
    }

    #[test]
    fn test_active_armature_wins() {
        let mut scene = scene();
        scene.active_object = Some("Knight".to_string());
        scene.selected_objects = vec!["Squire".to_string()];

        assert_eq!(
            resolved(&scene),
            Some((Some("Knight".to_string()), "Slash".to_string()))
        );
        assert!(SceneResolver::new(&scene).can_export());
    }

    #[test]
    fn test_falls_back_to_first_selected_armature() {
        let mut scene = scene();
        scene.active_object = Some("Sword".to_string());
        scene.selected_objects = vec!["Sword".to_string(), "Bare".to_string(), "Squire".to_string()];

        assert_eq!(
            resolved(&scene),
            Some((Some("Squire".to_string()), "Bow".to_string()))
        );
    }

    #[test]
    fn test_falls_back_to_pinned_action() {
        let mut scene = scene();
        scene.dopesheet_actions = vec!["Missing".to_string(), "Pinned".to_string()];

        assert_eq!(resolved(&scene), Some((None, "Pinned".to_string())));
        assert!(!SceneResolver::new(&scene).can_export());
    }

    #[test]
    fn test_pinned_action_owned_by_active_armature() {
        let mut scene = scene();
        scene.active_object = Some("Bare".to_string());
        scene.dopesheet_actions = vec!["Pinned".to_string()];

        assert_eq!(
            resolved(&scene),
            Some((Some("Bare".to_string()), "Pinned".to_string()))
        );
    }

    #[test]
    fn test_dangling_action_reference_does_not_resolve() {
        let mut scene = scene();
        scene.objects.push(object("Ghost", ObjectKind::Armature, Some("Deleted")));
        scene.active_object = Some("Ghost".to_string());

        assert_eq!(resolved(&scene), None);
    }

    #[test]
    fn test_nothing_to_resolve() {
        assert_eq!(resolved(&scene()), None);
        assert!(!SceneResolver::new(&scene()).can_export());
    }

    #[test]
    fn test_fixed_target_can_always_export() {
        let mut scene = scene();
        scene.active_object = Some("Knight".to_string());
        let target = SceneResolver::new(&scene).resolve_export_target().unwrap();
        assert!(target.can_export());
    }

    #[test]
    fn test_target_carries_clip_and_source() {
        let mut scene = scene();
        scene.active_object = Some("Knight".to_string());

        let target = SceneResolver::new(&scene).resolve_export_target().unwrap();
        assert_eq!(target.source_file, "knight.blend");
        assert_eq!(target.clip.rate, FrameRate::new(24.0));
        assert_eq!(target.clip.frame_end, 24.0);
        assert_eq!(target.markers.unwrap().len(), 1);
    }
}
