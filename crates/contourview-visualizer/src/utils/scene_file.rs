//! Scene documents
//!
//! JSON files holding the placement tree and the shapes authored inside
//! it. Shapes reference their placement by id; [`SceneDocument::resolve`]
//! turns them into the absolute geometry the visualizer consumes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use contourview_core::{GeometryError, PlacementNode, PlacementTree, Shape};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Placements plus shapes, as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub placements: Vec<PlacementNode>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

/// A shape whose placement chain could not be resolved
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedShape {
    pub shape_id: Uuid,
    pub error: GeometryError,
}

/// Shapes in world coordinates, plus the ones left behind
#[derive(Debug, Clone, Default)]
pub struct ResolvedScene {
    pub shapes: Vec<Shape>,
    pub unresolved: Vec<UnresolvedShape>,
}

impl SceneDocument {
    pub fn new(placements: Vec<PlacementNode>, shapes: Vec<Shape>) -> Self {
        Self { placements, shapes }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let doc: SceneDocument = serde_json::from_str(&content)
            .with_context(|| format!("Invalid scene file {}", path.display()))?;
        debug!(
            "Loaded scene {}: {} placements, {} shapes",
            path.display(),
            doc.placements.len(),
            doc.shapes.len()
        );
        Ok(doc)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn placement_tree(&self) -> PlacementTree {
        let mut tree = PlacementTree::new();
        for node in &self.placements {
            tree.insert(node.clone());
        }
        tree
    }

    /// Resolve every shape to world coordinates. Shapes with a broken
    /// placement chain are skipped and reported.
    pub fn resolve(&self) -> ResolvedScene {
        let tree = self.placement_tree();
        let mut resolved = ResolvedScene::default();

        for shape in &self.shapes {
            match tree.resolve_shape(shape) {
                Ok(abs) => resolved.shapes.push(abs),
                Err(error) => {
                    warn!("Cannot place shape {}: {}", shape.id, error);
                    resolved.unresolved.push(UnresolvedShape {
                        shape_id: shape.id,
                        error,
                    });
                }
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contourview_core::{GeometrySegment, Placement, Point};

    #[test]
    fn test_resolve_applies_placements() {
        let parent = PlacementNode::new(Placement::translation(10.0, 0.0));
        let shape = Shape::new(
            vec![GeometrySegment::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))],
            false,
        )
        .with_parent(parent.id);

        let doc = SceneDocument::new(vec![parent], vec![shape]);
        let resolved = doc.resolve();
        assert!(resolved.unresolved.is_empty());
        assert_eq!(
            resolved.shapes[0].segments[0].start_point(),
            Point::new(10.0, 0.0)
        );
    }

    #[test]
    fn test_unknown_parent_is_reported() {
        let orphan = Shape::new(vec![], false).with_parent(Uuid::new_v4());
        let placed = Shape::new(vec![], true);
        let doc = SceneDocument::new(vec![], vec![orphan.clone(), placed]);

        let resolved = doc.resolve();
        assert_eq!(resolved.shapes.len(), 1);
        assert_eq!(resolved.unresolved[0].shape_id, orphan.id);
        assert!(matches!(
            resolved.unresolved[0].error,
            GeometryError::UnknownPlacement { .. }
        ));
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{
            "shapes": [{
                "segments": [
                    {"type": "line", "start": {"x": 0, "y": 0}, "end": {"x": 5, "y": 0}},
                    {"type": "arc", "center": {"x": 5, "y": 2}, "radius": 2,
                     "start_angle": -1.5707963267948966, "extent": 3.141592653589793}
                ],
                "closed": false
            }]
        }"#;
        let doc: SceneDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.shapes[0].len(), 2);
        assert!(doc.shapes[0].segments[1].is_arc());
        assert!(doc.placements.is_empty());
    }
}
