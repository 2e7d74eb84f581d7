//! Pickable scene content for a render view.

use std::fmt;

use rustc_hash::FxHashMap;

use super::primitives::{Aabb, Sphere, TriangleMesh};
use super::volume::VolumeProxy;
use super::{Hit, Intersection, Pickable, Ray};

/// Stable identifier of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw numeric id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Geometry a scene node can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Triangulated surface (segmentations, models).
    Mesh(TriangleMesh),
    /// Sphere proxy.
    Sphere(Sphere),
    /// Box proxy (volume rendering without an opacity threshold).
    Box(Aabb),
    /// Ray-marched volume rendering proxy.
    Volume(VolumeProxy),
}

impl Pickable for Geometry {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Self::Mesh(mesh) => mesh.intersect(ray),
            Self::Sphere(sphere) => sphere.intersect(ray),
            Self::Box(aabb) => aabb.intersect(ray),
            Self::Volume(volume) => volume.intersect(ray),
        }
    }
}

/// A named piece of scene geometry plus its display flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Display name.
    pub name: String,
    /// Geometry used for hit testing.
    pub geometry: Geometry,
    /// Hidden nodes are never hit.
    pub visible: bool,
    /// Nodes can opt out of picking while staying visible.
    pub pickable: bool,
}

/// Collection of scene nodes that can be hit-tested with a ray.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    nodes: FxHashMap<NodeId, SceneNode>,
    next_id: u32,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visible, pickable node and return its id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        geometry: Geometry,
    ) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let node = SceneNode {
            name: name.into(),
            geometry,
            visible: true,
            pickable: true,
        };
        let _ = self.nodes.insert(id, node);
        id
    }

    /// Remove a node, returning it if it existed.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        self.nodes.remove(&id)
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Mutable node lookup.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Show or hide a node. Returns `false` if the node does not exist.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.visible = visible;
        true
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nearest hit among visible, pickable nodes.
    ///
    /// Equal distances resolve to the lower node id so results do not
    /// depend on map iteration order.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.visible && node.pickable)
            .filter_map(|(&id, node)| {
                node.geometry.intersect(ray).map(|hit| Hit {
                    point: ray.at(hit.distance),
                    normal: hit.normal,
                    distance: hit.distance,
                    node: id,
                })
            })
            .min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then_with(|| a.node.cmp(&b.node))
            })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn ray_down() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::NEG_Z)
    }

    #[test]
    fn empty_scene_never_hits() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.pick(&ray_down()).is_none());
    }

    #[test]
    fn nearest_node_wins() {
        let mut scene = Scene::new();
        let far = scene.add(
            "far",
            Geometry::Mesh(TriangleMesh::quad(Vec3::NEG_Z * 9.0, Vec3::Z, 5.0)),
        );
        let near = scene.add(
            "near",
            Geometry::Sphere(Sphere::new(Vec3::NEG_Z * 4.0, 1.0)),
        );
        let hit = scene.pick(&ray_down()).unwrap();
        assert_eq!(hit.node, near);
        assert!((hit.point - Vec3::NEG_Z * 3.0).length() < 1e-4);

        assert!(scene.set_visible(near, false));
        let hit = scene.pick(&ray_down()).unwrap();
        assert_eq!(hit.node, far);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn unpickable_and_removed_nodes_are_skipped() {
        let mut scene = Scene::new();
        let id = scene.add(
            "box",
            Geometry::Box(Aabb::from_center_size(Vec3::NEG_Z * 5.0, Vec3::ONE)),
        );
        scene.node_mut(id).unwrap().pickable = false;
        assert!(scene.pick(&ray_down()).is_none());

        scene.node_mut(id).unwrap().pickable = true;
        assert!(scene.pick(&ray_down()).is_some());

        let removed = scene.remove(id).unwrap();
        assert_eq!(removed.name, "box");
        assert!(scene.pick(&ray_down()).is_none());
        assert!(!scene.set_visible(id, true));
    }

    #[test]
    fn ties_resolve_to_lowest_id() {
        let mut scene = Scene::new();
        let first = scene.add(
            "a",
            Geometry::Mesh(TriangleMesh::quad(Vec3::NEG_Z * 5.0, Vec3::Z, 1.0)),
        );
        let _second = scene.add(
            "b",
            Geometry::Mesh(TriangleMesh::quad(Vec3::NEG_Z * 5.0, Vec3::Z, 1.0)),
        );
        assert_eq!(scene.pick(&ray_down()).unwrap().node, first);
    }
}
