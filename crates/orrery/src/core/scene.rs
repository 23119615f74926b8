use glam::{Affine3A, Quat, Vec3};

use crate::api::types::{BodyId, NodeId};
use crate::components::mesh::MeshComponent;

/// Local transform of a node relative to its parent.
///
/// `tilt` is fixed at construction; `yaw` (rotation about the tilted local
/// up axis) is the only rotation the simulation drives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub offset: Vec3,
    pub tilt: Quat,
    pub yaw: f32,
    pub scale: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            tilt: Quat::IDENTITY,
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_tilt(mut self, tilt: Quat) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(&self) -> Quat {
        self.tilt * Quat::from_rotation_y(self.yaw)
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation(), self.offset)
    }
}

/// Role of a node in the scene. Body-related variants carry a back-reference
/// to the owning body so picking never has to walk the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Revolution frame: rotating it carries its children around the parent.
    Pivot,
    Body(BodyId),
    /// Visible sub-mesh of a compound body (probe bus, dish, panels).
    Part(BodyId),
    /// Invisible, oversized sphere used only for picking.
    Hitbox(BodyId),
    /// Invisible shell reserved for selection feedback; never pickable.
    Highlight(BodyId),
    Rings,
    Belt,
    Starfield,
}

impl NodeKind {
    /// Body this node belongs to, if any.
    pub fn owner(&self) -> Option<BodyId> {
        match *self {
            NodeKind::Body(b) | NodeKind::Part(b) | NodeKind::Hitbox(b) | NodeKind::Highlight(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub local: LocalTransform,
    /// World transform as of the last propagation.
    pub world: Affine3A,
    /// Whether the renderer should draw this node's mesh.
    pub visible: bool,
    pub mesh: Option<MeshComponent>,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            local: LocalTransform::default(),
            world: Affine3A::IDENTITY,
            visible: true,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_local(mut self, local: LocalTransform) -> Self {
        self.local = local;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn world_position(&self) -> Vec3 {
        self.world.translation.into()
    }
}

/// Arena-backed transform hierarchy.
///
/// Node 0 is the root. A node is always stored after its parent, so world
/// transforms propagate in a single forward pass.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    /// Set when a local transform changes, cleared after propagate.
    dirty: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SceneNode::new(NodeKind::Root));
        Self { nodes, dirty: false }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach `node` under `parent` and return its id.
    /// The world transform is computed immediately.
    pub fn attach(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        let parent = if parent.index() < self.nodes.len() {
            parent
        } else {
            log::warn!("attach: unknown parent {:?}, using root", parent);
            self.root()
        };
        let id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.world = self.nodes[parent.index()].world * node.local.to_affine();
        self.nodes[parent.index()].children.push(id);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.dirty = true;
        self.nodes.get_mut(id.index())
    }

    /// Mutable access to a node's local transform. Marks the graph dirty.
    pub fn local_mut(&mut self, id: NodeId) -> Option<&mut LocalTransform> {
        self.dirty = true;
        self.nodes.get_mut(id.index()).map(|n| &mut n.local)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(SceneNode::world_position)
    }

    /// Recompute world transforms from local transforms.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }
        self.nodes[0].world = self.nodes[0].local.to_affine();
        for i in 1..self.nodes.len() {
            let parent = self.nodes[i].parent.map_or(0, NodeId::index);
            let parent_world = self.nodes[parent].world;
            let node = &mut self.nodes[i];
            node.world = parent_world * node.local.to_affine();
        }
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
