use crate::{
    core::{NodeId, Point, Rect, Seconds},
    graphic::FlowerGraphic,
    templates::FlowerKind,
};

/// Immutable recipe for one flower. Fixed once an instance is created.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlowerSpec {
    pub kind: FlowerKind,
    /// CSS paint string, passed through to the generator unvalidated.
    pub color: String,
    pub scale: f64,
}

/// Choreography state of one instance. Drag only arms once the entrance has
/// finished; dragging and swaying are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Entering,
    Idle,
    Dragging,
}

/// Committed (rest) values of a node's animated properties. Live tweens
/// override these while they run; completions write back here.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeProps {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl NodeProps {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FlowerInstance {
    pub id: NodeId,
    pub spec: FlowerSpec,
    /// Rest rotation in degrees, in [-10, 10); sway oscillates from here.
    pub base_rotation: f64,
    pub phase: Phase,
    pub props: NodeProps,
    pub graphic: FlowerGraphic,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecorationKind {
    Sparkle,
    Butterfly { color: String },
}

/// Ephemeral non-interactive visual. Sparkles expire on a fixed lifetime;
/// butterflies are removed when their glide completes.
#[derive(Clone, Debug)]
pub struct Decoration {
    pub id: NodeId,
    pub kind: DecorationKind,
    pub props: NodeProps,
    pub spawned_at: Seconds,
    pub lifetime: Option<Seconds>,
}

impl Decoration {
    pub fn expired(&self, now: Seconds) -> bool {
        self.lifetime
            .is_some_and(|life| now >= self.spawned_at + life)
    }
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Flower(FlowerInstance),
    Decoration(Decoration),
}

impl SceneNode {
    pub fn id(&self) -> NodeId {
        match self {
            Self::Flower(f) => f.id,
            Self::Decoration(d) => d.id,
        }
    }

    pub fn props(&self) -> &NodeProps {
        match self {
            Self::Flower(f) => &f.props,
            Self::Decoration(d) => &d.props,
        }
    }

    pub fn props_mut(&mut self) -> &mut NodeProps {
        match self {
            Self::Flower(f) => &mut f.props,
            Self::Decoration(d) => &mut d.props,
        }
    }
}

/// The live scene: bounds plus every placed node in insertion order.
/// Insertion order is paint order; new nodes always append.
#[derive(Clone, Debug)]
pub struct Scene {
    pub bounds: Rect,
    nodes: Vec<SceneNode>,
    next_id: u64,
}

impl Scene {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            nodes: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert_flower(
        &mut self,
        spec: FlowerSpec,
        position: Point,
        base_rotation: f64,
        graphic: FlowerGraphic,
    ) -> NodeId {
        let id = self.next_id();
        let mut props = NodeProps::at(position.x, position.y);
        props.rotation = base_rotation;
        self.nodes.push(SceneNode::Flower(FlowerInstance {
            id,
            spec,
            base_rotation,
            phase: Phase::Entering,
            props,
            graphic,
        }));
        id
    }

    pub fn insert_decoration(
        &mut self,
        kind: DecorationKind,
        position: Point,
        spawned_at: Seconds,
        lifetime: Option<Seconds>,
    ) -> NodeId {
        let id = self.next_id();
        self.nodes.push(SceneNode::Decoration(Decoration {
            id,
            kind,
            props: NodeProps::at(position.x, position.y),
            spawned_at,
            lifetime,
        }));
        id
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn flower(&self, id: NodeId) -> Option<&FlowerInstance> {
        self.flowers().find(|f| f.id == id)
    }

    pub fn flower_mut(&mut self, id: NodeId) -> Option<&mut FlowerInstance> {
        self.nodes.iter_mut().find_map(|n| match n {
            SceneNode::Flower(f) if f.id == id => Some(f),
            _ => None,
        })
    }

    pub fn flowers(&self) -> impl Iterator<Item = &FlowerInstance> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Flower(f) => Some(f),
            _ => None,
        })
    }

    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Decoration(d) => Some(d),
            _ => None,
        })
    }

    pub fn flower_count(&self) -> usize {
        self.flowers().count()
    }

    pub fn decoration_count(&self) -> usize {
        self.decorations().count()
    }

    pub fn remove(&mut self, id: NodeId) {
        self.nodes.retain(|n| n.id() != id);
    }

    pub fn retain_decorations(&mut self, mut keep: impl FnMut(&Decoration) -> bool) {
        self.nodes.retain(|n| match n {
            SceneNode::Decoration(d) => keep(d),
            SceneNode::Flower(_) => true,
        });
    }

    /// Discard every node at once (playground clear). No exit animation.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
