//! The `NodeRegistry` trait: what the sampling engine needs to know about nodes.

use cp_core::{NodeId, Position, SimTime};

/// Read-only view of the node population.
///
/// Slots are zero-based and dense (`0..len()`); identifiers are the one-based
/// values used in the exported plans.  Implementations must keep
/// `id_at(slot_of(id)) == id` for every registered node.
pub trait NodeRegistry {
    /// Number of registered nodes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifier stored at `slot`, or `None` if the slot is out of range.
    fn id_at(&self, slot: usize) -> Option<NodeId>;

    /// Slot holding `id`, or `None` if `id` is not registered.
    fn slot_of(&self, id: NodeId) -> Option<usize>;

    /// `true` for fixed ground terminals, `false` for orbiting nodes.
    fn is_ground(&self, id: NodeId) -> bool;

    /// Position of `id` at simulation time `now`.
    fn position(&self, id: NodeId, now: SimTime) -> Position;

    /// Radius within which `id` may hold a contact as transmitter, in metres.
    fn comm_radius_m(&self, id: NodeId) -> f64;

    /// Conservative radius around `id` (as receiver) containing every
    /// transmitter that could plausibly interfere with it, in metres.
    fn interference_radius_m(&self, id: NodeId) -> f64;

    /// `true` if ground terminals `a` and `b` share a non-radio path.
    fn can_reach_without_radio(&self, a: NodeId, b: NodeId) -> bool;

    /// All registered identifiers, in slot order.
    fn ids(&self) -> Vec<NodeId> {
        (0..self.len()).filter_map(|slot| self.id_at(slot)).collect()
    }

    /// Positions of every node at `now`, in slot order.
    fn positions(&self, now: SimTime) -> Vec<Position> {
        self.ids().into_iter().map(|id| self.position(id, now)).collect()
    }
}

macro_rules! forward_registry {
    ($($ptr:ty),*) => {$(
        impl<T: NodeRegistry + ?Sized> NodeRegistry for $ptr {
            fn len(&self) -> usize { (**self).len() }
            fn id_at(&self, slot: usize) -> Option<NodeId> { (**self).id_at(slot) }
            fn slot_of(&self, id: NodeId) -> Option<usize> { (**self).slot_of(id) }
            fn is_ground(&self, id: NodeId) -> bool { (**self).is_ground(id) }
            fn position(&self, id: NodeId, now: SimTime) -> Position { (**self).position(id, now) }
            fn comm_radius_m(&self, id: NodeId) -> f64 { (**self).comm_radius_m(id) }
            fn interference_radius_m(&self, id: NodeId) -> f64 { (**self).interference_radius_m(id) }
            fn can_reach_without_radio(&self, a: NodeId, b: NodeId) -> bool {
                (**self).can_reach_without_radio(a, b)
            }
        }
    )*};
}

// Lets the engine and a radio medium share one registry.
forward_registry!(&T, std::sync::Arc<T>, std::rc::Rc<T>);
