//! Per-probe scratch storage.
//!
//! A [`ProbeArena`] is created at the top of a probe and dropped when the
//! probe returns.  Objects are addressed through typed [`Handle`]s, so there is
//! no per-object create/destroy pairing to get wrong: dropping the arena
//! releases everything it holds.
//!
//! [`ProbeLedger`] counts allocations and releases across all arenas that
//! borrow it; `live() == 0` between probes is the leak check.

use std::cell::Cell;
use std::marker::PhantomData;
use std::ops::Index;

use crate::medium::{Arrival, Decision, Listening, Noise, Packet, Reception, Snir, Transmission};

// ── Storage ───────────────────────────────────────────────────────────────────

use private::Slot;

/// A value that can live in a [`ProbeArena`].
pub trait ArenaObject: Sized + private::Sealed {
    #[doc(hidden)]
    fn into_slot(self) -> Slot;
    #[doc(hidden)]
    fn from_slot(slot: &Slot) -> Option<&Self>;
}

mod private {
    use super::*;

    pub trait Sealed {}

    pub enum Slot {
        Packet(Packet),
        Transmission(Transmission),
        Arrival(Arrival),
        Listening(Listening),
        Reception(Reception),
        Noise(Noise),
        Snir(Snir),
        Decision(Decision),
    }
}

macro_rules! arena_object {
    ($($ty:ident),*) => {$(
        impl private::Sealed for $ty {}
        impl ArenaObject for $ty {
            fn into_slot(self) -> Slot {
                Slot::$ty(self)
            }
            fn from_slot(slot: &Slot) -> Option<&Self> {
                match slot {
                    Slot::$ty(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

arena_object!(Packet, Transmission, Arrival, Listening, Reception, Noise, Snir, Decision);

// ── Handle ────────────────────────────────────────────────────────────────────

/// Typed index into the arena that allocated it.
pub struct Handle<T> {
    index:   usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({})", self.index)
    }
}

// ── ProbeLedger ───────────────────────────────────────────────────────────────

/// Allocation counters shared by every arena of one oracle.
#[derive(Default, Debug)]
pub struct ProbeLedger {
    created:  Cell<u64>,
    released: Cell<u64>,
}

impl ProbeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects allocated over the ledger's lifetime.
    pub fn created(&self) -> u64 {
        self.created.get()
    }

    /// Objects released over the ledger's lifetime.
    pub fn released(&self) -> u64 {
        self.released.get()
    }

    /// Objects currently held by some arena.
    pub fn live(&self) -> u64 {
        self.created.get() - self.released.get()
    }
}

// ── ProbeArena ────────────────────────────────────────────────────────────────

/// Owned storage for every object synthesized by a single probe.
pub struct ProbeArena<'l> {
    slots:  Vec<Slot>,
    ledger: &'l ProbeLedger,
}

impl<'l> ProbeArena<'l> {
    pub fn new(ledger: &'l ProbeLedger) -> Self {
        Self { slots: Vec::with_capacity(8), ledger }
    }

    /// Move `obj` into the arena.
    pub fn alloc<T: ArenaObject>(&mut self, obj: T) -> Handle<T> {
        self.slots.push(obj.into_slot());
        self.ledger.created.set(self.ledger.created.get() + 1);
        Handle { index: self.slots.len() - 1, _marker: PhantomData }
    }

    /// Number of objects currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: ArenaObject> Index<Handle<T>> for ProbeArena<'_> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        match T::from_slot(&self.slots[handle.index]) {
            Some(v) => v,
            None => unreachable!("handle type is fixed at allocation"),
        }
    }
}

impl Drop for ProbeArena<'_> {
    fn drop(&mut self) {
        let n = self.slots.len() as u64;
        self.ledger.released.set(self.ledger.released.get() + n);
    }
}
