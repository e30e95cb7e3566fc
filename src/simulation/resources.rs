//! The placeable-infrastructure economy
//!
//! A fixed set of enum-indexed counters. The counters only move through
//! `try_place` and `refund`, so they can never underflow and a missing-key
//! lookup is unrepresentable.

/// Starting allocation of roads
pub const STARTING_ROADS: u32 = 20;
/// Starting allocation of motorways
pub const STARTING_MOTORWAYS: u32 = 3;
/// Starting allocation of bridges
pub const STARTING_BRIDGES: u32 = 2;
/// Starting allocation of roundabouts
pub const STARTING_ROUNDABOUTS: u32 = 1;
/// Starting allocation of traffic lights
pub const STARTING_TRAFFIC_LIGHTS: u32 = 2;
/// Starting allocation of upgrades
pub const STARTING_UPGRADES: u32 = 1;

/// The kinds of placeable resource the player budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Roads,
    Motorways,
    Bridges,
    Roundabouts,
    TrafficLights,
    Upgrades,
}

impl ResourceKind {
    /// All kinds, in observation-layer order
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Roads,
        ResourceKind::Motorways,
        ResourceKind::Bridges,
        ResourceKind::Roundabouts,
        ResourceKind::TrafficLights,
        ResourceKind::Upgrades,
    ];

    fn index(self) -> usize {
        match self {
            ResourceKind::Roads => 0,
            ResourceKind::Motorways => 1,
            ResourceKind::Bridges => 2,
            ResourceKind::Roundabouts => 3,
            ResourceKind::TrafficLights => 4,
            ResourceKind::Upgrades => 5,
        }
    }

    /// The per-kind starting allocation, also the observation divisor
    pub fn starting_allocation(self) -> u32 {
        match self {
            ResourceKind::Roads => STARTING_ROADS,
            ResourceKind::Motorways => STARTING_MOTORWAYS,
            ResourceKind::Bridges => STARTING_BRIDGES,
            ResourceKind::Roundabouts => STARTING_ROUNDABOUTS,
            ResourceKind::TrafficLights => STARTING_TRAFFIC_LIGHTS,
            ResourceKind::Upgrades => STARTING_UPGRADES,
        }
    }
}

/// Counters for every placeable resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLedger {
    counts: [u32; 6],
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLedger {
    /// A ledger holding the full starting allocation
    pub fn new() -> Self {
        let mut counts = [0; 6];
        for kind in ResourceKind::ALL {
            counts[kind.index()] = kind.starting_allocation();
        }
        Self { counts }
    }

    /// Restore the starting allocation of every kind
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn count(&self, kind: ResourceKind) -> u32 {
        self.counts[kind.index()]
    }

    /// Consume one unit of a kind
    ///
    /// Returns false and leaves the ledger untouched when the kind is
    /// exhausted.
    pub fn try_place(&mut self, kind: ResourceKind) -> bool {
        let count = &mut self.counts[kind.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Return one unit of a kind, unconditionally
    pub fn refund(&mut self, kind: ResourceKind) {
        self.counts[kind.index()] += 1;
    }

    /// Total units remaining across all kinds
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Count scaled by the starting allocation, for the observation layer
    pub fn normalized(&self, kind: ResourceKind) -> f32 {
        self.count(kind) as f32 / kind.starting_allocation() as f32
    }
}
