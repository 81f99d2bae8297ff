//! Packet progression orders, described in Section B.12.
//!
//! The codestream stores one packet per combination of quality layer,
//! resolution level, component and precinct. The progression order from
//! the COD segment dictates in which sequence those combinations
//! appear. All five orders walk the same four axes and differ only in
//! their nesting, so a single counter-based enumerator covers them.

/// The order in which the packet axes are nested, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionOrder {
    /// Layer, resolution, component, position.
    Lrcp,
    /// Resolution, layer, component, position.
    Rlcp,
    /// Resolution, position, component, layer.
    Rpcl,
    /// Position, component, resolution, layer.
    Pcrl,
    /// Component, position, resolution, layer.
    Cprl,
}

impl ProgressionOrder {
    /// The progression order encoded in a COD segment, if valid.
    pub fn from_cod(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Lrcp),
            1 => Some(Self::Rlcp),
            2 => Some(Self::Rpcl),
            3 => Some(Self::Pcrl),
            4 => Some(Self::Cprl),
            _ => None,
        }
    }

    fn axes(self) -> [Axis; 4] {
        match self {
            Self::Lrcp => [Axis::Layer, Axis::Resolution, Axis::Component, Axis::Position],
            Self::Rlcp => [Axis::Resolution, Axis::Layer, Axis::Component, Axis::Position],
            Self::Rpcl => [Axis::Resolution, Axis::Position, Axis::Component, Axis::Layer],
            Self::Pcrl => [Axis::Position, Axis::Component, Axis::Resolution, Axis::Layer],
            Self::Cprl => [Axis::Component, Axis::Position, Axis::Resolution, Axis::Layer],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Layer,
    Resolution,
    Component,
    Position,
}

/// The precinct grid of one component at one resolution level.
#[derive(Debug, Clone, Copy)]
pub struct PrecinctGrid {
    /// Precincts per row.
    pub wide: u32,
    /// Precinct rows.
    pub high: u32,
}

impl PrecinctGrid {
    fn count(&self) -> u32 {
        self.wide * self.high
    }
}

/// The packet-relevant shape of one component: its precinct grid per
/// resolution level.
#[derive(Debug, Clone, Default)]
pub struct ComponentLayout {
    /// One grid per resolution level, lowest first.
    pub resolutions: Vec<PrecinctGrid>,
}

/// The packet-relevant shape of a tile.
#[derive(Debug, Clone, Default)]
pub struct TileLayout {
    /// Number of quality layers.
    pub layers: u16,
    pub components: Vec<ComponentLayout>,
}

impl TileLayout {
    fn max_resolutions(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.resolutions.len())
            .max()
            .unwrap_or(0)
    }

    fn grid(&self, component: usize, resolution: usize) -> Option<&PrecinctGrid> {
        self.components.get(component)?.resolutions.get(resolution)
    }
}

/// The position of one packet in the codestream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketPosition {
    pub layer: u16,
    pub resolution: u16,
    pub component: u16,
    pub precinct: u32,
}

/// A lazy enumerator over all packet positions of a tile, in the given
/// progression order.
///
/// Components may have fewer resolution levels than others; positions
/// that don't exist for a component are skipped. The iterator can be
/// rewound with [`PacketIter::reset`] when a tile is decoded more than
/// once.
#[derive(Debug, Clone)]
pub struct PacketIter<'a> {
    axes: [Axis; 4],
    tile: &'a TileLayout,
    indices: [u32; 4],
    done: bool,
}

impl<'a> PacketIter<'a> {
    pub fn new(order: ProgressionOrder, tile: &'a TileLayout) -> Self {
        let done = tile.layers == 0 || tile.components.is_empty();

        Self {
            axes: order.axes(),
            tile,
            indices: [0; 4],
            done,
        }
    }

    /// Rewind to the first packet.
    pub fn reset(&mut self) {
        self.indices = [0; 4];
        self.done = self.tile.layers == 0 || self.tile.components.is_empty();
    }

    fn index_of(&self, axis: Axis) -> u32 {
        let slot = self.axes.iter().position(|a| *a == axis);
        slot.map(|s| self.indices[s]).unwrap_or(0)
    }

    /// The iteration bound of the axis at `slot`, given the indices of
    /// the axes outside it.
    fn bound(&self, slot: usize) -> u32 {
        let outer_fixed = |axis: Axis| self.axes[..slot].contains(&axis);

        match self.axes[slot] {
            Axis::Layer => u32::from(self.tile.layers),
            Axis::Component => self.tile.components.len() as u32,
            Axis::Resolution => {
                if outer_fixed(Axis::Component) {
                    let component = self.index_of(Axis::Component) as usize;
                    self.tile
                        .components
                        .get(component)
                        .map(|c| c.resolutions.len() as u32)
                        .unwrap_or(0)
                } else {
                    self.tile.max_resolutions() as u32
                }
            }
            Axis::Position => {
                // The position axis ranges over the largest precinct
                // count among the component/resolution pairs that are
                // not yet fixed by an outer axis.
                let components: &[ComponentLayout] = if outer_fixed(Axis::Component) {
                    let component = self.index_of(Axis::Component) as usize;
                    std::slice::from_ref(&self.tile.components[component])
                } else {
                    &self.tile.components
                };

                components
                    .iter()
                    .map(|c| {
                        if outer_fixed(Axis::Resolution) {
                            let resolution = self.index_of(Axis::Resolution) as usize;
                            c.resolutions
                                .get(resolution)
                                .map(PrecinctGrid::count)
                                .unwrap_or(0)
                        } else {
                            c.resolutions.iter().map(PrecinctGrid::count).max().unwrap_or(0)
                        }
                    })
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Whether the current counter tuple names a packet that exists.
    fn is_valid(&self) -> bool {
        let component = self.index_of(Axis::Component) as usize;
        let resolution = self.index_of(Axis::Resolution) as usize;
        let precinct = self.index_of(Axis::Position);

        match self.tile.grid(component, resolution) {
            Some(grid) => precinct < grid.count(),
            None => false,
        }
    }

    /// Move the counter to the next tuple, odometer style.
    fn advance(&mut self) {
        for slot in (0..4).rev() {
            self.indices[slot] += 1;

            if self.indices[slot] < self.bound(slot) {
                return;
            }

            self.indices[slot] = 0;
        }

        self.done = true;
    }
}

impl Iterator for PacketIter<'_> {
    type Item = PacketPosition;

    fn next(&mut self) -> Option<PacketPosition> {
        while !self.done {
            let valid = self.is_valid();
            let position = PacketPosition {
                layer: self.index_of(Axis::Layer) as u16,
                resolution: self.index_of(Axis::Resolution) as u16,
                component: self.index_of(Axis::Component) as u16,
                precinct: self.index_of(Axis::Position),
            };

            self.advance();

            if valid {
                return Some(position);
            }
        }

        None
    }
}
