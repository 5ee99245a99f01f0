//! The 26 clickable zones of the view cube.
//!
//! Zones are described in the cube's canonical frame (X right, Y up, Z out of the
//! FRONT face). A face is one signed axis, an edge two and a corner three.

use axes::{Axis, AxisDirection};

use crate::error::{ViewCubeError, ViewCubeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Face,
    Edge,
    Corner,
}

impl ZoneKind {
    /// Number of axes a zone of this kind constrains.
    pub const fn axis_count(self) -> usize {
        match self {
            ZoneKind::Face => 1,
            ZoneKind::Edge => 2,
            ZoneKind::Corner => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    // Faces
    Top,
    Front,
    Right,
    Back,
    Left,
    Bottom,
    // Edges around the top face
    TopFront,
    TopRight,
    TopBack,
    TopLeft,
    // Vertical edges
    FrontRight,
    BackRight,
    BackLeft,
    FrontLeft,
    // Edges around the bottom face
    BottomFront,
    BottomRight,
    BottomBack,
    BottomLeft,
    // Corners
    TopFrontRight,
    TopBackRight,
    TopBackLeft,
    TopFrontLeft,
    BottomFrontRight,
    BottomBackRight,
    BottomBackLeft,
    BottomFrontLeft,
}

/// Faces, then corners, then edges. Hit testing and drawing walk this order.
const ZONES: [Zone; 26] = [
    Zone::Front,
    Zone::Right,
    Zone::Back,
    Zone::Left,
    Zone::Top,
    Zone::Bottom,
    Zone::TopFrontRight,
    Zone::TopBackRight,
    Zone::TopBackLeft,
    Zone::TopFrontLeft,
    Zone::BottomBackRight,
    Zone::BottomFrontRight,
    Zone::BottomFrontLeft,
    Zone::BottomBackLeft,
    Zone::TopFront,
    Zone::TopRight,
    Zone::TopBack,
    Zone::TopLeft,
    Zone::BottomBack,
    Zone::BottomRight,
    Zone::BottomFront,
    Zone::BottomLeft,
    Zone::FrontRight,
    Zone::BackRight,
    Zone::BackLeft,
    Zone::FrontLeft,
];

const TOP: Axis = Axis::POS_Y;
const BOTTOM: Axis = Axis::NEG_Y;
const FRONT: Axis = Axis::POS_Z;
const BACK: Axis = Axis::NEG_Z;
const RIGHT: Axis = Axis::POS_X;
const LEFT: Axis = Axis::NEG_X;

/// All zones in picking priority order.
pub fn all_zones() -> &'static [Zone; 26] {
    &ZONES
}

/// Signed canonical axes that place `zone` on the cube.
pub fn axes_of(zone: Zone) -> &'static [Axis] {
    zone.axes()
}

impl Zone {
    pub const FACES: [Zone; 6] = [
        Zone::Front,
        Zone::Right,
        Zone::Back,
        Zone::Left,
        Zone::Top,
        Zone::Bottom,
    ];

    pub fn axes(self) -> &'static [Axis] {
        match self {
            Zone::Top => &[TOP],
            Zone::Front => &[FRONT],
            Zone::Right => &[RIGHT],
            Zone::Back => &[BACK],
            Zone::Left => &[LEFT],
            Zone::Bottom => &[BOTTOM],

            Zone::TopFront => &[TOP, FRONT],
            Zone::TopRight => &[TOP, RIGHT],
            Zone::TopBack => &[TOP, BACK],
            Zone::TopLeft => &[TOP, LEFT],
            Zone::FrontRight => &[FRONT, RIGHT],
            Zone::BackRight => &[BACK, RIGHT],
            Zone::BackLeft => &[BACK, LEFT],
            Zone::FrontLeft => &[FRONT, LEFT],
            Zone::BottomFront => &[BOTTOM, FRONT],
            Zone::BottomRight => &[BOTTOM, RIGHT],
            Zone::BottomBack => &[BOTTOM, BACK],
            Zone::BottomLeft => &[BOTTOM, LEFT],

            Zone::TopFrontRight => &[TOP, FRONT, RIGHT],
            Zone::TopBackRight => &[TOP, BACK, RIGHT],
            Zone::TopBackLeft => &[TOP, BACK, LEFT],
            Zone::TopFrontLeft => &[TOP, FRONT, LEFT],
            Zone::BottomFrontRight => &[BOTTOM, FRONT, RIGHT],
            Zone::BottomBackRight => &[BOTTOM, BACK, RIGHT],
            Zone::BottomBackLeft => &[BOTTOM, BACK, LEFT],
            Zone::BottomFrontLeft => &[BOTTOM, FRONT, LEFT],
        }
    }

    pub fn kind(self) -> ZoneKind {
        match self.axes().len() {
            1 => ZoneKind::Face,
            2 => ZoneKind::Edge,
            _ => ZoneKind::Corner,
        }
    }

    /// Stable numeric identifier: faces 1-6, edges 7-18, corners 19-26.
    pub const fn id(self) -> u8 {
        match self {
            Zone::Top => 1,
            Zone::Front => 2,
            Zone::Right => 3,
            Zone::Back => 4,
            Zone::Left => 5,
            Zone::Bottom => 6,
            Zone::TopFront => 7,
            Zone::TopRight => 8,
            Zone::TopBack => 9,
            Zone::TopLeft => 10,
            Zone::FrontRight => 11,
            Zone::BackRight => 12,
            Zone::BackLeft => 13,
            Zone::FrontLeft => 14,
            Zone::BottomFront => 15,
            Zone::BottomRight => 16,
            Zone::BottomBack => 17,
            Zone::BottomLeft => 18,
            Zone::TopFrontRight => 19,
            Zone::TopBackRight => 20,
            Zone::TopBackLeft => 21,
            Zone::TopFrontLeft => 22,
            Zone::BottomFrontRight => 23,
            Zone::BottomBackRight => 24,
            Zone::BottomBackLeft => 25,
            Zone::BottomFrontLeft => 26,
        }
    }

    pub fn from_id(id: u8) -> ViewCubeResult<Self> {
        ZONES
            .iter()
            .copied()
            .find(|zone| zone.id() == id)
            .ok_or(ViewCubeError::InvalidZone(id))
    }

    /// Zone whose axes are exactly `axes`, in any order.
    pub fn from_axes(axes: &[Axis]) -> Option<Self> {
        ZONES.iter().copied().find(|zone| {
            let own = zone.axes();
            own.len() == axes.len() && axes.iter().all(|axis| own.contains(axis))
        })
    }

    /// Zone for a per-axis sign triple where 0 leaves the axis unconstrained.
    pub fn from_signs(signs: [i8; 3]) -> Option<Self> {
        let mut axes = Vec::with_capacity(3);
        for direction in AxisDirection::ALL {
            match signs[direction.index()] {
                0 => {}
                s if s > 0 => axes.push(Axis::positive(direction)),
                _ => axes.push(Axis::negative(direction)),
            }
        }
        if axes.is_empty() {
            return None;
        }
        Self::from_axes(&axes)
    }

    /// Caption handed to the label provider; only faces carry one.
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Zone::Top => Some("TOP"),
            Zone::Front => Some("FRONT"),
            Zone::Right => Some("RIGHT"),
            Zone::Back => Some("BACK"),
            Zone::Left => Some("LEFT"),
            Zone::Bottom => Some("BOTTOM"),
            _ => None,
        }
    }
}

/// Supplies a visual material for each captioned face.
pub trait LabelProvider {
    type Material;

    fn material_for(&mut self, zone: Zone, caption: &str) -> Self::Material;
}

/// Ask `provider` for the material of each of the six faces.
pub fn face_materials<P: LabelProvider>(provider: &mut P) -> Vec<(Zone, P::Material)> {
    Zone::FACES
        .iter()
        .filter_map(|&zone| {
            zone.label()
                .map(|caption| (zone, provider.material_for(zone, caption)))
        })
        .collect()
}
