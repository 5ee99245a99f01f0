//! Signed axes and the axis conventions used to place the view cube in world space.
//!
//! The cube has its own canonical frame: X points right, Y points up and Z points
//! out of the FRONT face. An [`AxisSystem`] says which world axis plays each of
//! those roles, so a Z-up scene gets a cube whose TOP face looks down world Z.

use std::fmt;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    X,
    Y,
    Z,
}

impl AxisDirection {
    pub const ALL: [AxisDirection; 3] = [AxisDirection::X, AxisDirection::Y, AxisDirection::Z];

    pub const fn index(self) -> usize {
        match self {
            AxisDirection::X => 0,
            AxisDirection::Y => 1,
            AxisDirection::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            AxisDirection::X => Vec3::X,
            AxisDirection::Y => Vec3::Y,
            AxisDirection::Z => Vec3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSign {
    Positive,
    Negative,
}

impl AxisSign {
    pub const fn scalar(self) -> f32 {
        match self {
            AxisSign::Positive => 1.0,
            AxisSign::Negative => -1.0,
        }
    }

    pub const fn invert(self) -> Self {
        match self {
            AxisSign::Positive => AxisSign::Negative,
            AxisSign::Negative => AxisSign::Positive,
        }
    }

    /// Sign of a non-zero scalar; zero has no sign.
    pub fn of(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(AxisSign::Positive)
        } else if value < 0.0 {
            Some(AxisSign::Negative)
        } else {
            None
        }
    }
}

/// One of the six signed coordinate directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axis {
    direction: AxisDirection,
    sign: AxisSign,
}

impl Axis {
    pub const POS_X: Axis = Axis::positive(AxisDirection::X);
    pub const NEG_X: Axis = Axis::negative(AxisDirection::X);
    pub const POS_Y: Axis = Axis::positive(AxisDirection::Y);
    pub const NEG_Y: Axis = Axis::negative(AxisDirection::Y);
    pub const POS_Z: Axis = Axis::positive(AxisDirection::Z);
    pub const NEG_Z: Axis = Axis::negative(AxisDirection::Z);

    pub const fn new(direction: AxisDirection, sign: AxisSign) -> Self {
        Self { direction, sign }
    }

    pub const fn positive(direction: AxisDirection) -> Self {
        Self::new(direction, AxisSign::Positive)
    }

    pub const fn negative(direction: AxisDirection) -> Self {
        Self::new(direction, AxisSign::Negative)
    }

    pub fn vector(self) -> Vec3 {
        self.direction.unit() * self.sign.scalar()
    }

    pub const fn direction(&self) -> AxisDirection {
        self.direction
    }

    pub const fn sign(&self) -> AxisSign {
        self.sign
    }

    pub const fn inverted(self) -> Self {
        Self::new(self.direction, self.sign.invert())
    }

    pub const fn signed_label(&self) -> &'static str {
        match (self.direction, self.sign) {
            (AxisDirection::X, AxisSign::Positive) => "+X",
            (AxisDirection::X, AxisSign::Negative) => "-X",
            (AxisDirection::Y, AxisSign::Positive) => "+Y",
            (AxisDirection::Y, AxisSign::Negative) => "-Y",
            (AxisDirection::Z, AxisSign::Positive) => "+Z",
            (AxisDirection::Z, AxisSign::Negative) => "-Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signed_label())
    }
}

/// Maps the cube's canonical right/up/front roles onto world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSystem {
    right: Axis,
    up: Axis,
    front: Axis,
}

impl AxisSystem {
    pub const fn new(right: Axis, up: Axis, front: Axis) -> Self {
        Self { right, up, front }
    }

    pub const fn right(&self) -> Axis {
        self.right
    }

    pub const fn up(&self) -> Axis {
        self.up
    }

    pub const fn front(&self) -> Axis {
        self.front
    }

    pub fn up_vec(&self) -> Vec3 {
        self.up.vector()
    }

    pub fn front_vec(&self) -> Vec3 {
        self.front.vector()
    }

    pub fn back_vec(&self) -> Vec3 {
        -self.front_vec()
    }

    /// Columns are the world vectors of canonical X, Y and Z.
    pub fn canonical_basis(&self) -> Mat3 {
        Mat3::from_cols(self.right.vector(), self.up_vec(), self.front_vec())
    }

    /// World direction of a canonical cube axis.
    pub fn to_world(&self, canonical: Axis) -> Vec3 {
        let role = match canonical.direction() {
            AxisDirection::X => self.right,
            AxisDirection::Y => self.up,
            AxisDirection::Z => self.front,
        };
        role.vector() * canonical.sign().scalar()
    }

    pub fn canonical_to_world(&self, canonical: Vec3) -> Vec3 {
        self.canonical_basis() * canonical
    }

    pub fn world_to_canonical(&self, world: Vec3) -> Vec3 {
        self.canonical_basis().transpose() * world
    }

    /// True when right x up == front, i.e. the mapping is a proper rotation.
    pub fn is_right_handed(&self) -> bool {
        self.right.vector().cross(self.up_vec()).dot(self.front_vec()) > 0.0
    }
}

impl Default for AxisSystem {
    fn default() -> Self {
        AxisPreset::default().axis_system()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPreset {
    /// X right, Y up, front face on +Z (three.js / glTF layout)
    #[default]
    YUp,
    /// -X right, Y up, front face on -Z (front view looks down +Z)
    YUpFrontNegZ,
    /// X right, Z up, front face on -Y (CAD / architectural layout)
    ZUp,
}

impl AxisPreset {
    pub const ALL: [AxisPreset; 3] = [AxisPreset::YUp, AxisPreset::YUpFrontNegZ, AxisPreset::ZUp];

    pub const fn label(&self) -> &'static str {
        match self {
            AxisPreset::YUp => "X right / Y up / +Z front",
            AxisPreset::YUpFrontNegZ => "-X right / Y up / -Z front",
            AxisPreset::ZUp => "X right / Z up / -Y front",
        }
    }

    pub const fn axis_system(self) -> AxisSystem {
        match self {
            AxisPreset::YUp => AxisSystem::new(Axis::POS_X, Axis::POS_Y, Axis::POS_Z),
            AxisPreset::YUpFrontNegZ => AxisSystem::new(Axis::NEG_X, Axis::POS_Y, Axis::NEG_Z),
            AxisPreset::ZUp => AxisSystem::new(Axis::POS_X, Axis::POS_Z, Axis::NEG_Y),
        }
    }
}

impl From<AxisPreset> for AxisSystem {
    fn from(value: AxisPreset) -> Self {
        value.axis_system()
    }
}
