//! Orientation engine behind a clickable view cube.
//!
//! [`region`] enumerates the 26 zones, [`picking`] resolves pointer positions to
//! zones, [`mapper`] turns a zone into a camera orientation, [`fly_to`] animates a
//! camera toward it and [`sync`] runs all of it once per frame against a
//! [`DrivenCamera`].

pub mod camera;
pub mod error;
pub mod fly_to;
pub mod mapper;
pub mod picking;
pub mod placement;
pub mod region;
pub mod sync;

pub use camera::{orbit_to, DrivenCamera, OrbitCamera};
pub use error::{ViewCubeError, ViewCubeResult};
pub use fly_to::{FlyFrame, FlyPhase, FlyStart, FlyTicket, FlyToController};
pub use mapper::{OrientationMapper, OrientationTarget};
pub use picking::PickingResolver;
pub use placement::{CubePlacement, CubeTransform, ScreenRect};
pub use region::{all_zones, axes_of, face_materials, LabelProvider, Zone, ZoneKind};
pub use sync::{FrameOutput, FrameScheduler, RotateAxis, RotateDelta, ViewCube, ViewCubeEvent};
