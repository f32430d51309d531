//! Platform-agnostic core - shared between the WASM page, the native preview and the CLI

pub mod camera;
pub mod cloud;
pub mod counter;
pub mod field;
pub mod frame_loop;
pub mod motion;
pub mod page;
pub mod render;
pub mod typewriter;

pub use camera::{PerspectiveCamera, Viewport};
pub use cloud::{palette, PointCloud};
pub use counter::{CounterFrame, StatCounter};
pub use field::ParticleField;
pub use frame_loop::{CancelToken, FrameLoop, LoopControl};
pub use motion::{CloudTransform, PointerOffset};
pub use render::{Blending, CountingSurface, PointStyle, ProjectedPoint, RenderSurface};
pub use typewriter::{TypeFrame, Typewriter};
