// ── Domain model ──

pub mod device;
pub mod key;
pub mod paths;
pub mod profile;
pub mod registry;

pub use device::{Channel, Device, Emitter, EmitterKind, HaType, LightSender, SensorOptions};
pub use key::DeviceKey;
pub use paths::OutputPaths;
pub use profile::{Profile, ProfileCatalog};
pub use registry::Registry;
