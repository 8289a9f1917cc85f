// ── Registry cache ──

mod cache;

pub use cache::RegistryCache;
