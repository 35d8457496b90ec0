pub mod catalog;
pub mod installer;
pub mod platform;
pub mod registry;

pub use catalog::KitCatalog;
pub use installer::InstallStep;
pub use registry::KitRegistry;
