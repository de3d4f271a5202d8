// Export submodules
pub mod device;
pub mod sensor;
