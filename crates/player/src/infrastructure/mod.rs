pub mod platform;

pub use platform::create_platform;
