mod registry;

pub use registry::SdkDetector;
