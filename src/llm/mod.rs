mod enhancer;

pub use enhancer::{EnhanceRequest, Enhancement, LlmEnhancer};
