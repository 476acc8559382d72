//! Storage module for EventCore
//!
//! - `json`: JSON - 설정 파일 저장/로드

mod json;

// JSON Storage (범용)
pub use json::{JsonStore, CONFIG_DIR_NAME, PROJECT_DIR_NAME};
