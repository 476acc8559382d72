//! Config - 설정 관리
//!
//! - `events.rs` - 이벤트 레지스트리 설정 (플러그인 루트, 정의 파일 규칙)

mod events;

pub use events::{
    EventsConfig, DEFAULT_DEFINITION_EXTENSION, DEFAULT_PLUGIN_PATH, EVENTS_CONFIG_FILE,
};
