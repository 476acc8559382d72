//! # eventcore-foundation
//!
//! Foundation layer for EventCore:
//! - Event: 플러그인 이벤트 레지스트리 (등록, 디렉토리 탐색, 디스패치)
//! - Config: 이벤트 설정 (플러그인 루트, 정의 파일 규칙)
//! - Storage: JsonStore (글로벌/프로젝트 설정 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application (controllers, jobs, ...)                   │
//! │        │ trigger(caller, "Blog.postSaved", data)        │
//! │        ▼                                                │
//! │  EventRegistry ── index: event → [class#slot, ...]      │
//! │        │                                                │
//! │        ├── BlogEvents  (plugins/blog/blog_events.toml)  │
//! │        └── ShopEvents  (plugins/shop/shop_events.toml)  │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    EventsConfig, DEFAULT_DEFINITION_EXTENSION, DEFAULT_PLUGIN_PATH, EVENTS_CONFIG_FILE,
};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;

// ============================================================================
// Event (이벤트 레지스트리)
// ============================================================================
pub use event::{
    // Registry
    DispatchResult,
    EventRegistry,
    EventRegistryBuilder,
    TriggerResult,
    // Provider
    EventProvider,
    HandlerFn,
    HandlerTable,
    ProviderCatalog,
    // Invocation
    Invocation,
    Payload,
    // Naming
    EventName,
    EventNames,
    GLOBAL_SCOPE,
    // Discovery
    DiscoveryReport,
    PluginCandidate,
    PluginScanner,
    SkipReason,
};
