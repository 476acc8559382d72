//! Event System - 플러그인 이벤트 레지스트리
//!
//! 플러그인이 등록한 핸들러에 이름 있는 이벤트를 전달하고,
//! 핸들러 반환값을 플러그인 이름별로 모아 돌려준다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  EventRegistryBuilder                        │
//! │   register("BlogEvents", provider)   discover(&catalog)     │
//! │                         │ build()                           │
//! │                         ▼                                   │
//! │                    EventRegistry (읽기 전용)                  │
//! │  trigger(caller, "Blog.postSaved", data)                    │
//! │         │                                                   │
//! │         ▼  index["postSaved"] → [BlogEvents#0, ShopEvents#0]│
//! │  ┌──────────────┐  ┌──────────────┐                         │
//! │  │  BlogEvents  │  │  ShopEvents  │  (스코프 불일치 → 건너뜀)  │
//! │  └──────────────┘  └──────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use eventcore_foundation::event::{
//!     EventRegistryBuilder, HandlerTable, Payload, ProviderCatalog,
//! };
//!
//! // 1. 명시적 등록
//! let mut builder = EventRegistryBuilder::<PostsController>::new();
//! builder.register(
//!     "BlogEvents",
//!     HandlerTable::new().method("onPostSaved", |inv| {
//!         Ok(json!({ "reindexed": inv.get("id") }))
//!     }),
//! )?;
//!
//! // 2. 플러그인 디렉토리 탐색 (plugins/<name>/<name>_events.toml)
//! let catalog = ProviderCatalog::new().add_plugin("shop", ShopEvents::new);
//! let report = builder.discover(&catalog);
//!
//! // 3. 이벤트 발생
//! let registry = builder.build();
//! let results = registry.trigger(&controller, "Blog.postSaved", &Payload::new().with("id", 5))?;
//! assert!(results["Blog.postSaved"].contains_key("Blog"));
//! ```

pub mod discovery;
pub mod invocation;
pub mod naming;
pub mod provider;
pub mod registry;

// Re-exports
pub use discovery::{
    DiscoveryReport, FailedPlugin, PluginCandidate, PluginScanner, SkipReason, SkippedPlugin,
};

pub use invocation::{Invocation, Payload};

pub use naming::{
    camelize, event_name_from_method, handler_class_name, handler_method_name,
    plugin_name_from_class, EventName, EventNames, GLOBAL_SCOPE,
};

pub use provider::{EventProvider, HandlerFn, HandlerTable, ProviderCatalog, ProviderFactory};

pub use registry::{DispatchResult, EventRegistry, EventRegistryBuilder, TriggerResult};
