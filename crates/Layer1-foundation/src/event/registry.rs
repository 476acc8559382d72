//! Event Registry - 이벤트 핸들러 등록/디스패치
//!
//! `EventRegistryBuilder`에서 Provider를 등록(또는 탐색)한 뒤 `build()`로
//! 읽기 전용 `EventRegistry`를 만든다. 빌드 이후에는 상태가 바뀌지 않으므로
//! 여러 스레드에서 잠금 없이 `trigger`할 수 있다.

use super::invocation::{Invocation, Payload};
use super::naming::{plugin_name_from_class, EventName, EventNames};
use super::provider::{EventProvider, HandlerFn};
use crate::config::EventsConfig;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 이벤트 하나의 결과 (플러그인 이름 → 핸들러 반환값)
pub type DispatchResult = IndexMap<String, Value>;

/// trigger 결과 (입력한 이벤트 이름 → DispatchResult)
pub type TriggerResult = IndexMap<String, DispatchResult>;

/// 등록된 Provider 정보
struct RegisteredProvider<C: ?Sized> {
    provider: Arc<dyn EventProvider<C>>,
    plugin: String,
    handlers: Vec<HandlerFn<C>>,
}

/// 인덱스 항목: 어떤 클래스의 몇 번째 핸들러인지
#[derive(Debug, Clone)]
struct HandlerRef {
    class: String,
    slot: usize,
}

// ============================================================================
// EventRegistryBuilder
// ============================================================================

/// 등록 단계의 레지스트리
///
/// ```ignore
/// let mut builder = EventRegistryBuilder::with_config(EventsConfig::load()?);
/// builder.register("BlogEvents", BlogEvents::new())?;
/// let report = builder.discover(&catalog);
/// let registry = Arc::new(builder.build());
///
/// let results = registry.trigger(&controller, "Blog.postSaved", &data)?;
/// ```
pub struct EventRegistryBuilder<C: ?Sized> {
    config: EventsConfig,
    providers: IndexMap<String, RegisteredProvider<C>>,
    index: IndexMap<String, Vec<HandlerRef>>,
}

impl<C: ?Sized + 'static> EventRegistryBuilder<C> {
    /// 기본 설정으로 생성
    pub fn new() -> Self {
        Self::with_config(EventsConfig::default())
    }

    /// 설정과 함께 생성
    pub fn with_config(config: EventsConfig) -> Self {
        Self {
            config,
            providers: IndexMap::new(),
            index: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &EventsConfig {
        &self.config
    }

    /// Provider 등록
    pub fn register<P>(&mut self, class: impl Into<String>, provider: P) -> Result<()>
    where
        P: EventProvider<C> + 'static,
    {
        self.register_arc(class, Arc::new(provider))
    }

    /// 이미 `Arc`로 감싼 Provider 등록
    ///
    /// 같은 클래스 이름은 한 번만 등록할 수 있다.
    pub fn register_arc(
        &mut self,
        class: impl Into<String>,
        provider: Arc<dyn EventProvider<C>>,
    ) -> Result<()> {
        let class = class.into();
        if self.providers.contains_key(&class) {
            return Err(Error::AlreadyRegistered(class));
        }

        let plugin = plugin_name_from_class(&class).to_string();
        let table = provider.clone().handlers();

        let mut handlers = Vec::with_capacity(table.len());
        for (slot, (event, handler)) in table.into_entries().into_iter().enumerate() {
            self.index.entry(event).or_default().push(HandlerRef {
                class: class.clone(),
                slot,
            });
            handlers.push(handler);
        }

        debug!(
            class = %class,
            plugin = %plugin,
            handlers = handlers.len(),
            "Registered event provider"
        );

        self.providers.insert(
            class,
            RegisteredProvider {
                provider,
                plugin,
                handlers,
            },
        );

        Ok(())
    }

    /// 클래스 등록 여부
    pub fn is_registered(&self, class: &str) -> bool {
        self.providers.contains_key(class)
    }

    /// 등록된 Provider 수
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// 등록 종료, 읽기 전용 레지스트리 생성
    pub fn build(self) -> EventRegistry<C> {
        debug!(
            providers = self.providers.len(),
            events = self.index.len(),
            "Event registry ready"
        );

        EventRegistry {
            debug_mode: self.config.is_debug(),
            providers: self.providers,
            index: self.index,
        }
    }
}

impl<C: ?Sized + 'static> Default for EventRegistryBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// EventRegistry
// ============================================================================

/// 이벤트 레지스트리
///
/// 프로세스 시작 시 한 번 만들고 이벤트를 발생시키는 모든 컴포넌트에
/// 참조(또는 `Arc`)로 넘긴다.
pub struct EventRegistry<C: ?Sized> {
    debug_mode: bool,
    providers: IndexMap<String, RegisteredProvider<C>>,
    index: IndexMap<String, Vec<HandlerRef>>,
}

impl<C: ?Sized + 'static> EventRegistry<C> {
    /// 빈 레지스트리 빌더
    pub fn builder() -> EventRegistryBuilder<C> {
        EventRegistryBuilder::new()
    }

    /// 이벤트 (또는 이벤트 목록) 발생
    ///
    /// 각 이름은 `"event"`(Global 스코프) 또는 `"Scope.event"` 형식이다.
    /// 빈 이름은 무시하고, 나머지는 입력 순서대로 하나씩 처리한다.
    /// 결과는 입력한 이름 그대로를 키로 가진다.
    ///
    /// 핸들러가 에러를 돌려주면 즉시 중단하고 그 에러를 그대로 돌려준다.
    pub fn trigger(
        &self,
        caller: &C,
        names: impl Into<EventNames>,
        data: &Payload,
    ) -> Result<TriggerResult> {
        let names = names.into();
        let mut results = TriggerResult::new();

        for name in names.iter() {
            let dispatched = self.dispatch(caller, EventName::parse(name), data)?;
            results.insert(name.to_string(), dispatched);
        }

        Ok(results)
    }

    /// 이벤트 하나 발생
    pub fn trigger_one(&self, caller: &C, name: &str, data: &Payload) -> Result<DispatchResult> {
        if name.is_empty() {
            return Ok(DispatchResult::new());
        }
        self.dispatch(caller, EventName::parse(name), data)
    }

    fn dispatch(&self, caller: &C, name: EventName<'_>, data: &Payload) -> Result<DispatchResult> {
        let mut results = DispatchResult::new();

        let Some(refs) = self.index.get(name.event) else {
            if self.debug_mode {
                trace!(scope = name.scope, event = name.event, "No handlers for event");
            }
            return Ok(results);
        };

        for handler_ref in refs {
            let Some(registered) = self.providers.get(&handler_ref.class) else {
                continue;
            };
            let Some(handler) = registered.handlers.get(handler_ref.slot) else {
                continue;
            };

            let plugin = registered.plugin.as_str();
            if !name.admits(plugin) {
                if self.debug_mode {
                    trace!(
                        scope = name.scope,
                        event = name.event,
                        plugin,
                        "Skipping handler out of scope"
                    );
                }
                continue;
            }

            if self.debug_mode {
                trace!(
                    scope = name.scope,
                    event = name.event,
                    class = %handler_ref.class,
                    "Invoking event handler"
                );
            }

            let mut invocation = Invocation::new(name.event, caller, plugin, data.clone());
            let value = handler(&mut invocation).map_err(|e| {
                warn!(plugin, event = name.event, error = %e, "Event handler failed");
                e
            })?;

            results.insert(plugin.to_string(), value);
        }

        Ok(results)
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 등록된 플러그인 이름 (등록 순서)
    pub fn plugins(&self) -> Vec<&str> {
        self.providers.values().map(|p| p.plugin.as_str()).collect()
    }

    /// 등록된 클래스 이름 (등록 순서)
    pub fn class_names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// 클래스 이름으로 Provider 조회
    pub fn provider(&self, class: &str) -> Option<Arc<dyn EventProvider<C>>> {
        self.providers.get(class).map(|p| p.provider.clone())
    }

    /// 이벤트에 핸들러를 등록한 플러그인들 (디스패치 순서)
    pub fn handlers_for(&self, event: &str) -> Vec<&str> {
        self.index
            .get(event)
            .map(|refs| {
                refs.iter()
                    .filter_map(|r| self.providers.get(&r.class))
                    .map(|p| p.plugin.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_handlers(&self, event: &str) -> bool {
        self.index.get(event).is_some_and(|refs| !refs.is_empty())
    }

    /// 핸들러가 있는 이벤트 이름들 (처음 등록된 순서)
    pub fn event_names(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// 전체 핸들러 수
    pub fn handler_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }
}

// ============================================================================
// 테스트
// ============================================================================
