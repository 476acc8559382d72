//! Event Provider - 플러그인이 제공하는 핸들러 묶음
//!
//! 각 플러그인은 `EventProvider`를 구현하고 `{이벤트 이름: 핸들러}` 테이블을
//! 명시적으로 돌려준다. 파일 규칙 기반 탐색은 `ProviderCatalog`에 등록된
//! 팩토리로 Provider를 만든다.

use super::invocation::Invocation;
use super::naming::{event_name_from_method, handler_class_name};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// 핸들러 함수
pub type HandlerFn<C> = Arc<dyn Fn(&mut Invocation<'_, C>) -> Result<Value> + Send + Sync>;

/// Provider 팩토리 (실패하면 해당 플러그인은 핸들러 없음으로 처리된다)
pub type ProviderFactory<C> = Box<dyn Fn() -> Result<Arc<dyn EventProvider<C>>> + Send + Sync>;

// ============================================================================
// HandlerTable
// ============================================================================

/// 이벤트 이름 → 핸들러 테이블 (선언 순서 유지, 같은 이벤트 중복 허용)
pub struct HandlerTable<C: ?Sized> {
    entries: Vec<(String, HandlerFn<C>)>,
}

impl<C: ?Sized> HandlerTable<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 순수 이벤트 이름으로 핸들러 등록
    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Invocation<'_, C>) -> Result<Value> + Send + Sync + 'static,
    {
        self.entries.push((event.into(), Arc::new(handler)));
        self
    }

    /// 핸들러 메서드 이름으로 등록 (`"onPostSaved"` → `"postSaved"`)
    ///
    /// `on` 접두사가 없는 이름은 핸들러가 아니므로 무시된다.
    pub fn method<F>(mut self, method: &str, handler: F) -> Self
    where
        F: Fn(&mut Invocation<'_, C>) -> Result<Value> + Send + Sync + 'static,
    {
        match event_name_from_method(method) {
            Some(event) => self.entries.push((event, Arc::new(handler))),
            None => debug!(method, "Ignoring non-handler method"),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 선언된 이벤트 이름들 (중복 포함)
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(event, _)| event.as_str())
    }

    pub fn into_entries(self) -> Vec<(String, HandlerFn<C>)> {
        self.entries
    }
}

impl<C: ?Sized> Default for HandlerTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> Clone for HandlerTable<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for HandlerTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.events()).finish()
    }
}

// ============================================================================
// EventProvider Trait
// ============================================================================

/// 이벤트 핸들러 Provider
///
/// 플러그인마다 하나씩 등록된다. 핸들러가 Provider 상태를 써야 하면
/// `Arc<Self>`를 클로저로 옮겨 담는다.
///
/// ```ignore
/// struct BlogEvents { index: SearchIndex }
///
/// impl EventProvider<PostsController> for BlogEvents {
///     fn handlers(self: Arc<Self>) -> HandlerTable<PostsController> {
///         let this = self.clone();
///         HandlerTable::new().method("onPostSaved", move |inv| this.reindex(inv))
///     }
/// }
/// ```
pub trait EventProvider<C: ?Sized>: Send + Sync {
    /// 이 Provider가 처리하는 이벤트와 핸들러
    fn handlers(self: Arc<Self>) -> HandlerTable<C>;
}

impl<C: ?Sized + 'static> EventProvider<C> for HandlerTable<C> {
    fn handlers(self: Arc<Self>) -> HandlerTable<C> {
        (*self).clone()
    }
}

// ============================================================================
// ProviderCatalog
// ============================================================================

/// 클래스 이름 → Provider 팩토리
///
/// 플러그인 디렉토리 탐색 시 규칙에 맞는 클래스 이름을 여기서 찾아 생성한다.
pub struct ProviderCatalog<C: ?Sized> {
    factories: IndexMap<String, ProviderFactory<C>>,
}

impl<C: ?Sized + 'static> ProviderCatalog<C> {
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// 클래스 이름으로 팩토리 등록 (같은 이름은 덮어쓴다)
    pub fn add<F, P>(mut self, class: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<P> + Send + Sync + 'static,
        P: EventProvider<C> + 'static,
    {
        let factory: ProviderFactory<C> = Box::new(move || {
            let provider: Arc<dyn EventProvider<C>> = Arc::new(factory()?);
            Ok(provider)
        });
        self.factories.insert(class.into(), factory);
        self
    }

    /// 플러그인 이름으로 팩토리 등록 (`"blog"` → `BlogEvents`)
    pub fn add_plugin<F, P>(self, plugin: &str, factory: F) -> Self
    where
        F: Fn() -> Result<P> + Send + Sync + 'static,
        P: EventProvider<C> + 'static,
    {
        self.add(handler_class_name(plugin), factory)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Provider 생성
    pub fn instantiate(&self, class: &str) -> Result<Arc<dyn EventProvider<C>>> {
        let factory = self
            .factories
            .get(class)
            .ok_or_else(|| Error::ProviderNotFound(class.to_string()))?;
        factory()
    }
}

impl<C: ?Sized + 'static> Default for ProviderCatalog<C> {
    fn default() -> Self {
        Self::new()
    }
}
