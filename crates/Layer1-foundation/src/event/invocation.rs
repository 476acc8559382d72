//! Invocation - 핸들러 호출마다 전달되는 값
//!
//! 고정 필드(`name`, `caller`, `plugin`)와 자유 키/값 페이로드를 분리해서 가진다.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Payload
// ============================================================================

/// 이벤트 데이터 (입력 순서를 유지하는 키/값 맵)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// 값 추가 (빌더)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// JSON 객체에서 생성
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::InvalidInput(format!(
                "event payload must be an object, got {}",
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 타입 변환 조회 (키가 없거나 변환 실패 시 None)
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 값 설정, 기존 값 반환
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Payload {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Invocation
// ============================================================================

/// 핸들러 호출 값
///
/// 핸들러 하나를 호출할 때마다 새로 만들어지고 호출이 끝나면 버려진다.
/// 페이로드는 trigger에 넘긴 데이터의 복사본이라 핸들러가 값을 바꿔도
/// 호출자의 데이터에는 영향이 없다.
pub struct Invocation<'a, C: ?Sized> {
    name: &'a str,
    caller: &'a C,
    plugin: &'a str,
    payload: Payload,
}

impl<'a, C: ?Sized> Invocation<'a, C> {
    pub fn new(name: &'a str, caller: &'a C, plugin: &'a str, payload: Payload) -> Self {
        Self {
            name,
            caller,
            plugin,
            payload,
        }
    }

    /// 스코프를 뗀 이벤트 이름
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// trigger를 호출한 쪽
    pub fn caller(&self) -> &'a C {
        self.caller
    }

    /// 핸들러를 소유한 플러그인 이름
    pub fn plugin(&self) -> &'a str {
        self.plugin
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.payload.get_as(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.payload.insert(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.payload.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.payload.contains(key)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

impl<C: ?Sized> std::fmt::Debug for Invocation<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("name", &self.name)
            .field("plugin", &self.plugin)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_builder_keeps_order() {
        let payload = Payload::new().with("z", 1).with("a", "two").with("m", true);
        let keys: Vec<_> = payload.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(payload.get_as::<i64>("z"), Some(1));
        assert_eq!(payload.get_as::<String>("a").as_deref(), Some("two"));
        assert_eq!(payload.get_as::<i64>("a"), None);
    }

    #[test]
    fn test_payload_from_json() {
        let payload = Payload::from_json(json!({"id": 5, "title": "hello"})).unwrap();
        assert_eq!(payload.len(), 2);
        assert!(Payload::from_json(Value::Null).unwrap().is_empty());
        assert!(matches!(
            Payload::from_json(json!([1, 2])),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invocation_fields_and_bag() {
        let caller = String::from("PostsController");
        let data = Payload::new().with("id", 5);

        let mut inv = Invocation::new("postSaved", &caller, "Blog", data.clone());
        assert_eq!(inv.name(), "postSaved");
        assert_eq!(inv.plugin(), "Blog");
        assert_eq!(inv.caller(), "PostsController");
        assert_eq!(inv.get_as::<i64>("id"), Some(5));

        inv.set("slug", "hello-world");
        inv.set("id", 6);
        assert!(inv.contains("slug"));
        assert_eq!(inv.remove("slug"), Some(json!("hello-world")));

        // 원본 데이터는 그대로
        assert_eq!(data.get_as::<i64>("id"), Some(5));
        assert!(!data.contains("slug"));
    }
}
