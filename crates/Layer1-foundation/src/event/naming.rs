//! Naming conventions - 이벤트 이름, 핸들러 메서드, 클래스 이름 규칙
//!
//! - 이벤트 이름: `"event"` 또는 `"Scope.event"`
//! - 핸들러 메서드: `"on" + camelize(event)`
//! - Provider 클래스: `camelize(<plugin>_events)` (예: `BlogEvents`)

/// 스코프 제한 없음을 뜻하는 스코프 이름
pub const GLOBAL_SCOPE: &str = "Global";

/// 핸들러 메서드 접두사
pub const HANDLER_PREFIX: &str = "on";

/// Provider 클래스 이름 접미사
pub const CLASS_SUFFIX: &str = "Events";

/// 이벤트 정의 파일 이름 접미사 (`<plugin>_events.<ext>`)
pub const DEFINITION_SUFFIX: &str = "_events";

// ============================================================================
// Inflection
// ============================================================================

/// `lower_case_and_underscored` 단어를 `CamelCase`로 변환
///
/// 밑줄과 공백을 단어 경계로 보고 각 단어의 첫 글자만 대문자로 바꾼다.
/// 나머지 글자는 그대로 둔다 (`"postSaved"` → `"PostSaved"`).
pub fn camelize(word: &str) -> String {
    word.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(upper_first)
        .collect()
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 이벤트 이름 → 핸들러 메서드 이름 (`"postSaved"` → `"onPostSaved"`)
pub fn handler_method_name(event: &str) -> String {
    format!("{}{}", HANDLER_PREFIX, camelize(event))
}

/// 핸들러 메서드 이름 → 이벤트 이름 (`"onPostSaved"` → `"postSaved"`)
///
/// 접두사가 없거나 접두사 뒤가 비어 있으면 핸들러가 아니다.
pub fn event_name_from_method(method: &str) -> Option<String> {
    let rest = method.strip_prefix(HANDLER_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(lower_first(rest))
}

/// 플러그인 이름 → Provider 클래스 이름 (`"news_letter"` → `"NewsLetterEvents"`)
pub fn handler_class_name(plugin: &str) -> String {
    camelize(&format!("{}{}", plugin, DEFINITION_SUFFIX))
}

/// Provider 클래스 이름 → 플러그인 이름
///
/// 접미사 내용과 무관하게 마지막 6글자를 잘라낸다.
pub fn plugin_name_from_class(class: &str) -> &str {
    let keep = class.chars().count().saturating_sub(CLASS_SUFFIX.len());
    match class.char_indices().nth(keep) {
        Some((idx, _)) => &class[..idx],
        None => class,
    }
}

/// 플러그인 디렉토리 안의 이벤트 정의 파일 이름 (`"blog"` → `"blog_events.toml"`)
pub fn definition_file_name(plugin: &str, extension: &str) -> String {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        format!("{}{}", plugin, DEFINITION_SUFFIX)
    } else {
        format!("{}{}.{}", plugin, DEFINITION_SUFFIX, ext)
    }
}

// ============================================================================
// EventName
// ============================================================================

/// 파싱된 이벤트 이름 (스코프 + 순수 이벤트 이름)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventName<'a> {
    /// `"Global"` 또는 플러그인 이름
    pub scope: &'a str,
    /// 스코프를 뗀 이벤트 이름
    pub event: &'a str,
}

impl<'a> EventName<'a> {
    /// `"event"` / `"Scope.event"` 파싱
    ///
    /// 점이 두 개 이상이면 앞의 두 토큰만 쓴다 (`"A.b.c"` → `A`, `b`).
    /// 각 토큰의 앞뒤 공백은 잘라낸다.
    pub fn parse(name: &'a str) -> Self {
        let mut tokens = name.split('.').map(str::trim);
        let first = tokens.next().unwrap_or_default();
        match tokens.next() {
            Some(event) => Self {
                scope: first,
                event,
            },
            None => Self {
                scope: GLOBAL_SCOPE,
                event: first,
            },
        }
    }

    /// 스코프 제한이 없는지
    pub fn is_global(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }

    /// 이 스코프에서 해당 플러그인의 핸들러가 실행될 수 있는지 (정확히 일치)
    pub fn admits(&self, plugin: &str) -> bool {
        self.is_global() || self.scope == plugin
    }
}

impl std::fmt::Display for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.scope, self.event)
    }
}

// ============================================================================
// EventNames
// ============================================================================

/// `trigger`에 넘기는 이벤트 이름 하나 또는 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventNames(Vec<String>);

impl EventNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, name: impl Into<String>) -> Self {
        self.0.push(name.into());
        self
    }

    /// 빈 이름을 제외한 이름들 (입력 순서 유지)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str).filter(|n| !n.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl From<&str> for EventNames {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for EventNames {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<&String> for EventNames {
    fn from(name: &String) -> Self {
        Self(vec![name.clone()])
    }
}

impl From<Vec<String>> for EventNames {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for EventNames {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EventNames {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EventNames {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for EventNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
