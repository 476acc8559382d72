//! Events Config - 이벤트 레지스트리 설정
//!
//! 글로벌(`<config_dir>/eventcore/events.json`) + 프로젝트(`.eventcore/events.json`)
//! 병합, 프로젝트 설정 우선

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 설정 파일명
pub const EVENTS_CONFIG_FILE: &str = "events.json";

/// 기본 플러그인 루트
pub const DEFAULT_PLUGIN_PATH: &str = "plugins";

/// 기본 이벤트 정의 파일 확장자
pub const DEFAULT_DEFINITION_EXTENSION: &str = "toml";

/// 이벤트 레지스트리 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 플러그인 루트 디렉토리들 (비어 있으면 `plugins`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_paths: Vec<PathBuf>,

    /// 이벤트 정의 파일 확장자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_extension: Option<String>,

    /// 디스패치마다 trace 로그
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            plugin_paths: Vec::new(),
            definition_extension: None,
            debug_mode: None,
        }
    }
}

impl EventsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let global = JsonStore::global().ok();
        let project = JsonStore::current_project().ok();
        Self::load_from(global.as_ref(), project.as_ref())
    }

    /// 주어진 저장소들에서 병합 로드 (뒤에 오는 쪽이 우선)
    pub fn load_from(global: Option<&JsonStore>, project: Option<&JsonStore>) -> Result<Self> {
        let mut config = Self::new();

        for store in [global, project].into_iter().flatten() {
            if let Some(loaded) = store.load_optional::<EventsConfig>(EVENTS_CONFIG_FILE)? {
                config.merge(loaded);
            }
        }

        Ok(config)
    }

    /// 글로벌 설정만 로드
    pub fn load_global() -> Result<Self> {
        let store = JsonStore::global()?;
        Ok(store.load_or_default(EVENTS_CONFIG_FILE))
    }

    /// 프로젝트 설정만 로드
    pub fn load_project() -> Result<Self> {
        let store = JsonStore::current_project()?;
        Ok(store.load_or_default(EVENTS_CONFIG_FILE))
    }

    /// 글로벌 설정 저장
    pub fn save_global(&self) -> Result<()> {
        JsonStore::global()?.save(EVENTS_CONFIG_FILE, self)
    }

    /// 프로젝트 설정 저장
    pub fn save_project(&self) -> Result<()> {
        JsonStore::current_project()?.save(EVENTS_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: EventsConfig) {
        self.version = self.version.max(other.version);
        if !other.plugin_paths.is_empty() {
            self.plugin_paths = other.plugin_paths;
        }
        if other.definition_extension.is_some() {
            self.definition_extension = other.definition_extension;
        }
        if other.debug_mode.is_some() {
            self.debug_mode = other.debug_mode;
        }
    }

    // ========================================================================
    // 유효값
    // ========================================================================

    /// 실제로 스캔할 플러그인 루트
    pub fn plugin_paths(&self) -> Vec<PathBuf> {
        if self.plugin_paths.is_empty() {
            vec![PathBuf::from(DEFAULT_PLUGIN_PATH)]
        } else {
            self.plugin_paths.clone()
        }
    }

    pub fn definition_extension(&self) -> &str {
        self.definition_extension
            .as_deref()
            .unwrap_or(DEFAULT_DEFINITION_EXTENSION)
    }

    pub fn is_debug(&self) -> bool {
        self.debug_mode.unwrap_or(false)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn plugin_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugin_paths.push(path.into());
        self
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.definition_extension = Some(ext.into());
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug_mode = Some(enabled);
        self
    }
}

fn default_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EventsConfig::default();
        assert_eq!(config.plugin_paths(), vec![PathBuf::from("plugins")]);
        assert_eq!(config.definition_extension(), "toml");
        assert!(!config.is_debug());
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = EventsConfig::new().plugin_path("/srv/plugins").debug(true);
        base.merge(EventsConfig::new().extension("json").debug(false));

        assert_eq!(base.plugin_paths(), vec![PathBuf::from("/srv/plugins")]);
        assert_eq!(base.definition_extension(), "json");
        assert!(!base.is_debug());
    }

    #[test]
    fn test_load_from_global_and_project() {
        let global_dir = tempfile::tempdir().unwrap();
        let project_dir = tempfile::tempdir().unwrap();
        let global = JsonStore::new(global_dir.path());
        let project = JsonStore::project(project_dir.path());

        global
            .save(
                EVENTS_CONFIG_FILE,
                &EventsConfig::new().plugin_path("app/plugins").debug(true),
            )
            .unwrap();
        project
            .save(EVENTS_CONFIG_FILE, &EventsConfig::new().extension("json"))
            .unwrap();

        let config = EventsConfig::load_from(Some(&global), Some(&project)).unwrap();
        assert_eq!(config.plugin_paths(), vec![PathBuf::from("app/plugins")]);
        assert_eq!(config.definition_extension(), "json");
        assert!(config.is_debug());

        let none = EventsConfig::load_from(None, None).unwrap();
        assert_eq!(none, EventsConfig::default());
    }

    #[test]
    fn test_camel_case_json() {
        let config: EventsConfig = serde_json::from_str(
            r#"{"pluginPaths": ["a", "b"], "definitionExtension": "php", "debugMode": true}"#,
        )
        .unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.plugin_paths.len(), 2);
        assert_eq!(config.definition_extension(), "php");
        assert!(config.is_debug());
    }
}
