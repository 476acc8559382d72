//! Plugin Discovery - 플러그인 디렉토리 규칙 기반 Provider 탐색
//!
//! 플러그인 루트 아래 한 단계 하위 디렉토리를 플러그인으로 보고,
//! `<root>/<plugin>/<plugin>_events.<ext>` 파일이 있으면
//! `ProviderCatalog`에서 `camelize(<plugin>_events)` 클래스를 만들어 등록한다.
//! 생성 실패는 해당 플러그인만 건너뛰고 탐색을 계속한다.

use super::naming::{definition_file_name, handler_class_name};
use super::provider::ProviderCatalog;
use super::registry::EventRegistryBuilder;
use crate::config::EventsConfig;
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// PluginCandidate
// ============================================================================

/// 탐색된 플러그인 디렉토리
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCandidate {
    /// 플러그인 루트
    pub root: PathBuf,
    /// 플러그인 이름 (디렉토리 이름)
    pub plugin: String,
    /// 규칙상 Provider 클래스 이름
    pub class_name: String,
    /// 이벤트 정의 파일 경로
    pub definition: PathBuf,
    /// 정의 파일 존재 여부
    pub has_definition: bool,
}

// ============================================================================
// PluginScanner
// ============================================================================

/// 플러그인 루트 스캐너
#[derive(Debug, Clone)]
pub struct PluginScanner {
    roots: Vec<PathBuf>,
    extension: String,
}

impl PluginScanner {
    pub fn new(roots: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            roots,
            extension: extension.into(),
        }
    }

    /// 설정의 루트/확장자로 생성
    pub fn from_config(config: &EventsConfig) -> Self {
        Self::new(config.plugin_paths(), config.definition_extension())
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// 모든 루트 스캔 (없거나 읽을 수 없는 루트는 건너뛴다)
    pub fn scan(&self) -> Vec<PluginCandidate> {
        let mut candidates = Vec::new();

        for root in &self.roots {
            match self.scan_root(root) {
                Ok(found) => candidates.extend(found),
                Err(e) => debug!(root = %root.display(), error = %e, "Skipping plugin root"),
            }
        }

        candidates
    }

    /// 루트 하나 스캔
    pub fn scan_root(&self, root: &Path) -> Result<Vec<PluginCandidate>> {
        let plugins = list_plugin_dirs(root)?;

        Ok(plugins
            .into_iter()
            .map(|plugin| {
                let definition = root
                    .join(&plugin)
                    .join(definition_file_name(&plugin, &self.extension));
                PluginCandidate {
                    root: root.to_path_buf(),
                    class_name: handler_class_name(&plugin),
                    has_definition: definition.is_file(),
                    definition,
                    plugin,
                }
            })
            .collect())
    }
}

/// 루트 바로 아래 디렉토리 이름들 (숨김 디렉토리 제외, 이름순)
fn list_plugin_dirs(root: &Path) -> Result<Vec<String>> {
    let mut plugins = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        plugins.push(name);
    }

    plugins.sort();
    Ok(plugins)
}

// ============================================================================
// DiscoveryReport
// ============================================================================

/// 건너뛴 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 이벤트 정의 파일 없음
    NoDefinition,
    /// 같은 클래스가 이미 등록됨
    AlreadyRegistered,
}

/// 건너뛴 플러그인
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPlugin {
    pub plugin: String,
    pub class_name: String,
    pub reason: SkipReason,
}

/// Provider 생성에 실패한 플러그인
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedPlugin {
    pub plugin: String,
    pub class_name: String,
    pub error: String,
}

/// 탐색 결과
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// 등록된 클래스 이름
    pub loaded: Vec<String>,
    pub skipped: Vec<SkippedPlugin>,
    pub failed: Vec<FailedPlugin>,
}

impl DiscoveryReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn skip(&mut self, candidate: &PluginCandidate, reason: SkipReason) {
        self.skipped.push(SkippedPlugin {
            plugin: candidate.plugin.clone(),
            class_name: candidate.class_name.clone(),
            reason,
        });
    }
}

// ============================================================================
// Discovery
// ============================================================================

impl<C: ?Sized + 'static> EventRegistryBuilder<C> {
    /// 설정된 플러그인 루트에서 Provider 탐색
    pub fn discover(&mut self, catalog: &ProviderCatalog<C>) -> DiscoveryReport {
        let scanner = PluginScanner::from_config(self.config());
        self.discover_with(&scanner, catalog)
    }

    /// 주어진 스캐너로 Provider 탐색
    ///
    /// 실패는 호출자에게 에러로 전달하지 않고 로그와 리포트에만 남긴다.
    pub fn discover_with(
        &mut self,
        scanner: &PluginScanner,
        catalog: &ProviderCatalog<C>,
    ) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        for candidate in scanner.scan() {
            if !candidate.has_definition {
                report.skip(&candidate, SkipReason::NoDefinition);
                continue;
            }

            if self.is_registered(&candidate.class_name) {
                debug!(
                    plugin = %candidate.plugin,
                    class = %candidate.class_name,
                    "Event provider already registered, skipping"
                );
                report.skip(&candidate, SkipReason::AlreadyRegistered);
                continue;
            }

            let registered = catalog
                .instantiate(&candidate.class_name)
                .and_then(|provider| self.register_arc(candidate.class_name.clone(), provider));

            match registered {
                Ok(()) => report.loaded.push(candidate.class_name),
                Err(e) => {
                    warn!(
                        plugin = %candidate.plugin,
                        class = %candidate.class_name,
                        error = %e,
                        "Failed to load event provider"
                    );
                    report.failed.push(FailedPlugin {
                        plugin: candidate.plugin,
                        class_name: candidate.class_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Event provider discovery finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::provider::HandlerTable;
    use crate::Error;
    use serde_json::Value;
    use std::fs;

    fn plugin_dir(root: &Path, plugin: &str, with_definition: bool) {
        let dir = root.join(plugin);
        fs::create_dir_all(&dir).unwrap();
        if with_definition {
            fs::write(dir.join(format!("{}_events.toml", plugin)), "").unwrap();
        }
    }

    fn ping() -> Result<HandlerTable<()>> {
        Ok(HandlerTable::<()>::new().on("ping", |inv| Ok(Value::from(inv.plugin()))))
    }

    #[test]
    fn test_scan_root() {
        let temp = tempfile::tempdir().unwrap();
        plugin_dir(temp.path(), "blog", true);
        plugin_dir(temp.path(), "news_letter", false);
        plugin_dir(temp.path(), ".git", false);
        fs::write(temp.path().join("README.md"), "not a plugin").unwrap();

        let scanner = PluginScanner::new(vec![temp.path().to_path_buf()], "toml");
        let candidates = scanner.scan();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].plugin, "blog");
        assert_eq!(candidates[0].class_name, "BlogEvents");
        assert!(candidates[0].has_definition);
        assert_eq!(candidates[1].class_name, "NewsLetterEvents");
        assert!(!candidates[1].has_definition);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = PluginScanner::new(vec![temp.path().join("nope")], "toml");
        assert!(scanner.scan().is_empty());
        assert!(scanner.scan_root(&temp.path().join("nope")).is_err());
    }

    #[test]
    fn test_discover_continues_past_failures() {
        let temp = tempfile::tempdir().unwrap();
        plugin_dir(temp.path(), "blog", true);
        plugin_dir(temp.path(), "broken", true);
        plugin_dir(temp.path(), "shop", true);
        plugin_dir(temp.path(), "uncatalogued", true);
        plugin_dir(temp.path(), "wiki", false);

        let catalog = ProviderCatalog::<()>::new()
            .add_plugin("blog", ping)
            .add_plugin("broken", || -> Result<HandlerTable<()>> {
                Err(Error::provider_init("BrokenEvents", "constructor failed"))
            })
            .add_plugin("shop", ping)
            .add_plugin("wiki", ping);

        let config = EventsConfig::default().plugin_path(temp.path());
        let mut builder = EventRegistryBuilder::with_config(config);
        let report = builder.discover(&catalog);

        assert_eq!(report.loaded, vec!["BlogEvents", "ShopEvents"]);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].class_name, "BrokenEvents");
        assert_eq!(report.failed[1].class_name, "UncataloguedEvents");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::NoDefinition);
        assert!(!report.is_clean());

        let registry = builder.build();
        let results = registry.trigger_one(&(), "ping", &Default::default()).unwrap();
        let plugins: Vec<_> = results.keys().map(String::as_str).collect();
        assert_eq!(plugins, vec!["Blog", "Shop"]);
    }

    #[test]
    fn test_discover_same_plugin_in_two_roots() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        plugin_dir(first.path(), "blog", true);
        plugin_dir(second.path(), "blog", true);

        let catalog = ProviderCatalog::<()>::new().add_plugin("blog", ping);
        let scanner = PluginScanner::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            "toml",
        );

        let mut builder = EventRegistryBuilder::new();
        let report = builder.discover_with(&scanner, &catalog);

        assert_eq!(report.loaded, vec!["BlogEvents"]);
        assert_eq!(report.skipped[0].reason, SkipReason::AlreadyRegistered);
        assert_eq!(builder.build().handlers_for("ping"), vec!["Blog"]);
    }
}
