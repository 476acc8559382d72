//! 플러그인 이벤트 통합 테스트 - 탐색부터 디스패치까지
//!
//! `cargo test -p eventcore-foundation --test plugin_events`

use eventcore_foundation::{
    Error, EventProvider, EventRegistry, EventRegistryBuilder, EventsConfig, HandlerTable,
    Invocation, Payload, ProviderCatalog, Result,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 이벤트를 발생시키는 쪽
struct PostsController {
    user: String,
}

/// 상태를 가진 Provider
struct BlogEvents {
    saves: AtomicUsize,
}

impl BlogEvents {
    fn new() -> Result<Self> {
        Ok(Self {
            saves: AtomicUsize::new(0),
        })
    }

    fn on_post_saved(&self, inv: &mut Invocation<'_, PostsController>) -> Result<Value> {
        let count = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({
            "plugin": inv.plugin(),
            "name": inv.name(),
            "id": inv.get("id").cloned().unwrap_or(Value::Null),
            "user": inv.caller().user,
            "saves": count,
        }))
    }
}

impl EventProvider<PostsController> for BlogEvents {
    fn handlers(self: Arc<Self>) -> HandlerTable<PostsController> {
        let this = self.clone();
        HandlerTable::<PostsController>::new()
            .method("onPostSaved", move |inv| this.on_post_saved(inv))
    }
}

fn shop_events() -> Result<HandlerTable<PostsController>> {
    Ok(HandlerTable::<PostsController>::new()
        .method("onPostSaved", |_| Ok(json!("shop saw it")))
        .method("onOrderPlaced", |inv| {
            let total: f64 = inv.get_as("total").unwrap_or_default();
            Ok(json!(total + 2.5))
        }))
}

fn write_plugin(root: &Path, plugin: &str) {
    let dir = root.join(plugin);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}_events.toml", plugin)), "").unwrap();
}

fn discovered_registry(root: &Path) -> EventRegistry<PostsController> {
    write_plugin(root, "blog");
    write_plugin(root, "shop");
    write_plugin(root, "legacy");

    let catalog = ProviderCatalog::<PostsController>::new()
        .add_plugin("blog", BlogEvents::new)
        .add_plugin("shop", shop_events)
        .add_plugin("legacy", || -> Result<HandlerTable<PostsController>> {
            Err(Error::provider_init("LegacyEvents", "missing table"))
        });

    let mut builder = EventRegistryBuilder::with_config(EventsConfig::new().plugin_path(root));
    let report = builder.discover(&catalog);
    assert_eq!(report.loaded, vec!["BlogEvents", "ShopEvents"]);
    assert_eq!(report.failed.len(), 1);

    builder.build()
}

fn controller() -> PostsController {
    PostsController {
        user: "admin".to_string(),
    }
}

#[test]
fn test_blog_post_saved_example() {
    let temp = tempfile::tempdir().unwrap();
    let registry = discovered_registry(temp.path());

    let data = Payload::new().with("id", 5);
    let results = registry
        .trigger(&controller(), "Global.postSaved", &data)
        .unwrap();

    let blog = &results["Global.postSaved"]["Blog"];
    assert_eq!(blog["plugin"], json!("Blog"));
    assert_eq!(blog["name"], json!("postSaved"));
    assert_eq!(blog["id"], json!(5));
    assert_eq!(blog["user"], json!("admin"));
    assert_eq!(results["Global.postSaved"]["Shop"], json!("shop saw it"));
}

#[test]
fn test_scoped_and_listed_events() {
    let temp = tempfile::tempdir().unwrap();
    let registry = discovered_registry(temp.path());

    let data = Payload::new().with("total", 10.0);
    let results = registry
        .trigger(
            &controller(),
            vec!["Blog.postSaved", "orderPlaced", "Legacy.postSaved"],
            &data,
        )
        .unwrap();

    let keys: Vec<_> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Blog.postSaved", "orderPlaced", "Legacy.postSaved"]);

    // Blog 스코프에서는 Shop 핸들러가 실행되지 않는다
    let scoped: Vec<_> = results["Blog.postSaved"].keys().collect();
    assert_eq!(scoped, vec!["Blog"]);

    assert_eq!(results["orderPlaced"]["Shop"], json!(12.5));

    // 로드 실패한 플러그인은 핸들러가 없다
    assert!(results["Legacy.postSaved"].is_empty());
}

#[test]
fn test_provider_state_survives_between_triggers() {
    let temp = tempfile::tempdir().unwrap();
    let registry = discovered_registry(temp.path());

    for _ in 0..2 {
        registry
            .trigger_one(&controller(), "Blog.postSaved", &Payload::new())
            .unwrap();
    }
    let third = registry
        .trigger_one(&controller(), "Blog.postSaved", &Payload::new())
        .unwrap();

    assert_eq!(third["Blog"]["saves"], json!(3));
}

#[test]
fn test_malformed_name_uses_first_two_tokens() {
    let temp = tempfile::tempdir().unwrap();
    let registry = discovered_registry(temp.path());

    let results = registry
        .trigger(&controller(), "Shop.orderPlaced.extra", &Payload::new())
        .unwrap();

    assert_eq!(results["Shop.orderPlaced.extra"]["Shop"], json!(2.5));
}
