//! Common test utilities and a shared theme options fixture

#![allow(dead_code)]

use parking_lot::RwLock;
use serde_json::{json, Value};
use settings_pages::{
    FieldSpec, FieldTypeRegistry, Hooks, ModuleConfig, OptionsBackend, OptionsMap, PageArgs,
    SettingsModule, SettingsPage, SettingsPages, StaticFields,
};
use std::sync::Arc;

pub const PAGE_SLUG: &str = "tns-custom-options";
pub const GENERAL_OPTIONS: &str = "tns_general_options";

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn print_json(label: &str, value: &OptionsMap) {
    println!(
        "   {}: {}",
        label,
        serde_json::to_string_pretty(value).unwrap()
    );
}

pub fn map(value: Value) -> OptionsMap {
    match value {
        Value::Object(m) => m,
        other => panic!("expected an object, got {other}"),
    }
}

/// Mock collaborators
pub mod mocks {
    use super::*;
    use anyhow::anyhow;

    /// Page ids a dropdown may point at, editable while the test runs
    #[derive(Default)]
    pub struct LivePages {
        ids: RwLock<Vec<Value>>,
    }

    impl LivePages {
        pub fn new(ids: &[i64]) -> Arc<Self> {
            Arc::new(Self {
                ids: RwLock::new(ids.iter().map(|id| json!(id)).collect()),
            })
        }

        pub fn remove(&self, id: i64) {
            self.ids.write().retain(|v| v != &json!(id));
        }
    }

    impl settings_pages::OptionSource for LivePages {
        fn allowed_ids(&self) -> Vec<Value> {
            self.ids.read().clone()
        }
    }

    /// Backend that reads fixed values and refuses every write
    pub struct FailingBackend {
        stored: Value,
    }

    impl FailingBackend {
        pub fn new(stored: Value) -> Self {
            Self { stored }
        }
    }

    impl OptionsBackend for FailingBackend {
        fn get(&self, _name: &str) -> anyhow::Result<Option<Value>> {
            Ok(Some(self.stored.clone()))
        }

        fn put(&self, name: &str, _value: &Value) -> anyhow::Result<()> {
            Err(anyhow!("storage for {name} is read only"))
        }
    }
}

/// Theme options fixture: one page and the general settings module on it
pub struct ThemeOptions {
    pub page: Arc<SettingsPage>,
    pub general: Arc<SettingsModule>,
    pub hooks: Arc<Hooks>,
    pub live_pages: Arc<mocks::LivePages>,
}

pub fn general_config() -> ModuleConfig {
    ModuleConfig {
        admin_title: "General Options".into(),
        admin_description: "Title and tagline fields which allow HTML tags".into(),
        section_key: "tns-general".into(),
        options_handle: GENERAL_OPTIONS.into(),
        options_filter: Some("general_options".into()),
    }
}

/// Fields of the general section, one per built-in type
pub fn general_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("text", "tns-site-title", "Site Title")
            .with_default(json!(""))
            .with_order(10),
        FieldSpec::new("text", "tns-site-tagline", "Site Tagline")
            .with_default(json!(""))
            .with_order(20),
        FieldSpec::new("boolean", "show-tagline", "Show tagline")
            .with_description("Display the tagline below the title")
            .with_order(30),
        FieldSpec::new("number", "posts-per-page", "Posts per page")
            .with_attr("min", json!(1))
            .with_attr("max", json!(50))
            .with_attr("step", json!(1))
            .with_order(40),
        FieldSpec::new("dropdown", "front-page", "Front page")
            .with_attr("data_list", json!({"2": "About", "7": "Blog"}))
            .with_order(50),
        FieldSpec::new("callback", "layout-preview", "Layout preview")
            .with_callback(|| "<div class=\"preview\"></div>".to_string())
            .with_order(60),
    ]
}

pub fn theme_options(backend: Arc<dyn OptionsBackend>) -> ThemeOptions {
    let live_pages = mocks::LivePages::new(&[2, 7]);
    let registry = Arc::new(FieldTypeRegistry::with_builtin_types(live_pages.clone()));
    let pages = SettingsPages::new(registry.clone());
    let page = pages
        .build_page(
            PAGE_SLUG,
            PageArgs::new("Custom Theme Options", "Custom Options", PAGE_SLUG),
        )
        .unwrap();

    let hooks = Arc::new(Hooks::new());
    let general = Arc::new(
        SettingsModule::new(
            general_config(),
            backend,
            Arc::new(StaticFields::new(general_fields())),
            registry,
            hooks.clone(),
        )
        .unwrap(),
    );
    assert!(general.add_options_section(&page));

    ThemeOptions {
        page,
        general,
        hooks,
        live_pages,
    }
}
