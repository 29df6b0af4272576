//! Settings pages - sections plus the option groups submissions route to

use super::registry::FieldTypeRegistry;
use super::section::SettingsSection;
use super::store::OptionsMap;
use super::validation::sanitize_key;
use crate::contract::{FieldSpec, PageArgs};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

const DEFAULT_POSITION: i64 = 61;

/// Receives submissions for one options mapping
pub trait SubmissionHandler: Send + Sync {
    /// Validate a raw submission into the mapping to persist
    fn sanitize(&self, input: &OptionsMap) -> OptionsMap;

    /// Persist the sanitized mapping
    fn commit(&self, values: OptionsMap) -> bool;
}

struct OptionGroup {
    name: String,
    handler: Arc<dyn SubmissionHandler>,
}

/// Settings page shared by the feature modules registered on it
pub struct SettingsPage {
    slug: String,
    args: PageArgs,
    registry: Arc<FieldTypeRegistry>,
    sections: RwLock<IndexMap<String, SettingsSection>>,
    option_groups: RwLock<Vec<OptionGroup>>,
}

fn misconfig(slug: &str, details: &str) {
    tracing::warn!(target: "settings_pages::misconfig", page = %slug, "{}", details);
}

impl SettingsPage {
    /// Build a page, `None` when the slug or arguments are unusable
    pub fn new(slug: &str, args: PageArgs, registry: Arc<FieldTypeRegistry>) -> Option<Self> {
        let safe_slug = sanitize_key(slug);
        let mut valid = true;
        if safe_slug.is_empty() {
            misconfig(slug, "Set a valid menu slug for this settings page");
            valid = false;
        }
        if args.page_title.trim().is_empty() {
            misconfig(slug, "Set a valid page name for this settings page");
            valid = false;
        }
        if args.menu_title.trim().is_empty() {
            misconfig(slug, "Set a valid menu name for this settings page");
            valid = false;
        }
        if args.option_group.trim().is_empty() {
            misconfig(slug, "Set a valid options group for this settings page");
            valid = false;
        }
        if !valid {
            return None;
        }

        Some(Self {
            slug: safe_slug,
            args: PageArgs {
                position: Some(args.position.unwrap_or(DEFAULT_POSITION)),
                ..args
            },
            registry,
            sections: RwLock::new(IndexMap::new()),
            option_groups: RwLock::new(Vec::new()),
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn page_title(&self) -> &str {
        &self.args.page_title
    }

    pub fn menu_title(&self) -> &str {
        &self.args.menu_title
    }

    pub fn option_group(&self) -> &str {
        &self.args.option_group
    }

    pub fn position(&self) -> i64 {
        self.args.position.unwrap_or(DEFAULT_POSITION)
    }

    pub fn registry(&self) -> &Arc<FieldTypeRegistry> {
        &self.registry
    }

    /// Register the handler for an options mapping submitted from this page
    ///
    /// Returns false for an empty name or one that is already registered.
    pub fn add_options(&self, name: &str, handler: Arc<dyn SubmissionHandler>) -> bool {
        let safe_name = sanitize_key(name);
        if safe_name.is_empty() {
            misconfig(&self.slug, "Options name is empty");
            return false;
        }

        let mut groups = self.option_groups.write();
        if groups.iter().any(|g| g.name == safe_name) {
            tracing::debug!(page = %self.slug, option = %safe_name, "Options already registered");
            return false;
        }
        groups.push(OptionGroup {
            name: safe_name,
            handler,
        });
        true
    }

    /// Whether a handler is registered for the sanitized `name`
    pub fn has_options(&self, name: &str) -> bool {
        let safe_name = sanitize_key(name);
        self.option_groups.read().iter().any(|g| g.name == safe_name)
    }

    /// Registered options names, in registration order
    pub fn option_names(&self) -> Vec<String> {
        self.option_groups.read().iter().map(|g| g.name.clone()).collect()
    }

    /// Add a section; false when the sanitized key is empty or taken
    pub fn add_section(&self, key: &str, title: &str, description: &str) -> bool {
        let safe_key = sanitize_key(key);
        if safe_key.is_empty() {
            misconfig(&self.slug, "Section key is empty");
            return false;
        }

        let mut sections = self.sections.write();
        if sections.contains_key(&safe_key) {
            return false;
        }
        sections.insert(
            safe_key.clone(),
            SettingsSection::new(safe_key, title, description),
        );
        true
    }

    /// Add a field to an existing section
    pub fn add_setting(&self, section_key: &str, spec: &FieldSpec) -> bool {
        let safe_key = sanitize_key(section_key);
        if safe_key.is_empty() {
            return false;
        }
        match self.sections.write().get_mut(&safe_key) {
            Some(section) => section.add_field(&self.registry, spec),
            None => {
                tracing::debug!(page = %self.slug, section = %safe_key, "Unknown section");
                false
            }
        }
    }

    /// Section keys in the order they were added
    pub fn section_keys(&self) -> Vec<String> {
        self.sections.read().keys().cloned().collect()
    }

    pub fn with_section<R>(&self, key: &str, f: impl FnOnce(&SettingsSection) -> R) -> Option<R> {
        self.sections.read().get(&sanitize_key(key)).map(f)
    }

    /// Route a submission to the handler registered for `option_name`
    ///
    /// Returns whether the sanitized values were persisted.
    pub fn submit(&self, option_name: &str, input: &OptionsMap) -> bool {
        let safe_name = sanitize_key(option_name);
        let handler = self
            .option_groups
            .read()
            .iter()
            .find(|g| g.name == safe_name)
            .map(|g| Arc::clone(&g.handler));

        let Some(handler) = handler else {
            tracing::warn!(page = %self.slug, option = %safe_name, "No handler for submitted options");
            return false;
        };

        let values = handler.sanitize(input);
        let saved = handler.commit(values);
        tracing::debug!(page = %self.slug, option = %safe_name, saved, "Processed submission");
        saved
    }
}

/// Factory and directory of settings pages, keyed by sanitized slug
pub struct SettingsPages {
    registry: Arc<FieldTypeRegistry>,
    pages: RwLock<IndexMap<String, Arc<SettingsPage>>>,
}

impl SettingsPages {
    pub fn new(registry: Arc<FieldTypeRegistry>) -> Self {
        Self {
            registry,
            pages: RwLock::new(IndexMap::new()),
        }
    }

    pub fn registry(&self) -> &Arc<FieldTypeRegistry> {
        &self.registry
    }

    /// Build and register a page; `None` for invalid or duplicate slugs
    pub fn build_page(&self, slug: &str, args: PageArgs) -> Option<Arc<SettingsPage>> {
        let safe_slug = sanitize_key(slug);
        if !safe_slug.is_empty() && self.pages.read().contains_key(&safe_slug) {
            misconfig(slug, "The page is already registered");
            return None;
        }

        let page = Arc::new(SettingsPage::new(slug, args, Arc::clone(&self.registry))?);
        self.pages.write().insert(safe_slug, Arc::clone(&page));
        tracing::debug!(page = %page.slug(), "Built settings page");
        Some(page)
    }

    pub fn get(&self, slug: &str) -> Option<Arc<SettingsPage>> {
        self.pages.read().get(&sanitize_key(slug)).cloned()
    }

    pub fn slugs(&self) -> Vec<String> {
        self.pages.read().keys().cloned().collect()
    }
}
