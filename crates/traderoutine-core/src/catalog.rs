//! Module catalog: the fixed checklist a day is evaluated against.
//!
//! A [`Catalog`] is built once at startup and passed by reference into the
//! evaluator, streak calculator and calendar projection. Nothing in the
//! crate holds a global catalog, so tests can substitute smaller ones.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, ValidationError};
use crate::record::Mood;

/// One checkable task inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOption {
    pub id: String,
    pub label: String,
}

/// A category of daily habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<ModuleOption>,
    /// Closing reflection module: also satisfied by a recap note or a mood.
    #[serde(default)]
    pub reflection: bool,
    #[serde(default)]
    pub status_options: Vec<Mood>,
}

impl ModuleDefinition {
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Reflection modules with no `status_options` offer every mood.
    pub fn offers_mood(&self, mood: Mood) -> bool {
        self.reflection && (self.status_options.is_empty() || self.status_options.contains(&mood))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    modules: Vec<ModuleDefinition>,
}

/// Ordered, immutable list of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    modules: Vec<ModuleDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate module or option ids.
    pub fn new(modules: Vec<ModuleDefinition>) -> Result<Self, ValidationError> {
        if modules.is_empty() {
            return Err(ValidationError::EmptyCollection("catalog modules".into()));
        }

        let mut module_ids = HashSet::new();
        let mut option_ids = HashSet::new();
        for module in &modules {
            if module.id.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "module.id".into(),
                    message: "must not be empty".into(),
                });
            }
            if !module_ids.insert(module.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    kind: "module",
                    id: module.id.clone(),
                });
            }
            for option in &module.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(ValidationError::DuplicateId {
                        kind: "option",
                        id: option.id.clone(),
                    });
                }
            }
        }

        Ok(Self { modules })
    }

    /// Parse a catalog from TOML (`[[modules]]` tables).
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(Self::new(file.modules)?)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// The six-module daily routine the app ships with.
    pub fn reference() -> Self {
        fn opt(id: &str, label: &str) -> ModuleOption {
            ModuleOption {
                id: id.into(),
                label: label.into(),
            }
        }
        fn module(id: &str, title: &str, description: &str, options: Vec<ModuleOption>) -> ModuleDefinition {
            ModuleDefinition {
                id: id.into(),
                title: title.into(),
                description: Some(description.into()),
                options,
                reflection: false,
                status_options: Vec::new(),
            }
        }

        let modules = vec![
            module(
                "customer_reach",
                "Customer outreach",
                "Any one item counts",
                vec![
                    opt("dm_email", "Message or email a customer"),
                    opt("follow_old", "Follow up an existing customer"),
                ],
            ),
            module(
                "exposure_content",
                "Exposure / content",
                "Anything publicly visible counts",
                vec![opt("social_post", "Post on Facebook / LinkedIn / Douyin / TikTok")],
            ),
            module(
                "industry_observe",
                "Industry / customer observation",
                "Look with a purpose, not scrolling",
                vec![
                    opt("watch_peer", "Check on competitors"),
                    opt("watch_customer", "Check customer updates"),
                    opt("watch_industry", "Read industry content"),
                ],
            ),
            module(
                "account_maintenance",
                "Account activity upkeep",
                "Behave like a normal user",
                vec![opt(
                    "account_active",
                    "Keep Facebook / Xiaohongshu / Douyin / TikTok accounts active",
                )],
            ),
            module(
                "product_tech",
                "Product / technology",
                "Even five minutes counts",
                vec![
                    opt("review_drawing", "Review drawings or molds"),
                    opt("learn_process", "Learn a bit of process or product"),
                ],
            ),
            ModuleDefinition {
                id: "wrap_up".into(),
                title: "Wrap-up".into(),
                description: Some("One-line recap".into()),
                options: Vec::new(),
                reflection: true,
                status_options: Mood::ALL.to_vec(),
            },
        ];

        Self { modules }
    }

    pub fn modules(&self) -> &[ModuleDefinition] {
        &self.modules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleDefinition> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module(&self, id: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn module_for_option(&self, option_id: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.has_option(option_id))
    }

    /// Whether some reflection module lets the user pick `mood`.
    pub fn accepts_mood(&self, mood: Mood) -> bool {
        self.modules.iter().any(|m| m.offers_mood(mood))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ModuleDefinition;
    type IntoIter = std::slice::Iter<'a, ModuleDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
