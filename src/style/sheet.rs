//! SheetScope: the default style scope.
//!
//! Supports rule sets whose selectors are compound selectors made of a type
//! name or `*`, `.class` and `#id` parts (e.g. `Label.title#main`), separated
//! by commas. Rules are ordered by specificity, then source order; later
//! rules overwrite earlier ones. Selectors with combinators are skipped.

use std::path::{Path, PathBuf};

use super::parser::{parse_rules, Rule, Simple};
use super::scope::StyleScope;
use crate::dom::{ViewData, ViewId, ViewTree};

#[derive(Debug, Clone)]
struct CssSource {
    text: String,
    file: Option<PathBuf>,
}

/// Default [`StyleScope`] implementation.
#[derive(Debug, Default)]
pub struct SheetScope {
    sources: Vec<CssSource>,
    rules: Vec<Rule>,
    compiled: bool,
}

impl SheetScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files that contributed stylesheet text, in the order they were added.
    pub fn source_files(&self) -> Vec<&Path> {
        self.sources.iter().filter_map(|s| s.file.as_deref()).collect()
    }

    /// Number of compiled rules (one per selector of each rule set).
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn compile(&mut self) {
        let mut rules = Vec::new();
        for source in &self.sources {
            parse_rules(&source.text, &mut rules);
        }
        rules.sort_by_key(|rule| rule.specificity);
        log::trace!("compiled {} css rules", rules.len());
        self.rules = rules;
        self.compiled = true;
    }
}

impl StyleScope for SheetScope {
    fn css(&self) -> String {
        self.sources
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn set_css(&mut self, css: &str) {
        self.sources = vec![CssSource {
            text: css.to_owned(),
            file: None,
        }];
        self.compiled = false;
    }

    fn add_css(&mut self, css: &str, source_file: Option<&Path>) {
        self.sources.push(CssSource {
            text: css.to_owned(),
            file: source_file.map(Path::to_path_buf),
        });
        self.compiled = false;
    }

    fn ensure_selectors(&mut self) {
        if !self.compiled {
            self.compile();
        }
    }

    fn apply_selectors(&self, tree: &mut ViewTree, view: ViewId) {
        let Some(data) = tree.get_mut(view) else {
            return;
        };
        for rule in &self.rules {
            if matches(&rule.selector, data) {
                for (property, value) in &rule.declarations {
                    data.style.set_css(property, value.as_str());
                }
            }
        }
    }
}

fn matches(selector: &[Simple], view: &ViewData) -> bool {
    selector.iter().all(|simple| match simple {
        Simple::Universal => true,
        Simple::Type(name) => view.view_type == *name,
        Simple::Class(name) => view.has_class(name),
        Simple::Id(name) => view.id.as_deref() == Some(name.as_str()),
    })
}
