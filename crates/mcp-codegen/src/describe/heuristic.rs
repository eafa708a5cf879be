//! Name-prefix heuristic describer.
//!
//! Deterministic and pure: the category comes from the longest matching
//! prefix in an ordered table, and the description is the prefix's verb
//! followed by the remaining name tokens.

use mcp_sdkgen_core::{DescribedMethod, DescriptionSource, DiscoveredMethod};
use std::collections::BTreeMap;

/// Category for names that match no prefix.
pub const OTHER_CATEGORY: &str = "other";

/// Built-in prefix table: prefix, category, verb.
const BUILTIN_RULES: [(&str, &str, &str); 7] = [
    ("get_", "retrieval", "Retrieve"),
    ("list_", "listing", "List"),
    ("create_", "creation", "Create"),
    ("update_", "modification", "Update"),
    ("patch_", "modification", "Patch"),
    ("delete_", "deletion", "Delete"),
    ("search_", "search", "Search"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct PrefixRule {
    prefix: String,
    category: String,
    verb: String,
}

/// Heuristic describe strategy.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::describe::HeuristicDescriber;
/// use mcp_sdkgen_core::DiscoveredMethod;
///
/// let describer = HeuristicDescriber::new();
/// let described = describer.describe(&DiscoveredMethod::new("github.Repository", "get_repo_issues"));
///
/// assert_eq!(described.category, "retrieval");
/// assert_eq!(described.description, "Retrieve repo issues");
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicDescriber {
    rules: Vec<PrefixRule>,
}

impl HeuristicDescriber {
    /// Creates a describer with the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(prefix, category, verb)| PrefixRule {
                    prefix: (*prefix).to_string(),
                    category: (*category).to_string(),
                    verb: (*verb).to_string(),
                })
                .collect(),
        }
    }

    /// Creates a describer with extra `prefix → category` entries.
    ///
    /// A custom entry for a built-in prefix replaces its category. The verb
    /// of a new prefix is derived from the prefix itself (`read_namespaced_`
    /// gives "Read namespaced").
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_sdkgen_codegen::describe::HeuristicDescriber;
    /// use mcp_sdkgen_core::DiscoveredMethod;
    /// use std::collections::BTreeMap;
    ///
    /// let mappings = BTreeMap::from([("read_namespaced_".to_string(), "pod-lifecycle".to_string())]);
    /// let describer = HeuristicDescriber::with_custom_mappings(&mappings);
    /// let described = describer.describe(&DiscoveredMethod::new("k8s.CoreV1Api", "read_namespaced_pod"));
    ///
    /// assert_eq!(described.category, "pod-lifecycle");
    /// assert_eq!(described.description, "Read namespaced pod");
    /// ```
    #[must_use]
    pub fn with_custom_mappings(mappings: &BTreeMap<String, String>) -> Self {
        let mut describer = Self::new();
        for (prefix, category) in mappings {
            if let Some(rule) = describer.rules.iter_mut().find(|r| &r.prefix == prefix) {
                rule.category.clone_from(category);
            } else {
                describer.rules.push(PrefixRule {
                    prefix: prefix.clone(),
                    category: category.clone(),
                    verb: verb_from_prefix(prefix),
                });
            }
        }
        describer
    }

    /// Describes one method.
    #[must_use]
    pub fn describe(&self, method: &DiscoveredMethod) -> DescribedMethod {
        let (category, description) = self.categorize(method);
        DescribedMethod {
            method: method.clone(),
            category,
            description,
            source: DescriptionSource::Heuristic,
        }
    }

    /// Describes one method, taking ownership.
    #[must_use]
    pub fn describe_owned(&self, method: DiscoveredMethod) -> DescribedMethod {
        let (category, description) = self.categorize(&method);
        DescribedMethod {
            method,
            category,
            description,
            source: DescriptionSource::Heuristic,
        }
    }

    fn categorize(&self, method: &DiscoveredMethod) -> (String, String) {
        let name = method.name.as_str();
        let best = self
            .rules
            .iter()
            .filter(|rule| name.starts_with(rule.prefix.as_str()))
            .max_by_key(|rule| rule.prefix.len());

        let Some(rule) = best else {
            return (
                OTHER_CATEGORY.to_string(),
                format!("Execute {name} operation"),
            );
        };

        let remainder = tokens(&name[rule.prefix.len()..]);
        let object = if remainder.is_empty() {
            method.owner_leaf().to_string()
        } else {
            remainder
        };

        (rule.category.clone(), format!("{} {object}", rule.verb))
    }
}

impl Default for HeuristicDescriber {
    fn default() -> Self {
        Self::new()
    }
}

fn tokens(s: &str) -> String {
    s.split('_')
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn verb_from_prefix(prefix: &str) -> String {
    let words = tokens(prefix);
    let mut chars = words.chars();
    chars.next().map_or_else(
        || prefix.to_string(),
        |first| first.to_uppercase().collect::<String>() + chars.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(name: &str) -> DescribedMethod {
        HeuristicDescriber::new().describe(&DiscoveredMethod::new("sdk.Widget", name))
    }

    #[test]
    fn test_builtin_table() {
        let cases = [
            ("get_widget", "retrieval", "Retrieve widget"),
            ("list_pods", "listing", "List pods"),
            ("create_issue", "creation", "Create issue"),
            ("update_repo", "modification", "Update repo"),
            ("patch_namespaced_pod", "modification", "Patch namespaced pod"),
            ("delete_branch", "deletion", "Delete branch"),
            ("search_code", "search", "Search code"),
        ];
        for (name, category, description) in cases {
            let described = describe(name);
            assert_eq!(described.category, category, "{name}");
            assert_eq!(described.description, description, "{name}");
            assert_eq!(described.source, DescriptionSource::Heuristic);
        }
    }

    #[test]
    fn test_unmatched_is_other() {
        let described = describe("authenticate");
        assert_eq!(described.category, OTHER_CATEGORY);
        assert_eq!(described.description, "Execute authenticate operation");
    }

    #[test]
    fn test_prefix_requires_underscore() {
        assert_eq!(describe("getter").category, OTHER_CATEGORY);
        assert_eq!(describe("get").category, OTHER_CATEGORY);
    }

    #[test]
    fn test_empty_remainder_uses_owner() {
        let described = describe("get_");
        assert_eq!(described.category, "retrieval");
        assert_eq!(described.description, "Retrieve Widget");
    }

    #[test]
    fn test_repeated_underscores_collapse() {
        assert_eq!(describe("list__all_").description, "List all");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mappings = BTreeMap::from([("get_namespaced_".to_string(), "namespaced".to_string())]);
        let describer = HeuristicDescriber::with_custom_mappings(&mappings);

        let long = describer.describe(&DiscoveredMethod::new("k8s.Api", "get_namespaced_pod"));
        assert_eq!(long.category, "namespaced");
        assert_eq!(long.description, "Get namespaced pod");

        let short = describer.describe(&DiscoveredMethod::new("k8s.Api", "get_pod"));
        assert_eq!(short.category, "retrieval");
    }

    #[test]
    fn test_custom_mapping_overrides_builtin_category() {
        let mappings = BTreeMap::from([("get_".to_string(), "read".to_string())]);
        let describer = HeuristicDescriber::with_custom_mappings(&mappings);
        let described = describer.describe(&DiscoveredMethod::new("sdk.A", "get_x"));
        assert_eq!(described.category, "read");
        assert_eq!(described.description, "Retrieve x");
    }

    #[test]
    fn test_pure_and_deterministic() {
        let describer = HeuristicDescriber::new();
        let method = DiscoveredMethod::new("sdk.Repo", "delete_hook");
        assert_eq!(describer.describe(&method), describer.describe(&method));
        assert_eq!(
            describer.describe(&method),
            describer.describe_owned(method.clone())
        );
    }
}
