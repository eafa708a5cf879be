//! Tool name assignment.
//!
//! A method's bare name becomes its tool name unless another method in the
//! same run shares that bare name. Every method of a shared name is then
//! prefixed with its owner's last path segment, so the outcome does not
//! depend on input order.

use mcp_sdkgen_core::{DescribedMethod, Error, Result, ToolName};
use std::collections::HashMap;

/// Assigns one tool name per method, in input order.
///
/// # Errors
///
/// Returns `NameCollision` if two methods still share a name after
/// prefixing.
///
/// # Examples
///
/// ```
/// use mcp_sdkgen_codegen::server::assign_tool_names;
/// use mcp_sdkgen_codegen::describe::HeuristicDescriber;
/// use mcp_sdkgen_core::DiscoveredMethod;
///
/// let describer = HeuristicDescriber::new();
/// let methods = vec![
///     describer.describe(&DiscoveredMethod::new("a.b", "get")),
///     describer.describe(&DiscoveredMethod::new("c.d", "get")),
///     describer.describe(&DiscoveredMethod::new("c.d", "list_items")),
/// ];
///
/// let names = assign_tool_names(&methods).unwrap();
/// let names: Vec<_> = names.iter().map(|n| n.as_str()).collect();
/// assert_eq!(names, vec!["b_get", "d_get", "list_items"]);
/// ```
pub fn assign_tool_names(methods: &[DescribedMethod]) -> Result<Vec<ToolName>> {
    let mut bare_counts: HashMap<&str, usize> = HashMap::new();
    for described in methods {
        *bare_counts.entry(described.method.name.as_str()).or_default() += 1;
    }

    let names: Vec<ToolName> = methods
        .iter()
        .map(|described| {
            let method = &described.method;
            if bare_counts.get(method.name.as_str()).copied().unwrap_or(0) > 1 {
                ToolName::new(format!("{}_{}", method.owner_leaf(), method.name))
            } else {
                ToolName::new(method.name.clone())
            }
        })
        .collect();

    let mut claimed: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        if let Some(&first) = claimed.get(name.as_str()) {
            return Err(Error::NameCollision {
                tool: name.to_string(),
                first: methods[first].method.qualified_name(),
                second: methods[index].method.qualified_name(),
            });
        }
        claimed.insert(name.as_str(), index);
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::HeuristicDescriber;
    use mcp_sdkgen_core::DiscoveredMethod;

    fn described(owner: &str, name: &str) -> DescribedMethod {
        HeuristicDescriber::new().describe(&DiscoveredMethod::new(owner, name))
    }

    fn names(methods: &[DescribedMethod]) -> Vec<String> {
        assign_tool_names(methods)
            .unwrap()
            .into_iter()
            .map(ToolName::into_inner)
            .collect()
    }

    #[test]
    fn test_unique_names_unchanged() {
        let methods = vec![described("sdk.A", "get_a"), described("sdk.B", "get_b")];
        assert_eq!(names(&methods), vec!["get_a", "get_b"]);
    }

    #[test]
    fn test_collision_prefixes_every_claimant() {
        let methods = vec![described("a.b", "get"), described("c.d", "get")];
        assert_eq!(names(&methods), vec!["b_get", "d_get"]);
    }

    #[test]
    fn test_order_independent() {
        let forward = vec![described("a.b", "get"), described("c.d", "get")];
        let reverse = vec![described("c.d", "get"), described("a.b", "get")];

        let mut f = names(&forward);
        let mut r = names(&reverse);
        f.sort();
        r.sort();
        assert_eq!(f, r);
    }

    #[test]
    fn test_module_level_owner() {
        let methods = vec![described("github", "connect"), described("github.Github", "connect")];
        assert_eq!(names(&methods), vec!["github_connect", "Github_connect"]);
    }

    #[test]
    fn test_unresolvable_collision_fails() {
        let methods = vec![
            described("x.Repo", "get"),
            described("y.Repo", "get"),
        ];
        let err = assign_tool_names(&methods).unwrap_err();
        assert!(err.is_name_collision());
        let message = err.to_string();
        assert!(message.contains("Repo_get"));
        assert!(message.contains("x.Repo.get"));
        assert!(message.contains("y.Repo.get"));
    }

    #[test]
    fn test_prefixed_name_colliding_with_bare_name_fails() {
        let methods = vec![
            described("a.b", "get"),
            described("c.d", "get"),
            described("e.f", "b_get"),
        ];
        assert!(assign_tool_names(&methods).unwrap_err().is_name_collision());
    }

    #[test]
    fn test_empty_input() {
        assert!(assign_tool_names(&[]).unwrap().is_empty());
    }
}
