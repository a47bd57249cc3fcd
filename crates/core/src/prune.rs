//! Selector-based removal of boilerplate subtrees.

use dom_query::{Document, Selection};
use serde::Serialize;

use crate::rules::RemovalRuleSet;

/// Removal count for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRemoval {
    pub selector: String,
    pub count: usize,
}

/// What a pruning pass removed.
///
/// Only rules that matched at least one element are listed, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalReport {
    pub removed: Vec<RuleRemoval>,
    pub total: usize,
}

impl RemovalReport {
    /// Count recorded for `selector`, zero when the rule removed nothing.
    pub fn count_for(&self, selector: &str) -> usize {
        self.removed
            .iter()
            .find(|r| r.selector == selector)
            .map_or(0, |r| r.count)
    }
}

/// Detaches every element matching any rule, subtree included.
///
/// Each rule sees the tree as left by the rules before it, so an element
/// already detached with an ancestor is not matched again. Running this twice
/// on the same document removes nothing the second time.
pub fn prune(doc: &Document, rules: &RemovalRuleSet) -> RemovalReport {
    let mut report = RemovalReport::default();

    for rule in rules.rules() {
        let elements = doc.select("*");
        let matched: Vec<_> = elements
            .nodes()
            .iter()
            .filter(|node| rule.matches(&Selection::from(**node)))
            .copied()
            .collect();

        if matched.is_empty() {
            continue;
        }

        let count = matched.len();
        for node in matched {
            Selection::from(node).remove();
        }

        let selector = rule.to_string();
        tracing::debug!(selector = %selector, count, "Removed unwanted elements");
        report.total += count;
        report.removed.push(RuleRemoval { selector, count });
    }

    if report.total > 0 {
        tracing::info!(count = report.total, "Total unwanted elements removed");
    }

    report
}
