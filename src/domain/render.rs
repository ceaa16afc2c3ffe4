use std::collections::HashMap;

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{Lineage, VampireId};

/// Renders lineages as `termtree` trees for terminal display.
pub trait LineageRender {
    fn to_tree_string(&self, root: VampireId) -> Tree<String>;

    /// One tree per original, in creation order.
    fn to_forest_strings(&self) -> Vec<Tree<String>>;
}

impl LineageRender for Lineage {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: VampireId) -> Tree<String> {
        if self.get(root).is_none() {
            return Tree::new("Empty lineage".to_string());
        }

        // post-order: every offspring tree is finished before its creator's
        let mut built: HashMap<VampireId, Tree<String>> = HashMap::new();
        for (id, vampire) in self.iter_postorder_from(root) {
            let leaves = vampire
                .offspring()
                .iter()
                .filter_map(|child| built.remove(child))
                .collect::<Vec<_>>();
            built.insert(id, Tree::new(vampire.to_string()).with_leaves(leaves));
        }
        built
            .remove(&root)
            .unwrap_or_else(|| Tree::new("Empty lineage".to_string()))
    }

    fn to_forest_strings(&self) -> Vec<Tree<String>> {
        self.roots()
            .iter()
            .map(|&root| self.to_tree_string(root))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_tree_string_lists_offspring_in_order() {
        let mut lineage = Lineage::new();
        let root = lineage.spawn("root", 1);
        let a = lineage.spawn("a", 2);
        let b = lineage.spawn("b", 3);
        lineage.add_offspring(root, a).unwrap();
        lineage.add_offspring(root, b).unwrap();

        let rendered = lineage.to_tree_string(root).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "root (1)");
        assert!(lines[1].ends_with("a (2)"));
        assert!(lines[2].ends_with("b (3)"));
    }

    #[test]
    fn test_to_tree_string_nests_grandchildren_below_their_creator() {
        let mut lineage = Lineage::new();
        let root = lineage.spawn("root", 1);
        let a = lineage.spawn("a", 2);
        let b = lineage.spawn("b", 3);
        let c = lineage.spawn("c", 4);
        lineage.add_offspring(root, a).unwrap();
        lineage.add_offspring(root, b).unwrap();
        lineage.add_offspring(a, c).unwrap();

        let rendered = lineage.to_tree_string(root).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("a (2)"));
        assert!(lines[2].ends_with("c (4)"));
        assert!(lines[3].ends_with("b (3)"));
    }

    #[test]
    fn test_to_tree_string_of_foreign_handle_is_placeholder() {
        let lineage = Lineage::new();
        let mut other = Lineage::new();
        let stranger = other.spawn("stranger", 1);
        assert_eq!(lineage.to_tree_string(stranger).root, "Empty lineage");
    }

    #[test]
    fn test_to_tree_string_handles_deep_chain() {
        let mut lineage = Lineage::new();
        let root = lineage.spawn("v0", 0);
        let mut tail = root;
        for year in 1..10_000 {
            let next = lineage.spawn(&format!("v{}", year), year);
            lineage.add_offspring(tail, next).unwrap();
            tail = next;
        }

        let mut node = lineage.to_tree_string(root);
        assert_eq!(node.root, "v0 (0)");
        let mut depth = 1;
        // unwind level by level so dropping the chain stays flat
        while let Some(child) = node.leaves.pop() {
            assert!(node.leaves.is_empty());
            depth += 1;
            node = child;
        }
        assert_eq!(depth, 10_000);
        assert_eq!(node.root, "v9999 (9999)");
    }
}
