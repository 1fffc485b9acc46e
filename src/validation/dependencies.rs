//! Sub-recipe dependency validation
//!
//! Detects circular references in the graph of recipes that use other recipes as
//! components. A recipe that (transitively) contains itself can never be costed.

use super::result::{FieldError, RecipeValidationResult};
use crate::models::{ErrorCode, Recipe, RecipeItem};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Result of a circular dependency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "dependency checks should be inspected before saving the recipe"]
pub struct CircularDependencyCheck {
    pub has_circular_dependency: bool,
    /// Recipe ids from the first occurrence of the repeated recipe to its repetition,
    /// e.g. `["A", "B", "A"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CircularDependencyCheck {
    fn none() -> Self {
        Self {
            has_circular_dependency: false,
            dependency_path: None,
            message: None,
        }
    }

    fn cycle(path: Vec<String>) -> Self {
        let message = format!("Circular dependency detected: {}", path.join(" -> "));
        Self {
            has_circular_dependency: true,
            dependency_path: Some(path),
            message: Some(message),
        }
    }
}

/// Check whether `items`, saved as the contents of recipe `recipe_id`, would create a
/// circular sub-recipe reference.
///
/// `items` replaces whatever `resolve` returns for `recipe_id`, so the check can run
/// on an edited recipe before it is saved. Sub-recipes that `resolve` cannot find are
/// treated as dead ends.
///
/// # Example
///
/// ```rust
/// use recipe_costing_sdk::models::{Recipe, RecipeCategory, RecipeItem, Unit};
/// use recipe_costing_sdk::validation::check_circular_dependency;
///
/// let b = Recipe::new("B", "Brigadeiro", RecipeCategory::Fillings, 500.0, Unit::Gram, 10)
///     .with_item(RecipeItem::sub_recipe("b1", "A", 100.0, Unit::Gram));
/// let items = vec![RecipeItem::sub_recipe("a1", "B", 200.0, Unit::Gram)];
///
/// let check = check_circular_dependency("A", &items, |id| (id == "B").then_some(&b));
/// assert!(check.has_circular_dependency);
/// assert_eq!(check.dependency_path.unwrap(), vec!["A", "B", "A"]);
/// ```
pub fn check_circular_dependency<'a, F>(
    recipe_id: &str,
    items: &[RecipeItem],
    resolve: F,
) -> CircularDependencyCheck
where
    F: Fn(&str) -> Option<&'a Recipe>,
{
    let direct: Vec<&str> = items.iter().filter_map(RecipeItem::sub_recipe_id).collect();
    DependencyGraph::build(recipe_id, &direct, &resolve).find_cycle()
}

/// Check whether adding `sub_recipe_id` as a component of `parent_id` would create a
/// circular reference.
pub fn check_sub_recipe_addition<'a, F>(
    parent_id: &str,
    sub_recipe_id: &str,
    resolve: F,
) -> CircularDependencyCheck
where
    F: Fn(&str) -> Option<&'a Recipe>,
{
    let mut direct: Vec<&str> = resolve(parent_id)
        .map(|parent| parent.sub_recipe_ids().collect())
        .unwrap_or_default();
    direct.push(sub_recipe_id);
    DependencyGraph::build(parent_id, &direct, &resolve).find_cycle()
}

/// Turn a detected cycle in `recipe` into a blocking CIRCULAR_DEPENDENCY error.
pub fn ensure_acyclic<'a, F>(recipe: &Recipe, resolve: F) -> RecipeValidationResult
where
    F: Fn(&str) -> Option<&'a Recipe>,
{
    let check = check_circular_dependency(&recipe.id, &recipe.recipe_items, resolve);
    let mut result = RecipeValidationResult::new();
    if check.has_circular_dependency {
        result.push_error(FieldError::new(
            "recipeItems",
            check
                .message
                .unwrap_or_else(|| "Circular dependency detected".to_string()),
            ErrorCode::CircularDependency,
        ));
    }
    result
}

/// Check that every sub-recipe `recipe` references exists and is active.
///
/// A reference `resolve` cannot find is REQUIRED, an inactive one is INVALID. Errors
/// are keyed by the item's index, e.g. `recipeItems[2].subRecipeId`.
pub fn validate_sub_recipe_references<'a, F>(recipe: &Recipe, resolve: F) -> RecipeValidationResult
where
    F: Fn(&str) -> Option<&'a Recipe>,
{
    let mut result = RecipeValidationResult::new();
    for (index, item) in recipe.recipe_items.iter().enumerate() {
        let Some(sub_recipe_id) = item.sub_recipe_id() else {
            continue;
        };
        let field = format!("recipeItems[{}].subRecipeId", index);
        match resolve(sub_recipe_id) {
            None => {
                warn!(recipe_id = %recipe.id, sub_recipe_id, "referenced sub-recipe not found");
                result.push_error(FieldError::new(
                    field,
                    format!("Sub-recipe {} not found", sub_recipe_id),
                    ErrorCode::Required,
                ));
            }
            Some(sub_recipe) if !sub_recipe.is_active => {
                result.push_error(FieldError::new(
                    field,
                    format!("Sub-recipe {} is inactive", sub_recipe.name),
                    ErrorCode::Invalid,
                ));
            }
            Some(_) => {}
        }
    }
    result
}

/// Reachable sub-recipe reference graph rooted at the recipe under check
struct DependencyGraph {
    graph: Graph<String, (), Directed>,
    root: NodeIndex,
}

impl DependencyGraph {
    fn build<'a, F>(root_id: &str, direct: &[&str], resolve: &F) -> Self
    where
        F: Fn(&str) -> Option<&'a Recipe>,
    {
        let mut graph = Graph::<String, (), Directed>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();
        let root = graph.add_node(root_id.to_string());
        node_map.insert(root_id.to_string(), root);

        let mut queue = VecDeque::new();
        let mut expanded = HashSet::new();
        expanded.insert(root_id.to_string());
        Self::add_edges(&mut graph, &mut node_map, root, direct, &mut queue);

        while let Some(id) = queue.pop_front() {
            if !expanded.insert(id.clone()) {
                continue;
            }
            let Some(recipe) = resolve(&id) else {
                debug!(recipe_id = %id, "sub-recipe not resolvable, treating as dead end");
                continue;
            };
            let Some(&source) = node_map.get(&id) else {
                continue;
            };
            let children: Vec<&str> = recipe.sub_recipe_ids().collect();
            Self::add_edges(&mut graph, &mut node_map, source, &children, &mut queue);
        }

        Self { graph, root }
    }

    fn add_edges(
        graph: &mut Graph<String, (), Directed>,
        node_map: &mut HashMap<String, NodeIndex>,
        source: NodeIndex,
        targets: &[&str],
        queue: &mut VecDeque<String>,
    ) {
        for target in targets {
            let target_node = *node_map
                .entry(target.to_string())
                .or_insert_with(|| graph.add_node(target.to_string()));
            graph.update_edge(source, target_node, ());
            queue.push_back(target.to_string());
        }
    }

    /// Children in the order they were added
    fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        // petgraph yields the most recently added edge first
        children.reverse();
        children
    }

    fn find_cycle(&self) -> CircularDependencyCheck {
        if !is_cyclic_directed(&self.graph) {
            return CircularDependencyCheck::none();
        }

        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut explored = HashSet::new();
        match self.walk(self.root, &mut path, &mut on_path, &mut explored) {
            Some(cycle) => {
                let ids: Vec<String> = cycle.into_iter().map(|n| self.graph[n].clone()).collect();
                warn!(path = %ids.join(" -> "), "circular sub-recipe dependency");
                CircularDependencyCheck::cycle(ids)
            }
            None => CircularDependencyCheck::none(),
        }
    }

    fn walk(
        &self,
        node: NodeIndex,
        path: &mut Vec<NodeIndex>,
        on_path: &mut HashSet<NodeIndex>,
        explored: &mut HashSet<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        path.push(node);
        on_path.insert(node);

        for child in self.children(node) {
            if on_path.contains(&child) {
                let start = path.iter().position(|&n| n == child).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(child);
                return Some(cycle);
            }
            if explored.contains(&child) {
                continue;
            }
            if let Some(cycle) = self.walk(child, path, on_path, explored) {
                return Some(cycle);
            }
        }

        path.pop();
        on_path.remove(&node);
        explored.insert(node);
        None
    }
}
