//! Node and edge extraction from the build model.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, trace};

use modgraph_core::{BuildModel, Category, CategorySet, Module, RelationKind, classify, color};

use crate::dot::DotBuilder;

/// Edge colour for `runtime` dependencies.
pub const ALERT_COLOR: &str = "firebrick1";
/// Edge colour for `compile` dependencies.
pub const HIGHLIGHT_COLOR: &str = "deeppink";
/// Edge colour for every other graph-relevant kind.
pub const NEUTRAL_COLOR: &str = "black";

pub fn edge_color(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::Runtime => ALERT_COLOR,
        RelationKind::Compile => HIGHLIGHT_COLOR,
        _ => NEUTRAL_COLOR,
    }
}

/// Options for graph building.
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    /// Categories whose modules appear in the graph.
    pub categories: CategorySet,
    /// Append category-to-category edges after the module edges.
    pub include_cross_category: bool,
}

/// A dependency between two categories, derived from module edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryEdge {
    pub from: Category,
    pub to: Category,
}

/// Builder output: cluster text, edge text and the cross-category relations
/// seen along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphContent {
    pub nodes: String,
    pub edges: String,
    pub cross_category: BTreeSet<CategoryEdge>,
    /// Number of node statements in `nodes`.
    pub node_count: usize,
    /// Number of edge statements in `edges`.
    pub edge_count: usize,
}

impl GraphContent {
    /// Node text followed by edge text; cross-category edges are appended
    /// only when requested.
    pub fn body(&self, include_cross_category: bool) -> String {
        let mut output = String::with_capacity(self.nodes.len() + self.edges.len());
        output.push_str(&self.nodes);
        output.push_str(&self.edges);
        if include_cross_category {
            let mut builder = DotBuilder::new();
            for edge in &self.cross_category {
                builder.edge(edge.from.name(), edge.to.name(), NEUTRAL_COLOR);
            }
            output.push_str(&builder.build());
        }
        output
    }
}

/// Walk the model and produce node and edge text for the allowed categories.
///
/// Clusters are ordered by category name and modules by name; edges follow
/// the same module order and each module's declaration order. Edges are not
/// deduplicated.
pub fn build_graph(model: &BuildModel, options: &GraphOptions) -> GraphContent {
    let mut included: Vec<(Category, &Module)> = model
        .modules()
        .iter()
        .map(|m| (classify(m), m))
        .filter(|(category, _)| options.categories.contains(*category))
        .collect();
    included.sort_by(|(ca, ma), (cb, mb)| {
        ca.name()
            .cmp(cb.name())
            .then_with(|| ma.name().cmp(mb.name()))
    });

    let category_of: HashMap<&str, Category> = included
        .iter()
        .map(|(category, module)| (module.name(), *category))
        .collect();

    let mut content = GraphContent::default();

    let mut clusters: BTreeMap<&'static str, (Category, Vec<&Module>)> = BTreeMap::new();
    for (category, module) in &included {
        clusters
            .entry(category.name())
            .or_insert_with(|| (*category, Vec::new()))
            .1
            .push(*module);
    }

    let mut nodes = DotBuilder::new();
    for (category, modules) in clusters.values() {
        let fill = color(*category);
        nodes.start_cluster(&category.cluster_key(), category.name());
        for module in modules {
            nodes.module_node(module.name(), fill);
            content.node_count += 1;
        }
        nodes.end_cluster();
    }

    let mut edges = DotBuilder::new();
    for (from_category, module) in &included {
        for dependency in module.dependencies() {
            if !dependency.kind.is_graph_relevant() {
                continue;
            }
            let Some(target) = dependency.target_module() else {
                continue;
            };
            let Some(&to_category) = category_of.get(target) else {
                trace!(
                    from = module.name(),
                    to = target,
                    known = model.contains(target),
                    "skipping edge to excluded module"
                );
                continue;
            };

            edges.edge(module.name(), target, edge_color(dependency.kind));
            content.edge_count += 1;

            if *from_category != to_category {
                content.cross_category.insert(CategoryEdge {
                    from: *from_category,
                    to: to_category,
                });
            }
        }
    }

    content.nodes = nodes.build();
    content.edges = edges.build();

    debug!(
        clusters = clusters.len(),
        nodes = content.node_count,
        edges = content.edge_count,
        cross_category = content.cross_category.len(),
        "graph content built"
    );
    content
}
