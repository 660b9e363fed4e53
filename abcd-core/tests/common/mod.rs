use abcd_core::{AbcdBuilder, AbcdGraph, ExecutionStrategy};

/// Small but non-trivial parameter set shared by the integration suites.
#[must_use]
pub fn small_builder(seed: u64) -> AbcdBuilder {
    AbcdBuilder::new()
        .with_vcount(400)
        .with_degree_bounds(3, 20)
        .with_community_size_bounds(25, 80)
        .with_seed(seed)
        .with_execution_strategy(ExecutionStrategy::Sequential)
}

#[must_use]
pub fn generate(builder: AbcdBuilder) -> AbcdGraph {
    builder
        .build()
        .expect("builder parameters must be valid")
        .generate()
        .expect("generation must succeed")
}

/// Community plus background degree of every vertex.
#[must_use]
pub fn planned_degrees(graph: &AbcdGraph) -> Vec<usize> {
    graph
        .community_degrees()
        .iter()
        .zip(graph.background_degrees())
        .map(|(inner, outer)| inner + outer)
        .collect()
}
