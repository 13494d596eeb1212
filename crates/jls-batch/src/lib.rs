//! Components F and G: the pruner and the batch-compiler wrapper built on
//! top of it.

mod batch_compiler;
mod pruner;

pub use batch_compiler::compile_pruned_batch;
pub use pruner::prune;
