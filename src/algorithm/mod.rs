/// Fixed tiling pipeline and its configuration
pub mod executor;
/// N-way priority blend of up to four layers
pub mod priority;
/// Pairwise seam blend
pub mod seam;
