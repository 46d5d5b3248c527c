pub mod vocabulary;
pub mod high_scores;
