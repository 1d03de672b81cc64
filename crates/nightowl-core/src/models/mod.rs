pub mod answer;
pub mod language;
pub mod score;
pub mod submission;
