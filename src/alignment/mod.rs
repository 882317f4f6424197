pub mod aggregation;
pub mod classification;
pub mod edit_distance;
pub mod report;
pub mod scoring;
pub mod tokenization;
