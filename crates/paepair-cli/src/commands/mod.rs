pub mod scan;
pub mod score;
