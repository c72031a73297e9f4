pub mod genome;
pub mod guides;
pub mod sink;
