mod prequential_density_evaluator;

pub use prequential_density_evaluator::PrequentialDensityEvaluator;
