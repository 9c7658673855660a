mod gaussian_mixture;

pub use gaussian_mixture::GaussianMixtureGenerator;
