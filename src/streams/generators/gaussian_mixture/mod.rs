mod gaussian_mixture_generator;

pub use gaussian_mixture_generator::GaussianMixtureGenerator;
