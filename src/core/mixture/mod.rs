mod component;
mod mixture_state;

pub use component::Component;
pub use mixture_state::{DEFAULT_STD_DEV, MixtureState};
pub(crate) use mixture_state::spread_means;
