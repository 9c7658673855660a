pub mod observe_spy;
pub mod vec_stream;

pub use observe_spy::{ObserveSpy, ObserveSpyHandle};
pub use vec_stream::VecStream;
