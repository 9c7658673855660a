use std::io::Error;

/// Pull-based source of scalar observations.
///
/// Implementations may represent finite sample sets or unbounded generators.
pub trait Stream {
    /// Indicates whether the stream *may* produce more samples.
    ///
    /// Finite streams return `false` once exhausted; a subsequent call to
    /// [`next_sample`](Self::next_sample) must then return `None`. Unbounded
    /// generators typically return `true` always.
    fn has_more_samples(&self) -> bool;

    /// Produces the next sample, or `None` if the stream is exhausted.
    fn next_sample(&mut self) -> Option<f64>;

    /// Resets the stream to its initial state. Generators re-seed their RNG
    /// and clear their counters, so the same sequence is produced again.
    fn restart(&mut self) -> Result<(), Error>;
}
