//! The decoder-facing seam. Any best-path decoder (standard FST, grammar
//! FST, or a test double) implements this trait; [`crate::detector`] never
//! touches FST/transition-model types directly.

/// Result of resolving one decoder frame's traceback: the transition id
/// active at that frame (after any internal epsilon-arc skipping the
/// decoder performs) and the token to continue tracing from for the
/// previous frame, if any.
#[derive(Debug, Clone)]
pub struct TraceStep<Token> {
    pub transition_id: i32,
    pub predecessor: Option<Token>,
}

/// A best-path decoder exposing just enough of its traceback to drive
/// silence-decision extraction.
pub trait TracebackSource {
    /// Opaque identity of a position in the best path. Only ever compared
    /// for equality and cloned; this crate never inspects it.
    type Token: PartialEq + Clone;

    /// Number of frames decoded so far.
    fn num_frames_decoded(&self) -> usize;

    /// Token at the most recently decoded frame, if any frames have been
    /// decoded yet.
    fn best_path_end(&self) -> Option<Self::Token>;

    /// Resolves the traceback at `token`'s frame, skipping epsilon-labeled
    /// arcs internally. Returns `None` if `token` has no predecessor (the
    /// trace has reached the start of the lattice).
    fn trace_back_best_path(&self, token: &Self::Token) -> Option<TraceStep<Self::Token>>;
}
