use bitflags::bitflags;

bitflags! {
    /// Which categories of human-readable trace events the solver emits
    /// through `tracing`. Purely observational: flipping these bits never
    /// changes `check_sat`'s verdict or `get_model`'s result.
    pub struct TraceOptions: u8 {
        /// `found unit <lit>` events.
        const TRACE_PROPAGATIONS = 0b001;
        /// `split on <var>` events.
        const TRACE_DECISIONS    = 0b010;
        /// `backjump on <high>, <low>` events.
        const TRACE_BACKJUMPS    = 0b100;
    }
}

impl Default for TraceOptions {
    fn default() -> Self {
        TraceOptions::empty()
    }
}

impl TraceOptions {
    pub fn none() -> Self {
        TraceOptions::empty()
    }

    pub fn all_traces() -> Self {
        TraceOptions::all()
    }
}
