//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg(debug_assertions)`
//! at the call site.

pub struct DebugFlags {
    /// Emit one line per (year, month) slice saying whether it qualified.
    pub print_slice_qualification: bool,
    /// Emit timings for each month profile and for the annual summary.
    pub print_profile_timing: bool,
    /// Emit detailed serialization/deserialization logs.
    pub print_serde: bool,
    /// Emit which provider served the price series and how many points it had.
    pub print_provider_chain: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_slice_qualification: false,
    print_profile_timing: false,
    print_serde: false,
    print_provider_chain: true,
};
