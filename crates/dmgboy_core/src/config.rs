use typed_builder::TypedBuilder;

/// DMG master clock in T-cycles per second.
pub const DMG_CLOCK_HZ: u32 = 4_194_304;

/// Machine-wide configuration.
///
/// ```
/// use dmgboy_core::MachineConfig;
///
/// let config = MachineConfig::builder().frame_rate(60).build();
/// assert_eq!(config.frame_cycles(), 4_194_304 / 60);
/// ```
#[derive(TypedBuilder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// CPU clock rate in T-cycles per second.
    #[builder(default = DMG_CLOCK_HZ)]
    pub clock_hz: u32,
    /// Number of `run_frame` calls per emulated second.
    #[builder(default = 64)]
    pub frame_rate: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MachineConfig {
    /// Cycle budget consumed by a single `run_frame` call.
    pub fn frame_cycles(&self) -> u32 {
        self.clock_hz / self.frame_rate.max(1)
    }
}
