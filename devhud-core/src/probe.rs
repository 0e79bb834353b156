//! Memory telemetry provider abstraction.

use std::fmt::Debug;

use devhud_types::MemoryReading;

/// Source of raw memory figures, injected by the host application.
///
/// The overlay core never invents memory numbers: every snapshot starts as
/// a reading from the host's probe (an allocator hook, a runtime statistics
/// API, a platform query) and is validated before acceptance. Implementors
/// only report; the ordering and allocation-sum invariants are enforced by
/// the memory panel.
pub trait MemoryProbe: Send + Debug {
    /// Produce the current memory figures.
    fn read(&mut self) -> MemoryReading;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A probe that hands out a fixed reading, for panel and hub tests.
    #[derive(Debug, Clone)]
    pub struct FixedProbe {
        pub reading: MemoryReading,
    }

    impl FixedProbe {
        pub fn new(reading: MemoryReading) -> Self {
            Self { reading }
        }

        /// A probe whose reading passes every invariant.
        pub fn healthy() -> Self {
            Self::new(
                MemoryReading::builder()
                    .total_heap(1024.0)
                    .used_heap(512.0)
                    .heap_limit(4096.0)
                    .allocation("renderer", 300.0)
                    .allocation("audio", 212.0)
                    .build(),
            )
        }
    }

    impl MemoryProbe for FixedProbe {
        fn read(&mut self) -> MemoryReading {
            self.reading.clone()
        }
    }
}
