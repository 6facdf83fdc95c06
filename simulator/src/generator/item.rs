use fluxpool::Poolable;

pub const DEFAULT_BUFFER_LEN: usize = 256;

/// Scratch sample buffer lent out by the workload pool.
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    samples: Vec<f32>,
    length: usize,
    generation: u64,
}

impl ScratchBuffer {
    pub fn with_length(length: usize) -> Self {
        Self {
            samples: Vec::with_capacity(length),
            length,
            generation: 0,
        }
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Number of times this buffer has been handed out.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::with_length(DEFAULT_BUFFER_LEN)
    }
}

impl Poolable for ScratchBuffer {
    fn on_acquire(&mut self) {
        self.samples.resize(self.length, 0.0);
        self.generation += 1;
    }

    fn on_release(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_sizes_and_release_clears() {
        let mut buffer = ScratchBuffer::with_length(8);
        buffer.on_acquire();
        assert_eq!(buffer.samples_mut().len(), 8);

        buffer.samples_mut()[0] = 3.5;
        buffer.on_release();
        assert!(buffer.samples_mut().is_empty());

        buffer.on_acquire();
        assert_eq!(buffer.samples_mut()[0], 0.0);
        assert_eq!(buffer.generation(), 2);
    }
}
