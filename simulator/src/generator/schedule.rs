use rand::{rngs::StdRng, Rng, SeedableRng};

/// Single step of a replayed workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Acquire,
    Release,
}

/// Builds a seeded acquire/release sequence whose intended number of held
/// elements never exceeds `max_outstanding`.
pub fn build_schedule(cycles: usize, max_outstanding: usize, seed: u64) -> Vec<Operation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut schedule = Vec::with_capacity(cycles);
    let mut held = 0usize;

    for _ in 0..cycles {
        let operation = if held == 0 {
            Operation::Acquire
        } else if held >= max_outstanding {
            Operation::Release
        } else if rng.gen_bool(0.55) {
            Operation::Acquire
        } else {
            Operation::Release
        };

        match operation {
            Operation::Acquire => held += 1,
            Operation::Release => held -= 1,
        }
        schedule.push(operation);
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_deterministic_per_seed() {
        assert_eq!(build_schedule(200, 16, 7), build_schedule(200, 16, 7));
    }

    #[test]
    fn schedule_respects_outstanding_bound() {
        let schedule = build_schedule(500, 4, 3);
        let mut held = 0i64;
        for operation in schedule {
            match operation {
                Operation::Acquire => held += 1,
                Operation::Release => held -= 1,
            }
            assert!((0..=4).contains(&held));
        }
    }

    #[test]
    fn schedule_starts_with_acquire() {
        let schedule = build_schedule(3, 2, 0);
        assert_eq!(schedule[0], Operation::Acquire);
    }
}
