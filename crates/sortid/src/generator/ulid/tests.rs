use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::scope;

use crate::{
    Error, RandSource, SystemClock, Ulid, UlidGenerator,
    test_util::{MockTime, StepTime},
};

/// Always returns the same bytes.
#[derive(Clone)]
struct FixedRand([u8; 10]);

impl RandSource for FixedRand {
    fn fill_bytes(&self, buf: &mut [u8]) {
        for (dst, src) in buf.iter_mut().zip(self.0.iter().cycle()) {
            *dst = *src;
        }
    }
}

/// Fills every buffer with a new byte value: 1, 2, 3, ...
struct CountingRand(AtomicU8);

impl RandSource for CountingRand {
    fn fill_bytes(&self, buf: &mut [u8]) {
        let b = self.0.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        buf.fill(b);
    }
}

const KNOWN_TS: u64 = 1_469_922_850_259;
const KNOWN_RANDOM: u128 = 1_012_768_647_078_601_740_696_923;

fn known_entropy() -> [u8; 10] {
    let bytes = KNOWN_RANDOM.to_be_bytes();
    let mut out = [0; 10];
    out.copy_from_slice(&bytes[6..]);
    out
}

#[test]
fn known_vector_from_clock_and_rand() {
    let generator = UlidGenerator::new(
        MockTime { millis: KNOWN_TS },
        FixedRand(known_entropy()),
    );
    assert_eq!(
        generator.generate_string().unwrap(),
        "01ARZ3NDEKTSV4RRFFQ69G5FAV"
    );
    // Same millisecond: the last symbol steps by one.
    assert_eq!(
        generator.generate_string().unwrap(),
        "01ARZ3NDEKTSV4RRFFQ69G5FAW"
    );
}

#[test]
fn monotonic_ids_increment_within_same_millisecond() {
    let generator = UlidGenerator::new(MockTime { millis: 42 }, FixedRand([0x10; 10]));
    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();
    let c = generator.generate().unwrap();

    assert_eq!(a.timestamp(), 42);
    assert_eq!(a.entropy(), [0x10; 10]);
    assert_eq!(b.random(), a.random() + 1);
    assert_eq!(c.random(), a.random() + 2);
    assert!(a < b && b < c);
    assert!(a.encode() < b.encode() && b.encode() < c.encode());
}

#[test]
fn increment_carries_across_bytes() {
    let mut entropy = [0_u8; 10];
    entropy[9] = 0xFF;
    entropy[8] = 0xFF;
    let generator = UlidGenerator::new(MockTime { millis: 7 }, FixedRand(entropy));

    generator.generate().unwrap();
    let next = generator.generate().unwrap();
    assert_eq!(next.entropy(), [0, 0, 0, 0, 0, 0, 0, 1, 0, 0]);
}

#[test]
fn new_millisecond_draws_fresh_entropy() {
    let clock = StepTime::new(vec![10, 10, 11]);
    let generator = UlidGenerator::new(clock, CountingRand(AtomicU8::new(0)));

    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();
    let c = generator.generate().unwrap();

    assert_eq!(a.entropy(), [1; 10]);
    assert_eq!(b.random(), a.random() + 1);
    assert_eq!(c.timestamp(), 11);
    assert_eq!(c.entropy(), [2; 10]);
}

#[test]
fn backward_clock_reuses_last_timestamp() {
    let clock = StepTime::new(vec![100, 90, 100, 101]);
    let generator = UlidGenerator::new(clock, CountingRand(AtomicU8::new(0)));

    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();
    let c = generator.generate().unwrap();
    let d = generator.generate().unwrap();

    assert_eq!(b.timestamp(), 100);
    assert_eq!(b.random(), a.random() + 1);
    assert_eq!(c.random(), a.random() + 2);
    assert_eq!(d.timestamp(), 101);
    assert!(a < b && b < c && c < d);
}

#[test]
fn entropy_overflow_is_reported_and_recoverable() {
    let clock = StepTime::new(vec![5, 5, 5, 6]);
    let generator = UlidGenerator::new(clock, FixedRand([0xFF; 10]));

    let max = generator.generate().unwrap();
    assert_eq!(max.random(), Ulid::max_random());

    assert_eq!(
        generator.generate(),
        Err(Error::EntropyExhausted { timestamp: 5 })
    );
    // The failed call left the state alone.
    assert_eq!(
        generator.generate(),
        Err(Error::EntropyExhausted { timestamp: 5 })
    );

    let next = generator.generate().unwrap();
    assert_eq!(next.timestamp(), 6);
    assert!(next > max);
}

#[test]
fn non_monotonic_ids_do_not_increment() {
    let generator =
        UlidGenerator::non_monotonic(MockTime { millis: 42 }, CountingRand(AtomicU8::new(0)));
    assert!(!generator.is_monotonic());

    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();
    assert_eq!(a.timestamp(), 42);
    assert_eq!(a.entropy(), [1; 10]);
    assert_eq!(b.entropy(), [2; 10]);
}

#[test]
fn non_monotonic_never_runs_out() {
    let generator =
        UlidGenerator::non_monotonic(MockTime { millis: 42 }, FixedRand([0xFF; 10]));
    assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
}

#[test]
fn timestamp_past_48_bits_is_rejected() {
    let too_far = Ulid::max_timestamp() + 1;
    let generator = UlidGenerator::new(MockTime { millis: too_far }, FixedRand([0; 10]));
    assert_eq!(
        generator.generate(),
        Err(Error::TimestampOverflow { timestamp: too_far })
    );
}

#[test]
fn clones_share_monotonic_state() {
    let a = UlidGenerator::new(MockTime { millis: 42 }, FixedRand([0; 10]));
    let b = a.clone();
    assert_eq!(a.generate().unwrap().random(), 0);
    assert_eq!(b.generate().unwrap().random(), 1);
}

#[test]
fn concurrent_generation_is_unique_and_ordered_per_thread() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 4096;

    let generator = UlidGenerator::new(
        SystemClock::default(),
        Arc::new(CountingRand(AtomicU8::new(0))),
    );
    let seen = Arc::new(Mutex::new(HashSet::with_capacity(THREADS * PER_THREAD)));

    scope(|s| {
        for _ in 0..THREADS {
            let generator = generator.clone();
            let seen = Arc::clone(&seen);
            s.spawn(move || {
                let mut last = Ulid::default();
                for _ in 0..PER_THREAD {
                    let id = generator.generate().unwrap();
                    assert!(id > last);
                    last = id;
                    assert!(seen.lock().unwrap().insert(id));
                }
            });
        }
    });

    assert_eq!(seen.lock().unwrap().len(), THREADS * PER_THREAD);
}
