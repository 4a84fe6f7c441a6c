//! Ring queue throughput and round-trip benchmark.
//!
//! Usage:
//!     cargo run --release --bin ring_bench
//!
//! Environment variables:
//!     PRODUCERS=2        Producer threads for the throughput run (default: 2)
//!     CONSUMERS=2        Consumer threads for the throughput run (default: 2)
//!     CAPACITY=1024      Queue capacity (default: 1024)
//!     ITERATIONS=1000000 Values pushed per run (default: 1 << 20)
//!     PRODUCER_CPU=0     First CPU for producers, one per thread (default: unpinned)
//!     CONSUMER_CPU=2     First CPU for consumers, one per thread (default: unpinned)

use std::env;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use annular::RingQueue;

type Payload = u64;

struct BenchConfig {
    producers: usize,
    consumers: usize,
    capacity: usize,
    iterations: usize,
    producer_cpu: Option<usize>,
    consumer_cpu: Option<usize>,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

impl BenchConfig {
    fn from_env() -> Self {
        Self {
            producers: env_parse::<usize>("PRODUCERS").unwrap_or(2).max(1),
            consumers: env_parse::<usize>("CONSUMERS").unwrap_or(2).max(1),
            capacity: env_parse::<usize>("CAPACITY").unwrap_or(1024),
            iterations: env_parse::<usize>("ITERATIONS").unwrap_or(1 << 20),
            producer_cpu: env_parse::<usize>("PRODUCER_CPU"),
            consumer_cpu: env_parse::<usize>("CONSUMER_CPU"),
        }
    }
}

fn pin_to_cpu(base: Option<usize>, offset: usize) {
    if let Some(id) = base {
        core_affinity::set_for_current(core_affinity::CoreId { id: id + offset });
    }
}

/// Splits `total` into `parts` nearly equal shares.
fn share(total: usize, parts: usize, index: usize) -> usize {
    total / parts + usize::from(index < total % parts)
}

/// Sum of `0..n` modulo 2^64, matching the consumers' wrapping sum.
fn checksum_of_first(n: Payload) -> Payload {
    if n == 0 {
        return 0;
    }
    // Halve the even factor first so the division is exact before wrapping.
    if n % 2 == 0 {
        (n / 2).wrapping_mul(n - 1)
    } else {
        n.wrapping_mul((n - 1) / 2)
    }
}

fn bench_throughput(config: &BenchConfig) {
    let queue = Arc::new(RingQueue::<Payload>::new(config.capacity));
    let start_line = Arc::new(Barrier::new(config.producers + config.consumers + 1));
    let checksum = Arc::new(AtomicU64::new(0));
    let received = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::with_capacity(config.producers + config.consumers);

    let mut next = 0;
    for p in 0..config.producers {
        let count = share(config.iterations, config.producers, p);
        let first = next as Payload;
        next += count;

        let queue = Arc::clone(&queue);
        let start_line = Arc::clone(&start_line);
        let cpu = config.producer_cpu;
        handles.push(thread::spawn(move || {
            pin_to_cpu(cpu, p);
            start_line.wait();
            queue.push_range(first..first + count as Payload);
        }));
    }

    for c in 0..config.consumers {
        let count = share(config.iterations, config.consumers, c);

        let queue = Arc::clone(&queue);
        let start_line = Arc::clone(&start_line);
        let checksum = Arc::clone(&checksum);
        let received = Arc::clone(&received);
        let cpu = config.consumer_cpu;
        handles.push(thread::spawn(move || {
            pin_to_cpu(cpu, c);
            start_line.wait();
            let mut sum: Payload = 0;
            for _ in 0..count {
                sum = sum.wrapping_add(queue.pop());
            }
            checksum.fetch_add(sum, Ordering::Relaxed);
            received.fetch_add(count, Ordering::Relaxed);
        }));
    }

    start_line.wait();
    let start = Instant::now();

    for handle in handles {
        handle.join().unwrap();
    }
    let elapsed = start.elapsed();

    let expected = checksum_of_first(config.iterations as Payload);
    let got = checksum.load(Ordering::Relaxed);
    if got != expected || received.load(Ordering::Relaxed) != config.iterations {
        panic!("Data corruption: expected checksum {expected}, got {got}");
    }
    assert!(queue.is_empty());

    let ops_per_ms = config.iterations as u128 * 1_000_000 / elapsed.as_nanos().max(1);
    println!(
        "{} ops/ms ({}P/{}C)",
        ops_per_ms, config.producers, config.consumers
    );
}

fn bench_rtt(config: &BenchConfig) {
    let ping = Arc::new(RingQueue::<Payload>::new(config.capacity));
    let pong = Arc::new(RingQueue::<Payload>::new(config.capacity));
    let iterations = config.iterations;

    // Responder thread
    let responder = {
        let ping = Arc::clone(&ping);
        let pong = Arc::clone(&pong);
        let cpu = config.consumer_cpu;
        thread::spawn(move || {
            pin_to_cpu(cpu, 0);
            for _ in 0..iterations {
                pong.push(ping.pop());
            }
        })
    };

    pin_to_cpu(config.producer_cpu, 0);

    let start = Instant::now();

    for i in 0..iterations as Payload {
        ping.push(i);
        let echoed = pong.pop();
        if echoed != i {
            panic!("Data corruption: expected {i}, got {echoed}");
        }
    }

    let elapsed = start.elapsed();
    responder.join().unwrap();

    let rtt_ns = elapsed.as_nanos() / iterations.max(1) as u128;
    println!("{} ns RTT", rtt_ns);
}

fn main() {
    annular::init_tracing();
    let config = BenchConfig::from_env();

    println!(
        "annular RingQueue (capacity={}, iters={}):",
        config.capacity, config.iterations
    );
    bench_throughput(&config);
    bench_rtt(&config);
}
