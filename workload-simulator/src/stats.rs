// Reporting for workload simulation results

use crate::input::WorkloadError;
use crate::models::{FibCsvRow, FibSample, RangeCsvRow, RangeRunResult};
use std::path::Path;

/// Print a summary table of a range workload run
pub fn print_range_summary(result: &RangeRunResult) {
    println!("\nRange Workload Summary");
    println!("======================");
    println!("Range queries: {}", result.range_queries);
    println!("Point updates: {}", result.point_updates);
    println!("Cache capacity: {} entries", result.capacity);

    println!(
        "\n{:<10} {:>10} {:>10} {:>8} {:>10} {:>12} {:>10} {:>10} {:>10}",
        "Strategy",
        "Hits",
        "Misses",
        "HitRate",
        "Evictions",
        "Invalidated",
        "Elapsed",
        "QueryAvg",
        "UpdateAvg"
    );
    println!("{}", "-".repeat(100));

    for (strategy, stats) in &result.stats {
        println!(
            "{:<10} {:>10} {:>10} {:>7.2}% {:>10} {:>12} {:>9.3}s {:>8.0}ns {:>8.0}ns",
            strategy.as_str(),
            stats.hits,
            stats.misses,
            stats.hit_rate(),
            stats.evictions,
            stats.invalidated,
            stats.elapsed.as_secs_f64(),
            stats.query_latency.avg_ns(),
            stats.update_latency.avg_ns()
        );
    }
}

/// Print a per-`n` comparison of the two Fibonacci memo strategies
pub fn print_fib_summary(samples: &[FibSample]) {
    println!("\n┌────────┬────────────────┬────────────────┬──────────┐");
    println!("│   n    │  LRU memo (ns) │ Splay memo (ns)│  Ratio   │");
    println!("├────────┼────────────────┼────────────────┼──────────┤");
    for sample in samples {
        let ratio = if sample.lru_mean_ns > 0.0 {
            sample.splay_mean_ns / sample.lru_mean_ns
        } else {
            0.0
        };
        println!(
            "│ {:>6} │ {:>14.1} │ {:>14.1} │ {:>7.2}x │",
            sample.n, sample.lru_mean_ns, sample.splay_mean_ns, ratio
        );
    }
    println!("└────────┴────────────────┴────────────────┴──────────┘");
}

/// Export range workload results to a CSV file
pub fn export_range_csv(result: &RangeRunResult, path: &Path) -> Result<(), WorkloadError> {
    let mut writer = csv::Writer::from_path(path)?;
    for (strategy, stats) in &result.stats {
        writer.serialize(RangeCsvRow {
            strategy: strategy.as_str().to_string(),
            capacity: result.capacity,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            evictions: stats.evictions,
            invalidated: stats.invalidated,
            elapsed_ms: stats.elapsed.as_secs_f64() * 1000.0,
            query_ops: stats.query_latency.count,
            query_avg_ns: stats.query_latency.avg_ns(),
            query_p99_ns: stats.query_latency.p99_ns,
            update_ops: stats.update_latency.count,
            update_avg_ns: stats.update_latency.avg_ns(),
            update_p99_ns: stats.update_latency.p99_ns,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Export Fibonacci comparison samples to a CSV file
///
/// Values are arbitrary precision and written as decimal strings.
pub fn export_fib_csv(samples: &[FibSample], path: &Path) -> Result<(), WorkloadError> {
    let mut writer = csv::Writer::from_path(path)?;
    for sample in samples {
        writer.serialize(FibCsvRow {
            n: sample.n,
            value: sample.value.to_string(),
            lru_mean_ns: sample.lru_mean_ns,
            splay_mean_ns: sample.splay_mean_ns,
        })?;
    }
    writer.flush()?;
    Ok(())
}
