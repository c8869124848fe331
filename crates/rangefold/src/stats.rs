use core::{cell::RefCell, fmt};
use minstant::Instant;
use sketches_ddsketch::{Config, DDSketch};
use std::rc::Rc;

/// Structure operations whose latencies are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// [Fenwick::add](crate::Fenwick::add)
    Add,
    /// [Fenwick::replace](crate::Fenwick::replace)
    Replace,
    /// [Fenwick::get](crate::Fenwick::get)
    Get,
    /// [Fenwick::accumulate_prefix](crate::Fenwick::accumulate_prefix)
    Prefix,
    /// Two-sided range folds (`accumulate` and `combine_range` on both structures)
    Range,
    /// [SegmentTree::assign](crate::SegmentTree::assign)
    Assign,
}

impl OpKind {
    const ALL: [OpKind; 6] = [
        OpKind::Add,
        OpKind::Replace,
        OpKind::Get,
        OpKind::Prefix,
        OpKind::Range,
        OpKind::Assign,
    ];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Latency summary of one [OpKind], in nanoseconds
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of recorded calls
    pub count: usize,
    /// Median latency
    pub p50: f64,
    /// 99th percentile
    pub p99: f64,
    /// Highest recorded latency
    pub max: f64,
}

type Sketches = [DDSketch; OpKind::ALL.len()];

/// Per-operation latency sketches of a range structure
///
/// Only calls that pass their index checks are recorded. Each public call records exactly
/// one sample under its own [OpKind], even when it is built from other operations.
/// Cloning a structure copies its sketches.
pub struct Stats {
    sketches: Rc<RefCell<Sketches>>,
}

impl Default for Stats {
    fn default() -> Self {
        let sketch = || DDSketch::new(Config::new(0.01, 2048, 1.0e-9));
        Self {
            sketches: Rc::new(RefCell::new(core::array::from_fn(|_| sketch()))),
        }
    }
}

impl Clone for Stats {
    fn clone(&self) -> Self {
        Self {
            sketches: Rc::new(RefCell::new(self.sketches.borrow().clone())),
        }
    }
}

impl Stats {
    /// Starts timing a call, the sample is recorded when the returned guard is dropped
    #[inline]
    pub(crate) fn time(&self, kind: OpKind) -> Timer {
        Timer {
            kind,
            start: Instant::now(),
            sketches: Rc::clone(&self.sketches),
        }
    }

    /// Returns the number of recorded calls of `kind`
    pub fn count(&self, kind: OpKind) -> usize {
        self.sketches.borrow()[kind.slot()].count()
    }

    /// Returns the latency summary of `kind`
    pub fn summary(&self, kind: OpKind) -> Summary {
        let sketches = self.sketches.borrow();
        let sketch = &sketches[kind.slot()];
        let quantile = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
        Summary {
            count: sketch.count(),
            p50: quantile(0.5),
            p99: quantile(0.99),
            max: sketch.max().unwrap_or(0.0),
        }
    }
}

impl fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in OpKind::ALL.into_iter().filter(|k| self.count(*k) > 0) {
            let s = self.summary(kind);
            map.entry(
                &kind,
                &format_args!(
                    "count={} p50={:.0}ns p99={:.0}ns max={:.0}ns",
                    s.count, s.p50, s.p99, s.max
                ),
            );
        }
        map.finish()
    }
}

/// Records the elapsed time of a call into its sketch on drop
pub(crate) struct Timer {
    kind: OpKind,
    start: Instant,
    sketches: Rc<RefCell<Sketches>>,
}

impl Drop for Timer {
    #[inline]
    fn drop(&mut self) {
        let nanos = self.start.elapsed().as_nanos() as f64;
        self.sketches.borrow_mut()[self.kind.slot()].add(nanos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_records_into_its_kind() {
        let stats = Stats::default();
        for _ in 0..3 {
            let _timer = stats.time(OpKind::Assign);
        }
        drop(stats.time(OpKind::Range));
        assert_eq!(stats.count(OpKind::Assign), 3);
        assert_eq!(stats.count(OpKind::Range), 1);
        assert_eq!(stats.count(OpKind::Add), 0);

        let summary = stats.summary(OpKind::Assign);
        assert_eq!(summary.count, 3);
        assert!(summary.max >= summary.p50);
        assert_eq!(stats.summary(OpKind::Get), Summary::default());
    }

    #[test]
    fn clone_is_independent() {
        let stats = Stats::default();
        drop(stats.time(OpKind::Add));
        let copy = stats.clone();
        drop(copy.time(OpKind::Add));
        assert_eq!(stats.count(OpKind::Add), 1);
        assert_eq!(copy.count(OpKind::Add), 2);
    }

    #[test]
    fn debug_lists_recorded_kinds() {
        let stats = Stats::default();
        assert_eq!(format!("{stats:?}"), "{}");
        drop(stats.time(OpKind::Prefix));
        let out = format!("{stats:?}");
        assert!(out.starts_with("{Prefix: count=1 "), "{out}");
        assert!(!out.contains("Add"));
    }
}
