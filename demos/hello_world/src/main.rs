use parking_lot::Mutex;
use rangefold::{
    Fenwick,
    FnOperation,
    SegmentTree,
    ops::{Concat, sum::I64Sum},
};

fn main() -> Result<(), rangefold::Error> {
    tracing_subscriber::fmt::init();

    // Additive Fenwick tree over 5 elements
    let mut fenwick = Fenwick::new(5, I64Sum)?;
    for (i, v) in [1, 2, 3, 4, 5].into_iter().enumerate() {
        fenwick.add(i, v)?;
    }
    assert_eq!(fenwick.accumulate_prefix(4)?, 15);
    assert_eq!(fenwick.accumulate(1, 3)?, 9);
    fenwick.replace(2, 10)?;
    log::info!("prefix sum after replace: {}", fenwick.accumulate_prefix(4)?);

    // Min segment tree using a closure with +infinity as identity
    let min = FnOperation::new(f64::INFINITY, |a: &f64, b: &f64| a.min(*b));
    let mut tree = SegmentTree::new(4, min)?;
    for (i, v) in [5.0, 2.0, 8.0, 1.0].into_iter().enumerate() {
        tree.assign(i, v)?;
    }
    log::info!("min of [0, 3]: {}", tree.accumulate(0, 3)?);
    tree.assign(3, 100.0)?;
    log::info!("min of [2, 3]: {}", tree.accumulate(2, 3)?);

    // Order-preserving folds with string concatenation
    let pieces = ["hello", " ", "range", "fold"].map(String::from);
    let words = SegmentTree::from_values(Concat, pieces)?;
    log::info!("concat of [2, 3]: {:?}", words.combine_range(2..)?);

    // The structures do no locking of their own, so share them behind a lock
    let shared = Mutex::new(Fenwick::new(8, I64Sum)?);
    std::thread::scope(|s| {
        for t in 0..4 {
            let shared = &shared;
            s.spawn(move || {
                for i in 0..8 {
                    shared.lock().add(i, t).expect("index within bounds");
                }
            });
        }
    });
    log::info!("shared total: {}", shared.lock().total());

    // Invalid calls are rejected without touching the structure
    if let Err(err) = tree.assign(4, 0.0) {
        log::warn!("rejected assignment: {err}");
    }

    Ok(())
}
