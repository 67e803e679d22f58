//! Order-preserving parallel conversion.
//!
//! Inputs are converted on a dedicated rayon pool sized to the requested
//! worker count. Results come back in input order. If the pool cannot be
//! built the inputs are converted on the calling thread.

use rayon::prelude::*;
use tracing::{debug_span, warn};

use crate::converter::Converter;

impl Converter {
    pub fn convert_batch<S: AsRef<str> + Sync>(&self, inputs: &[S], workers: usize) -> Vec<String> {
        let _span = debug_span!("convert_batch", inputs = inputs.len(), workers).entered();
        par_map(inputs, workers, |s| self.convert_text(s.as_ref()))
    }
}

/// Convert every input with the default converter, keeping input order.
pub fn convert_batch<S: AsRef<str> + Sync>(inputs: &[S], workers: usize) -> Vec<String> {
    Converter::default().convert_batch(inputs, workers)
}

pub(crate) fn par_map<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = workers.clamp(1, items.len().max(1));
    if workers == 1 {
        return items.iter().map(&f).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("kruti-batch-{i}"))
        .build();
    match pool {
        Ok(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        Err(e) => {
            warn!(workers, error = %e, "failed to create thread pool, converting sequentially");
            items.iter().map(&f).collect()
        }
    }
}
