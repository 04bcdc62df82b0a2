//! Construction of the worker pools the parallel algorithms run on.

/// How many worker threads to use.
///
/// `Default` lets rayon decide (which honors `RAYON_NUM_THREADS`);
/// `NumThreads` overrides both.
#[derive(Debug, Clone, Copy)]
pub enum Threads {
    Default,
    NumThreads(usize),
}

impl Threads {
    pub fn build(self) -> rayon::ThreadPool {
        match self {
            Self::Default => rayon::ThreadPoolBuilder::new()
                .build()
                .expect("Should be able to build default threadpool"),
            Self::NumThreads(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .unwrap_or_else(|_| {
                    panic!(
                        "Should be able to build custom threadpool with {} threads",
                        num_threads
                    )
                }),
        }
    }
}

/// Builds a [`rayon::ThreadPool`]: `threads![]` with the default worker
/// count, `threads![n]` with exactly `n` workers.
#[macro_export]
macro_rules! threads {
    () => {
        $crate::utils::threads::Threads::Default.build()
    };
    ($num:expr) => {
        $crate::utils::threads::Threads::NumThreads($num).build()
    };
}
