#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::mpsc;

use crate::utils::errors::MsmError;

/// Chunk results indexed by chunk position, independent of the order in
/// which the chunks completed.
#[derive(Clone, Debug)]
pub struct ChunkResults<T> {
    slots: Vec<Option<T>>,
}

impl<T> ChunkResults<T> {
    pub fn new(num_chunks: usize) -> Self {
        Self {
            slots: (0..num_chunks).map(|_| None).collect(),
        }
    }

    /// Collects `(chunk, result)` pairs delivered in any order.
    pub fn from_completions(
        num_chunks: usize,
        completions: impl IntoIterator<Item = (usize, T)>,
    ) -> Self {
        let mut results = Self::new(num_chunks);
        for (chunk, result) in completions {
            results.insert(chunk, result);
        }
        results
    }

    pub fn insert(&mut self, chunk: usize, result: T) {
        let slot = &mut self.slots[chunk];
        assert!(slot.is_none(), "chunk {chunk} completed twice");
        *slot = Some(result);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Results in chunk order, least significant chunk first.
    pub fn into_ordered(self) -> Vec<T> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(chunk, slot)| slot.unwrap_or_else(|| panic!("chunk {chunk} never completed")))
            .collect()
    }
}

/// Runs one task per chunk with at most `num_workers` tasks in flight.
///
/// Backed by the global rayon pool unless built with a dedicated worker
/// count. Without the `parallel` feature chunks run one after another.
pub struct ChunkScheduler {
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl ChunkScheduler {
    pub fn global() -> Self {
        Self {
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    pub fn with_workers(num_workers: usize) -> Result<Self, MsmError> {
        if num_workers == 0 {
            return Err(MsmError::InvalidWorkerCount(num_workers));
        }
        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_workers)
                .thread_name(|i| format!("msm-worker-{i}"))
                .build()?;
            Ok(Self { pool: Some(pool) })
        }
        #[cfg(not(feature = "parallel"))]
        Ok(Self::global())
    }

    pub fn num_workers(&self) -> usize {
        #[cfg(feature = "parallel")]
        return match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        };
        #[cfg(not(feature = "parallel"))]
        1
    }

    /// Runs `op` inside this scheduler's pool.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(op);
        }
        op()
    }

    /// Runs `task(chunk)` for every chunk in `0..num_chunks`. Each task
    /// hands its result back once, tagged with its chunk index.
    pub fn run<T, F>(&self, num_chunks: usize, task: F) -> ChunkResults<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            let (sender, receiver) = mpsc::channel();
            self.install(|| {
                (0..num_chunks)
                    .into_par_iter()
                    .for_each_with(sender, |sender, chunk| {
                        let result = task(chunk);
                        // the receiver outlives every worker
                        let _ = sender.send((chunk, result));
                    })
            });
            ChunkResults::from_completions(num_chunks, receiver.try_iter())
        }
        #[cfg(not(feature = "parallel"))]
        ChunkResults::from_completions(num_chunks, (0..num_chunks).map(|chunk| (chunk, task(chunk))))
    }
}

impl Default for ChunkScheduler {
    fn default() -> Self {
        Self::global()
    }
}
