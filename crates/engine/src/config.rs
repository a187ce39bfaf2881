// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Controls how a [`WindowExecutor`](crate::WindowExecutor) spreads
/// partitions over threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
	pub parallel: bool,
	pub threads: usize,
	pub min_parallel_partitions: usize,
}

impl Default for ExecutorConfig {
	fn default() -> Self {
		Self {
			parallel: true,
			threads: 0,
			min_parallel_partitions: 2,
		}
	}
}

impl ExecutorConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Evaluate partitions on rayon (default: true).
	pub fn parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	/// Size of a dedicated thread pool, 0 uses rayon's global pool (default: 0).
	pub fn threads(mut self, threads: usize) -> Self {
		self.threads = threads;
		self
	}

	/// Below this many partitions the executor stays on the calling thread (default: 2).
	pub fn min_parallel_partitions(mut self, min: usize) -> Self {
		self.min_parallel_partitions = min;
		self
	}
}
