// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tessera_routine::{
	CollectExpression, FunctionImplementation, Functions, Row, RoutineError, WindowFrameState, WindowFunction,
};
use tessera_type::{Result, Type, Value, error, return_error};
use tracing::{debug, instrument};

use crate::{ExecutorConfig, FrameSpec, error::EngineError, partition::PeerGroups};

/// Ordering and frame of a window. Partitioning happens before execution,
/// see [`split_partitions`](crate::split_partitions).
#[derive(Debug, Clone, Default)]
pub struct WindowDefinition {
	pub order_by: Vec<Arc<dyn CollectExpression>>,
	pub frame: FrameSpec,
}

impl WindowDefinition {
	pub fn new(order_by: Vec<Arc<dyn CollectExpression>>, frame: FrameSpec) -> Self {
		Self {
			order_by,
			frame,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartitionState {
	BeforePartition,
	AtRow(usize),
	PartitionDone,
}

/// Evaluates one resolved window function over partitions of rows. Each
/// partition must already be ordered by the definition's `order_by`.
pub struct WindowExecutor {
	implementation: Arc<dyn FunctionImplementation>,
	arguments: Vec<Arc<dyn CollectExpression>>,
	definition: WindowDefinition,
	config: ExecutorConfig,
	pool: Option<ThreadPool>,
}

impl WindowExecutor {
	pub fn new(
		implementation: Arc<dyn FunctionImplementation>,
		arguments: Vec<Arc<dyn CollectExpression>>,
		definition: WindowDefinition,
		config: ExecutorConfig,
	) -> Result<Self> {
		let info = implementation.info();
		if implementation.as_window().is_none() {
			return_error!(RoutineError::NotAWindowFunction {
				name: info.name().to_string()
			});
		}
		if info.arg_types().len() != arguments.len() {
			return_error!(EngineError::ArgumentCountMismatch {
				name: info.name().to_string(),
				expected: info.arg_types().len(),
				actual: arguments.len(),
			});
		}

		let pool = if config.parallel && config.threads > 0 {
			let pool = ThreadPoolBuilder::new()
				.num_threads(config.threads)
				.thread_name(|i| format!("window-{i}"))
				.build()
				.map_err(|err| {
					error!(EngineError::ThreadPool {
						reason: err.to_string()
					})
				})?;
			Some(pool)
		} else {
			None
		};

		debug!(function = %info.ident, frame = %definition.frame, threads = config.threads, "window executor ready");
		Ok(Self {
			implementation,
			arguments,
			definition,
			config,
			pool,
		})
	}

	/// Resolves `name` in `functions` for the value types of `arguments` and
	/// builds an executor for it.
	pub fn resolve(
		functions: &Functions,
		name: &str,
		arguments: Vec<Arc<dyn CollectExpression>>,
		definition: WindowDefinition,
		config: ExecutorConfig,
	) -> Result<Self> {
		let arg_types: Vec<Type> = arguments.iter().map(|argument| argument.value_type()).collect();
		let implementation = functions.resolve_window(name, &arg_types)?;
		Self::new(implementation, arguments, definition, config)
	}

	pub fn implementation(&self) -> &Arc<dyn FunctionImplementation> {
		&self.implementation
	}

	pub fn definition(&self) -> &WindowDefinition {
		&self.definition
	}

	pub fn config(&self) -> &ExecutorConfig {
		&self.config
	}

	fn function(&self) -> Result<&dyn WindowFunction> {
		self.implementation.as_window().ok_or_else(|| {
			error!(RoutineError::NotAWindowFunction {
				name: self.implementation.info().name().to_string()
			})
		})
	}

	/// Evaluates the function for every row of one ordered partition. The
	/// result holds one value per row, in row order.
	#[instrument(name = "engine::window::execute_partition", level = "trace", skip_all, fields(rows = partition.len()))]
	pub fn execute_partition<R: Row>(&self, partition: &[R]) -> Result<Vec<Value>> {
		let function = self.function()?;
		let rows: Vec<&dyn Row> = partition.iter().map(|row| row as &dyn Row).collect();
		let frame_spec = &self.definition.frame;
		let peers = if frame_spec.uses_peers() {
			PeerGroups::compute(&rows, &self.definition.order_by)?
		} else {
			PeerGroups::singletons(rows.len())
		};

		let mut frame = WindowFrameState::new(&rows);
		let mut results = Vec::with_capacity(rows.len());
		let mut state = PartitionState::BeforePartition;
		loop {
			state = match state {
				PartitionState::BeforePartition if rows.is_empty() => PartitionState::PartitionDone,
				PartitionState::BeforePartition => PartitionState::AtRow(0),
				PartitionState::AtRow(i) => {
					let (lower, upper) = frame_spec.bounds(i, rows.len(), peers.of(i));
					frame.update(i, lower, upper);

					let args = self
						.arguments
						.iter()
						.map(|argument| argument.collect(rows[i]))
						.collect::<Result<Vec<_>>>()?;
					results.push(function.execute(i, &frame, &self.arguments, &args)?);

					if i + 1 < rows.len() {
						PartitionState::AtRow(i + 1)
					} else {
						PartitionState::PartitionDone
					}
				}
				PartitionState::PartitionDone => break,
			};
		}

		Ok(results)
	}

	/// Evaluates every partition independently. The first failure aborts the
	/// whole run and no partial output is returned.
	#[instrument(name = "engine::window::execute", level = "debug", skip_all, fields(partitions = partitions.len()))]
	pub fn execute<R: Row + Sync>(&self, partitions: &[Vec<R>]) -> Result<Vec<Vec<Value>>> {
		let parallel = self.config.parallel
			&& partitions.len() > 1
			&& partitions.len() >= self.config.min_parallel_partitions;
		if !parallel {
			return partitions.iter().map(|partition| self.execute_partition(partition)).collect();
		}

		let run = || {
			partitions.par_iter().map(|partition| self.execute_partition(partition)).collect::<Result<Vec<_>>>()
		};
		match &self.pool {
			Some(pool) => pool.install(run),
			None => run(),
		}
	}
}

#[cfg(test)]
mod tests {
	use tessera_routine::{BaseResolver, FuncParams, FunctionInfo, FunctionKind, InputColumn, builtin};

	use super::*;

	struct Scalar {
		info: FunctionInfo,
	}

	impl FunctionImplementation for Scalar {
		fn info(&self) -> &FunctionInfo {
			&self.info
		}
	}

	fn row_number() -> Arc<dyn FunctionImplementation> {
		builtin().resolve_window("row_number", &[]).unwrap()
	}

	#[test]
	fn test_rejects_non_window_function() {
		let mut builder = Functions::builder();
		builder
			.register(
				"upper",
				BaseResolver::new(FuncParams::none(), |name, arg_types| {
					Ok(Arc::new(Scalar {
						info: FunctionInfo::new(
							tessera_routine::FunctionIdent::new(name, arg_types.to_vec()),
							Type::Text,
							FunctionKind::Scalar,
						),
					}))
				}),
			)
			.unwrap();
		let functions = builder.build();
		let upper = functions.resolve("upper", &[]).unwrap();

		let err = WindowExecutor::new(upper, vec![], WindowDefinition::default(), ExecutorConfig::new())
			.err()
			.unwrap();
		assert_eq!(err.code(), "FUNCTION_011");
	}

	#[test]
	fn test_rejects_argument_count_mismatch() {
		let argument: Arc<dyn CollectExpression> = Arc::new(InputColumn::new(0, Type::Integer));
		let err = WindowExecutor::new(row_number(), vec![argument], WindowDefinition::default(), ExecutorConfig::new())
			.err()
			.unwrap();
		assert_eq!(err.code(), "WINDOW_002");
	}

	#[test]
	fn test_partition_state_visits_every_row_once() {
		let executor =
			WindowExecutor::new(row_number(), vec![], WindowDefinition::default(), ExecutorConfig::new()).unwrap();
		let partition: Vec<Vec<Value>> = (0..4).map(|i| vec![Value::int(i)]).collect();
		assert_eq!(
			executor.execute_partition(&partition).unwrap(),
			vec![Value::int(1), Value::int(2), Value::int(3), Value::int(4)]
		);

		let empty: Vec<Vec<Value>> = vec![];
		assert!(executor.execute_partition(&empty).unwrap().is_empty());
	}

	#[test]
	fn test_dedicated_pool() {
		let executor = WindowExecutor::new(
			row_number(),
			vec![],
			WindowDefinition::default(),
			ExecutorConfig::new().threads(2),
		)
		.unwrap();
		assert!(executor.pool.is_some());

		let partitions: Vec<Vec<Vec<Value>>> = vec![vec![vec![]; 2], vec![vec![]; 3]];
		let result = executor.execute(&partitions).unwrap();
		assert_eq!(result[0], vec![Value::int(1), Value::int(2)]);
		assert_eq!(result[1], vec![Value::int(1), Value::int(2), Value::int(3)]);
	}
}
