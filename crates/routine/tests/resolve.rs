// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
};

use tessera_routine::{
	BaseResolver, FuncParams, FunctionIdent, FunctionImplementation, FunctionInfo, FunctionKind, Functions, Param,
	builtin, window,
};
use tessera_type::Type;

struct Marker {
	info: FunctionInfo,
}

impl FunctionImplementation for Marker {
	fn info(&self) -> &FunctionInfo {
		&self.info
	}
}

#[test]
fn test_concurrent_resolution_shares_one_implementation() {
	let calls = Arc::new(AtomicUsize::new(0));
	let factory_calls = calls.clone();

	let mut builder = Functions::builder();
	builder
		.register(
			"marker",
			BaseResolver::new(FuncParams::none().required(Param::Any), move |name, arg_types| {
				factory_calls.fetch_add(1, Ordering::SeqCst);
				Ok(Arc::new(Marker {
					info: FunctionInfo::new(
						FunctionIdent::new(name, arg_types.to_vec()),
						Type::Boolean,
						FunctionKind::Scalar,
					),
				}))
			}),
		)
		.unwrap();
	let functions = builder.build();

	let resolved: Vec<Arc<dyn FunctionImplementation>> = thread::scope(|scope| {
		let handles: Vec<_> =
			(0..8).map(|_| scope.spawn(|| functions.resolve("marker", &[Type::Text]).unwrap())).collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	for other in &resolved[1..] {
		assert!(Arc::ptr_eq(&resolved[0], other));
	}
	// racing threads may each build one, but only one is ever handed out
	assert!(calls.load(Ordering::SeqCst) >= 1);
	assert!(Arc::ptr_eq(&resolved[0], &functions.resolve("marker", &[Type::Text]).unwrap()));
}

#[test]
fn test_builtin_is_deterministic_across_threads() {
	let idents: Vec<FunctionInfo> = thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|_| {
				scope.spawn(|| builtin().resolve_window("LAG", &[Type::Text, Type::Integer]).unwrap().info().clone())
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	for info in &idents {
		assert_eq!(info, &idents[0]);
		assert_eq!(info.name(), "lag");
		assert_eq!(info.return_type, Type::Text);
		assert_eq!(info.kind, FunctionKind::Window);
	}
}

#[test]
fn test_isolated_registry_does_not_touch_builtin() {
	let mut builder = Functions::builder();
	window::register(&mut builder).unwrap();
	builder
		.register(
			"only_here",
			BaseResolver::new(FuncParams::none(), |name, arg_types| {
				Ok(Arc::new(Marker {
					info: FunctionInfo::new(
						FunctionIdent::new(name, arg_types.to_vec()),
						Type::Undefined,
						FunctionKind::Table,
					),
				}))
			}),
		)
		.unwrap();
	let functions = builder.build();

	assert!(functions.contains("only_here"));
	assert!(!builtin().contains("only_here"));
	assert!(functions.resolve_window("row_number", &[]).is_ok());
}

#[test]
fn test_window_resolution_errors() {
	assert_eq!(builtin().resolve_window("median", &[Type::Integer]).err().unwrap().code(), "FUNCTION_001");
	assert_eq!(builtin().resolve_window("lead", &[]).err().unwrap().code(), "FUNCTION_002");
	assert_eq!(builtin().resolve_window("lead", &[Type::Text, Type::Text]).err().unwrap().code(), "FUNCTION_004");
}
