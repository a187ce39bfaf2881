// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, sync::Arc};

use tessera_routine::{CollectExpression, Row};
use tessera_type::{Result, Value};

fn keys_of(row: &dyn Row, expressions: &[Arc<dyn CollectExpression>]) -> Result<Vec<Value>> {
	expressions.iter().map(|expression| expression.collect(row)).collect()
}

fn same_keys(l: &[Value], r: &[Value]) -> bool {
	l.len() == r.len() && l.iter().zip(r).all(|(l, r)| l.cmp(r) == Ordering::Equal)
}

/// Cuts rows that already arrive grouped by their partition key into
/// maximal runs of equal keys. Rows are never reordered, so two runs with the
/// same key that are not adjacent stay separate partitions.
pub fn split_partitions<R: Row>(rows: Vec<R>, partition_by: &[Arc<dyn CollectExpression>]) -> Result<Vec<Vec<R>>> {
	let mut partitions: Vec<Vec<R>> = Vec::new();
	let mut current_key: Option<Vec<Value>> = None;

	for row in rows {
		let key = keys_of(&row, partition_by)?;
		let continues = current_key.as_deref().is_some_and(|current| same_keys(current, &key));
		match partitions.last_mut() {
			Some(partition) if continues => partition.push(row),
			_ => {
				partitions.push(vec![row]);
				current_key = Some(key);
			}
		}
	}

	Ok(partitions)
}

/// Half-open ranges of peers (rows with equal order-by keys) for every row of
/// one partition.
pub(crate) struct PeerGroups {
	groups: Vec<(usize, usize)>,
}

impl PeerGroups {
	pub(crate) fn compute(rows: &[&dyn Row], order_by: &[Arc<dyn CollectExpression>]) -> Result<Self> {
		let len = rows.len();
		if order_by.is_empty() {
			return Ok(Self {
				groups: vec![(0, len); len],
			});
		}

		let keys = rows.iter().map(|row| keys_of(*row, order_by)).collect::<Result<Vec<_>>>()?;
		let mut groups = Vec::with_capacity(len);
		let mut start = 0;
		while start < len {
			let mut end = start + 1;
			while end < len && same_keys(&keys[start], &keys[end]) {
				end += 1;
			}
			groups.extend(std::iter::repeat_n((start, end), end - start));
			start = end;
		}
		Ok(Self {
			groups,
		})
	}

	/// Every row is its own peer group.
	pub(crate) fn singletons(len: usize) -> Self {
		Self {
			groups: (0..len).map(|i| (i, i + 1)).collect(),
		}
	}

	pub(crate) fn of(&self, row: usize) -> (usize, usize) {
		self.groups[row]
	}
}

#[cfg(test)]
mod tests {
	use tessera_routine::InputColumn;
	use tessera_type::Type;

	use super::*;

	fn key(index: usize) -> Vec<Arc<dyn CollectExpression>> {
		vec![Arc::new(InputColumn::new(index, Type::Text))]
	}

	#[test]
	fn test_split_contiguous_runs() {
		let rows = vec![
			vec![Value::text("a"), Value::int(1)],
			vec![Value::text("a"), Value::int(2)],
			vec![Value::text("b"), Value::int(3)],
			vec![Value::text("a"), Value::int(4)],
		];
		let partitions = split_partitions(rows, &key(0)).unwrap();
		let sizes: Vec<usize> = partitions.iter().map(Vec::len).collect();
		assert_eq!(sizes, vec![2, 1, 1]);
		assert_eq!(partitions[2][0][1], Value::int(4));
	}

	#[test]
	fn test_split_without_keys_is_one_partition() {
		let rows = vec![vec![Value::int(1)], vec![Value::int(2)]];
		let partitions = split_partitions(rows, &[]).unwrap();
		assert_eq!(partitions.len(), 1);
		assert_eq!(partitions[0].len(), 2);
	}

	#[test]
	fn test_split_empty_input() {
		let rows: Vec<Vec<Value>> = vec![];
		assert!(split_partitions(rows, &key(0)).unwrap().is_empty());
	}

	#[test]
	fn test_split_null_keys_group_together() {
		let rows = vec![vec![Value::Null], vec![Value::Null], vec![Value::text("x")]];
		let partitions = split_partitions(rows, &key(0)).unwrap();
		assert_eq!(partitions.len(), 2);
		assert_eq!(partitions[0].len(), 2);
	}

	#[test]
	fn test_split_propagates_key_errors() {
		let rows = vec![vec![Value::int(1)]];
		let err = split_partitions(rows, &key(5)).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_012");
	}

	#[test]
	fn test_peer_groups() {
		let data: Vec<Vec<Value>> = [1, 1, 2, 3, 3].into_iter().map(|k| vec![Value::int(k)]).collect();
		let rows: Vec<&dyn Row> = data.iter().map(|r| r as &dyn Row).collect();
		let peers = PeerGroups::compute(&rows, &key(0)).unwrap();
		let groups: Vec<(usize, usize)> = (0..5).map(|i| peers.of(i)).collect();
		assert_eq!(groups, vec![(0, 2), (0, 2), (2, 3), (3, 5), (3, 5)]);

		let whole = PeerGroups::compute(&rows, &[]).unwrap();
		assert_eq!(whole.of(3), (0, 5));
		assert_eq!(PeerGroups::singletons(5).of(3), (3, 4));
	}
}
