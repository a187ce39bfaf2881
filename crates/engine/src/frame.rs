// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use tessera_type::{Result, return_error};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameMode {
	/// Bounds count physical rows.
	Rows,
	/// `CURRENT ROW` covers every peer of the current row.
	Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameBound {
	UnboundedPreceding,
	Preceding(usize),
	CurrentRow,
	Following(usize),
	UnboundedFollowing,
}

impl FrameBound {
	fn rank(&self) -> u8 {
		match self {
			FrameBound::UnboundedPreceding => 0,
			FrameBound::Preceding(_) => 1,
			FrameBound::CurrentRow => 2,
			FrameBound::Following(_) => 3,
			FrameBound::UnboundedFollowing => 4,
		}
	}

	fn is_offset(&self) -> bool {
		matches!(self, FrameBound::Preceding(_) | FrameBound::Following(_))
	}
}

impl Display for FrameBound {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FrameBound::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
			FrameBound::Preceding(n) => write!(f, "{} PRECEDING", n),
			FrameBound::CurrentRow => f.write_str("CURRENT ROW"),
			FrameBound::Following(n) => write!(f, "{} FOLLOWING", n),
			FrameBound::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
		}
	}
}

/// A validated frame clause. Construct through [`FrameSpec::new`] or the
/// [`rows`](FrameSpec::rows) / [`range`](FrameSpec::range) shorthands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSpec {
	mode: FrameMode,
	start: FrameBound,
	end: FrameBound,
}

impl Default for FrameSpec {
	/// `RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`
	fn default() -> Self {
		Self {
			mode: FrameMode::Range,
			start: FrameBound::UnboundedPreceding,
			end: FrameBound::CurrentRow,
		}
	}
}

impl FrameSpec {
	pub fn new(mode: FrameMode, start: FrameBound, end: FrameBound) -> Result<Self> {
		let spec = Self {
			mode,
			start,
			end,
		};

		let reason = if start == FrameBound::UnboundedFollowing {
			Some("the frame cannot start at UNBOUNDED FOLLOWING")
		} else if end == FrameBound::UnboundedPreceding {
			Some("the frame cannot end at UNBOUNDED PRECEDING")
		} else if mode == FrameMode::Range && (start.is_offset() || end.is_offset()) {
			Some("RANGE frames do not support offset bounds")
		} else if start.rank() > end.rank() {
			Some("the frame start lies after the frame end")
		} else {
			None
		};

		if let Some(reason) = reason {
			return_error!(EngineError::InvalidFrame {
				frame: spec.to_string(),
				reason: reason.to_string(),
			});
		}
		Ok(spec)
	}

	pub fn rows(start: FrameBound, end: FrameBound) -> Result<Self> {
		Self::new(FrameMode::Rows, start, end)
	}

	pub fn range(start: FrameBound, end: FrameBound) -> Result<Self> {
		Self::new(FrameMode::Range, start, end)
	}

	pub fn mode(&self) -> FrameMode {
		self.mode
	}

	pub fn start(&self) -> FrameBound {
		self.start
	}

	pub fn end(&self) -> FrameBound {
		self.end
	}

	/// Whether bound computation needs the peer group of the current row.
	pub(crate) fn uses_peers(&self) -> bool {
		self.mode == FrameMode::Range && (self.start == FrameBound::CurrentRow || self.end == FrameBound::CurrentRow)
	}

	/// Frame of row `current` in a partition of `len` rows as
	/// `(lower, upper_exclusive)`. `peers` is the half-open peer group of the
	/// current row and only matters for RANGE frames. A start past the end
	/// yields an empty frame with `lower == upper`.
	pub(crate) fn bounds(&self, current: usize, len: usize, peers: (usize, usize)) -> (usize, usize) {
		let lower = match self.start {
			FrameBound::UnboundedPreceding => 0,
			FrameBound::Preceding(n) => current.saturating_sub(n),
			FrameBound::CurrentRow => match self.mode {
				FrameMode::Rows => current,
				FrameMode::Range => peers.0,
			},
			FrameBound::Following(n) => current.saturating_add(n),
			FrameBound::UnboundedFollowing => len,
		};
		let upper = match self.end {
			FrameBound::UnboundedPreceding => 0,
			FrameBound::Preceding(n) => (current + 1).saturating_sub(n),
			FrameBound::CurrentRow => match self.mode {
				FrameMode::Rows => current + 1,
				FrameMode::Range => peers.1,
			},
			FrameBound::Following(n) => current.saturating_add(n).saturating_add(1),
			FrameBound::UnboundedFollowing => len,
		};

		let upper = upper.min(len);
		(lower.min(upper), upper)
	}
}

impl Display for FrameSpec {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mode = match self.mode {
			FrameMode::Rows => "ROWS",
			FrameMode::Range => "RANGE",
		};
		write!(f, "{} BETWEEN {} AND {}", mode, self.start, self.end)
	}
}
