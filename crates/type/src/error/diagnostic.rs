// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{CodecDirection, Diagnostic, IntoDiagnostic, TypeError};

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			TypeError::ParseFailure {
				target,
				..
			} => Diagnostic {
				code: "TYPE_001".to_string(),
				message,
				label: Some(format!("malformed {} input", target)),
				help: Some(format!("Provide a well formed {} literal", target)),
				notes: vec!["Malformed input indicates corrupt stored or submitted data".to_string()],
				cause: None,
			},

			TypeError::InvalidValue {
				expected,
				actual,
			} => Diagnostic {
				code: "TYPE_002".to_string(),
				message,
				label: Some("value does not match its declared type".to_string()),
				help: Some(format!("Cast the value to {} before handing it over", expected)),
				notes: vec![format!("The value carries the runtime type {}", actual)],
				cause: None,
			},

			TypeError::CastOutOfRange {
				target,
				..
			} => Diagnostic {
				code: "TYPE_003".to_string(),
				message,
				label: Some("value out of range".to_string()),
				help: Some(format!("Use a type wider than {}", target)),
				notes: vec![],
				cause: None,
			},

			TypeError::ProtocolIntegrityFault {
				direction,
				known_fields,
				..
			} => {
				let mut notes = vec![
					"Writer and reader must share the same object schema within one plan".to_string(),
					format!("Known fields: [{}]", known_fields.join(", ")),
				];
				if direction == CodecDirection::Write {
					notes.push(
						"Values with keys outside the schema are rejected rather than silently dropped"
							.to_string(),
					);
				}
				Diagnostic {
					code: "CODEC_001".to_string(),
					message,
					label: Some("object schema mismatch".to_string()),
					help: Some("This is an internal error - please report this issue".to_string()),
					notes,
					cause: None,
				}
			}

			TypeError::UnexpectedEof {
				..
			} => Diagnostic {
				code: "CODEC_002".to_string(),
				message,
				label: Some("truncated input".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			TypeError::Corrupt {
				..
			} => Diagnostic {
				code: "CODEC_003".to_string(),
				message,
				label: Some("corrupt input".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			TypeError::UnknownTypeId {
				..
			} => Diagnostic {
				code: "CODEC_004".to_string(),
				message,
				label: Some("unknown type descriptor".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			TypeError::UnknownValueTag {
				..
			} => Diagnostic {
				code: "CODEC_005".to_string(),
				message,
				label: Some("unknown value tag".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			TypeError::TrailingBytes {
				..
			} => Diagnostic {
				code: "CODEC_006".to_string(),
				message,
				label: Some("trailing bytes".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			TypeError::LengthOverflow {
				..
			} => Diagnostic {
				code: "CODEC_007".to_string(),
				message,
				label: Some("length overflow".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}
