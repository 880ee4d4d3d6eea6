use std::{collections::HashMap, fmt};

use qdrant_client::qdrant::{PointId, Value, point_id::PointIdOptions, value::Kind};
use serde::{Deserialize, Serialize};

use crate::schema;

/// Store point identifier. Collections may use either numeric or UUID ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointKey {
	Num(u64),
	Uuid(String),
}
impl PointKey {
	pub fn from_point_id(point_id: &PointId) -> Option<Self> {
		match &point_id.point_id_options {
			Some(PointIdOptions::Num(id)) => Some(Self::Num(*id)),
			Some(PointIdOptions::Uuid(id)) => Some(Self::Uuid(id.clone())),
			None => None,
		}
	}
}
impl fmt::Display for PointKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(id) => write!(f, "{id}"),
			Self::Uuid(id) => f.write_str(id),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
	pub doc_id: String,
	pub file_name: String,
	pub page: Option<i64>,
	pub year: Option<i64>,
	pub month: Option<i64>,
	pub day: Option<i64>,
	pub grade: String,
	pub file_path: String,
	pub keywords: Vec<String>,
}
impl DocumentPayload {
	/// Decodes a stored payload. Missing or mistyped fields fall back to empty values and
	/// date parts stored as the unknown marker decode to `None`.
	pub fn from_qdrant(payload: &HashMap<String, Value>) -> Self {
		Self {
			doc_id: payload_string(payload, schema::DOC_ID).unwrap_or_default(),
			file_name: payload_string(payload, schema::FILE_NAME).unwrap_or_default(),
			page: payload_i64(payload, schema::PAGE),
			year: payload_i64(payload, schema::YEAR),
			month: payload_i64(payload, schema::MONTH),
			day: payload_i64(payload, schema::DAY),
			grade: payload_string(payload, schema::GRADE).unwrap_or_default(),
			file_path: payload_string(payload, schema::FILE_PATH).unwrap_or_default(),
			keywords: payload_strings(payload, schema::KEYWORDS),
		}
	}

	/// `YYYY-MM-DD` with `----` and `--` standing in for unknown parts.
	pub fn date_label(&self) -> String {
		let year = self.year.map(|year| year.to_string()).unwrap_or_else(|| "----".to_string());
		let month = self.month.map(|month| month.to_string()).unwrap_or_else(|| "--".to_string());
		let day = self.day.map(|day| day.to_string()).unwrap_or_else(|| "--".to_string());

		format!("{year}-{month}-{day}")
	}
}

/// A similarity search result.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHit {
	pub id: PointKey,
	pub score: f32,
	pub payload: DocumentPayload,
}

/// A metadata lookup result with its stored vector.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
	pub id: PointKey,
	pub payload: DocumentPayload,
	pub vector: Vec<f32>,
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.clone()),
		Some(Kind::IntegerValue(value)) => Some(value.to_string()),
		Some(Kind::DoubleValue(value)) => Some(value.to_string()),
		_ => None,
	}
}

fn payload_i64(payload: &HashMap<String, Value>, key: &str) -> Option<i64> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::IntegerValue(value)) => Some(*value),
		Some(Kind::DoubleValue(value)) =>
			if value.fract() == 0.0 {
				Some(*value as i64)
			} else {
				None
			},
		Some(Kind::StringValue(text)) if text != schema::UNKNOWN => text.trim().parse().ok(),
		_ => None,
	}
}

fn payload_strings(payload: &HashMap<String, Value>, key: &str) -> Vec<String> {
	let Some(value) = payload.get(key) else {
		return Vec::new();
	};

	match &value.kind {
		Some(Kind::ListValue(list)) => list
			.values
			.iter()
			.filter_map(|item| match &item.kind {
				Some(Kind::StringValue(text)) => Some(text.clone()),
				_ => None,
			})
			.collect(),
		Some(Kind::StringValue(text)) => vec![text.clone()],
		_ => Vec::new(),
	}
}
