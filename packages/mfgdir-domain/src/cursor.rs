use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resume point in the `(company_name, id)` order.
///
/// The encoded form is opaque to clients: JSON `{"name": ..., "id": ...}` wrapped in unpadded
/// base64url.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cursor {
	pub name: String,
	pub id: Uuid,
}
impl Cursor {
	pub fn new(name: impl Into<String>, id: Uuid) -> Self {
		Self { name: name.into(), id }
	}

	pub fn encode(&self) -> String {
		let payload = serde_json::json!({ "name": self.name, "id": self.id.to_string() });

		Base64UrlUnpadded::encode_string(payload.to_string().as_bytes())
	}

	/// Malformed tokens decode to [`CursorToken::NoCursor`]; callers restart from the first page.
	pub fn decode(token: &str) -> CursorToken {
		let Ok(bytes) = Base64UrlUnpadded::decode_vec(token.trim()) else {
			return CursorToken::NoCursor;
		};
		let Ok(cursor) = serde_json::from_slice::<Cursor>(&bytes) else {
			return CursorToken::NoCursor;
		};

		CursorToken::Valid(cursor)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorToken {
	Valid(Cursor),
	NoCursor,
}
impl CursorToken {
	pub fn from_optional(token: Option<&str>) -> Self {
		match token {
			Some(token) => Cursor::decode(token),
			None => Self::NoCursor,
		}
	}

	pub fn into_cursor(self) -> Option<Cursor> {
		match self {
			Self::Valid(cursor) => Some(cursor),
			Self::NoCursor => None,
		}
	}

	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid(_))
	}
}
