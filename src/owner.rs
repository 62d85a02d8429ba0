//! Resource owner profile returned by the Graph API `/me` endpoint.

// self
use crate::_prelude::*;

/// Immutable view over a raw `/me` payload.
///
/// Accessors read the underlying map lazily and return `None` whenever a key along the
/// path is missing or has an unexpected type. Fields without a dedicated accessor stay
/// reachable through [`get`](Self::get) and [`to_map`](Self::to_map).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct BenevautUser {
	data: Map<String, Value>,
}
impl BenevautUser {
	/// Wraps a raw field map.
	pub fn new(data: Map<String, Value>) -> Self {
		Self { data }
	}

	/// Raw value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}

	/// User identifier; numeric identifiers are rendered as strings.
	pub fn id(&self) -> Option<String> {
		match self.data.get("id")? {
			Value::String(id) => Some(id.clone()),
			Value::Number(id) => Some(id.to_string()),
			_ => None,
		}
	}

	/// Full display name.
	pub fn name(&self) -> Option<&str> {
		self.str_field("name")
	}

	/// Given name.
	pub fn first_name(&self) -> Option<&str> {
		self.str_field("first_name")
	}

	/// Family name.
	pub fn last_name(&self) -> Option<&str> {
		self.str_field("last_name")
	}

	/// Primary email address.
	pub fn email(&self) -> Option<&str> {
		self.str_field("email")
	}

	/// Hometown object (`{id, name}`).
	pub fn hometown(&self) -> Option<&Map<String, Value>> {
		self.data.get("hometown")?.as_object()
	}

	/// Biography; only served by Graph API versions before 2.8.
	pub fn bio(&self) -> Option<&str> {
		self.str_field("bio")
	}

	/// Gender.
	pub fn gender(&self) -> Option<&str> {
		self.str_field("gender")
	}

	/// Locale (e.g. `fr_FR`).
	pub fn locale(&self) -> Option<&str> {
		self.str_field("locale")
	}

	/// Profile link.
	pub fn link(&self) -> Option<&str> {
		self.str_field("link")
	}

	/// Offset from UTC in hours.
	pub fn timezone(&self) -> Option<f64> {
		self.data.get("timezone")?.as_f64()
	}

	/// Lower bound of the age range.
	pub fn min_age(&self) -> Option<i64> {
		self.path(&["age_range", "min"])?.as_i64()
	}

	/// Upper bound of the age range.
	pub fn max_age(&self) -> Option<i64> {
		self.path(&["age_range", "max"])?.as_i64()
	}

	/// Profile picture URL (`picture.data.url`).
	pub fn picture_url(&self) -> Option<&str> {
		self.path(&["picture", "data", "url"])?.as_str()
	}

	/// Whether the profile picture is the default silhouette (`picture.data.is_silhouette`).
	pub fn is_silhouette(&self) -> Option<bool> {
		self.path(&["picture", "data", "is_silhouette"])?.as_bool()
	}

	/// Alias of [`is_silhouette`](Self::is_silhouette).
	pub fn is_default_picture(&self) -> Option<bool> {
		self.is_silhouette()
	}

	/// Cover photo URL (`cover.source`).
	pub fn cover_photo_url(&self) -> Option<&str> {
		self.path(&["cover", "source"])?.as_str()
	}

	/// Raw payload plus `picture_url` and `is_silhouette` promoted from `picture.data`.
	pub fn to_map(&self) -> Map<String, Value> {
		let mut map = self.data.clone();

		if let Some(url) = self.path(&["picture", "data", "url"]) {
			map.insert("picture_url".into(), url.clone());
		}
		if let Some(flag) = self.path(&["picture", "data", "is_silhouette"]) {
			map.insert("is_silhouette".into(), flag.clone());
		}

		map
	}

	/// Consumes the profile, returning the untouched raw payload.
	pub fn into_inner(self) -> Map<String, Value> {
		self.data
	}

	fn str_field(&self, key: &str) -> Option<&str> {
		self.data.get(key)?.as_str()
	}

	fn path(&self, keys: &[&str]) -> Option<&Value> {
		let (first, rest) = keys.split_first()?;

		rest.iter().try_fold(self.data.get(*first)?, |value, key| value.get(*key))
	}
}
impl From<Map<String, Value>> for BenevautUser {
	fn from(data: Map<String, Value>) -> Self {
		Self::new(data)
	}
}
impl Serialize for BenevautUser {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.to_map().serialize(serializer)
	}
}
