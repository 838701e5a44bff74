//! Named SGD requests and the values they return.

use std::{collections::{HashMap, HashSet}, str::Utf8Error};

use crate::{fields, SpecError};

/// One named request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
	name: String,
	request: Vec<u8>,
}

impl Query {
	pub fn new(name: impl Into<String>, request: impl Into<Vec<u8>>) -> Self {
		Self {
			name: name.into(),
			request: request.into(),
		}
	}

	/// Build a `getvar` request for the SGD `variable`, eg. `device.unique_id`.
	pub fn getvar(name: impl Into<String>, variable: &str) -> Self {
		Self::new(name, format!("! U1 getvar \"{variable}\"\r\n"))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn request(&self) -> &[u8] {
		&self.request
	}
}

/// Ordered set of queries, the order is the order they are sent in.
#[derive(Debug, Clone)]
pub struct QuerySpec {
	queries: Vec<Query>,
}

impl QuerySpec {
	/// Create a new spec, names must be unique.
	pub fn new(queries: Vec<Query>) -> Result<Self, SpecError> {
		let mut seen = HashSet::new();
		if let Some(dup) = queries.iter().find(|q| !seen.insert(q.name())) {
			return Err(SpecError::DuplicateName(dup.name().to_owned()));
		}

		Ok(Self {
			queries,
		})
	}

	/// Status, network and hardware information of a Link-OS printer.
	pub fn device_info() -> Self {
		let queries = [
			(fields::STATUS, "device.status"),
			(fields::HOSTNAME, "device.friendly_name"),
			(fields::IP_ADDRESS, "ip.addr"),
			(fields::SSID, "wlan.essid"),
			(fields::MODEL, "device.product_name"),
			(fields::SERIAL_NUMBER, "device.unique_id"),
			(fields::MAC_ADDRESS, "wlan.mac_raw"),
			(fields::LINKOS_VERSION, "appl.link_os_version"),
			(fields::FIRMWARE_VERSION, "appl.name"),
			(fields::DHCP_REQUIRED, "wlan.ip.dhcp.required"),
			(fields::DHCP_OPTION_81, "ip.dhcp.option81"),
			(fields::WLAN_BAND_PREFERENCE, "wlan.band_preference"),
			(fields::WLAN_ALLOWED_BAND, "wlan.allowed_band"),
			(fields::DEVICE_UPTIME, "device.uptime"),
			(fields::CHARGING_STATUS, "power.chgr_status"),
			(fields::DEFAULT_PORT, "wlan.ip.port"),
			(fields::ALTERNATE_PORT, "wlan.ip.port_alternate"),
			(fields::ZPL_MODE, "zpl.zpl_mode"),
		]
		.into_iter()
		.map(|(name, var)| Query::getvar(name, var))
		.collect();

		Self {
			queries,
		}
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Query> {
		self.queries.iter()
	}

	pub fn len(&self) -> usize {
		self.queries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.queries.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.queries.iter().map(Query::name)
	}
}

/// Values returned by the printer, keyed by query name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
	values: HashMap<String, String>,
}

impl QueryResult {
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.values.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// Like [`QueryResult::get()`], but a missing value reads as an empty string.
	pub fn value(&self, name: &str) -> &str {
		self.get(name).unwrap_or("")
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut String> {
		self.values.get_mut(name)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryResult {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut result = Self::default();
		for (k, v) in iter {
			result.insert(k, v);
		}
		result
	}
}

/// Decode one response: UTF-8, surrounding whitespace removed,
/// then one leading and one trailing `"` removed if present.
pub fn decode_response(buf: &[u8]) -> Result<String, Utf8Error> {
	let s = std::str::from_utf8(buf)?.trim();
	let s = s.strip_prefix('"').unwrap_or(s);
	let s = s.strip_suffix('"').unwrap_or(s);
	Ok(s.to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn getvar_request_format() {
		let q = Query::getvar("Model", "device.product_name");
		assert_eq!(q.name(), "Model");
		assert_eq!(q.request(), b"! U1 getvar \"device.product_name\"\r\n");
	}

	#[test]
	fn duplicate_names_are_rejected() {
		let err = QuerySpec::new(vec![
			Query::getvar("Status", "device.status"),
			Query::getvar("Status", "device.friendly_name"),
		])
		.unwrap_err();
		assert!(matches!(err, SpecError::DuplicateName(ref n) if n == "Status"));
	}

	#[test]
	fn device_info_has_unique_names_in_wire_order() {
		let spec = QuerySpec::device_info();
		assert_eq!(spec.len(), 18);
		assert!(QuerySpec::new(spec.iter().cloned().collect()).is_ok());

		let names: Vec<&str> = spec.names().collect();
		assert_eq!(names.first(), Some(&fields::STATUS));
		assert_eq!(names.last(), Some(&fields::ZPL_MODE));
		assert_eq!(names[15..17], [fields::DEFAULT_PORT, fields::ALTERNATE_PORT]);
	}

	#[test]
	fn decode_strips_whitespace_and_quotes() {
		assert_eq!(decode_response(b"\"ABC123\"  \r\n").unwrap(), "ABC123");
		assert_eq!(decode_response(b"  ready ").unwrap(), "ready");
		assert_eq!(decode_response(b"").unwrap(), "");
		assert_eq!(decode_response(b"\"\"").unwrap(), "");
	}

	#[test]
	fn decode_strips_a_single_layer_of_quotes() {
		assert_eq!(decode_response(b"\"\"nested\"\"").unwrap(), "\"nested\"");
		// a response cut off by the read size has no closing quote
		assert_eq!(decode_response(b"\"truncat").unwrap(), "truncat");
	}

	#[test]
	fn decode_rejects_invalid_utf8() {
		assert!(decode_response(&[b'"', 0xc3, 0x28, b'"']).is_err());
	}

	#[test]
	fn missing_value_reads_empty() {
		let result: QueryResult = [("Status", "ready")].into_iter().collect();
		assert_eq!(result.value("Status"), "ready");
		assert_eq!(result.value("SSID"), "");
		assert_eq!(result.get("SSID"), None);
	}
}
