//! Report field names and the fields derived from raw printer values.

use std::fmt::{self, Display, Formatter};

use crate::QueryResult;

pub const STATUS: &str = "Status";
pub const HOSTNAME: &str = "Hostname";
pub const IP_ADDRESS: &str = "IP Address";
pub const SSID: &str = "SSID";
pub const MODEL: &str = "Model";
pub const SERIAL_NUMBER: &str = "Serial Number";
pub const MAC_ADDRESS: &str = "MAC Address";
pub const LINKOS_VERSION: &str = "LinkOS Version";
pub const FIRMWARE_VERSION: &str = "Firmware Version";
pub const DHCP_REQUIRED: &str = "DHCP Required";
pub const DHCP_OPTION_81: &str = "DHCP Option 81";
pub const WLAN_BAND_PREFERENCE: &str = "WLAN Band Preference";
pub const WLAN_ALLOWED_BAND: &str = "WLAN Allowed Band";
pub const DEVICE_UPTIME: &str = "Device Uptime";
pub const CHARGING_STATUS: &str = "Charging Status";
pub const DEFAULT_PORT: &str = "Default Port";
pub const ALTERNATE_PORT: &str = "Alternate Port";
pub const ZPL_MODE: &str = "ZPL Mode";

/// Derived from [`DEFAULT_PORT`] and [`ALTERNATE_PORT`], never read from the printer.
pub const PORTS: &str = "Ports";

/// Fields shown in upper case.
pub const UPPERCASE: [&str; 2] = [STATUS, MAC_ADDRESS];

/// Command language mode, see [`ZplMode::classify()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZplMode {
	/// ZPL II
	Zpl2,
	/// Plain ZPL
	Zpl,
}

impl ZplMode {
	const MARKER: &'static str = "ZPL II";

	/// Classify the raw `zpl.zpl_mode` value, eg. `"zpl II"`.
	pub fn classify(raw: &str) -> Self {
		if raw.to_uppercase().contains(Self::MARKER) {
			Self::Zpl2
		} else {
			Self::Zpl
		}
	}
}

impl Display for ZplMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Zpl2 => f.write_str("ZPL*"),
			Self::Zpl => f.write_str("ZPL"),
		}
	}
}

/// Combine the two port values into one field.
pub fn ports(default: &str, alternate: &str) -> String {
	format!("DEF: {default} | ALT: {alternate}")
}

/// Turn a raw batch result into the values that get reported.
///
/// Fields that are missing (eg. because the batch was aborted) stay missing,
/// except for [`PORTS`], which is built as soon as one of the ports is known.
pub fn derive_fields(result: &mut QueryResult) {
	if let Some(mode) = result.get_mut(ZPL_MODE) {
		*mode = ZplMode::classify(mode).to_string();
	}

	if result.contains(DEFAULT_PORT) || result.contains(ALTERNATE_PORT) {
		let ports = ports(result.value(DEFAULT_PORT), result.value(ALTERNATE_PORT));
		result.insert(PORTS, ports);
	}

	for name in UPPERCASE {
		if let Some(value) = result.get_mut(name) {
			*value = value.to_uppercase();
		}
	}
}
