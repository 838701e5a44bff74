use std::time::Duration;

use zebra::{fields::*, QueryResult};

/// Width field names are padded to, with dots.
const NAME_WIDTH: usize = 25;

const RULE: &str = "--------------------------------------------------";

pub struct Section {
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

pub const SECTIONS: [Section; 3] = [
    Section {
        title: "STATUS",
        fields: &[HOSTNAME, STATUS, CHARGING_STATUS, DEVICE_UPTIME],
    },
    Section {
        title: "NETWORK",
        fields: &[
            IP_ADDRESS,
            SSID,
            PORTS,
            DHCP_REQUIRED,
            DHCP_OPTION_81,
            WLAN_BAND_PREFERENCE,
            WLAN_ALLOWED_BAND,
        ],
    },
    Section {
        title: "HARDWARE",
        fields: &[
            MODEL,
            SERIAL_NUMBER,
            MAC_ADDRESS,
            ZPL_MODE,
            LINKOS_VERSION,
            FIRMWARE_VERSION,
        ],
    },
];

pub fn render(result: &QueryResult) -> String {
    let mut out = String::new();
    for section in &SECTIONS {
        out.push_str(&format!("{}\n{RULE}\n", section.title));
        for &name in section.fields {
            out.push_str(&format!("{name:.<NAME_WIDTH$} {}\n", result.value(name)));
        }
        out.push('\n');
    }
    out
}

/// `HH:MM:SS`, hours are not wrapped at 24.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_dot_padded() {
        let result: QueryResult = [(HOSTNAME, "ZT-LAB-01")].into_iter().collect();
        let out = render(&result);
        assert!(out.contains("Hostname................. ZT-LAB-01\n"));
        // missing values render empty
        assert!(out.contains("SSID..................... \n"));
    }

    #[test]
    fn sections_in_order() {
        let out = render(&QueryResult::default());
        let status = out.find("STATUS\n").unwrap();
        let network = out.find("NETWORK\n").unwrap();
        let hardware = out.find("HARDWARE\n").unwrap();
        assert!(status < network && network < hardware);
        assert_eq!(out.lines().filter(|l| *l == RULE).count(), 3);
        assert!(out.ends_with("\n\n"));
    }

    #[test]
    fn duration_format() {
        assert_eq!(format_duration(Duration::from_millis(1_900)), "00:00:01");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "01:02:05");
        assert_eq!(format_duration(Duration::from_secs(100 * 3600)), "100:00:00");
    }
}
