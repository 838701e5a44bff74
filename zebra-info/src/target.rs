use std::{io, net::{IpAddr, ToSocketAddrs}};

use anyhow::{bail, Context, Result};

/// Crude check for an address in the printers' private range.
///
/// This is a substring test, not IPv4 validation: `"host10.lan"` matches as well.
pub fn looks_like_address(input: &str) -> bool {
    input.contains("10.")
}

/// Turn the command line target into an IP address.
///
/// Anything that is not taken as an address literal goes through the
/// system resolver, IPv4 results are preferred.
pub fn resolve(input: &str) -> Result<IpAddr> {
    if looks_like_address(input) {
        if let Ok(ip) = input.parse() {
            return Ok(ip);
        }
        log::debug!("{input:?} looked like an address, but is not one; resolving");
    }

    let addrs: Vec<IpAddr> = (input, 0)
        .to_socket_addrs()
        .with_context(|| format!("cannot resolve {input}"))?
        .map(|addr| addr.ip())
        .collect();
    log::debug!("{input} resolves to {addrs:?}");

    match addrs.iter().find(|ip| ip.is_ipv4()).or(addrs.first()) {
        Some(ip) => Ok(*ip),
        None => bail!("{input} has no addresses"),
    }
}

/// `<ErrorKind>: <message>` of the failure behind `err`, without the context chain.
pub fn describe(err: &anyhow::Error) -> String {
    match err.chain().find_map(|e| e.downcast_ref::<io::Error>()) {
        Some(e) => format!("{:?}: {e}", e.kind()),
        None => format!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn heuristic_matches_private_prefix() {
        assert!(looks_like_address("10.20.30.40"));
        assert!(looks_like_address("172.16.10.5"));
        assert!(looks_like_address("zt10.example"));
        assert!(!looks_like_address("printer-01.example"));
    }

    #[test]
    fn address_literal_is_used_directly() {
        assert_eq!(resolve("10.1.2.3").unwrap(), IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)));
    }

    #[test]
    fn other_literals_go_through_the_resolver() {
        assert_eq!(resolve("127.0.0.1").unwrap(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn unknown_host_is_an_error() {
        let err = resolve("no-such-printer.invalid").unwrap_err();
        assert!(format!("{err:#}").contains("no-such-printer.invalid"));

        let desc = describe(&err);
        let (kind, msg) = desc.split_once(": ").unwrap();
        assert!(!kind.is_empty() && kind.chars().all(|c| c.is_ascii_alphanumeric()), "{desc}");
        assert!(!msg.is_empty());
        assert!(!desc.contains("cannot resolve"), "{desc}");
    }

    #[test]
    fn describe_without_io_error() {
        let err = anyhow::anyhow!("printer.lan has no addresses");
        assert_eq!(describe(&err), "Error: printer.lan has no addresses");
    }
}
