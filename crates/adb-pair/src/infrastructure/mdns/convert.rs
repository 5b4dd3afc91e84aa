//! Conversion from mdns-sd records to [`ServiceAnnouncement`].

use std::net::IpAddr;

use adb_pair_core::ServiceAnnouncement;

/// Builds an announcement from a resolved mdns-sd service.
///
/// The `server` used for `adb pair` is the lowest advertised IPv4 address,
/// so pairing does not depend on the host resolving `.local` names.  Without
/// an IPv4 address it falls back to the advertised host name.
pub fn announcement_from_resolved(info: &mdns_sd::ResolvedService) -> ServiceAnnouncement {
    let host_name = info.get_hostname().to_string();
    let addresses = info.get_addresses().iter().filter_map(scoped_ip_to_ip_addr);

    ServiceAnnouncement {
        name: info.get_fullname().to_string(),
        server: choose_server(addresses, &host_name),
        port: info.get_port(),
        host_name,
    }
}

/// Picks the address passed to `adb pair`.
pub fn choose_server<I>(addresses: I, host_name: &str) -> String
where
    I: IntoIterator<Item = IpAddr>,
{
    addresses
        .into_iter()
        .filter(IpAddr::is_ipv4)
        .min()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| host_name.trim_end_matches('.').to_string())
}

/// Converts a scoped mdns-sd address to a plain `IpAddr`, dropping any zone
/// suffix (`fe80::1%en0`).
fn scoped_ip_to_ip_addr(ip: &mdns_sd::ScopedIp) -> Option<IpAddr> {
    parse_unscoped(&ip.to_string())
}

fn parse_unscoped(text: &str) -> Option<IpAddr> {
    let bare = text.split_once('%').map_or(text, |(addr, _zone)| addr);
    bare.parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_choose_server_prefers_ipv4() {
        // Arrange
        let addrs = vec![ip("fe80::1"), ip("192.168.1.5"), ip("fd00::7")];

        // Act
        let server = choose_server(addrs, "Android.local.");

        // Assert
        assert_eq!(server, "192.168.1.5");
    }

    #[test]
    fn test_choose_server_is_deterministic_across_orderings() {
        let a = choose_server(vec![ip("192.168.1.9"), ip("192.168.1.5")], "h.local.");
        let b = choose_server(vec![ip("192.168.1.5"), ip("192.168.1.9")], "h.local.");
        assert_eq!(a, "192.168.1.5");
        assert_eq!(a, b);
    }

    #[test]
    fn test_choose_server_falls_back_to_host_name_without_trailing_dot() {
        let server = choose_server(vec![ip("fe80::1")], "Android-7.local.");
        assert_eq!(server, "Android-7.local");
    }

    #[test]
    fn test_choose_server_with_no_addresses() {
        assert_eq!(choose_server(Vec::new(), "pixel.local."), "pixel.local");
    }

    #[test]
    fn test_parse_unscoped_strips_zone() {
        assert_eq!(parse_unscoped("fe80::1%en0"), Some(ip("fe80::1")));
        assert_eq!(parse_unscoped("10.1.2.3"), Some(ip("10.1.2.3")));
        assert_eq!(parse_unscoped("not-an-ip"), None);
    }
}
