// ── Client network ranges ──
//
// CIDR blocks for the inbound allow-list. A bare address is a /32 (or /128).

use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;

/// Parse one `server.allowed_networks` entry.
pub fn parse_network(raw: &str) -> Result<IpNet, String> {
    let raw = raw.trim();
    if raw.contains('/') {
        let net = IpNet::from_str(raw).map_err(|e| format!("invalid network '{raw}': {e}"))?;
        return Ok(canonical_net(net));
    }
    let addr = IpAddr::from_str(raw).map_err(|_| format!("invalid address '{raw}'"))?;
    Ok(IpNet::from(addr.to_canonical()))
}

/// Whether `ip` falls inside `net`. IPv4-mapped IPv6 peers match as IPv4.
pub fn network_contains(net: &IpNet, ip: IpAddr) -> bool {
    net.contains(&ip.to_canonical())
}

// `::ffff:10.0.0.0/104` is really `10.0.0.0/8`.
fn canonical_net(net: IpNet) -> IpNet {
    match (net.addr().to_canonical(), net.prefix_len()) {
        (addr @ IpAddr::V4(_), prefix) if net.addr().is_ipv6() && prefix >= 96 => {
            IpNet::new(addr, prefix - 96).unwrap_or(net)
        }
        _ => net,
    }
}
