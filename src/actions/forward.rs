//! Port forwarding from localhost to a pod.

use crate::error::ApiError;
use crate::kubectl::{Invocation, NamespaceScope};
use std::fmt;
use std::net::TcpListener;
use std::str::FromStr;

/// `local:remote`, both in 1..=65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub local: u16,
    pub remote: u16,
}

impl FromStr for PortMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || {
            format!(
                "invalid port format '{}', expected localPort:remotePort (e.g. 8080:80)",
                s
            )
        };
        let (local, remote) = s.split_once(':').ok_or_else(format_error)?;
        let local: u32 = local.trim().parse().map_err(|_| format_error())?;
        let remote: u32 = remote.trim().parse().map_err(|_| format_error())?;
        Ok(Self {
            local: port("local", local)?,
            remote: port("remote", remote)?,
        })
    }
}

fn port(which: &str, value: u32) -> Result<u16, String> {
    match u16::try_from(value) {
        Ok(p) if p >= 1 => Ok(p),
        _ => Err(format!(
            "invalid {} port {}, must be between 1 and 65535",
            which, value
        )),
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.local, self.remote)
    }
}

/// Fails when something already listens on the local loopback port.
pub fn ensure_port_free(port: u16) -> Result<(), ApiError> {
    match TcpListener::bind(("127.0.0.1", port)) {
        Ok(_listener) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => Err(ApiError::PortInUse(port)),
        // Permission errors on low ports are left for kubectl to report.
        Err(_) => Ok(()),
    }
}

pub fn forward_invocation(pod: &str, namespace: Option<String>, mapping: PortMapping) -> Invocation {
    Invocation::new(["port-forward"])
        .namespace(NamespaceScope::or_default(namespace))
        .arg(pod)
        .arg(mapping.to_string())
}
