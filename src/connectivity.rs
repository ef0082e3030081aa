use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::traits::ConnectivityProbe;

/// Treats the host as online while it has a non-loopback local address.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterfaceProbe;

impl ConnectivityProbe for InterfaceProbe {
    fn is_connected(&self) -> bool {
        match local_ip_address::local_ip() {
            Ok(ip) => !ip.is_loopback(),
            Err(e) => {
                debug!("No usable network interface: {e}");
                false
            }
        }
    }
}

/// A probe whose answer is set by hand.
#[derive(Debug)]
pub struct FixedProbe(AtomicBool);

impl FixedProbe {
    pub fn new(connected: bool) -> Self {
        Self(AtomicBool::new(connected))
    }

    pub fn set(&self, connected: bool) {
        self.0.store(connected, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for FixedProbe {
    fn is_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_probe_can_be_switched() {
        let probe = FixedProbe::new(true);
        assert!(probe.is_connected());
        probe.set(false);
        assert!(!probe.is_connected());
    }
}
