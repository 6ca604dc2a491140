use std::net::IpAddr;

/// Name resolution as a narrow capability, so the sweep logic can be
/// exercised without touching the system resolver.
pub trait Resolver {
    /// Forward lookup: name or address string to its first resolved address.
    fn forward(&self, target: &str) -> Option<IpAddr>;

    /// Best-effort canonical name for the target.
    fn canonical_name(&self, target: &str) -> Option<String>;
}

/// Resolver backed by the operating system's resolver.
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn forward(&self, target: &str) -> Option<IpAddr> {
        dns_lookup::lookup_host(target)
            .ok()
            .and_then(|addrs| addrs.into_iter().next())
    }

    fn canonical_name(&self, target: &str) -> Option<String> {
        // Resolve forward first, then reverse the address. Callers fall back
        // to the target string itself when this returns nothing.
        let addr = self.forward(target)?;

        dns_lookup::lookup_addr(&addr).ok()
    }
}
