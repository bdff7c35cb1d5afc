/// Known node addresses, this node's own address included.
///
/// Append-only; duplicates are kept so the list mirrors what peers announced.
#[derive(Debug, Clone)]
pub struct PeerRegistry {
    self_address: String,
    peers: Vec<String>,
}

impl PeerRegistry {
    /// Registry of a node that starts its own network.
    pub fn new(self_address: String) -> Self {
        Self {
            peers: vec![self_address.clone()],
            self_address,
        }
    }

    /// Registry adopted from a seed node, extended with this node's address.
    pub fn from_seed(self_address: String, mut peers: Vec<String>) -> Self {
        peers.push(self_address.clone());
        Self {
            self_address,
            peers,
        }
    }

    /// Record an announced peer. Announcements of our own address are
    /// ignored; returns whether the address was added.
    pub fn add(&mut self, address: String) -> bool {
        if address == self.self_address {
            return false;
        }
        self.peers.push(address);
        true
    }

    /// Every known peer except this node: the gossip fan-out.
    pub fn others(&self) -> Vec<String> {
        self.peers
            .iter()
            .filter(|p| **p != self.self_address)
            .cloned()
            .collect()
    }

    pub fn addresses(&self) -> &[String] {
        &self.peers
    }

    pub fn self_address(&self) -> &str {
        &self.self_address
    }
}

#[cfg(test)]
mod tests {
    use super::PeerRegistry;

    #[test]
    fn fresh_registry_knows_only_itself() {
        let reg = PeerRegistry::new("a:1".into());
        assert_eq!(reg.addresses(), ["a:1"]);
        assert!(reg.others().is_empty());
    }

    #[test]
    fn seeded_registry_appends_self() {
        let reg = PeerRegistry::from_seed("b:2".into(), vec!["a:1".into()]);
        assert_eq!(reg.addresses(), ["a:1", "b:2"]);
        assert_eq!(reg.others(), ["a:1"]);
    }

    #[test]
    fn add_skips_self_but_keeps_duplicates() {
        let mut reg = PeerRegistry::new("a:1".into());
        assert!(!reg.add("a:1".into()));
        assert!(reg.add("b:2".into()));
        assert!(reg.add("b:2".into()));
        assert_eq!(reg.addresses(), ["a:1", "b:2", "b:2"]);
    }
}
