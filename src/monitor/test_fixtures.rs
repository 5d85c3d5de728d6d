//! Shared test doubles for poll loop and supervisor tests.

use crate::network::{AddressEnumerator, EnumerateError, IpFamily};
use crate::publish::{PublishError, PublishOutcome, Publisher, RecordType};
use crate::resolve::{AddressResolver, ReflectError, ReflectionService, Reflector};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Enumerator that replays one candidate set per call.
///
/// Once the script runs out, the last set is repeated.
pub struct ScriptedEnumerator {
    script: Mutex<VecDeque<Result<Vec<IpAddr>, EnumerateError>>>,
    last: Mutex<Vec<IpAddr>>,
    calls: AtomicUsize,
}

impl ScriptedEnumerator {
    pub fn new(script: Vec<Result<Vec<IpAddr>, EnumerateError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// One single-address candidate set per tick.
    pub fn sequence(addrs: &[&str]) -> Self {
        Self::new(addrs.iter().map(|a| Ok(vec![ip(a)])).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddressEnumerator for ScriptedEnumerator {
    fn addresses(&self, _interface: &str) -> Result<Vec<IpAddr>, EnumerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(addrs)) => {
                (*self.last.lock().unwrap()).clone_from(&addrs);
                Ok(addrs)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }
}

/// Enumerator with a fixed address table; unknown interfaces are missing.
pub struct StaticEnumerator {
    interfaces: HashMap<String, Vec<IpAddr>>,
}

impl StaticEnumerator {
    /// Builds the table from `(interface, address)` pairs.
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let mut interfaces: HashMap<String, Vec<IpAddr>> = HashMap::new();
        for (name, addr) in entries {
            interfaces.entry((*name).to_string()).or_default().push(ip(addr));
        }
        Self { interfaces }
    }
}

impl AddressEnumerator for StaticEnumerator {
    fn addresses(&self, interface: &str) -> Result<Vec<IpAddr>, EnumerateError> {
        self.interfaces
            .get(interface)
            .cloned()
            .ok_or_else(|| EnumerateError::not_found(interface))
    }
}

/// Enumerator that panics on use.
pub struct PanickingEnumerator;

impl AddressEnumerator for PanickingEnumerator {
    fn addresses(&self, interface: &str) -> Result<Vec<IpAddr>, EnumerateError> {
        panic!("enumerator exploded on {interface}");
    }
}

/// Reflector that always answers with the same address.
pub struct FixedReflector(pub &'static str);

impl Reflector for FixedReflector {
    async fn reflect(
        &self,
        _service: ReflectionService,
        _family: IpFamily,
        _bind: Option<IpAddr>,
    ) -> Result<Vec<String>, ReflectError> {
        Ok(vec![self.0.to_string()])
    }
}

pub fn local_resolver() -> AddressResolver<FixedReflector> {
    AddressResolver::new(FixedReflector("198.51.100.200"), ReflectionService::Google, false)
}

/// Publisher that records calls and replays queued results.
///
/// Defaults to a successful update once the queue is empty.
#[derive(Default)]
pub struct RecordingPublisher {
    results: Mutex<VecDeque<Result<PublishOutcome, PublishError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(count: usize) -> Self {
        let publisher = Self::new();
        {
            let mut results = publisher.results.lock().unwrap();
            for _ in 0..count {
                results.push_back(Err(PublishError::InvalidEndpoint {
                    endpoint: "mailto:nobody".to_string(),
                }));
            }
        }
        publisher
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn published_addresses(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, address)| address).collect()
    }
}

impl Publisher for RecordingPublisher {
    async fn publish(&self, label: &str, address: &str) -> Result<PublishOutcome, PublishError> {
        self.calls
            .lock()
            .unwrap()
            .push((label.to_string(), address.to_string()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PublishOutcome::Updated {
                record_type: RecordType::A,
            }))
    }
}
