#![allow(dead_code)]
//! Scriptable mock DNS server for resolver tests.
//!
//! Each server binds a UDP socket and answers every query according to
//! its script: a real answer, a referral (with or without glue), an
//! empty response, undecodable bytes, or silence. Scripts can branch on
//! the queried name, which is how delegation chains are staged across a
//! handful of loopback addresses.

use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::rdata::{A, AAAA, NS};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the server does with a query.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Non-empty answer section; the terminal hop of a chain.
    Answer { records: Vec<(RData, u32)> },
    /// Empty answer; NS in authority, optional IPv4 glue in additional.
    Referral {
        authority: String,
        glue: Option<Ipv4Addr>,
    },
    /// Response with every section empty (a dead end).
    NoRecords,
    /// Bytes no decoder accepts.
    Garbage,
    /// Never respond; the client runs into its timeout.
    Silent,
    /// Branch on the queried name (canonical, no trailing dot). Names
    /// not in the map get silence.
    ByName(HashMap<String, MockBehavior>),
}

impl MockBehavior {
    pub fn answer_a(addr: Ipv4Addr, ttl: u32) -> Self {
        MockBehavior::Answer {
            records: vec![(RData::A(A(addr)), ttl)],
        }
    }

    pub fn answer_aaaa(addr: Ipv6Addr, ttl: u32) -> Self {
        MockBehavior::Answer {
            records: vec![(RData::AAAA(AAAA(addr)), ttl)],
        }
    }

    /// `None` means no response at all (a name missing from a `ByName`
    /// script is served with silence).
    fn for_name<'a>(&'a self, name: &str) -> Option<&'a MockBehavior> {
        match self {
            MockBehavior::ByName(map) => map.get(name),
            other => Some(other),
        }
    }
}

pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    queries: Arc<AtomicUsize>,
}

impl MockDnsServer {
    /// Bind at `bind` (port 0 picks a free one) and serve `behavior`
    /// until shutdown.
    pub async fn start(
        bind: SocketAddr,
        behavior: MockBehavior,
    ) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(bind).await?;
        let local_addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_response(&buf[..len], &behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            shutdown_tx: Some(shutdown_tx),
            queries,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queries received so far, including ones answered with silence.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Start one server per (loopback IP, behavior) pair, all sharing the
/// port the first bind picked. Distinct loopback addresses with a common
/// port is how a delegation chain or a racing pool fits in one test.
pub async fn start_group(
    servers: Vec<(Ipv4Addr, MockBehavior)>,
) -> Result<(u16, Vec<MockDnsServer>), std::io::Error> {
    let mut started = Vec::with_capacity(servers.len());
    let mut port = 0u16;
    for (ip, behavior) in servers {
        let server = MockDnsServer::start(SocketAddr::from((ip, port)), behavior).await?;
        port = server.addr().port();
        started.push(server);
    }
    Ok((port, started))
}

fn build_response(query_bytes: &[u8], behavior: &MockBehavior) -> Option<Vec<u8>> {
    let query = Message::from_vec(query_bytes).ok()?;
    let question = query.queries().first()?.clone();
    let qname = question.name().clone();
    let canonical = qname.to_utf8().trim_end_matches('.').to_ascii_lowercase();

    let behavior = behavior.for_name(&canonical)?;

    if matches!(behavior, MockBehavior::Silent) {
        return None;
    }
    if matches!(behavior, MockBehavior::Garbage) {
        return Some(vec![0xde, 0xad, 0xbe, 0xef]);
    }

    let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_available(true);
    response.add_query(question);

    match behavior {
        MockBehavior::Answer { records } => {
            for (rdata, ttl) in records {
                response.add_answer(Record::from_rdata(qname.clone(), *ttl, rdata.clone()));
            }
        }
        MockBehavior::Referral { authority, glue } => {
            let ns_name = Name::from_str(authority).ok()?;
            response.add_name_server(Record::from_rdata(
                qname.base_name(),
                300,
                RData::NS(NS(ns_name.clone())),
            ));
            if let Some(addr) = glue {
                response.add_additional(Record::from_rdata(ns_name, 300, RData::A(A(*addr))));
            }
        }
        MockBehavior::NoRecords => {}
        // handled above
        MockBehavior::Silent | MockBehavior::Garbage | MockBehavior::ByName(_) => {}
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    response.emit(&mut encoder).ok()?;
    Some(buf)
}
