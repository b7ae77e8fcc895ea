mod helpers;

use delver_application::DnsResolver;
use delver_domain::{DnsQuery, DomainError, RecordData, RecordType};
use delver_infrastructure::dns::resolver::IterativeConfig;
use delver_infrastructure::{DnsCache, IterativeResolver};
use helpers::dns_server_mock::{start_group, MockBehavior};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

fn walker(cache: Arc<DnsCache>, roots: Vec<Ipv4Addr>, port: u16) -> IterativeResolver {
    IterativeResolver::new(
        cache,
        IterativeConfig {
            roots,
            server_port: port,
            attempt_timeout: Duration::from_millis(300),
            max_depth: 8,
        },
    )
}

#[tokio::test]
async fn three_hop_delegation_returns_answer_and_path() {
    let root = Ipv4Addr::new(127, 0, 110, 1);
    let tld = Ipv4Addr::new(127, 0, 110, 2);
    let auth = Ipv4Addr::new(127, 0, 110, 3);
    let (port, servers) = start_group(vec![
        (
            root,
            MockBehavior::Referral {
                authority: "ns.tld.test.".to_string(),
                glue: Some(tld),
            },
        ),
        (
            tld,
            MockBehavior::Referral {
                authority: "ns.example.tld.test.".to_string(),
                glue: Some(auth),
            },
        ),
        (auth, MockBehavior::answer_a(Ipv4Addr::new(203, 0, 113, 30), 240)),
    ])
    .await
    .unwrap();

    let cache = Arc::new(DnsCache::new(64));
    let resolver = walker(Arc::clone(&cache), vec![root], port);

    let query = DnsQuery::new("www.example.tld.test", RecordType::A);
    let resolution = resolver.resolve(&query).await.unwrap();

    assert_eq!(
        resolution.records[0].data,
        RecordData::A(Ipv4Addr::new(203, 0, 113, 30))
    );
    // every server that answered, in visitation order
    assert_eq!(
        resolution.path,
        vec![IpAddr::from(root), IpAddr::from(tld), IpAddr::from(auth)]
    );
    assert!(cache.contains(&query));
    drop(servers);
}

#[tokio::test]
async fn exhausting_every_root_is_notfound() {
    let silent = Ipv4Addr::new(127, 0, 111, 1);
    let (port, servers) = start_group(vec![(silent, MockBehavior::Silent)]).await.unwrap();

    let cache = Arc::new(DnsCache::new(64));
    // the fixed root set: 13 anchors, all timing out
    let resolver = walker(Arc::clone(&cache), vec![silent; 13], port);

    let query = DnsQuery::new("unreachable.test", RecordType::A);
    let err = resolver.resolve(&query).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound(d) if d == "unreachable.test"));
    // every root was actually tried before giving up
    assert_eq!(servers[0].query_count(), 13);
}

#[tokio::test]
async fn referral_without_glue_resolves_authority_host_first() {
    let auth = Ipv4Addr::new(127, 0, 112, 2);
    let root_script = MockBehavior::ByName(HashMap::from([
        (
            "example.test".to_string(),
            MockBehavior::Referral {
                authority: "ns.example.test.".to_string(),
                glue: None,
            },
        ),
        // the nested walk asks the same root for the name server's address
        (
            "ns.example.test".to_string(),
            MockBehavior::answer_a(auth, 3600),
        ),
    ]));
    let root = Ipv4Addr::new(127, 0, 112, 1);
    let (port, servers) = start_group(vec![
        (root, root_script),
        (auth, MockBehavior::answer_a(Ipv4Addr::new(203, 0, 113, 40), 300)),
    ])
    .await
    .unwrap();

    let cache = Arc::new(DnsCache::new(64));
    let resolver = walker(Arc::clone(&cache), vec![root], port);

    let query = DnsQuery::new("example.test", RecordType::A);
    let resolution = resolver.resolve(&query).await.unwrap();

    assert_eq!(
        resolution.records[0].data,
        RecordData::A(Ipv4Addr::new(203, 0, 113, 40))
    );
    // the nested walk kept its own state: the outer path holds only the
    // outer hops
    assert_eq!(resolution.path, vec![IpAddr::from(root), IpAddr::from(auth)]);
    // the name server's own address got cached by the nested walk
    assert!(cache.contains(&DnsQuery::new("ns.example.test", RecordType::A)));
    drop(servers);
}

#[tokio::test]
async fn dead_end_restarts_at_next_root_with_fresh_path() {
    let dead = Ipv4Addr::new(127, 0, 113, 1);
    let good = Ipv4Addr::new(127, 0, 113, 2);
    let (port, servers) = start_group(vec![
        (dead, MockBehavior::NoRecords),
        (good, MockBehavior::answer_a(Ipv4Addr::new(203, 0, 113, 50), 60)),
    ])
    .await
    .unwrap();

    let cache = Arc::new(DnsCache::new(64));
    let resolver = walker(Arc::clone(&cache), vec![dead, good], port);

    let query = DnsQuery::new("example.test", RecordType::A);
    let resolution = resolver.resolve(&query).await.unwrap();

    assert_eq!(
        resolution.records[0].data,
        RecordData::A(Ipv4Addr::new(203, 0, 113, 50))
    );
    // restart reset the path; only the answering root remains
    assert_eq!(resolution.path, vec![IpAddr::from(good)]);
    drop(servers);
}

#[tokio::test]
async fn undecodable_response_advances_like_a_timeout() {
    let broken = Ipv4Addr::new(127, 0, 114, 1);
    let good = Ipv4Addr::new(127, 0, 114, 2);
    let (port, servers) = start_group(vec![
        (broken, MockBehavior::Garbage),
        (good, MockBehavior::answer_a(Ipv4Addr::new(203, 0, 113, 60), 60)),
    ])
    .await
    .unwrap();

    let cache = Arc::new(DnsCache::new(64));
    let resolver = walker(Arc::clone(&cache), vec![broken, good], port);

    let query = DnsQuery::new("example.test", RecordType::A);
    let resolution = resolver.resolve(&query).await.unwrap();

    assert_eq!(
        resolution.records[0].data,
        RecordData::A(Ipv4Addr::new(203, 0, 113, 60))
    );
    drop(servers);
}

#[tokio::test]
async fn second_resolve_hits_cache_with_empty_path() {
    let root = Ipv4Addr::new(127, 0, 115, 1);
    let (port, servers) = start_group(vec![(
        root,
        MockBehavior::answer_a(Ipv4Addr::new(203, 0, 113, 70), 600),
    )])
    .await
    .unwrap();

    let cache = Arc::new(DnsCache::new(64));
    let resolver = walker(Arc::clone(&cache), vec![root], port);

    let query = DnsQuery::new("example.test", RecordType::A);
    let fresh = resolver.resolve(&query).await.unwrap();
    assert!(!fresh.cache_hit);
    let queries_after_first = servers[0].query_count();

    let cached = resolver.resolve(&query).await.unwrap();
    assert!(cached.cache_hit);
    assert!(cached.path.is_empty());
    assert_eq!(*cached.records, *fresh.records);
    assert_eq!(servers[0].query_count(), queries_after_first);
}

#[tokio::test]
async fn empty_root_set_is_notfound_without_any_network_traffic() {
    let cache = Arc::new(DnsCache::new(64));
    let resolver = walker(cache, Vec::new(), 53);

    let query = DnsQuery::new("example.test", RecordType::A);
    let err = resolver.resolve(&query).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
