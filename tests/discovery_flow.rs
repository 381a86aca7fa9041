//! End-to-end detection, failover, and monitoring scenarios against mock
//! backends.

mod common;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use api_scout::config::{DiscoveryConfig, HostsConfig, MonitorConfig, ProbeConfig};
use api_scout::manager::ApiManager;

fn dev_host(addr: SocketAddr) -> String {
    format!("127.0.0.1:{}", addr.port())
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://127.0.0.1:{}", addr.port())
}

fn config_for(hosts: Vec<String>) -> DiscoveryConfig {
    DiscoveryConfig {
        hosts: HostsConfig {
            dev_hosts: hosts,
            include_common_hosts: false,
            ..HostsConfig::default()
        },
        probe: ProbeConfig { timeout_ms: 500 },
        monitor: MonitorConfig {
            interval_secs: 1,
            timeout_ms: 300,
        },
    }
}

#[tokio::test]
async fn detect_selects_first_healthy_and_drops_unhealthy() {
    let alive = common::spawn_backend(200, Duration::ZERO).await;
    let broken = common::spawn_backend(500, Duration::ZERO).await;

    let manager = ApiManager::new(config_for(vec![dev_host(alive), dev_host(broken)]));
    let url = manager.get_url().await.unwrap();

    assert_eq!(url, base_url(alive));
    let snapshot = manager.snapshot();
    assert!(snapshot.initialized);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.servers.len(), 1);
    assert_eq!(snapshot.servers[0].url, base_url(alive));
    assert!(snapshot.servers[0].healthy);
}

#[tokio::test]
async fn detect_preserves_enumeration_order_despite_slow_first() {
    // first candidate answers last; it must still rank first
    let slow = common::spawn_backend(200, Duration::from_millis(200)).await;
    let fast = common::spawn_backend(200, Duration::ZERO).await;

    let manager = ApiManager::new(config_for(vec![dev_host(slow), dev_host(fast)]));
    let url = manager.get_url().await.unwrap();

    assert_eq!(url, base_url(slow));
    let servers = manager.snapshot().servers;
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].url, base_url(slow));
    assert_eq!(servers[1].url, base_url(fast));
}

#[tokio::test]
async fn detect_falls_back_to_first_candidate_when_all_down() {
    let first = common::dead_addr().await;
    let second = common::dead_addr().await;

    let manager = ApiManager::new(config_for(vec![dev_host(first), dev_host(second)]));
    let url = manager.get_url().await.unwrap();

    assert_eq!(url, base_url(first));
    let snapshot = manager.snapshot();
    assert!(snapshot.initialized);
    assert!(snapshot.servers.is_empty());
}

#[tokio::test]
async fn failover_promotes_in_detection_order() {
    let a = common::spawn_backend(200, Duration::ZERO).await;
    let b = common::spawn_backend(200, Duration::ZERO).await;
    let c = common::spawn_backend(200, Duration::ZERO).await;

    let manager = ApiManager::new(config_for(vec![dev_host(a), dev_host(b), dev_host(c)]));
    assert_eq!(manager.get_url().await.unwrap(), base_url(a));
    assert_eq!(manager.snapshot().servers.len(), 3);

    let url = manager.failover().await;
    assert_eq!(url, base_url(b));
    let servers = manager.snapshot().servers;
    assert_eq!(servers.len(), 2);
    assert!(servers.iter().all(|s| s.url != base_url(a)));

    let url = manager.failover().await;
    assert_eq!(url, base_url(c));
    assert_eq!(manager.snapshot().servers.len(), 1);
}

#[tokio::test]
async fn concurrent_first_callers_share_one_detection() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let backend = common::spawn_programmable(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (200, Duration::from_millis(50))
        }
    })
    .await;

    let manager = ApiManager::new(config_for(vec![dev_host(backend)]));

    let (u1, u2) = tokio::join!(manager.get_url(), manager.get_url());
    assert_eq!(u1.unwrap(), base_url(backend));
    assert_eq!(u2.unwrap(), base_url(backend));

    // a healthy backend answers on /health, so one round = one request
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    manager.get_url().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1, "repeat call must not re-probe");
}

#[tokio::test]
async fn manual_override_bypasses_probing() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let backend = common::spawn_programmable(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (200, Duration::ZERO)
        }
    })
    .await;

    let manager = ApiManager::new(config_for(vec![dev_host(backend)]));
    manager.set_url("http://example:9000").unwrap();

    assert_eq!(manager.get_url().await.unwrap(), "http://example:9000");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn monitor_fails_over_when_active_dies() {
    let primary_up = Arc::new(AtomicBool::new(true));
    let flag = primary_up.clone();
    let primary = common::spawn_programmable(move || {
        let flag = flag.clone();
        async move {
            let status = if flag.load(Ordering::SeqCst) { 200 } else { 503 };
            (status, Duration::ZERO)
        }
    })
    .await;
    let standby = common::spawn_backend(200, Duration::ZERO).await;

    let manager = ApiManager::new(config_for(vec![dev_host(primary), dev_host(standby)]));
    assert_eq!(manager.get_url().await.unwrap(), base_url(primary));

    manager.start_monitor_with(Duration::from_millis(200));
    assert!(manager.monitor_running());

    primary_up.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(900)).await;

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.url.as_deref(), Some(base_url(standby).as_str()));
    assert_eq!(snapshot.servers.len(), 1);

    manager.stop_monitor();
    assert!(!manager.monitor_running());
    // stopping again is a no-op
    manager.stop_monitor();
}

#[tokio::test]
async fn stopped_monitor_leaves_state_alone() {
    let primary_up = Arc::new(AtomicBool::new(true));
    let flag = primary_up.clone();
    let primary = common::spawn_programmable(move || {
        let flag = flag.clone();
        async move {
            let status = if flag.load(Ordering::SeqCst) { 200 } else { 503 };
            (status, Duration::ZERO)
        }
    })
    .await;
    let standby = common::spawn_backend(200, Duration::ZERO).await;

    let manager = ApiManager::new(config_for(vec![dev_host(primary), dev_host(standby)]));
    assert_eq!(manager.get_url().await.unwrap(), base_url(primary));

    // double start re-arms instead of stacking timers
    manager.start_monitor_with(Duration::from_millis(200));
    manager.start_monitor_with(Duration::from_millis(200));
    manager.stop_monitor();
    assert!(!manager.monitor_running());

    primary_up.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(700)).await;

    // no timer running, so the dead primary stays active
    assert_eq!(manager.snapshot().url.as_deref(), Some(base_url(primary).as_str()));
}
