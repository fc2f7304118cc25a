use std::sync::Arc;

use dnsfilter_application::FilterCoordinator;
use dnsfilter_domain::{
    FilterSource, ProtectionFlags, QType, Reason, RewriteAnswer, RewriteEntry, ServiceRule,
    ServiceRules, Settings,
};
use dnsfilter_infrastructure::{
    InMemoryHostsContainer, InMemoryRuleListCompiler, NoopReputationChecker,
    StaticSafeSearchChecker, SystemResolver,
};

fn settings(flags: ProtectionFlags) -> Settings {
    Settings::new("client", flags)
}

fn coordinator(rewrites: Vec<RewriteEntry>) -> Arc<FilterCoordinator> {
    let coordinator = FilterCoordinator::new(
        Arc::new(InMemoryRuleListCompiler::new()),
        Arc::new(InMemoryHostsContainer::from_lines("")),
        Arc::new(NoopReputationChecker),
        Arc::new(NoopReputationChecker),
        Arc::new(StaticSafeSearchChecker::default()),
        Arc::new(SystemResolver),
        rewrites,
        ProtectionFlags::default(),
        None,
    );
    coordinator.start();
    coordinator
}

#[tokio::test]
async fn exact_legacy_rewrite_chases_cname_to_an_address() {
    let rewrites = vec![
        RewriteEntry::new("*.example.com", QType::Cname, RewriteAnswer::Host("target.example.com".into())),
        RewriteEntry::new("target.example.com", QType::A, RewriteAnswer::Ip(Some("1.2.3.4".parse().unwrap()))),
    ];
    let coordinator = coordinator(rewrites);
    let flags = ProtectionFlags { filtering_enabled: true, protection_enabled: true, ..Default::default() };

    let result = coordinator.check_host("foo.example.com", QType::A, &settings(flags)).await.unwrap();

    assert_eq!(result.reason, Reason::Rewritten);
    assert_eq!(result.canon_name.as_deref(), Some("target.example.com"));
    assert_eq!(result.ip_list, vec!["1.2.3.4".parse::<std::net::IpAddr>().unwrap()]);
}

#[tokio::test]
async fn cname_self_exception_falls_through_to_empty_result() {
    let rewrites = vec![RewriteEntry::new("evil.com", QType::Cname, RewriteAnswer::Host("evil.com".into()))];
    let coordinator = coordinator(rewrites);
    let flags = ProtectionFlags { filtering_enabled: true, ..Default::default() };

    let result = coordinator.check_host("evil.com", QType::A, &settings(flags)).await.unwrap();

    assert!(result.is_not_found());
}

#[tokio::test]
async fn cname_loop_stops_after_one_hop() {
    let rewrites = vec![
        RewriteEntry::new("a.com", QType::Cname, RewriteAnswer::Host("b.com".into())),
        RewriteEntry::new("b.com", QType::Cname, RewriteAnswer::Host("a.com".into())),
    ];
    let coordinator = coordinator(rewrites);
    let flags = ProtectionFlags { filtering_enabled: true, ..Default::default() };

    let result = coordinator.check_host("a.com", QType::A, &settings(flags)).await.unwrap();

    assert_eq!(result.reason, Reason::Rewritten);
    assert_eq!(result.canon_name.as_deref(), Some("b.com"));
    assert!(result.ip_list.is_empty());
}

#[tokio::test]
async fn allow_list_overrides_block_list() {
    let coordinator = coordinator(Vec::new());
    coordinator
        .set_filters(
            vec![FilterSource::from_data(1, "||ads.com^\n")],
            vec![FilterSource::from_data(-100, "@@||ads.com^\n")],
            false,
        )
        .await
        .unwrap();
    let flags = ProtectionFlags { filtering_enabled: true, protection_enabled: true, ..Default::default() };

    let result = coordinator.check_host("ads.com", QType::A, &settings(flags)).await.unwrap();

    assert!(!result.is_filtered);
    assert_eq!(result.reason, Reason::NotFilteredAllowList);
    assert_eq!(result.rules.len(), 1);
}

#[tokio::test]
async fn host_rule_with_mismatched_qtype_drops_its_ip() {
    let coordinator = coordinator(Vec::new());
    coordinator
        .set_filters(vec![FilterSource::from_data(1, "1.2.3.4 ads.com\n")], Vec::new(), false)
        .await
        .unwrap();
    let flags = ProtectionFlags { filtering_enabled: true, protection_enabled: true, ..Default::default() };

    let result = coordinator.check_host("ads.com", QType::Aaaa, &settings(flags)).await.unwrap();

    assert_eq!(result.reason, Reason::FilteredBlockList);
    assert_eq!(result.rules.len(), 1);
    assert!(result.rules[0].ip.is_none());
}

#[tokio::test]
async fn blocked_service_rule_wins() {
    let coordinator = coordinator(Vec::new());
    let flags = ProtectionFlags { filtering_enabled: true, protection_enabled: true, ..Default::default() };
    let mut settings = settings(flags);
    settings.services_rules = vec![ServiceRules {
        service_name: Arc::from("X"),
        rules: vec![ServiceRule::new("cdn.x.com")],
    }];

    let result = coordinator.check_host("cdn.x.com", QType::A, &settings).await.unwrap();

    // `is_filtered` is true only for `FilteredBlockList` (§8 invariant); a
    // blocked-service match is still unambiguously a block by `reason`.
    assert!(!result.is_filtered);
    assert_eq!(result.reason, Reason::FilteredBlockedService);
    assert_eq!(result.service_name.as_deref(), Some("X"));
}
