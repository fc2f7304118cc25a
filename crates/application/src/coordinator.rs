use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use dnsfilter_domain::{
    FilterError, FilterSource, MatchResult, ProtectionFlags, QType, RewriteEntry, RewriteTable,
    Settings,
};

use crate::chain::HostCheckerChain;
use crate::checkers::{
    reputation::ReputationGate, BlockedServicesChecker, ReputationCheckerAdapter,
    RuleEngineChecker, SafeSearchCheckerAdapter, SystemHostsChecker,
};
use crate::engine::{self, EngineSwap, RuleStoragePair};
use crate::ports::{AdminRegistrar, HostsContainer, ReputationChecker, Resolver, RuleListCompiler};
use crate::reload_queue::ReloadQueue;
use crate::rewrite_resolver::RewriteResolver;

/// Snapshot returned by `GetConfig` (§4.1): the coordinator's own
/// admin-mutable defaults, not a per-query `Settings`.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub enabled: bool,
    pub flags: ProtectionFlags,
}

struct ConfigState {
    flags: ProtectionFlags,
    rewrites: RewriteTable,
}

type ReloadRequest = (Vec<FilterSource>, Vec<FilterSource>);

/// The top-level object described in §4.1: owns configuration, the engine,
/// the rewrite table, the checker chain and the async reload queue.
pub struct FilterCoordinator {
    enabled: AtomicBool,
    config: RwLock<ConfigState>,
    engine: Arc<EngineSwap>,
    chain: HostCheckerChain,
    compiler: Arc<dyn RuleListCompiler>,
    reload_queue: Arc<ReloadQueue<ReloadRequest>>,
    admin: Option<Arc<dyn AdminRegistrar>>,
}

impl FilterCoordinator {
    /// Wires the injected ports into the fixed `HostCheckerChain` (§4.1),
    /// mirroring the teacher's composition-root style of assembling
    /// trait-object ports into use-cases at construction time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        compiler: Arc<dyn RuleListCompiler>,
        hosts_container: Arc<dyn HostsContainer>,
        safe_browsing: Arc<dyn ReputationChecker>,
        parental: Arc<dyn ReputationChecker>,
        safe_search_checker: Arc<dyn ReputationChecker>,
        resolver: Arc<dyn Resolver>,
        initial_rewrites: Vec<RewriteEntry>,
        initial_flags: ProtectionFlags,
        admin: Option<Arc<dyn AdminRegistrar>>,
    ) -> Arc<Self> {
        let engine = Arc::new(EngineSwap::new());

        let chain = HostCheckerChain::new()
            .with_checker("sys_hosts", Arc::new(SystemHostsChecker::new(hosts_container)))
            .with_checker("rule_engine", Arc::new(RuleEngineChecker::new(Arc::clone(&engine))))
            .with_checker("blocked_services", Arc::new(BlockedServicesChecker))
            .with_checker(
                "safe_browsing",
                Arc::new(ReputationCheckerAdapter::new(ReputationGate::SafeBrowsing, safe_browsing)),
            )
            .with_checker(
                "parental",
                Arc::new(ReputationCheckerAdapter::new(ReputationGate::Parental, parental)),
            )
            .with_checker(
                "safe_search",
                Arc::new(SafeSearchCheckerAdapter::new(safe_search_checker, resolver)),
            );

        Arc::new(Self {
            enabled: AtomicBool::new(true),
            config: RwLock::new(ConfigState {
                flags: initial_flags,
                rewrites: RewriteTable::new(initial_rewrites),
            }),
            engine,
            chain,
            compiler,
            reload_queue: ReloadQueue::new(),
            admin,
        })
    }

    /// `CheckHostRules` (§4.1): rule-engine match only, bypassing rewrites
    /// and the reputation-based checkers entirely.
    pub fn check_host_rules(
        &self,
        host: &str,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        let host = host.to_ascii_lowercase();
        tracing::debug!(host = %host, ?qtype, "check_host_rules: entry");
        if !settings.flags.filtering_enabled {
            return Ok(MatchResult::not_found());
        }
        let result = engine::match_host(&self.engine, &host, &settings.client_tags, qtype, settings)?;
        tracing::debug!(host = %host, reason = %result.reason, "check_host_rules: exit");
        Ok(result)
    }

    /// `CheckHost` (§4.1): legacy-rewrite pre-pass, then the fixed checker
    /// chain (§4.2).
    pub async fn check_host(
        &self,
        host: &str,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        if host.is_empty() {
            return Ok(MatchResult::not_found());
        }
        let host = host.to_ascii_lowercase();
        tracing::debug!(host = %host, ?qtype, "check_host: entry");

        if settings.flags.filtering_enabled {
            let rewrite_result = {
                let config = self.config.read().unwrap_or_else(|e| e.into_inner());
                RewriteResolver::process_rewrites(&config.rewrites, &host, qtype)
            };
            if rewrite_result.reason == dnsfilter_domain::Reason::Rewritten {
                tracing::debug!(host = %host, reason = %rewrite_result.reason, "check_host: exit (rewrite)");
                return Ok(rewrite_result);
            }
        }

        let result = self
            .chain
            .check(&host, &settings.client_tags, qtype, settings)
            .await?;
        tracing::debug!(host = %host, reason = %result.reason, "check_host: exit (chain)");
        Ok(result)
    }

    /// `SetEnabled` (§4.1).
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// `SetFilters` (§4.1). `asynchronous = false` compiles inline and
    /// returns any build error with the current engine left untouched;
    /// `asynchronous = true` coalesces into the reload queue and always
    /// succeeds immediately.
    pub async fn set_filters(
        &self,
        block: Vec<FilterSource>,
        allow: Vec<FilterSource>,
        asynchronous: bool,
    ) -> Result<(), FilterError> {
        if asynchronous {
            self.reload_queue.publish((block, allow)).await;
            Ok(())
        } else {
            self.init_filtering(block, allow).await
        }
    }

    /// `initFiltering` (§4.3): compiles both rule storages off the calling
    /// thread, then swaps them in under the engine write lock for just the
    /// swap itself.
    async fn init_filtering(
        &self,
        block: Vec<FilterSource>,
        allow: Vec<FilterSource>,
    ) -> Result<(), FilterError> {
        let compiler = Arc::clone(&self.compiler);
        let (block_list, allow_list) = tokio::task::spawn_blocking(move || {
            let block_list = compiler.compile(&block)?;
            let allow_list = compiler.compile(&allow)?;
            Ok::<_, FilterError>((block_list, allow_list))
        })
        .await
        .map_err(|e| FilterError::ConfigBuild(e.to_string()))??;

        self.engine.replace(RuleStoragePair {
            block: block_list,
            allow: allow_list,
        });
        tracing::info!("rule storage replaced");
        Ok(())
    }

    /// `GetConfig` (§4.1): snapshot of current flags under the
    /// configuration read lock.
    pub fn get_config(&self) -> CoordinatorConfig {
        let config = self.config.read().unwrap_or_else(|e| e.into_inner());
        CoordinatorConfig {
            enabled: self.enabled.load(Ordering::Relaxed),
            flags: config.flags,
        }
    }

    /// `WriteDiskConfig` (§4.1): deep-copies rewrites into `out`.
    pub fn write_disk_config(&self, out: &mut Vec<RewriteEntry>) {
        let config = self.config.read().unwrap_or_else(|e| e.into_inner());
        out.extend(config.rewrites.entries().iter().cloned());
    }

    /// Admin surface for mutating rewrites (§4.1 lifecycle note:
    /// "RewriteEntries ... mutated only via admin surface under the
    /// configuration lock").
    pub fn set_rewrites(&self, entries: Vec<RewriteEntry>) {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        config.rewrites.set_entries(entries);
    }

    pub fn set_flags(&self, flags: ProtectionFlags) {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        config.flags = flags;
    }

    /// `Start` (§4.1): spawns the reload worker and registers admin handlers
    /// if configured.
    pub fn start(self: &Arc<Self>) {
        tracing::info!("starting filter coordinator");
        let coordinator = Arc::clone(self);
        Arc::clone(&self.reload_queue).start(move |(block, allow)| {
            let coordinator = Arc::clone(&coordinator);
            async move {
                match coordinator.init_filtering(block, allow).await {
                    Ok(()) => tracing::info!("reload worker: rule storage updated"),
                    Err(e) => tracing::error!(error = %e, "reload worker: failed to build rule storage"),
                }
            }
        });

        if let Some(admin) = &self.admin {
            admin.register(Arc::clone(self));
        }
    }

    /// `Close` (§4.1): releases compiled engines under the engine write
    /// lock. Does not stop the reload worker — it is simply dropped with
    /// the runtime.
    pub fn close(&self) {
        self.engine.clear();
        tracing::info!("filter coordinator closed");
    }
}
