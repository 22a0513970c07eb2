//! End-to-end provisioning flow against in-process mock backends.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use gantry_api::dns::{DnsRecord, RecordType};
use gantry_core::{
    CommandChannel, CommandPoll, CommandStatus, CoreError, DnsPublisher, Provisioner,
    ProvisionerConfig, RoutingBackend, RuleSummary, SiteRequest, TargetSpec,
};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

// ── Mock backends ───────────────────────────────────────────────────

#[derive(Default)]
struct MockCommands {
    dispatched: Mutex<Vec<String>>,
    /// Scripted poll results, consumed front to back. When exhausted,
    /// every further poll reports pending.
    polls: Mutex<VecDeque<CommandPoll>>,
}

impl MockCommands {
    fn scripted(polls: Vec<CommandPoll>) -> Self {
        Self {
            dispatched: Mutex::new(Vec::new()),
            polls: Mutex::new(polls.into()),
        }
    }
}

impl CommandChannel for MockCommands {
    async fn dispatch(
        &self,
        _host_id: &str,
        command: &str,
        _timeout: Duration,
    ) -> Result<String, gantry_api::Error> {
        self.dispatched.lock().unwrap().push(command.to_owned());
        Ok("inv-1".to_owned())
    }

    async fn poll(
        &self,
        _host_id: &str,
        _invocation_id: &str,
    ) -> Result<CommandPoll, gantry_api::Error> {
        let next = self.polls.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(CommandPoll::pending))
    }
}

struct MockRouting {
    rules: Mutex<Vec<RuleSummary>>,
    created_targets: Mutex<Vec<TargetSpec>>,
    registrations: Mutex<Vec<(String, String, u16)>>,
    fail_register: bool,
    /// Number of `create_rule` calls to reject with a priority conflict.
    /// Each rejection also inserts a rival rule at the contested
    /// priority, as a concurrent provisioner would.
    conflicts: AtomicU32,
}

impl MockRouting {
    fn with_rules(priorities: &[u32]) -> Self {
        let mut rules = vec![RuleSummary {
            priority: 0,
            is_default: true,
            host_pattern: None,
            target_id: None,
        }];
        rules.extend(priorities.iter().map(|&priority| RuleSummary {
            priority,
            is_default: false,
            host_pattern: None,
            target_id: None,
        }));
        Self {
            rules: Mutex::new(rules),
            created_targets: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
            fail_register: false,
            conflicts: AtomicU32::new(0),
        }
    }
}

impl RoutingBackend for MockRouting {
    async fn create_target(&self, spec: &TargetSpec) -> Result<String, gantry_api::Error> {
        self.created_targets.lock().unwrap().push(spec.clone());
        Ok(format!("tg-{}", spec.name))
    }

    async fn register_host(
        &self,
        target_id: &str,
        host_id: &str,
        port: u16,
    ) -> Result<(), gantry_api::Error> {
        if self.fail_register {
            return Err(gantry_api::Error::Api {
                message: "host unreachable".to_owned(),
                code: None,
                status: 500,
            });
        }
        self.registrations
            .lock()
            .unwrap()
            .push((target_id.to_owned(), host_id.to_owned(), port));
        Ok(())
    }

    async fn list_rules(&self, _listener_id: &str) -> Result<Vec<RuleSummary>, gantry_api::Error> {
        Ok(self.rules.lock().unwrap().clone())
    }

    async fn create_rule(
        &self,
        _listener_id: &str,
        priority: u32,
        host_pattern: &str,
        target_id: &str,
    ) -> Result<(), gantry_api::Error> {
        if self
            .conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            self.rules.lock().unwrap().push(RuleSummary {
                priority,
                is_default: false,
                host_pattern: None,
                target_id: None,
            });
            return Err(gantry_api::Error::PriorityConflict { priority });
        }
        self.rules.lock().unwrap().push(RuleSummary {
            priority,
            is_default: false,
            host_pattern: Some(host_pattern.to_owned()),
            target_id: Some(target_id.to_owned()),
        });
        Ok(())
    }
}

struct MockDns {
    tx: mpsc::UnboundedSender<DnsRecord>,
    fail: bool,
}

impl MockDns {
    fn new() -> (Self, mpsc::UnboundedReceiver<DnsRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail: false }, rx)
    }

    fn failing() -> (Self, mpsc::UnboundedReceiver<DnsRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail: true }, rx)
    }
}

impl DnsPublisher for MockDns {
    async fn publish(&self, record: DnsRecord) -> Result<(), gantry_api::Error> {
        let _ = self.tx.send(record);
        if self.fail {
            return Err(gantry_api::Error::DnsRejected {
                message: "zone locked".to_owned(),
            });
        }
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn test_config() -> ProvisionerConfig {
    ProvisionerConfig::new(
        "host-1",
        "lsn-1",
        "lb.example.net",
        "example.dev",
        "/opt/gantry/site-setup.sh",
    )
}

fn succeeding_commands() -> MockCommands {
    MockCommands::scripted(vec![
        CommandPoll::pending(),
        CommandPoll {
            status: CommandStatus::Success,
            stdout: Some("done".to_owned()),
            stderr: None,
        },
    ])
}

async fn expect_record(rx: &mut mpsc::UnboundedReceiver<DnsRecord>) -> DnsRecord {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("dns publish task never ran")
        .expect("dns channel closed without a record")
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn provisions_a_qa_site_end_to_end() {
    let (dns, mut rx) = MockDns::new();
    let provisioner = Provisioner::new(
        test_config(),
        succeeding_commands(),
        MockRouting::with_rules(&[110, 120]),
        dns,
    );

    let site = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap();

    assert_eq!(site.site_name, "qa5");
    assert_eq!(site.port, 8005);
    assert_eq!(site.url, "https://qa5.example.dev");
    assert_eq!(site.target_id, "tg-qa5-tg");
    assert_eq!(site.priority, 130);

    let record = expect_record(&mut rx).await;
    assert_eq!(record.name, "qa5.example.dev");
    assert_eq!(record.record_type, RecordType::Cname);
    assert_eq!(record.content, "lb.example.net");
    assert_eq!(record.ttl, 300);
}

#[tokio::test(start_paused = true)]
async fn setup_command_carries_name_and_port() {
    let (dns, _rx) = MockDns::new();
    let commands = MockCommands::scripted(vec![CommandPoll {
        status: CommandStatus::Success,
        stdout: None,
        stderr: None,
    }]);
    let provisioner = Provisioner::new(
        test_config(),
        commands,
        MockRouting::with_rules(&[]),
        dns,
    );

    provisioner
        .provision(SiteRequest::new("qa3"))
        .await
        .unwrap();

    let dispatched = provisioner.commands().dispatched.lock().unwrap().clone();
    assert_eq!(dispatched, vec!["/opt/gantry/site-setup.sh qa3 8003"]);
}

#[tokio::test(start_paused = true)]
async fn registers_host_on_the_derived_port() {
    let (dns, _rx) = MockDns::new();
    let routing = MockRouting::with_rules(&[]);
    let provisioner = Provisioner::new(test_config(), succeeding_commands(), routing, dns);

    provisioner
        .provision(SiteRequest::new("qa7"))
        .await
        .unwrap();

    let registrations = provisioner.routing().registrations.lock().unwrap().clone();
    assert_eq!(
        registrations,
        vec![("tg-qa7-tg".to_owned(), "host-1".to_owned(), 8007)]
    );
}

#[tokio::test(start_paused = true)]
async fn empty_listener_starts_at_the_priority_step() {
    let (dns, _rx) = MockDns::new();
    let provisioner = Provisioner::new(
        test_config(),
        succeeding_commands(),
        MockRouting::with_rules(&[]),
        dns,
    );

    let site = provisioner
        .provision(SiteRequest::new("demo"))
        .await
        .unwrap();

    assert_eq!(site.priority, 10);
    assert_eq!(site.port, 8010);
}

#[tokio::test(start_paused = true)]
async fn pending_command_times_out_after_the_poll_budget() {
    let (dns, _rx) = MockDns::new();
    let provisioner = Provisioner::new(
        test_config(),
        MockCommands::default(),
        MockRouting::with_rules(&[]),
        dns,
    );

    let err = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap_err();

    match err {
        CoreError::CommandTimeout {
            attempts,
            waited_secs,
        } => {
            assert_eq!(attempts, 30);
            assert_eq!(waited_secs, 300);
        }
        other => panic!("expected CommandTimeout, got {other:?}"),
    }
    // Nothing past the command step may run.
    assert!(provisioner.routing().created_targets.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_command_surfaces_stderr() {
    let (dns, _rx) = MockDns::new();
    let commands = MockCommands::scripted(vec![CommandPoll {
        status: CommandStatus::Failed,
        stdout: None,
        stderr: Some("disk full".to_owned()),
    }]);
    let provisioner = Provisioner::new(
        test_config(),
        commands,
        MockRouting::with_rules(&[]),
        dns,
    );

    let err = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap_err();

    match err {
        CoreError::CommandFailed { host_id, stderr } => {
            assert_eq!(host_id, "host-1");
            assert_eq!(stderr, "disk full");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn register_failure_leaves_the_target_in_place() {
    let (dns, mut rx) = MockDns::new();
    let mut routing = MockRouting::with_rules(&[]);
    routing.fail_register = true;
    let provisioner = Provisioner::new(test_config(), succeeding_commands(), routing, dns);

    let err = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap_err();

    match err {
        CoreError::HostRegisterFailed { target_id, .. } => {
            assert_eq!(target_id, "tg-qa5-tg");
        }
        other => panic!("expected HostRegisterFailed, got {other:?}"),
    }
    // The target was created and is not cleaned up.
    assert_eq!(provisioner.routing().created_targets.lock().unwrap().len(), 1);
    // No rule was installed and no DNS record was published.
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn lost_priority_race_reallocates_and_succeeds() {
    let (dns, _rx) = MockDns::new();
    let routing = MockRouting::with_rules(&[110, 120]);
    routing.conflicts.store(1, Ordering::SeqCst);
    let provisioner = Provisioner::new(test_config(), succeeding_commands(), routing, dns);

    let site = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap();

    // First attempt at 130 lost to a rival; the re-read sees the
    // rival's rule and lands at 140.
    assert_eq!(site.priority, 140);
}

#[tokio::test(start_paused = true)]
async fn persistent_contention_gives_up() {
    let (dns, _rx) = MockDns::new();
    let routing = MockRouting::with_rules(&[100]);
    routing.conflicts.store(u32::MAX, Ordering::SeqCst);
    let provisioner = Provisioner::new(test_config(), succeeding_commands(), routing, dns);

    let err = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap_err();

    match err {
        CoreError::PriorityContention {
            listener_id,
            attempts,
        } => {
            assert_eq!(listener_id, "lsn-1");
            assert_eq!(attempts, 4);
        }
        other => panic!("expected PriorityContention, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn dns_failure_does_not_fail_provisioning() {
    let (dns, mut rx) = MockDns::failing();
    let provisioner = Provisioner::new(
        test_config(),
        succeeding_commands(),
        MockRouting::with_rules(&[]),
        dns,
    );

    let site = provisioner
        .provision(SiteRequest::new("qa5"))
        .await
        .unwrap();

    assert_eq!(site.port, 8005);
    // The publish was attempted even though it failed.
    let record = expect_record(&mut rx).await;
    assert_eq!(record.name, "qa5.example.dev");
}

#[tokio::test(start_paused = true)]
async fn settle_dns_waits_for_the_publish_task() {
    let (dns, mut rx) = MockDns::new();
    let provisioner = Provisioner::new(
        test_config(),
        succeeding_commands(),
        MockRouting::with_rules(&[]),
        dns,
    );

    provisioner
        .provision(SiteRequest::new("qa9"))
        .await
        .unwrap();
    provisioner.settle_dns().await;

    let record = rx.try_recv().unwrap();
    assert_eq!(record.name, "qa9.example.dev");
}

#[tokio::test(start_paused = true)]
async fn invalid_name_is_rejected_before_any_backend_call() {
    let (dns, _rx) = MockDns::new();
    let provisioner = Provisioner::new(
        test_config(),
        MockCommands::default(),
        MockRouting::with_rules(&[]),
        dns,
    );

    let err = provisioner
        .provision(SiteRequest::new("Bad Name"))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::InvalidSiteName { .. }));
    assert!(provisioner.commands().dispatched.lock().unwrap().is_empty());
}
