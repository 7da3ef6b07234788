// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::lotus_json::{
    ApiDeadline, ApiVersion, DealProposal, DealState, DeadlineInfo, GpuUsage, JobId, MarketDeal,
    Message, MinerInfo, MinerPartition, SectorId, SectorInfo, SectorLog, SectorSet, SignedMessage,
    TokenAmount, WorkerInfo, WorkerJob, WorkerResources, WorkerStats,
};
use crate::rpc_api::{miner_api, state_api};
use crate::test_utils::{FakeMiner, FakeMinerActor, FakeNode};
use chrono::TimeZone as _;
use std::collections::BTreeMap;

const OWNER_KEY: &str = "f3owneraddressxxxxxxxxxx";
const WORKER_KEY: &str = "f3workeraddressyyyyyyyy";
const LOCAL_WALLET: &str = "f1localwalletaddress00001";

fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

fn sectors(n: u64) -> SectorSet {
    SectorSet::from_runs([0, n])
}

fn partition(all: u64, faulty: u64, recovering: u64, active: u64, live: u64) -> MinerPartition {
    MinerPartition {
        all_sectors: sectors(all),
        faulty_sectors: sectors(faulty),
        recovering_sectors: sectors(recovering),
        live_sectors: sectors(live),
        active_sectors: sectors(active),
    }
}

fn message(from: &str, nonce: u64) -> SignedMessage {
    SignedMessage {
        message: Message {
            to: "f01234".into(),
            from: from.into(),
            nonce,
            value: TokenAmount::from_atto(0),
            gas_limit: 54_000_000,
            gas_fee_cap: TokenAmount::from_atto(100_000),
            gas_premium: TokenAmount::from_atto(99_000),
            method: 5,
        },
    }
}

fn sector(id: u64, state: &str, deals: Vec<u64>, log: &[(&str, u64)]) -> SectorInfo {
    SectorInfo {
        sector_id: id,
        state: state.into(),
        deals,
        log: log
            .iter()
            .map(|(kind, timestamp)| SectorLog {
                kind: (*kind).into(),
                timestamp: *timestamp,
            })
            .collect(),
        verified_deal_weight: 0.into(),
    }
}

fn job(id: &str, sector: u64, task: &str, start: DateTime<Utc>) -> WorkerJob {
    let sector = SectorId {
        miner: 1234,
        number: sector,
    };
    WorkerJob {
        id: JobId {
            sector,
            id: id.into(),
        },
        sector,
        task: task.into(),
        run_wait: 0,
        start,
    }
}

fn node() -> FakeNode {
    let version = ApiVersion {
        version: "1.23.0+mainnet".into(),
        block_delay: 30,
    };
    FakeNode {
        version: Some(version),
        height: 3_452_100,
        wallets: BTreeMap::from([
            (OWNER_KEY.into(), TokenAmount::from_atto(2_000_000_000_000_000_000u64)),
            (WORKER_KEY.into(), TokenAmount::from_atto(500_000_000_000_000_000u64)),
            (LOCAL_WALLET.into(), TokenAmount::from_atto(0)),
        ]),
        account_keys: BTreeMap::from([
            ("f01000".into(), OWNER_KEY.into()),
            ("f01001".into(), WORKER_KEY.into()),
        ]),
        pending: vec![
            message(WORKER_KEY, 7),
            message(LOCAL_WALLET, 1),
            message("f1somebodyelse0000000000", 3),
        ],
        network_name: "mainnet".into(),
        network_version: 21,
        miners: BTreeMap::from([(
            "f01234".into(),
            FakeMinerActor {
                info: MinerInfo {
                    owner: "f01000".into(),
                    worker: "f01001".into(),
                    control_addresses: vec![],
                    sector_size: 34_359_738_368,
                },
                available_balance: TokenAmount::from_atto(1_000_000_000_000_000_000u64),
                proving_deadline: DeadlineInfo {
                    current_epoch: 1000,
                    period_start: 960,
                    index: 1,
                    open: 990,
                    close: 1050,
                    wpost_period_deadlines: 4,
                    wpost_challenge_window: 60,
                },
                deadlines: vec![
                    ApiDeadline::default(),
                    ApiDeadline {
                        post_submissions: sectors(1),
                        disputable_proof_count: 0,
                    },
                    ApiDeadline::default(),
                    ApiDeadline::default(),
                ],
                partitions: BTreeMap::from([
                    (1, vec![partition(4, 0, 0, 4, 4)]),
                    (
                        3,
                        vec![partition(10, 1, 0, 3, 5), partition(7, 0, 1, 2, 4)],
                    ),
                ]),
            },
        )]),
        deals: BTreeMap::from([(
            101,
            MarketDeal {
                proposal: DealProposal {
                    piece_size: 2048,
                    verified_deal: true,
                    start_epoch: 10_000,
                    end_epoch: 1_550_000,
                    storage_price_per_epoch: TokenAmount::from_atto(0),
                    provider_collateral: TokenAmount::from_atto(1000),
                    client_collateral: TokenAmount::from_atto(0),
                },
                state: DealState { slash_epoch: -1 },
            },
        )]),
        log: Default::default(),
    }
}

fn miner() -> FakeMiner {
    let stats = WorkerStats {
        info: WorkerInfo {
            hostname: "worker-01".into(),
            resources: WorkerResources {
                mem_physical: 274_877_906_944,
                mem_swap: 0,
                mem_reserved: 1_073_741_824,
                cpus: 64,
                gpus: vec!["GeForce RTX 3090".into()],
            },
        },
        enabled: true,
        mem_used_min: 100,
        mem_used_max: 200,
        gpu_used: GpuUsage::Flag(false),
        cpu_use: 12,
    };
    FakeMiner {
        actor_address: "f01234".into(),
        version: Some(ApiVersion {
            version: "1.23.0+mainnet".into(),
            block_delay: 30,
        }),
        worker_stats: BTreeMap::from([("uuid-1".into(), stats)]),
        worker_jobs: BTreeMap::from([
            (
                "uuid-1".into(),
                vec![job(
                    "job-1",
                    2,
                    "seal/v0/precommit/1",
                    started_at() - chrono::Duration::seconds(120),
                )],
            ),
            (
                "uuid-gone".into(),
                vec![job(
                    "job-2",
                    3,
                    "seal/v0/commit/2",
                    started_at() - chrono::Duration::seconds(60),
                )],
            ),
        ]),
        sectors: BTreeMap::from([
            (
                1,
                sector(
                    1,
                    "Proving",
                    vec![],
                    &[
                        ("event;sealing.SectorStartCC", 1_600_000_000),
                        ("event;sealing.SectorPacked", 1_600_000_100),
                        ("event;sealing.SectorFinalized", 1_600_009_000),
                    ],
                ),
            ),
            (
                2,
                sector(
                    2,
                    "PreCommit1",
                    vec![0, 101, 102],
                    &[
                        ("event;sealing.SectorStart", 1_700_000_000),
                        ("event;sealing.SectorPacked", 1_700_000_500),
                    ],
                ),
            ),
            (3, sector(3, "WaitDeals", vec![], &[])),
        ]),
        log: Default::default(),
    }
}

fn config() -> ExporterConfig {
    ExporterConfig {
        miner_host: Some("sealer-01".into()),
        ..Default::default()
    }
}

async fn scrape(
    node: &FakeNode,
    miner: &FakeMiner,
    config: ExporterConfig,
) -> (String, Result<(), ExporterError>) {
    let mut exposition = Exposition::new("lotus");
    let result = Exporter::new(node, miner, config, started_at())
        .collect(&mut exposition)
        .await;
    (exposition.render().unwrap(), result)
}

#[track_caller]
fn assert_lines(text: &str, lines: &[&str]) {
    for line in lines {
        assert!(
            text.lines().any(|it| it == *line),
            "missing `{line}` in:\n{text}"
        );
    }
}

#[tokio::test]
async fn full_scrape() {
    let (text, result) = scrape(&node(), &miner(), config()).await;
    result.unwrap();
    assert_lines(
        &text,
        &[
            r#"lotus_chain_height{miner_id="f01234",miner_host="sealer-01"} 3452100"#,
            r#"lotus_miner_info{miner_id="f01234",miner_host="sealer-01",version="1.23.0+mainnet",owner="f01000",owner_addr="f3owneraddressxxxxxxxxxx",worker="f01001",worker_addr="f3workeraddressyyyyyyyy",control0="f01001",control0_addr="f3workeraddressyyyyyyyy"} 1"#,
            r#"lotus_miner_info_sector_size{miner_id="f01234"} 34359738368"#,
            r#"lotus_info{miner_id="f01234",miner_host="sealer-01",version="1.23.0+mainnet",network="mainnet"} 21"#,
            r#"lotus_miner_worker_cpu{miner_id="f01234",miner_host="sealer-01",worker_host="worker-01"} 64"#,
            r#"lotus_miner_worker_gpu{miner_id="f01234",miner_host="sealer-01",worker_host="worker-01"} 1"#,
            r#"lotus_miner_worker_mem_vmem_used{miner_id="f01234",miner_host="sealer-01",worker_host="worker-01"} 200"#,
            r#"lotus_miner_deadline_info{miner_id="f01234",miner_host="sealer-01",current_idx="1",current_epoch="1000",current_open_epoch="990",wpost_period_deadlines="4",wpost_challenge_window="60"} 1"#,
        ],
    );
    assert!(text.ends_with("# EOF\n"));
}

#[tokio::test]
async fn wallet_balances_include_the_miner_actor() {
    let (text, _) = scrape(&node(), &miner(), config()).await;
    let balances = text
        .lines()
        .filter(|it| it.starts_with("lotus_wallet_balance{"))
        .collect::<Vec<_>>();
    assert_eq!(balances.len(), 4, "{text}");
    assert!(balances.iter().any(|it| it.contains(r#"short="f3own...xxxxx""#)));
    assert!(
        balances
            .iter()
            .any(|it| it.contains(r#"address="f01234",short="f01234""#))
    );
}

#[tokio::test]
async fn mpool_reports_local_messages_only() {
    let (text, _) = scrape(&node(), &miner(), config()).await;
    assert_lines(
        &text,
        &[
            r#"lotus_mpool_total{miner_id="f01234",miner_host="sealer-01"} 3"#,
            r#"lotus_mpool_local_total{miner_id="f01234",miner_host="sealer-01"} 2"#,
            r#"lotus_mpool_local_message{miner_id="f01234",miner_host="sealer-01",from="worker",to="f01234",nonce="7",value="0",gaslimit="54000000",gasfeecap="100000",gaspremium="99000",method="5"} 1"#,
            r#"lotus_mpool_local_message{miner_id="f01234",miner_host="sealer-01",from="f1loc...00001",to="f01234",nonce="1",value="0",gaslimit="54000000",gasfeecap="100000",gaspremium="99000",method="5"} 1"#,
        ],
    );
    assert!(!text.contains(r#"nonce="3""#), "{text}");
}

#[tokio::test]
async fn jobs_are_timed_from_scrape_start() {
    let (text, _) = scrape(&node(), &miner(), config()).await;
    assert_lines(
        &text,
        &[
            r#"lotus_miner_worker_job{miner_id="f01234",miner_host="sealer-01",job_id="job-1",worker_host="worker-01",task="seal/v0/precommit/1",sector_id="2",job_start_time="2026-01-01T11:58:00+00:00",run_wait="0"} 120"#,
            r#"lotus_miner_worker_job{miner_id="f01234",miner_host="sealer-01",job_id="job-2",worker_host="unknown",task="seal/v0/commit/2",sector_id="3",job_start_time="2026-01-01T11:59:00+00:00",run_wait="0"} 60"#,
        ],
    );
}

#[tokio::test]
async fn sector_states_events_and_deals() {
    let (text, _) = scrape(&node(), &miner(), config()).await;
    assert_lines(
        &text,
        &[
            r#"lotus_miner_sector_state{miner_id="f01234",miner_host="sealer-01",sector_id="1",state="Proving",pledged="1",deals="0",verified_weight="0"} 1"#,
            r#"lotus_miner_sector_state{miner_id="f01234",miner_host="sealer-01",sector_id="2",state="PreCommit1",pledged="0",deals="2",verified_weight="0"} 1"#,
            r#"lotus_miner_sector_state{miner_id="f01234",miner_host="sealer-01",sector_id="3",state="WaitDeals",pledged="0",deals="0",verified_weight="0"} 1"#,
            r#"lotus_miner_sector_event{miner_id="f01234",miner_host="sealer-01",sector_id="1",event_type="creation"} 1600000000"#,
            r#"lotus_miner_sector_event{miner_id="f01234",miner_host="sealer-01",sector_id="1",event_type="finalized"} 1600009000"#,
            r#"lotus_miner_sector_event{miner_id="f01234",miner_host="sealer-01",sector_id="2",event_type="packed"} 1700000500"#,
            r#"lotus_miner_sector_sealing_deals_info{miner_id="f01234",miner_host="sealer-01",sector_id="2",deal_id="101",deal_is_verified="true",deal_slash_epoch="-1",deal_price_per_epoch="0",deal_provider_collateral="1000",deal_client_collateral="0",deal_size="2048",deal_start_epoch="10000",deal_end_epoch="1550000"} 1"#,
            r#"lotus_miner_sector_sealing_deals_info{miner_id="f01234",miner_host="sealer-01",sector_id="2",deal_id="102",deal_is_verified="unknown",deal_slash_epoch="unknown",deal_price_per_epoch="unknown",deal_provider_collateral="unknown",deal_client_collateral="unknown",deal_size="unknown",deal_start_epoch="unknown",deal_end_epoch="unknown"} 1"#,
        ],
    );
    // a sector without a log has no events
    assert!(!text.contains(r#"sector_id="3",event_type"#), "{text}");
    // each deal is reported once
    assert_eq!(text.matches(r#"deal_id="101""#).count(), 1);
}

#[tokio::test]
async fn deadlines_in_rotation_order() {
    let (text, _) = scrape(&node(), &miner(), config()).await;
    assert_lines(
        &text,
        &[
            r#"lotus_miner_deadline_active_start{miner_id="f01234",miner_host="sealer-01",index="1"} -300"#,
            r#"lotus_miner_deadline_active_start{miner_id="f01234",miner_host="sealer-01",index="3"} 3300"#,
            r#"lotus_miner_deadline_active_partitions_proven{miner_id="f01234",miner_host="sealer-01",index="1"} 1"#,
            r#"lotus_miner_deadline_active_partitions{miner_id="f01234",miner_host="sealer-01",index="3"} 2"#,
            r#"lotus_miner_deadline_active_sectors_all{miner_id="f01234",miner_host="sealer-01",index="3"} 7"#,
            r#"lotus_miner_deadline_active_sectors_faulty{miner_id="f01234",miner_host="sealer-01",index="3"} 1"#,
            r#"lotus_miner_deadline_active_sectors_recovering{miner_id="f01234",miner_host="sealer-01",index="3"} 1"#,
            r#"lotus_miner_deadline_active_sectors_active{miner_id="f01234",miner_host="sealer-01",index="3"} 5"#,
            r#"lotus_miner_deadline_active_sectors_live{miner_id="f01234",miner_host="sealer-01",index="3"} 9"#,
        ],
    );
    let start_rows = text
        .lines()
        .filter(|it| it.starts_with("lotus_miner_deadline_active_start{"))
        .collect::<Vec<_>>();
    assert_eq!(start_rows.len(), 2);
    assert!(start_rows[0].contains(r#"index="1""#));
}

#[tokio::test]
async fn malformed_partition_keeps_earlier_deadlines() {
    let mut node = node();
    let actor = node.miners.get_mut("f01234").unwrap();
    actor
        .partitions
        .get_mut(&3)
        .unwrap()
        .push(MinerPartition {
            live_sectors: SectorSet::from_runs([0, 2, 0, 1]),
            ..partition(1, 0, 0, 1, 1)
        });

    let (text, result) = scrape(&node, &miner(), config()).await;
    assert!(matches!(result, Err(ExporterError::MalformedSet(_))));
    assert!(text.contains(r#"lotus_miner_deadline_active_start{miner_id="f01234",miner_host="sealer-01",index="1"} -300"#));
    assert!(!text.contains(r#"index="3""#), "{text}");
    assert!(text.contains("lotus_chain_height{"));
}

#[tokio::test]
async fn unreachable_node_stops_the_scrape() {
    let mut node = node();
    node.log.fail_on(state_api::STATE_MINER_PARTITIONS);
    let (text, result) = scrape(&node, &miner(), config()).await;
    assert!(result.unwrap_err().is_unavailable());
    assert!(text.contains("lotus_miner_deadline_info{"));
    assert!(!text.contains("lotus_miner_deadline_active_start"));
}

#[tokio::test]
async fn failing_sector_status_stops_before_deadlines() {
    let mut miner = miner();
    miner.log.fail_on(miner_api::SECTORS_STATUS);
    let node = node();
    let (text, result) = scrape(&node, &miner, config()).await;
    assert!(result.is_err());
    assert!(text.contains("lotus_miner_worker_job{"));
    assert!(!text.contains("lotus_miner_sector_state"));
    assert!(
        !node
            .log
            .calls()
            .iter()
            .any(|it| it.starts_with(state_api::STATE_MINER_PROVING_DEADLINE))
    );
}

#[tokio::test]
async fn unknown_miner_renders_nothing() {
    let mut miner = miner();
    miner.log.fail_on(miner_api::ACTOR_ADDRESS);
    let (text, result) = scrape(&node(), &miner, config()).await;
    assert!(result.is_err());
    assert_eq!(text, "# EOF\n");
}

#[tokio::test]
async fn disabled_sections_are_not_fetched() {
    let node = node();
    let miner = miner();
    let config = ExporterConfig {
        collectors: Collectors {
            chain: true,
            ..serde_json::from_value(serde_json::json!({
                "chain": false, "wallets": false, "miner_info": false, "daemon": false,
                "mpool": false, "workers": false, "jobs": false, "sectors": false,
                "deadlines": false
            }))
            .unwrap()
        },
        ..config()
    };
    let (text, result) = scrape(&node, &miner, config).await;
    result.unwrap();
    assert_eq!(node.log.calls(), ["Filecoin.ChainHead()"]);
    assert_eq!(miner.log.calls(), ["Filecoin.ActorAddress()"]);
    assert!(text.starts_with("# HELP lotus_chain_height"), "{text}");
}

#[test]
fn short_addresses() {
    assert_eq!(short_address("f3owneraddressxxxxxxxxxx"), "f3own...xxxxx");
    assert_eq!(short_address("f01234"), "f01234");
}
