// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    lotus_exporter::exporter_main(std::env::args_os()).await
}
