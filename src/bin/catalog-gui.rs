#![cfg(feature = "gui")]
//! Desktop grid entrypoint.

fn main() -> anyhow::Result<()> {
    catalog::run_gui().map_err(|err| anyhow::anyhow!("catalog gui failed: {}", err))
}
