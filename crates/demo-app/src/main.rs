//! Scripted demo for the softkey engine.
//!
//! Replays a chosen signal scenario through the full stack (watcher →
//! bridge) and prints every channel message the host would receive.

use anyhow::{Result, bail};
use softkey::{Diagnostics, KeyboardWatcher, ScriptedSource};
use softkey_bridge::{ChannelSink, handle_call};
use softkey_config::SoftkeyConfig;

mod scenarios;
use scenarios::ScenarioKind;

fn main() -> Result<()> {
    env_logger::init();

    let config = SoftkeyConfig::load();
    let density = config.metrics.density_override.unwrap_or(2.0);

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "open-close".to_string());
    let Some(scenario) = ScenarioKind::from_name(&name) else {
        bail!(
            "unknown scenario {:?}; available: {}",
            name,
            ScenarioKind::names().join(", ")
        );
    };

    log::info!("running scenario {scenario:?} at density {density}");

    let diag = Diagnostics::with_enabled(config.diagnostics.enabled);
    // Hosts toggle diagnostics through the same control call they would
    // send over the method channel.
    if std::env::args().any(|arg| arg == "--verbose") {
        handle_call("startLogging", &diag)?;
    }

    let sink = ChannelSink::new(|message| match &message.arguments {
        Some(args) => println!("{} {}", message.method, args),
        None => println!("{}", message.method),
    });

    let mut kb = KeyboardWatcher::new(ScriptedSource::new(density), Box::new(sink), diag);
    scenario.run(&mut kb);

    log::info!(
        "final state: {:?}, height {} units",
        kb.state(),
        kb.metrics().height_units
    );
    Ok(())
}
