use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use metharizon_core::SimConfig;
use metharizon_render::MetharizonRenderPlugin;
use metharizon_sim::{SimulationPlugin, SimulationState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metharizon", about = "Interactive rigid-sphere sandbox")]
struct Args {
    /// JSON file with a full or partial SimConfig
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<SimConfig>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Metharizon".into(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.04)))
        .insert_resource(SimulationState::new(config)?)
        .add_plugins(SimulationPlugin)
        .add_plugins(MetharizonRenderPlugin)
        .run();

    if let AppExit::Error(code) = exit {
        anyhow::bail!("app exited with code {code}");
    }
    Ok(())
}
