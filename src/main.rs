mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::Cli;
use flatrast::{Command, Engine};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.render_config();
    config.validate()?;

    let mut engine = Engine::new(config);
    engine
        .load_scene(&cli.scene)
        .with_context(|| format!("could not load scene {}", cli.scene.display()))?;

    for command in Command::parse_keys(&cli.commands) {
        engine.handle_command(command);
    }

    let stats = engine.render();
    info!(
        "{} triangles drawn, {} culled, {} pixels",
        stats.drawn, stats.culled, stats.pixels
    );

    let out = engine.output_path(&cli.out_dir);
    engine
        .save_png(&out)
        .with_context(|| format!("could not write {}", out.display()))?;
    println!("{}", out.display());

    Ok(())
}
