use std::path::PathBuf;

use anyhow::{Context, Result};
use dmgboy::{encode_pgm, parse_joypad, run_rom, RunOptions};

const USAGE: &str = "Usage: dmgboy <rom_path> <out_pgm_path> [frames]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let out_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let frames: u32 = match args.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("invalid frame count '{frames}'"))?,
        None => 120,
    };
    let joypad = match std::env::var("DMGBOY_JOYPAD") {
        Ok(value) => parse_joypad(&value)?,
        Err(_) => 0xFF,
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;
    log::info!("Loaded '{}' ({} bytes)", rom_path.display(), rom.len());

    let options = RunOptions::builder().frames(frames).joypad(joypad).build();
    let result = run_rom(&rom, &options)?;

    if !result.serial.is_empty() {
        log::info!("Serial output: {}", String::from_utf8_lossy(&result.serial));
    }

    std::fs::write(&out_path, encode_pgm(&result.frame))
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;
    println!(
        "Wrote {}x{} frame after {} frames to '{}'",
        dmgboy_core::SCREEN_WIDTH,
        dmgboy_core::SCREEN_HEIGHT,
        frames,
        out_path.display()
    );
    Ok(())
}
