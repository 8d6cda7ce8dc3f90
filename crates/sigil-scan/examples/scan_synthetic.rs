//! Scan a synthetically rendered sigil and print per-frame JSON reports.
//!
//! Usage: `cargo run --example scan_synthetic -- [id] [out.png]`
//!
//! Renders the marker in all three physical rotations, feeds a few frames
//! through the scanner until the id locks, and optionally dumps the
//! canonical patch as a PNG.

use std::time::{Duration, Instant};

use sigil_scan::render::{render_sigil_patch, RenderLevels};
use sigil_scan::{encode_id, PatchSampler, Rotation, ScanParams, SigilScanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = sigil_scan::core::init_with_level(log::LevelFilter::Debug);

    let mut args = std::env::args().skip(1);
    let id: u16 = args.next().as_deref().unwrap_or("42").parse()?;
    let png_path = args.next();

    let mut scanner = SigilScanner::new(ScanParams::default())?;
    let code = encode_id(id)?;
    let base = Instant::now();

    let mut frame = 0u64;
    for rotation in Rotation::ALL {
        let patch = render_sigil_patch(
            scanner.layout(),
            scanner.rotation_maps(),
            code,
            rotation,
            RenderLevels::default(),
        );
        let sampler = PatchSampler::new(patch.view())?;
        let report = scanner.process_frame(&sampler, base + Duration::from_millis(frame * 33));
        frame += 1;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(path) = png_path {
        let patch = render_sigil_patch(
            scanner.layout(),
            scanner.rotation_maps(),
            code,
            Rotation::Deg0,
            RenderLevels::default(),
        );
        let img = image::GrayImage::from_raw(
            patch.width as u32,
            patch.height as u32,
            patch.data.clone(),
        )
        .ok_or("patch buffer size mismatch")?;
        img.save(&path)?;
        eprintln!("wrote {path}");
    }

    Ok(())
}
