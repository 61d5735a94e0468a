use anyhow::{Context, Result};
use clap::Parser;
use delvegen_core::r#gen::{Marker, PlacedMarker, TileKind};
use delvegen_core::{FloorConfig, Loc, RandSource, TileFloor, generate_floor};
use serde::Serialize;
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation seed; a fresh entropy seed is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Grid width in cells
    #[arg(long, default_value_t = 4)]
    cells_x: i32,
    /// Grid height in cells
    #[arg(long, default_value_t = 3)]
    cells_y: i32,
    /// Write the generated floor as JSON to this path
    #[arg(long)]
    json: Option<String>,
}

#[derive(Serialize)]
struct FloorExport {
    seed: u64,
    fingerprint: u64,
    width: usize,
    height: usize,
    rooms: Vec<delvegen_core::Rect>,
    markers: Vec<PlacedMarker>,
    tiles: Vec<TileKind>,
}

fn render(floor: &TileFloor) -> String {
    let mut out = String::with_capacity((floor.width() + 1) * floor.height());
    for y in 0..floor.height() as i32 {
        for x in 0..floor.width() as i32 {
            let loc = Loc::new(x, y);
            let glyph = match floor.markers().find(|placed| placed.loc == loc) {
                Some(placed) => match placed.marker {
                    Marker::Entrance => '<',
                    Marker::Exit => '>',
                    Marker::Treasure => '$',
                },
                None => match floor.tile_at(loc) {
                    TileKind::Wall => '#',
                    TileKind::Floor => '.',
                },
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| RandSource::from_entropy().first_seed());
    let config = FloorConfig {
        cells: Loc::new(args.cells_x, args.cells_y),
        ..FloorConfig::default()
    };
    let floor = generate_floor(seed, &config);

    print!("{}", render(&floor));
    println!("Seed: {seed}");
    println!("Fingerprint: {:016x}", floor.fingerprint());

    if let Some(path) = args.json {
        let export = FloorExport {
            seed,
            fingerprint: floor.fingerprint(),
            width: floor.width(),
            height: floor.height(),
            rooms: floor.rooms().to_vec(),
            markers: floor.markers().cloned().collect(),
            tiles: (0..floor.height() as i32)
                .flat_map(|y| (0..floor.width() as i32).map(move |x| Loc::new(x, y)))
                .map(|loc| floor.tile_at(loc))
                .collect(),
        };
        let json =
            serde_json::to_string_pretty(&export).context("Failed to serialize floor JSON")?;
        fs::write(&path, json).with_context(|| format!("Failed to write floor JSON: {path}"))?;
        println!("Wrote {path}");
    }

    Ok(())
}
