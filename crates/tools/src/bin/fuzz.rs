use anyhow::Result;
use clap::Parser;
use delvegen_core::r#gen::{Marker, TileKind};
use delvegen_core::{FloorConfig, Loc, generate_floor};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    floors: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} floors...", args.seed, args.floors);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let config = FloorConfig::default();

    for _ in 0..args.floors {
        let floor_seed = rng.next_u64();
        let floor = generate_floor(floor_seed, &config);
        let replay = generate_floor(floor_seed, &config);
        assert_eq!(
            floor.fingerprint(),
            replay.fingerprint(),
            "Invariant failed: seed {floor_seed} did not replay"
        );

        let width = floor.width() as i32;
        let height = floor.height() as i32;
        for rect in floor.rooms() {
            assert!(
                rect.origin.x >= 1
                    && rect.origin.y >= 1
                    && rect.right() <= width - 1
                    && rect.bottom() <= height - 1,
                "Invariant failed: room outside canvas on seed {floor_seed}"
            );
            for loc in rect.tiles() {
                assert!(
                    floor.tile_at(loc) == TileKind::Floor,
                    "Invariant failed: wall inside room on seed {floor_seed}"
                );
            }
        }

        let mut entrances = 0;
        let mut exits = 0;
        for placed in floor.markers() {
            assert!(
                floor.tile_at(placed.loc) != TileKind::Wall || placed.loc == Loc::ORIGIN,
                "Invariant failed: marker inside wall on seed {floor_seed}"
            );
            match placed.marker {
                Marker::Entrance => entrances += 1,
                Marker::Exit => exits += 1,
                Marker::Treasure => {}
            }
        }
        assert_eq!(entrances, 1, "Invariant failed: entrance count on seed {floor_seed}");
        assert_eq!(exits, 1, "Invariant failed: exit count on seed {floor_seed}");
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
