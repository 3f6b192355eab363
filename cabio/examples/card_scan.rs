// Card scan example
//
// Emulates a card tap from ID files: pass a directory holding `aime.txt`
// and/or `felica.txt` (a FeliCa ID is generated there when neither exists).

use std::path::PathBuf;
use std::sync::Arc;

use cabio::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("DEVICE"));

    let config = AimeConfig {
        aime_path: dir.join("aime.txt"),
        felica_path: dir.join("felica.txt"),
        ..AimeConfig::default()
    };
    // there is no keyboard here, so the scan key is always held
    let reader = CardReader::from_config(config, Arc::new(FixedKey(true)), None)?;
    reader.init()?;

    match reader.poll(UnitNo::PRIMARY) {
        CardType::Iso15693 => {
            let id = reader.aime_id(UnitNo::PRIMARY)?;
            println!("AiMe card: {}", bytes_to_hex_spaced_upper(id.as_bytes()));
        }
        CardType::Iso18092 => {
            let id = reader.felica_id(UnitNo::PRIMARY)?;
            println!("FeliCa card: IDm {:016X}", id.as_u64());
        }
        CardType::None => println!("no card"),
    }

    reader.fini();
    Ok(())
}
