use std::error::Error;
use std::fs::File;
use std::io::Write;

use padmap::config::{path::get_schema_path, MapperConfig};
use schemars::schema_for;

fn main() -> Result<(), Box<dyn Error>> {
    let mapper_config_schema = schema_for!(MapperConfig);
    let path = get_schema_path().join("mapper_config_v1.json");
    let mut file = File::create(&path)?;
    write!(
        file,
        "{}",
        serde_json::to_string_pretty(&mapper_config_schema)?
    )?;
    println!("Wrote schema to {}", path.display());

    Ok(())
}
