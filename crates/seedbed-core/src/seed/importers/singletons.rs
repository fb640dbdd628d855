//! Global and about single types

use serde_json::{Map, Value};

use crate::content_types::{ABOUT, GLOBAL};
use crate::errors::Result;
use crate::model::SeedRecord;
use crate::seed::runner::Seeder;

/// Global settings get `favicon.png` and `default-image.png` as the share image
pub fn import_global(seeder: &mut Seeder<'_>, global: &SeedRecord) -> Result<()> {
    let favicon = seeder.files.resolve(&["favicon.png"])?.to_value()?;
    let share_image = seeder.files.resolve(&["default-image.png"])?.to_value()?;

    let mut record = global.clone();
    let mut default_seo = match record.remove("defaultSeo") {
        Some(Value::Object(seo)) => seo,
        _ => Map::new(),
    };
    default_seo.insert("shareImage".to_string(), share_image);
    record.insert("favicon".to_string(), favicon);
    record.insert("defaultSeo".to_string(), Value::Object(default_seo));
    Seeder::publish(&mut record);

    seeder.writer.write(GLOBAL, record)?;
    Ok(())
}

pub fn import_about(seeder: &mut Seeder<'_>, about: &SeedRecord) -> Result<()> {
    let mut record = about.clone();
    seeder.rewrite_record_blocks(&mut record)?;
    Seeder::publish(&mut record);

    seeder.writer.write(ABOUT, record)?;
    Ok(())
}
