// Salon booking run: masters, clients, services and appointments
use std::path::Path;

use tablerun_lib::scenario::salon::Salon;
use tablerun_lib::settings::Settings;

fn salon_db(settings: &Settings) -> &Path {
    &settings.salon_db
}

fn main() -> anyhow::Result<()> {
    tablerun_lib::run(&Salon, salon_db)
}
