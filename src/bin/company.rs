// Company tracker run: departments, employees, projects and tickets
use std::path::Path;

use tablerun_lib::scenario::company::Company;
use tablerun_lib::settings::Settings;

fn company_db(settings: &Settings) -> &Path {
    &settings.company_db
}

fn main() -> anyhow::Result<()> {
    tablerun_lib::run(&Company, company_db)
}
