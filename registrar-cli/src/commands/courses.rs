//! `registrar courses`: catalog listing.

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use registrar_core::Course;

use crate::CatalogArgs;

/// Arguments for `registrar courses`.
#[derive(Args, Debug)]
pub struct CoursesArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl CoursesArgs {
    pub fn run(self) -> Result<()> {
        let registry = self.catalog.load_registry()?;
        let courses = registry.list_courses();
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&courses).context("failed to serialize catalog JSON")?
            );
            return Ok(());
        }
        println!("{}", course_table(&courses));
        Ok(())
    }
}

#[derive(Tabled)]
struct CourseTableRow {
    #[tabled(rename = "code")]
    code: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "description")]
    description: String,
    #[tabled(rename = "capacity")]
    capacity: u32,
    #[tabled(rename = "enrolled")]
    enrolled: u32,
    #[tabled(rename = "seats left")]
    seats_left: u32,
    #[tabled(rename = "status")]
    status: &'static str,
}

/// Rounded table with one row per course, in the order given.
pub fn course_table(courses: &[&Course]) -> Table {
    let rows: Vec<CourseTableRow> = courses
        .iter()
        .map(|course| CourseTableRow {
            code: course.code.0.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            capacity: course.capacity(),
            enrolled: course.enrolled(),
            seats_left: course.seats_left(),
            status: if course.is_full() { "full" } else { "open" },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}
