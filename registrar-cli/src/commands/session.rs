//! `registrar session`: line-oriented registration session over stdin.
//!
//! Each non-blank line is one command (`#` starts a comment line). Rejected
//! commands print the registry's error to stderr and the session carries on.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use registrar_core::{CourseCode, RegistrationError, Registry, StudentId};

use super::courses::course_table;
use crate::CatalogArgs;

/// Arguments for `registrar session`.
#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Exit non-zero at the end if any command was rejected.
    #[arg(long)]
    pub strict: bool,
}

impl SessionArgs {
    pub fn run(self) -> Result<()> {
        let mut registry = self.catalog.load_registry()?;
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();

        let mut session = Session::new(&mut registry);
        let mut lines = stdin.lock().lines();
        loop {
            if interactive {
                print!("registrar> ");
                io::stdout().flush().context("failed to flush prompt")?;
            }
            let Some(line) = lines.next() else { break };
            let line = line.context("failed to read command from stdin")?;
            if session.execute_line(&line) == Flow::Exit {
                break;
            }
        }

        tracing::info!(
            executed = session.executed,
            rejected = session.rejected,
            "session finished"
        );
        if self.strict && session.rejected > 0 {
            anyhow::bail!("{} command(s) were rejected", session.rejected);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session grammar
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Add a student with no courses.
    AddStudent {
        #[arg(allow_hyphen_values = true)]
        id: String,
        /// Full name; may contain spaces.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Show the catalog with live enrollment.
    Courses,

    /// Register a student for one or more courses, each on its own.
    Register {
        #[arg(allow_hyphen_values = true)]
        id: String,
        /// Course codes, separated by spaces and/or commas.
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        codes: Vec<String>,
    },

    /// Drop a course for a student.
    Drop {
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[arg(allow_hyphen_values = true)]
        code: String,
    },

    /// Show a student's registered courses.
    Student {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// List all students.
    Students,

    /// Show this command list.
    Help,

    /// End the session.
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

struct Session<'a> {
    registry: &'a mut Registry,
    executed: usize,
    rejected: usize,
}

impl<'a> Session<'a> {
    fn new(registry: &'a mut Registry) -> Self {
        Self {
            registry,
            executed: 0,
            rejected: 0,
        }
    }

    fn execute_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Flow::Continue;
        }

        let parsed = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                print!("{err}");
                return Flow::Continue;
            }
            Err(err) => {
                self.rejected += 1;
                eprint!("{err}");
                return Flow::Continue;
            }
        };

        self.executed += 1;
        match self.apply(parsed.command) {
            Ok(flow) => flow,
            Err(err) => {
                self.report(&err);
                Flow::Continue
            }
        }
    }

    fn report(&mut self, err: &RegistrationError) {
        self.rejected += 1;
        eprintln!("{} {err}", "error:".red().bold());
    }

    fn apply(&mut self, command: SessionCommand) -> Result<Flow, RegistrationError> {
        match command {
            SessionCommand::AddStudent { id, name } => {
                let student = self.registry.add_student(id, name.join(" "))?;
                println!("{} Added student '{}' ({})", "✓".green(), student.id, student.name);
            }
            SessionCommand::Courses => {
                println!("{}", course_table(&self.registry.list_courses()));
            }
            SessionCommand::Register { id, codes } => {
                let id = StudentId::from(id);
                self.registry.student(&id)?;
                for code in split_codes(&codes) {
                    if let Err(err) = self.register_one(&id, &code) {
                        self.report(&err);
                    }
                }
            }
            SessionCommand::Drop { id, code } => {
                let (id, code) = (StudentId::from(id), CourseCode::from(code));
                self.registry.drop_course(&id, &code)?;
                println!("{} Dropped {} for '{}'", "✓".green(), code, id);
            }
            SessionCommand::Student { id } => {
                let id = StudentId::from(id);
                let student = self.registry.student(&id)?;
                let courses = self.registry.get_student_courses(&id)?;
                if courses.is_empty() {
                    println!("{} is not registered for any courses.", student.name);
                } else {
                    println!("{}'s registered courses:", student.name.bold());
                    println!("{}", course_table(&courses));
                }
            }
            SessionCommand::Students => print_students(self.registry),
            SessionCommand::Help => {
                println!("{}", SessionLine::command().render_help());
            }
            SessionCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn register_one(&mut self, id: &StudentId, code: &CourseCode) -> Result<(), RegistrationError> {
        self.registry.register_student(id, code)?;
        let course = self.registry.course(code)?;
        println!(
            "{} Registered '{}' for {} ({})",
            "✓".green(),
            id,
            code,
            course.title
        );
        Ok(())
    }
}

/// `["CS101,MATH201", "BIO301"]` -> three codes; empty pieces are skipped.
fn split_codes(args: &[String]) -> Vec<CourseCode> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(CourseCode::from)
        .collect()
}

#[derive(Tabled)]
struct StudentTableRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "courses")]
    courses: usize,
    #[tabled(rename = "admitted")]
    admitted: String,
}

fn print_students(registry: &Registry) {
    let students = registry.list_students();
    if students.is_empty() {
        println!("No students registered.");
        return;
    }
    let rows: Vec<StudentTableRow> = students
        .into_iter()
        .map(|student| StudentTableRow {
            id: student.id.0.clone(),
            name: student.name.clone(),
            courses: student.course_count(),
            admitted: student.admitted_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
