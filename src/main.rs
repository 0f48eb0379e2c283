use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gestor_empleados::{
    ReportError, ReportKind, SyncBridge, TableRow, Workspace,
    config::load_settings,
    core::{
        form::DepartmentForm,
        loader,
        store::{Department, is_known_department_name},
        sync::TABLE_HEADERS,
    },
    reports,
};

#[derive(Parser)]
#[command(name = "gestor_empleados")]
#[command(about = "Manage departments and employees stored in CSV files")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding departamentos.csv and empleados.csv
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop application (default)
    #[cfg(feature = "gui")]
    Gui,
    #[command(flatten)]
    Data(DataCommand),
}

/// Commands that work on the CSV files directly.
#[derive(Subcommand)]
enum DataCommand {
    /// Print the departments table
    List,
    /// Add a department
    Add {
        /// Department id; a free four digit id is generated when omitted
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        /// Required staff
        #[arg(long)]
        staff: String,
        /// Budget, `.` or `,` as decimal separator
        #[arg(long)]
        budget: String,
        /// Available hours, `.` or `,` as decimal separator
        #[arg(long)]
        hours: String,
    },
    /// Update the department currently stored under OLD_ID
    Update {
        old_id: i64,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        staff: Option<String>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        hours: Option<String>,
    },
    /// Delete a department
    Delete { id: i64 },
    /// Add every valid department row from a CSV file
    Import {
        #[arg(value_name = "CSV")]
        path: PathBuf,
    },
    /// Render a chart report to the reports directory
    Report {
        #[arg(value_enum)]
        kind: ReportArg,
    },
    /// Print a free department id
    GenerateId,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportArg {
    /// Employees per department (pie)
    Departamentos,
    /// Employee ages (histogram)
    Edades,
    /// Required vs actual staff (bars)
    Comparativo,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Departamentos => ReportKind::EmployeesByDepartment,
            ReportArg::Edades => ReportKind::AgeHistogram,
            ReportArg::Comparativo => ReportKind::RequiredVsActual,
        }
    }
}

const ID_ATTEMPTS: usize = 64;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_table(rows: &[TableRow]) {
    let mut widths = TABLE_HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let line = |cells: [&str; 5]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("{}", line(TABLE_HEADERS));
    for row in rows {
        println!("{}", line(row.cells.each_ref().map(String::as_str)));
    }
    println!("\n{} department(s)", rows.len());
}

fn warn_unknown_name(name: &str) {
    if !is_known_department_name(name) {
        eprintln!("Warning: '{name}' is not one of the standard department names");
    }
}

fn save(workspace: &Workspace) -> anyhow::Result<()> {
    if workspace.autosave_departments()? {
        println!("Saved {:?}", workspace.settings.departments_path());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut settings = load_settings()?;
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }

    let command = match args.command {
        #[cfg(feature = "gui")]
        None | Some(Command::Gui) => {
            return gestor_empleados::gui::run(settings)
                .map_err(|err| anyhow::anyhow!("GUI failed: {err}"));
        }
        #[cfg(not(feature = "gui"))]
        None => DataCommand::List,
        Some(Command::Data(command)) => command,
    };

    let (mut workspace, open_report) = Workspace::open(settings);
    let mut bridge = SyncBridge::new(Vec::<TableRow>::new());

    match command {
        DataCommand::List => {
            for (what, err) in open_report.failures() {
                eprintln!("Warning: could not load {what}: {err}");
            }
            bridge.refresh(&workspace.departments);
            print_table(bridge.view());
        }
        DataCommand::Add {
            id,
            name,
            staff,
            budget,
            hours,
        } => {
            let id = match id {
                Some(id) => id,
                None => workspace
                    .departments
                    .generate_free_id(ID_ATTEMPTS)
                    .context("Could not find a free id; pass --id explicitly")?
                    .to_string(),
            };
            warn_unknown_name(&name);
            let form = DepartmentForm {
                id,
                name,
                required_staff: staff,
                budget,
                available_hours: hours,
            };
            let candidate = form.to_candidate()?;
            let new_id = candidate.id;
            bridge.create(&mut workspace.departments, candidate)?;
            println!("Added department {new_id}");
            save(&workspace)?;
        }
        DataCommand::Update {
            old_id,
            id,
            name,
            staff,
            budget,
            hours,
        } => {
            let current = bridge
                .select(&workspace.departments, old_id)
                .with_context(|| format!("No department with id {old_id}"))?;
            let mut form = DepartmentForm::from_department(current);
            if let Some(id) = id {
                form.id = id;
            }
            if let Some(name) = name {
                warn_unknown_name(&name);
                form.name = name;
            }
            if let Some(staff) = staff {
                form.required_staff = staff;
            }
            if let Some(budget) = budget {
                form.budget = budget;
            }
            if let Some(hours) = hours {
                form.available_hours = hours;
            }
            let candidate: Department = form.to_candidate()?;
            let new_id = bridge.update(&mut workspace.departments, candidate)?;
            println!("Updated department {old_id} -> {new_id}");
            save(&workspace)?;
        }
        DataCommand::Delete { id } => {
            let existed = workspace.departments.contains(id);
            bridge.delete(&mut workspace.departments, Some(id))?;
            if existed {
                println!("Deleted department {id}");
                save(&workspace)?;
            } else {
                println!("No department with id {id}; nothing deleted");
            }
        }
        DataCommand::Import { path } => {
            let records = loader::load::<Department>(&path)?;
            let summary = loader::import_into(&mut workspace.departments, records);
            println!(
                "Imported {} department(s), skipped {}",
                summary.imported, summary.skipped
            );
            if summary.imported > 0 {
                save(&workspace)?;
            }
        }
        DataCommand::Report { kind } => {
            let kind = ReportKind::from(kind);
            match reports::generate(
                kind,
                workspace.departments.find_all(),
                workspace.employees.find_all(),
                &workspace.settings.reports_dir,
            ) {
                Ok(path) => println!("{}", path.display()),
                Err(err) => match err.downcast_ref::<ReportError>() {
                    Some(no_data) => eprintln!("Warning: {kind}: {no_data}"),
                    None => return Err(err),
                },
            }
        }
        DataCommand::GenerateId => {
            let id = workspace
                .departments
                .generate_free_id(ID_ATTEMPTS)
                .context("Could not find a free id")?;
            println!("{id}");
        }
    }

    Ok(())
}
