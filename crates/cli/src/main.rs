//! Schoolhouse CLI - database setup and school administration

mod logging;
mod output;
mod settings;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use logging::LogFormat;
use schoolhouse_core::application::{
    AddClassRequest, ClassService, TimeOffInput, TimeOffService,
};
use schoolhouse_core::domain::{parse_duration_minutes, PersonLookup};
use schoolhouse_core::port::SchoolQueries;
use schoolhouse_infra_sqlite::{
    apply_schema, create_pool, import_csv_dir, verify_csv_headers, SetupMode,
    SqliteSchoolRepository,
};
use settings::Settings;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "schoolhouse")]
#[command(about = "Elementary school records: setup and administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML or INI)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database URL, overrides the configuration
    #[arg(long, global = true, env = "SCHOOLHOUSE_DATABASE_URL")]
    database_url: Option<String>,

    #[arg(
        long,
        global = true,
        value_enum,
        env = "SCHOOLHOUSE_LOG_FORMAT",
        default_value = "pretty"
    )]
    log_format: LogFormat,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// Person lookup by full name or by phone number
#[derive(Args)]
#[group(required = true, multiple = false)]
struct LookupArgs {
    #[arg(long, num_args = 2, value_names = ["FIRST", "LAST"])]
    name: Option<Vec<String>>,

    #[arg(long)]
    phone: Option<String>,
}

impl LookupArgs {
    fn into_lookup(self) -> Result<PersonLookup> {
        if let Some([first_name, last_name]) = self.name.as_deref() {
            return Ok(PersonLookup::ByName {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
            });
        }
        self.phone
            .map(PersonLookup::ByPhone)
            .ok_or_else(|| anyhow!("Give --name FIRST LAST or --phone NUMBER"))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema and optionally load CSV seed files
    Setup(SetupArgs),

    #[command(flatten)]
    Admin(AdminCommand),
}

#[derive(Args)]
struct SetupArgs {
    /// Drop every table and recreate it
    #[arg(long)]
    clean: bool,

    /// Directory of <Table>.csv files (defaults to paths.data_dir)
    #[arg(long)]
    seed_dir: Option<PathBuf>,

    /// Only check the CSV files, do not touch the database
    #[arg(long)]
    verify: bool,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List rooms
    Rooms {
        #[arg(long)]
        min_capacity: Option<i64>,
    },

    /// List classes with their staff
    Classes {
        /// Grade (K, 1-5)
        #[arg(long)]
        grade: Option<String>,
    },

    /// Find staff by name or phone
    FindStaff {
        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Find students by full name
    FindStudent { first_name: String, last_name: String },

    /// Find guardians by name or phone
    FindGuardian {
        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Students and staff assigned to a class
    Roster { class_number: String },

    /// Classes a student attends
    StudentClasses { student_number: String },

    /// Guardians of a student with their addresses
    Guardians { student_number: String },

    /// Assign a staff member to a class and enroll students of its grade
    FillClass {
        class_number: String,
        staff_number: String,
    },

    /// Schedule a new class
    AddClass {
        #[arg(long)]
        room: String,

        /// Class type code (e.g. 3HR)
        #[arg(long)]
        class_type: String,

        /// Start time, HH:MM
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,

        /// Minutes ("45") or a span ("01:15:00")
        #[arg(long, value_parser = parse_duration)]
        duration: i64,
    },

    /// Record a staff absence
    RequestTimeOff {
        #[arg(long)]
        staff: String,

        /// YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,

        #[arg(long)]
        reason: String,

        #[arg(long)]
        substitute: Option<String>,
    },

    /// Existing coverage or available substitutes for an absence
    SuggestSubstitutes {
        #[arg(long)]
        staff: String,

        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,
    },

    /// Substitutes available for the whole date range
    AvailableSubstitutes {
        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,
    },
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| format!("'{}' is not a time (HH:MM)", s))
}

fn parse_duration(s: &str) -> Result<i64, String> {
    parse_duration_minutes(s).ok_or_else(|| format!("'{}' is not a duration", s))
}

async fn open_repository(url: &str) -> Result<Arc<SqliteSchoolRepository>> {
    let pool = create_pool(url)
        .await
        .with_context(|| format!("Failed to open database {}", url))?;
    Ok(Arc::new(SqliteSchoolRepository::new(pool)))
}

async fn setup(url: &str, args: SetupArgs, json: bool) -> Result<()> {
    if args.verify {
        let dir = args.seed_dir.context("--verify needs --seed-dir or paths.data_dir")?;
        let report = verify_csv_headers(&dir)?;
        if json {
            output::json(&report)?;
        } else {
            println!("{}", format!("Seed files in {}", dir.display()).cyan().bold());
            output::seed_report(&report);
        }
        let failed = report.failures().count();
        if failed > 0 {
            bail!("{} seed file(s) failed verification", failed);
        }
        return Ok(());
    }

    let pool = create_pool(url)
        .await
        .with_context(|| format!("Failed to open database {}", url))?;

    let mode = if args.clean {
        SetupMode::Recreate
    } else {
        SetupMode::Create
    };
    apply_schema(&pool, mode)
        .await
        .context("Schema setup failed (use --clean to drop and recreate)")?;

    let Some(dir) = args.seed_dir else {
        if !json {
            println!("{}", "✓ Schema created".green().bold());
        }
        return Ok(());
    };

    let report = import_csv_dir(&pool, &dir).await?;
    if json {
        output::json(&report)?;
    } else {
        println!("{}", "✓ Schema created".green().bold());
        println!();
        println!("{}", format!("Seed data from {}", dir.display()).cyan().bold());
        output::seed_report(&report);
        println!();
        println!("  {} {} rows loaded", "Total:".bold(), report.loaded_rows());
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} table(s) failed to load", failed);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_format)?;

    let settings = Settings::load(cli.config.as_deref())?;
    let url = match cli.database_url {
        Some(url) => url,
        None => settings.database_url()?,
    };
    info!(database = %url, "Schoolhouse v{}", schoolhouse_core::VERSION);

    let json = cli.json;

    match cli.command {
        Commands::Setup(mut args) => {
            args.seed_dir = args.seed_dir.or_else(|| settings.seed_dir());
            setup(&url, args, json).await
        }
        Commands::Admin(command) => {
            let repo = open_repository(&url).await?;
            run(command, repo, json).await
        }
    }
}

async fn run(command: AdminCommand, repo: Arc<SqliteSchoolRepository>, json: bool) -> Result<()> {
    let queries: &dyn SchoolQueries = repo.as_ref();

    match command {
        AdminCommand::Rooms { min_capacity } => {
            let rooms = queries.list_rooms(min_capacity).await?;
            if json {
                output::json(&rooms)?;
            } else {
                output::rooms(&rooms);
            }
        }

        AdminCommand::Classes { grade } => {
            let classes = queries.list_classes(grade.as_deref()).await?;
            if json {
                output::json(&classes)?;
            } else {
                output::classes(&classes);
            }
        }

        AdminCommand::FindStaff { lookup } => {
            let staff = queries.find_staff(&lookup.into_lookup()?).await?;
            if json {
                output::json(&staff)?;
            } else {
                output::staff(&staff);
            }
        }

        AdminCommand::FindStudent {
            first_name,
            last_name,
        } => {
            let students = queries.find_students(&first_name, &last_name).await?;
            if json {
                output::json(&students)?;
            } else {
                output::students(&students);
            }
        }

        AdminCommand::FindGuardian { lookup } => {
            let guardians = queries.find_guardians(&lookup.into_lookup()?).await?;
            if json {
                output::json(&guardians)?;
            } else {
                output::guardians(&guardians);
            }
        }

        AdminCommand::Roster { class_number } => {
            let roster = queries.class_assignments(&class_number).await?;
            if json {
                output::json(&roster)?;
            } else {
                println!("{}", format!("Class {}", class_number).cyan().bold());
                output::assignments(&roster);
            }
        }

        AdminCommand::StudentClasses { student_number } => {
            let classes = queries.classes_for_student(&student_number).await?;
            if json {
                output::json(&classes)?;
            } else {
                output::schedule(&classes);
            }
        }

        AdminCommand::Guardians { student_number } => {
            let guardians = queries.guardians_of_student(&student_number).await?;
            if json {
                output::json(&guardians)?;
            } else {
                output::guardians(&guardians);
            }
        }

        AdminCommand::FillClass {
            class_number,
            staff_number,
        } => {
            let service = ClassService::new(repo.clone(), repo.clone());
            let report = service
                .fill_class(&class_number, &staff_number)
                .await
                .with_context(|| format!("Failed to fill class {}", class_number))?;
            if json {
                output::json(&report)?;
            } else {
                output::fill_report(&report);
            }
        }

        AdminCommand::AddClass {
            room,
            class_type,
            start,
            duration,
        } => {
            let service = ClassService::new(repo.clone(), repo.clone());
            let class = service
                .add_class(AddClassRequest {
                    class_type_id: class_type,
                    room_number: room,
                    start_time: start,
                    duration_minutes: duration,
                })
                .await
                .context("Failed to add class")?;
            if json {
                output::json(&class)?;
            } else {
                output::class_created(&class);
            }
        }

        AdminCommand::RequestTimeOff {
            staff,
            start,
            end,
            reason,
            substitute,
        } => {
            let service = TimeOffService::new(repo.clone(), repo.clone());
            let details = service
                .request_time_off(TimeOffInput {
                    staff_number: staff,
                    start_date: start,
                    end_date: end,
                    reason,
                    substitute_number: substitute,
                })
                .await
                .context("Failed to record time off")?;
            if json {
                output::json(&details)?;
            } else {
                println!("{}", "✓ Time off recorded".green().bold());
                output::time_off(&details);
            }
        }

        AdminCommand::SuggestSubstitutes { staff, start, end } => {
            let service = TimeOffService::new(repo.clone(), repo.clone());
            let suggestion = service.suggest_substitutes(&staff, start, end).await?;
            if json {
                output::json(&suggestion)?;
            } else {
                output::suggestion(&suggestion);
            }
        }

        AdminCommand::AvailableSubstitutes { start, end } => {
            if start > end {
                bail!("--start {} is after --end {}", start, end);
            }
            let substitutes = queries.substitutes_available(start, end).await?;
            if json {
                output::json(&substitutes)?;
            } else {
                output::substitutes(&substitutes);
            }
        }
    }

    Ok(())
}
