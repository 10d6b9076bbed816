use dialoguer::{Input, Password};
use dotenvy::dotenv;
use schoolhub_cli::seeder::{self, SchoolCreds, SeedConfig};
use schoolhub_config::ServerConfig;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a school account
    CreateSchool {
        /// Name of the school
        #[arg(short = 'n', long)]
        school_name: Option<String>,

        /// Name of the school's owner
        #[arg(short = 'o', long)]
        owner_name: Option<String>,

        /// Email address used to log in
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake schools and everything they own
    Seed {
        /// Number of schools to create
        #[arg(short = 's', long, default_value = "3")]
        schools: usize,

        /// Number of classes per school
        #[arg(long, default_value = "6")]
        classes: usize,

        /// Number of subjects per school
        #[arg(long, default_value = "8")]
        subjects: usize,

        /// Number of teachers per school
        #[arg(long, default_value = "5")]
        teachers: usize,

        /// Number of students per class
        #[arg(long, default_value = "20")]
        students: usize,

        /// Number of schedule slots per class
        #[arg(long, default_value = "4")]
        schedules: usize,

        /// Number of notices per school
        #[arg(long, default_value = "5")]
        notices: usize,
    },
    /// Remove every seeded school and its data
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = ServerConfig::from_env();
    let Some(database_url) = config.database_url.as_deref() else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match schoolhub_db::connect(database_url, 5).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = schoolhub_db::run_migrations(&pool).await {
        eprintln!("❌ Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateSchool {
            school_name,
            owner_name,
            email,
            password,
        } => handle_create_school(&pool, school_name, owner_name, email, password).await,
        Commands::Seed {
            schools,
            classes,
            subjects,
            teachers,
            students,
            schedules,
            notices,
        } => {
            let config = SeedConfig {
                schools,
                classes_per_school: classes,
                subjects_per_school: subjects,
                teachers_per_school: teachers,
                students_per_class: students,
                schedules_per_class: schedules,
                notices_per_school: notices,
            };
            if let Err(e) = seeder::seed_all(&pool, config).await {
                eprintln!("\n❌ Error seeding database: {}", e);
                std::process::exit(1);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = seeder::clear_all(&pool).await {
                eprintln!("\n❌ Error clearing seeded data: {}", e);
                std::process::exit(1);
            }
        }
    }

    schoolhub_db::close(&pool).await;
}

fn prompt(label: &str) -> String {
    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_school(
    pool: &sqlx::PgPool,
    school_name: Option<String>,
    owner_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let school_name = school_name.unwrap_or_else(|| prompt("School name"));
    let owner_name = owner_name.unwrap_or_else(|| prompt("Owner name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));

    let password = match password {
        Some(password) => password,
        None => match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        },
    };

    let creds = SchoolCreds {
        school_name,
        owner_name,
        email,
        password,
    };

    match seeder::create_school(pool, &creds).await {
        Ok(Some(id)) => {
            println!("\n✅ School created successfully!");
            println!("   ID: {}", id);
            println!("   Name: {}", creds.school_name);
            println!("   Email: {}", creds.email);
        }
        Ok(None) => {
            eprintln!("\n❌ A school with this email already exists");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating school: {}", e);
            std::process::exit(1);
        }
    }
}
