use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use registrar_cli::admin::create_admin;
use registrar_cli::seeder::{self, SEED_PASSWORD, SeedConfig};

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - administrative tools for the Registrar API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed a demo catalog: one program, intake, lecturer, offering and a batch of students
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "20")]
        students: usize,

        /// Days from now until the intake starts
        #[arg(long, default_value = "3")]
        opens_in_days: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateAdmin { username, password } => {
            handle_create_admin(&pool, username, password).await
        }
        Commands::Seed {
            students,
            opens_in_days,
        } => handle_seed(&pool, students, opens_in_days).await,
    }
}

async fn handle_create_admin(
    pool: &sqlx::postgres::PgPool,
    username: Option<String>,
    password: Option<String>,
) {
    let username = match username {
        Some(username) => username,
        None => prompt_or_exit(Input::new().with_prompt("Username").interact_text()),
    };

    let password = match password {
        Some(password) => password,
        None => prompt_or_exit(
            Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact(),
        ),
    };

    match create_admin(pool, &username, &password).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", username);
            println!("   ID: {}", id);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &sqlx::postgres::PgPool, students: usize, opens_in_days: i64) {
    let config = SeedConfig::new(students).with_opens_in_days(opens_in_days);

    match seeder::seed_catalog(pool, config).await {
        Ok(summary) => {
            println!("\n✅ Seeded demo catalog");
            println!("   Session offering: {}", summary.session_offering_id);
            println!("   Lecturer: {} / {}", summary.lecturer_email, SEED_PASSWORD);
            println!("   Students (password {}):", SEED_PASSWORD);
            for code in &summary.student_codes {
                println!("     {}", code);
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_or_exit<T>(answer: dialoguer::Result<T>) -> T {
    match answer {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read input: {}", e);
            std::process::exit(1);
        }
    }
}
