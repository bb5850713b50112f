//! # sdcoach-schema 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 명령행 인자 파싱 (clap)
//! 2. 환경변수(.env) 로딩과 설정 생성
//! 3. 로깅(tracing) 초기화
//! 4. 서브커맨드 실행 (render는 DB 연결 없이, 나머지는 연결 후)
//!
//! ```text
//! sdcoach-schema init [--dry-run]      # 테이블/인덱스/확장 생성
//! sdcoach-schema migrate [--dry-run]   # 예전 스키마를 현재 모양으로
//! sdcoach-schema up [--dry-run]        # init 후 migrate
//! sdcoach-schema columns [--table T]   # 컬럼 메타데이터 확인
//! sdcoach-schema render <init|migrate> # psql용 SQL 스크립트 출력
//! ```

use anyhow::Result; // anyhow::Result<T>: 어떤 에러든 담을 수 있는 범용 Result (main 전용)
use clap::{Parser, Subcommand, ValueEnum}; // clap derive: 구조체/열거형 선언만으로 인자 파서 생성
use sdcoach_schema::config::Config;
use sdcoach_schema::db::{self, MigrationReport, Mode, Report};
use sdcoach_schema::models::ColumnInfo;
use sdcoach_schema::plan::{Plan, PlanKind};
use sdcoach_schema::schema::sessions;
use sqlx::PgPool;
// SubscriberExt: .with()로 레이어를 쌓는 메서드, SubscriberInitExt: .init()으로 전역 등록
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// #[derive(Parser)]: 필드 선언을 바탕으로 `Cli::parse()`를 자동 생성합니다.
// 필드의 /// 문서 주석은 그대로 `--help` 설명이 됩니다.
#[derive(Parser)]
#[command(
    name = "sdcoach-schema",
    version,
    about = "Initialize and migrate the interview coach PostgreSQL schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// PostgreSQL connection string (overrides DATABASE_URL / DB_* settings)
    /// global = true: 어느 서브커맨드 뒤에 써도 인식됩니다.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// 최상위 서브커맨드
///
/// DB 연결이 필요 없는 `render`와, 연결이 필요한 나머지(`DbCommand`)로 나뉩니다.
/// `#[command(flatten)]` 덕분에 사용자에게는 모두 같은 단계의 서브커맨드로 보입니다.
#[derive(Subcommand)]
enum Commands {
    /// Print a plan as an idempotent SQL script
    Render {
        #[arg(value_enum)]
        plan: RenderTarget,
    },
    #[command(flatten)]
    Db(DbCommand),
}

/// 데이터베이스에 연결해서 실행하는 서브커맨드
#[derive(Subcommand)]
enum DbCommand {
    /// Enable extensions and create tables, indexes and triggers
    Init {
        /// Evaluate guards only; change nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Bring an existing schema up to the current shape
    Migrate {
        #[arg(long)]
        dry_run: bool,
    },
    /// Run init, then migrate
    Up {
        #[arg(long)]
        dry_run: bool,
    },
    /// List column metadata for a table
    Columns {
        #[arg(long, default_value = sessions::TABLE)]
        table: String,
    },
}

// ValueEnum: `render init` / `render migrate`처럼 정해진 값만 받는 인자
#[derive(Clone, Copy, ValueEnum)]
enum RenderTarget {
    Init,
    Migrate,
}

impl From<RenderTarget> for PlanKind {
    fn from(target: RenderTarget) -> Self {
        match target {
            RenderTarget::Init => PlanKind::Init,
            RenderTarget::Migrate => PlanKind::Migrate,
        }
    }
}

fn mode(dry_run: bool) -> Mode {
    if dry_run {
        Mode::DryRun
    } else {
        Mode::Apply
    }
}

// #[tokio::main]: async main 함수를 Tokio 런타임 위에서 실행하도록 변환하는 매크로
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 설정 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다
    dotenvy::dotenv().ok();
    let mut config = Config::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }

    // ── 로깅 초기화 ──
    // RUST_LOG가 없으면 이 크레이트는 info, sqlx는 warn
    // 개발 환경은 사람이 읽는 포맷, 그 외에는 JSON 한 줄 로그
    // (Option<Layer>도 Layer이므로 None인 쪽은 아무것도 출력하지 않습니다)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sdcoach_schema=info,sqlx=warn".into());
    let (plain, json) = if config.is_development() {
        (Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)), None)
    } else {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();

    match cli.command {
        // render는 DB가 필요 없습니다
        Commands::Render { plan } => {
            print!("{}", Plan::build(plan.into()).render_script());
        }
        Commands::Db(command) => {
            tracing::info!(environment = %config.environment, "Starting sdcoach-schema");
            let pool = db::connect(&config).await?;
            let result = run(&pool, command, cli.json).await;
            // 에러가 나도 연결은 정리하고 나서 돌려줍니다
            pool.close().await;
            result?;
        }
    }

    Ok(())
}

/// 연결된 풀로 서브커맨드 하나를 실행합니다.
async fn run(pool: &PgPool, command: DbCommand, json: bool) -> Result<()> {
    match command {
        DbCommand::Init { dry_run } => {
            let report = db::initialize(pool, mode(dry_run)).await?;
            print_report(&report, json)?;
        }
        DbCommand::Migrate { dry_run } => {
            let report = db::migrate(pool, mode(dry_run)).await?;
            print_migration(&report, json)?;
        }
        DbCommand::Up { dry_run } => {
            let init = db::initialize(pool, mode(dry_run)).await?;
            print_report(&init, json)?;
            // 드라이런에서는 init이 테이블을 만들지 않았으므로 migrate 전제가 깨질 수 있습니다
            if dry_run && !init.is_noop() {
                tracing::warn!("Initializer has pending steps; skipping migrate dry run");
            } else {
                let migration = db::migrate(pool, mode(dry_run)).await?;
                print_migration(&migration, json)?;
            }
        }
        DbCommand::Columns { table } => {
            let columns = db::catalog::list_columns(pool, &table).await?;
            if columns.is_empty() {
                tracing::warn!(table = %table, "Table has no columns or does not exist");
            }
            print_columns(&columns, json)?;
        }
    }
    Ok(())
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!(
        "== {} plan{} ==",
        report.plan.as_str(),
        if report.dry_run { " (dry run)" } else { "" }
    );
    for step in &report.steps {
        println!("{:<8} {}", format!("{:?}", step.outcome).to_lowercase(), step.step);
    }
    Ok(())
}

fn print_migration(report: &MigrationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    print_report(&report.report, false)?;
    println!();
    println!("== {} columns ==", sessions::TABLE);
    print_columns(&report.sessions_columns, false)
}

fn print_columns(columns: &[ColumnInfo], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(columns)?);
        return Ok(());
    }
    for col in columns {
        println!(
            "{:>3}  {:<28} {:<26} {:<9} {}",
            col.ordinal_position,
            col.column_name,
            col.data_type,
            if col.is_nullable { "NULL" } else { "NOT NULL" },
            col.column_default.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
