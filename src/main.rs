//! `backoffice`: command line access to the shop admin tables.

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use serde_json::{Map, Value};

use shop_backoffice::api::credentials::{CredentialProvider, SessionCredentials, StaticToken};
use shop_backoffice::api::http::HttpAdminApi;
use shop_backoffice::controller::PagedCollectionController;
use shop_backoffice::domain::Entity;
use shop_backoffice::domain::coupon::{Coupon, IssuedCoupon};
use shop_backoffice::domain::filter::FilterCriteria;
use shop_backoffice::domain::inquiry::Inquiry;
use shop_backoffice::domain::notice::Notice;
use shop_backoffice::domain::point::PointEntry;
use shop_backoffice::domain::product::Product;
use shop_backoffice::domain::qna::Qna;
use shop_backoffice::domain::review::Review;
use shop_backoffice::domain::transaction::Transaction;
use shop_backoffice::domain::user::User;
use shop_backoffice::forms::auth::LoginForm;
use shop_backoffice::models::config::AdminConfig;
use shop_backoffice::pagination::Paginated;
use shop_backoffice::services;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "backoffice", about = "Shop back-office admin client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of an admin table.
    List {
        #[arg(value_enum)]
        table: Table,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Filter as `key=value`; repeat for several.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Sign in and print the issued token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Table {
    Users,
    Products,
    Coupons,
    IssuedCoupons,
    Points,
    Notices,
    Transactions,
    Qnas,
    Inquiries,
    Reviews,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Flattens ranked rows into objects and collects their columns in order
/// of first appearance.
fn rows_and_columns<E: Entity>(
    view: &Paginated<E>,
) -> CliResult<(Vec<Map<String, Value>>, Vec<String>)> {
    let mut rows = Vec::with_capacity(view.items.len());
    let mut columns: Vec<String> = vec!["rank".to_string()];
    for item in &view.items {
        let Value::Object(row) = serde_json::to_value(item)? else {
            continue;
        };
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        rows.push(row);
    }
    Ok((rows, columns))
}

fn write_csv<E: Entity>(view: &Paginated<E>, out: impl Write) -> CliResult<()> {
    let (rows, columns) = rows_and_columns(view)?;
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&columns)?;
    for row in &rows {
        writer.write_record(columns.iter().map(|column| cell(row.get(column))))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table<E: Entity>(view: &Paginated<E>, mut out: impl Write) -> CliResult<()> {
    let (rows, columns) = rows_and_columns(view)?;
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| cell(row.get(column))).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|line| line[i].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |line: &[String]| {
        line.iter()
            .zip(widths.iter())
            .map(|(text, &width)| format!("{text:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    writeln!(out, "{}", render(columns.as_slice()))?;
    for line in &cells {
        writeln!(out, "{}", render(line.as_slice()))?;
    }

    let pager: Vec<String> = view
        .pages
        .iter()
        .map(|page| {
            if *page == view.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    writeln!(
        out,
        "\npage {} of {} ({} rows)  {}",
        view.page,
        view.total_pages,
        view.total_items,
        pager.join(" ")
    )?;
    Ok(())
}

async fn list<E: Entity>(
    api: Arc<HttpAdminApi>,
    config: &AdminConfig,
    page: usize,
    filters: FilterCriteria,
    format: Format,
) -> CliResult<()> {
    let controller = PagedCollectionController::<E, _>::from_config(api, config);
    controller.load_page(page, Some(filters)).await?;
    let Some(view) = controller.paginated().await else {
        return Ok(());
    };

    let stdout = io::stdout();
    match format {
        Format::Json => {
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &view)?;
            writeln!(out)?;
        }
        Format::Csv => write_csv(&view, stdout.lock())?,
        Format::Table => write_table(&view, stdout.lock())?,
    }
    Ok(())
}

async fn run(command: Command, config: &AdminConfig) -> CliResult<()> {
    match command {
        Command::List {
            table,
            page,
            filters,
            format,
        } => {
            let credentials = Arc::new(StaticToken::new(config.token.clone()));
            let api = Arc::new(HttpAdminApi::from_config(config, credentials)?);
            let filters: FilterCriteria = filters
                .into_iter()
                .map(|(key, value)| (key, Some(value)))
                .collect();

            match table {
                Table::Users => list::<User>(api, config, page, filters, format).await,
                Table::Products => list::<Product>(api, config, page, filters, format).await,
                Table::Coupons => list::<Coupon>(api, config, page, filters, format).await,
                Table::IssuedCoupons => {
                    list::<IssuedCoupon>(api, config, page, filters, format).await
                }
                Table::Points => list::<PointEntry>(api, config, page, filters, format).await,
                Table::Notices => list::<Notice>(api, config, page, filters, format).await,
                Table::Transactions => {
                    list::<Transaction>(api, config, page, filters, format).await
                }
                Table::Qnas => list::<Qna>(api, config, page, filters, format).await,
                Table::Inquiries => list::<Inquiry>(api, config, page, filters, format).await,
                Table::Reviews => list::<Review>(api, config, page, filters, format).await,
            }
        }
        Command::Login { username, password } => {
            let session = Arc::new(SessionCredentials::new());
            let api = HttpAdminApi::from_config(config, session.clone())?;
            services::auth::login(&api, &session, LoginForm { username, password }).await?;
            if let Some(token) = session.bearer_token() {
                println!("{token}");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let config = match AdminConfig::load(&app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli.command, &config).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shop_backoffice::domain::page::Page;
    use shop_backoffice::domain::types::PageNumber;

    use super::*;

    fn notices() -> Paginated<Notice> {
        let rows: Vec<Notice> = serde_json::from_value(json!([
            { "NoticeID": 2, "Title": "Hours, updated", "Content": "" },
            { "NoticeID": 1, "Title": "Welcome", "Content": "" }
        ]))
        .unwrap();
        let page = Page::new(rows, PageNumber::FIRST, 10, 2);
        Paginated::new(&page, 5)
    }

    #[test]
    fn filter_needs_key_and_equals_sign() {
        assert_eq!(
            parse_filter("status=active"),
            Ok(("status".to_string(), "active".to_string()))
        );
        assert_eq!(parse_filter("query="), Ok(("query".to_string(), String::new())));
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn csv_output_starts_with_rank() {
        let mut out = Vec::new();
        write_csv(&notices(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert!(lines.next().unwrap().starts_with("rank,"));
        assert!(lines.next().unwrap().contains("\"Hours, updated\""));
    }

    #[test]
    fn table_output_marks_current_page() {
        let mut out = Vec::new();
        write_table(&notices(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with("page 1 of 1 (2 rows)  [1]\n"));
    }
}
